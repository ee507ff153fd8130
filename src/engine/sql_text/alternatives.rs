//! A golden query may list several acceptable answers. Statements separated by `;` are
//! independent alternatives, and `{a, b}` groups inside a statement mean "any non-empty
//! selection of these columns", e.g.
//!
//! `SELECT {u.id, u.name} FROM users u` expands to selecting `u.id`, `u.name`, and `u.id, u.name`.
use super::common::{double_quoted, offset_of, single_quoted};
use super::{split_statements, SqlTextError};
use nom::branch::alt;
use nom::bytes::complete::{is_not, take_until};
use nom::character::complete::char;
use nom::combinator::map;
use nom::error::{ParseError, VerboseError};
use nom::multi::many0;
use nom::sequence::delimited;
use nom::IResult;

pub const MAX_GOLDEN_ALTERNATIVES: usize = 4096;

enum Piece<'a> {
    Literal(&'a str),
    Group(&'a str),
}

fn piece<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Piece<'a>, E> {
    alt((
        map(single_quoted, Piece::Literal),
        map(double_quoted, Piece::Literal),
        map(delimited(char('{'), take_until("}"), char('}')), Piece::Group),
        map(is_not("'\"{"), Piece::Literal),
    ))(input)
}

/// Every non-empty combination of the options, smaller selections first, options kept
/// in their written order.
fn combinations(options: &[&str]) -> Vec<String> {
    fn choose(
        options: &[&str],
        size: usize,
        start: usize,
        current: &mut Vec<usize>,
        out: &mut Vec<String>,
    ) {
        if current.len() == size {
            let picked: Vec<&str> = current.iter().map(|i| options[*i]).collect();
            out.push(picked.join(", "));
            return;
        }
        for i in start..options.len() {
            current.push(i);
            choose(options, size, i + 1, current, out);
            current.pop();
        }
    }

    let mut out = vec![];
    for size in 1..=options.len() {
        choose(options, size, 0, &mut Vec::with_capacity(size), &mut out);
    }
    out
}

fn expand_statement(statement: &str, budget: usize) -> Result<Vec<String>, SqlTextError> {
    let (rest, pieces) = many0(piece::<VerboseError<&str>>)(statement)
        .map_err(|_| SqlTextError::UnbalancedGroup(0))?;
    if !rest.is_empty() {
        return Err(SqlTextError::UnbalancedGroup(offset_of(statement, rest)));
    }

    let mut variants = vec![String::new()];
    let mut consumed = statement;
    for p in pieces {
        match p {
            Piece::Literal(text) => {
                for v in variants.iter_mut() {
                    v.push_str(text);
                }
                consumed = &consumed[text.len()..];
            }
            Piece::Group(inner) => {
                let options: Vec<&str> = inner
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .collect();
                if options.is_empty() {
                    return Err(SqlTextError::EmptyGroup(offset_of(statement, consumed)));
                }

                //2^n - 1 choices, refuse before building them
                let choice_count = u32::try_from(options.len())
                    .ok()
                    .and_then(|n| 1usize.checked_shl(n))
                    .map(|c| c - 1)
                    .unwrap_or(usize::MAX);
                if choice_count.saturating_mul(variants.len()) > budget {
                    return Err(SqlTextError::TooManyAlternatives(MAX_GOLDEN_ALTERNATIVES));
                }

                let choices = combinations(&options);
                variants = variants
                    .iter()
                    .flat_map(|v| choices.iter().map(move |c| format!("{}{}", v, c)))
                    .collect();
                consumed = &consumed[inner.len() + 2..];
            }
        }
    }

    Ok(variants)
}

/// Expands a golden query field into every concrete query it accepts, in written order.
pub fn expand_alternatives(golden: &str) -> Result<Vec<String>, SqlTextError> {
    let mut expanded: Vec<String> = vec![];

    for statement in split_statements(golden)? {
        let budget = MAX_GOLDEN_ALTERNATIVES - expanded.len();
        let variants = expand_statement(statement, budget)?;
        if variants.len() > budget {
            return Err(SqlTextError::TooManyAlternatives(MAX_GOLDEN_ALTERNATIVES));
        }
        expanded.extend(variants);
    }

    Ok(expanded)
}
