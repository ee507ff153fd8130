use super::common::{block_comment, double_quoted, line_comment, offset_of, single_quoted};
use super::SqlTextError;
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag};
use nom::character::complete::char;
use nom::combinator::{consumed, map, not};
use nom::error::{ParseError, VerboseError};
use nom::multi::many0;
use nom::sequence::terminated;
use nom::IResult;

enum Fragment<'a> {
    Code(&'a str),
    Comment(&'a str),
}

fn fragment<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Fragment<'a>, E> {
    alt((
        map(line_comment, Fragment::Comment),
        map(block_comment, Fragment::Comment),
        map(single_quoted, Fragment::Code),
        map(double_quoted, Fragment::Code),
        map(is_not(";'\"-/"), Fragment::Code),
        map(tag("-"), Fragment::Code),
        //a block comment opener without its closer stops the statement here
        map(terminated(tag("/"), not(char('*'))), Fragment::Code),
    ))(input)
}

fn has_code(fragments: &[Fragment]) -> bool {
    fragments.iter().any(|f| match f {
        Fragment::Code(c) => !c.trim().is_empty(),
        Fragment::Comment(_) => false,
    })
}

/// Splits SQL text on top level semicolons. Blank and comment only segments are dropped,
/// each returned statement is trimmed and has no terminating semicolon.
pub fn split_statements(input: &str) -> Result<Vec<&str>, SqlTextError> {
    let mut statements = vec![];
    let mut remaining = input;

    loop {
        let (rest, (text, fragments)) =
            consumed(many0(fragment::<VerboseError<&str>>))(remaining)
                .map_err(|_| SqlTextError::Unterminated(offset_of(input, remaining)))?;

        if has_code(&fragments) {
            statements.push(text.trim());
        }

        if rest.is_empty() {
            return Ok(statements);
        }

        match char::<&str, VerboseError<&str>>(';')(rest) {
            Ok((after, _)) => remaining = after,
            Err(_) => return Err(SqlTextError::Unterminated(offset_of(input, rest))),
        }
    }
}
