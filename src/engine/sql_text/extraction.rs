//! Pulls the query out of a chat style completion.
//!
//! Models wrap answers in prose and markdown fences, often unevenly: missing closing
//! fences, fences labelled `SQL` or `postgresql`, or an explanation in another fenced
//! language ahead of the query.
use super::{split_statements, SqlTextError};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_until, take_while};
use nom::combinator::{opt, rest};
use nom::error::ParseError;
use nom::sequence::tuple;
use nom::IResult;

const SQL_FENCE_LABELS: [&str; 5] = ["sql", "postgresql", "postgres", "pgsql", "psql"];

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// A fence at the head of the input, returns (label, body). A fence that is never
/// closed runs to the end of the text.
fn fence<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (&'a str, &'a str), E> {
    let (input, (_, label, body, _)) = tuple((
        tag("```"),
        take_while(is_label_char),
        alt((take_until("```"), rest)),
        opt(tag("```")),
    ))(input)?;
    Ok((input, (label, body)))
}

fn is_sql_label(label: &str) -> bool {
    label.is_empty() || SQL_FENCE_LABELS.iter().any(|l| l.eq_ignore_ascii_case(label))
}

fn fenced_body(text: &str) -> Option<&str> {
    let mut remaining = text;
    while let Ok((at_fence, _)) = take_until::<_, _, nom::error::Error<&str>>("```")(remaining) {
        let (after, (label, body)) = fence::<nom::error::Error<&str>>(at_fence).ok()?;
        if is_sql_label(label) {
            return Some(body);
        }
        remaining = after;
    }
    None
}

/// Returns the first statement of the completion, trimmed and terminated with `;`.
pub fn extract_sql(completion: &str) -> Result<String, SqlTextError> {
    let body = fenced_body(completion).unwrap_or(completion);

    let first = match split_statements(body) {
        Ok(statements) => statements.first().copied().unwrap_or_default(),
        //Unbalanced quoting, usually an apostrophe in prose
        Err(_) => body.split(';').next().unwrap_or_default(),
    };

    let statement = first.trim();
    if statement.is_empty() {
        return Err(SqlTextError::NoStatement());
    }

    Ok(format!("{};", statement))
}
