use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_until};
use nom::character::complete::char;
use nom::combinator::{opt, recognize};
use nom::error::ParseError;
use nom::multi::many0;
use nom::sequence::{delimited, pair, tuple};
use nom::IResult;

// 'it''s' style literal, doubled quotes are the escape
pub(super) fn single_quoted<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    recognize(delimited(
        char('\''),
        many0(alt((is_not("'"), tag("''")))),
        char('\''),
    ))(input)
}

pub(super) fn double_quoted<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    recognize(delimited(
        char('"'),
        many0(alt((is_not("\""), tag("\"\"")))),
        char('"'),
    ))(input)
}

pub(super) fn line_comment<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    recognize(pair(tag("--"), opt(is_not("\n"))))(input)
}

pub(super) fn block_comment<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

/// Byte offset of `rest` inside `whole`, both must come from the same string.
pub(super) fn offset_of(whole: &str, rest: &str) -> usize {
    whole.len() - rest.len()
}
