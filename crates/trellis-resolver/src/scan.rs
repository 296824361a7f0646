//! Scanner for `$param` references.

use nom::{
    branch::alt,
    bytes::complete::{is_not, take_while1},
    character::complete::char,
    combinator::map,
    sequence::preceded,
    IResult,
};

/// A piece of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// Text copied as-is.
    Literal(&'a str),
    /// `$name`, name without the marker.
    Param(&'a str),
    /// A `$` not followed by a name character.
    Dollar,
}

fn is_param_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse a parameter name (ASCII letters, digits, underscore).
fn param_name(input: &str) -> IResult<&str, &str> {
    take_while1(is_param_char)(input)
}

fn segment(input: &str) -> IResult<&str, Segment<'_>> {
    alt((
        map(preceded(char('$'), param_name), Segment::Param),
        map(char('$'), |_| Segment::Dollar),
        map(is_not("$"), Segment::Literal),
    ))(input)
}

/// Split `value` into literal text and parameter references, in order.
pub(crate) fn segments(mut input: &str) -> impl Iterator<Item = Segment<'_>> {
    std::iter::from_fn(move || {
        if input.is_empty() {
            return None;
        }
        let (rest, seg) = segment(input).ok()?;
        input = rest;
        Some(seg)
    })
}
