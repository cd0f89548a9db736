//! Template text parser
//!
//! Turns XML-style template markup into a [`Template`] tree. The grammar is the
//! subset templates use: elements with quoted attributes, self-closing leaves,
//! character data with entity references, and comments (dropped).
//!
//! Element nesting is bounded while parsing, so hostile markup is rejected
//! with a [`ParseError`] before it can exhaust the stack.

use super::node::{Node, TagNode, Template};
use crate::error::{ParseError, ParseErrorKind};
use crate::evaluator::DEFAULT_MAX_DEPTH;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, cut, map, verify},
    error::{context, VerboseError, VerboseErrorKind},
    multi::many0,
    sequence::{delimited, pair, preceded, separated_pair},
    Finish, IResult,
};

type ParseResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Hard ceiling on element nesting, whatever limit the caller asks for.
/// Keeps the recursive descent well inside a default thread stack.
pub const MAX_NESTING_LIMIT: usize = 128;

const NESTING_CONTEXT: &str = "element within the nesting limit";

/// Parse template markup into an immutable tag tree, allowing
/// [`DEFAULT_MAX_DEPTH`] levels of element nesting.
pub fn parse_template(source: &str) -> Result<Template, ParseError> {
    parse_template_with_limit(source, DEFAULT_MAX_DEPTH)
}

/// Parse template markup, rejecting elements nested `max_depth` or more
/// levels deep. The limit is capped at [`MAX_NESTING_LIMIT`].
pub fn parse_template_with_limit(source: &str, max_depth: usize) -> Result<Template, ParseError> {
    let limit = max_depth.min(MAX_NESTING_LIMIT);
    match all_consuming(move |input| content(input, 0, limit))(source).finish() {
        Ok((_, nodes)) => Ok(Template::new(nodes)),
        Err(err) => Err(to_parse_error(source, err, limit)),
    }
}

fn to_parse_error(source: &str, err: VerboseError<&str>, limit: usize) -> ParseError {
    let innermost_context = err.errors.iter().find_map(|(rest, kind)| match kind {
        VerboseErrorKind::Context(label) => Some((*rest, *label)),
        _ => None,
    });
    let (remaining, message, kind) = match innermost_context {
        Some((rest, NESTING_CONTEXT)) => {
            let tag = rest
                .strip_prefix('<')
                .and_then(|after| tag_name(after).ok())
                .map(|(_, name)| name.to_string())
                .unwrap_or_default();
            (
                rest,
                format!("maximum nesting depth {} exceeded at <{}>", limit, tag),
                ParseErrorKind::NestingTooDeep { tag, max: limit },
            )
        }
        Some((rest, label)) => (rest, format!("expected {}", label), ParseErrorKind::Syntax),
        None => (
            err.errors.first().map(|(rest, _)| *rest).unwrap_or(source),
            "unexpected input".to_string(),
            ParseErrorKind::Syntax,
        ),
    };
    ParseError {
        offset: source.len() - remaining.len(),
        message,
        kind,
    }
}

fn content(input: &str, depth: usize, limit: usize) -> ParseResult<Vec<Node>> {
    map(
        many0(alt((
            map(comment, |_| None),
            map(|i| element(i, depth, limit), |tag| Some(Node::Tag(tag))),
            map(text, |text| Some(Node::Text(text))),
        ))),
        |nodes| nodes.into_iter().flatten().collect(),
    )(input)
}

fn tag_name(input: &str) -> ParseResult<&str> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))(input)
}

fn quoted(input: &str) -> ParseResult<&str> {
    context(
        "quoted attribute value",
        alt((
            delimited(char('"'), take_while(|c| c != '"'), char('"')),
            delimited(char('\''), take_while(|c| c != '\''), char('\'')),
        )),
    )(input)
}

fn attribute(input: &str) -> ParseResult<(&str, String)> {
    map(
        preceded(
            multispace1,
            separated_pair(
                tag_name,
                delimited(multispace0, char('='), multispace0),
                quoted,
            ),
        ),
        |(name, value)| (name, unescape(value)),
    )(input)
}

fn comment(input: &str) -> ParseResult<&str> {
    delimited(tag("<!--"), take_until("-->"), tag("-->"))(input)
}

fn text(input: &str) -> ParseResult<String> {
    map(take_while1(|c| c != '<'), unescape)(input)
}

fn element(input: &str, depth: usize, limit: usize) -> ParseResult<TagNode> {
    let start = input;
    let (input, _) = char('<')(input)?;
    let (input, name) = tag_name(input)?;
    if depth >= limit {
        return Err(nom::Err::Failure(VerboseError {
            errors: vec![(start, VerboseErrorKind::Context(NESTING_CONTEXT))],
        }));
    }
    let (input, attributes) = many0(attribute)(input)?;
    let (input, _) = multispace0(input)?;

    let with_attributes = |mut node: TagNode| {
        for (key, value) in &attributes {
            node = node.with_attribute(*key, value.clone());
        }
        node
    };

    if let Ok((rest, _)) = tag::<_, _, VerboseError<&str>>("/>")(input) {
        return Ok((rest, with_attributes(TagNode::leaf(name))));
    }

    let (input, _) = cut(context("'>' or '/>'", char('>')))(input)?;
    let (input, children) = content(input, depth + 1, limit)?;
    let (input, _) = cut(context(
        "matching closing tag",
        delimited(
            tag("</"),
            verify(tag_name, |closing: &str| closing == name),
            pair(multispace0, char('>')),
        ),
    ))(input)?;

    let node = children
        .into_iter()
        .fold(with_attributes(TagNode::container(name)), |node, child| {
            node.with_child(child)
        });
    Ok((input, node))
}

/// Replace the predefined and numeric character references.
/// Unrecognized references are kept verbatim.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let after = &rest[start..];
        let replaced = after.find(';').and_then(|end| {
            let entity = &after[1..end];
            let ch = match entity {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                    u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                }
                _ if entity.starts_with('#') => {
                    entity[1..].parse::<u32>().ok().and_then(char::from_u32)
                }
                _ => None,
            };
            ch.map(|c| (c, end + 1))
        });
        match replaced {
            Some((c, consumed)) => {
                out.push(c);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
