//! Streaming element events.
//!
//! Drives an [`ElementHandler`] with start/end events in document order,
//! the way a push parser would. Text, comments and processing instructions
//! carry no meaning for widget trees and are skipped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use trellis_core::{Attrs, ParseError};

/// Receiver of element events.
pub trait ElementHandler {
    /// An element opened. `<a/>` produces a start immediately followed by an end.
    fn start_element(&mut self, name: &str, attrs: &Attrs<'_>);

    /// An element closed.
    fn end_element(&mut self, name: &str);
}

/// Tokenize `src` and feed every element event to `handler`.
///
/// Events already delivered before a syntax error stay delivered; the error
/// only stops the stream.
pub fn parse_events<H: ElementHandler + ?Sized>(
    src: &str,
    handler: &mut H,
) -> Result<(), ParseError> {
    let mut reader = Reader::from_str(src);
    reader.config_mut().trim_text(true);
    reader.config_mut().expand_empty_elements = true;

    // Names and lines of currently open elements, for unclosed-tag reporting.
    let mut open: Vec<(String, usize)> = Vec::new();

    loop {
        let before = position(reader.buffer_position());
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = element_name(e, src, before)?;
                let attrs = read_attrs(e, src, before)?;
                let line = line_at(src, position(reader.buffer_position()));
                open.push((name.to_string(), line));
                handler.start_element(name, &attrs);
            }
            Ok(Event::End(ref e)) => {
                let name = std::str::from_utf8(e.name().into_inner())
                    .map_err(|err| syntax(src, before, err))?;
                open.pop();
                handler.end_element(name);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(syntax(src, position(reader.error_position()), err));
            }
        }
    }

    match open.pop() {
        Some((name, line)) => Err(ParseError::UnclosedElement { name, line }),
        None => Ok(()),
    }
}

fn element_name<'e>(e: &'e BytesStart<'_>, src: &str, at: usize) -> Result<&'e str, ParseError> {
    std::str::from_utf8(e.name().into_inner()).map_err(|err| syntax(src, at, err))
}

/// Collect the attributes of a start tag, entities unescaped.
pub(crate) fn read_attrs<'e>(
    e: &'e BytesStart<'_>,
    src: &str,
    at: usize,
) -> Result<Attrs<'e>, ParseError> {
    let mut attrs = Attrs::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| syntax(src, at, err))?;
        let name = std::str::from_utf8(attr.key.into_inner()).map_err(|err| syntax(src, at, err))?;
        let value = attr.unescape_value().map_err(|err| syntax(src, at, err))?;
        attrs.push(name, value);
    }
    Ok(attrs)
}

pub(crate) fn position<P>(pos: P) -> usize
where
    usize: TryFrom<P>,
{
    usize::try_from(pos).unwrap_or(usize::MAX)
}

/// 1-based line number of byte offset `at`.
pub(crate) fn line_at(src: &str, at: usize) -> usize {
    let end = at.min(src.len());
    src.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

pub(crate) fn syntax(src: &str, at: usize, reason: impl std::fmt::Display) -> ParseError {
    ParseError::Syntax {
        line: line_at(src, at),
        reason: reason.to_string(),
    }
}
