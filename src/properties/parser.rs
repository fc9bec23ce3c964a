//! Properties-file text parser.
//!
//! Handles `#`/`!` comments, `=`/`:`/whitespace separators, backslash line
//! continuations and `\t \n \r \f \uXXXX` escapes.

use core::fmt::Write;
use core::iter::Peekable;

use crate::error::{Error, LoadError, Result};

use super::{Key, Properties, Value};

/// Maximum number of natural lines joined into one logical line without
/// `alloc`.
pub const MAX_CONTINUATION_LINES: usize = 16;

#[cfg(feature = "alloc")]
type Segments<'a> = alloc::vec::Vec<&'a str>;
#[cfg(not(feature = "alloc"))]
type Segments<'a> = heapless::Vec<&'a str, MAX_CONTINUATION_LINES>;

fn push_segment<'a>(segments: &mut Segments<'a>, segment: &'a str) -> core::result::Result<(), ()> {
    #[cfg(feature = "alloc")]
    segments.push(segment);
    #[cfg(not(feature = "alloc"))]
    segments.push(segment).map_err(|_| ())?;
    Ok(())
}

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Parse `text` and insert every entry into `properties`.
pub(crate) fn parse_into(properties: &mut Properties, text: &str) -> Result<()> {
    let mut lines = text.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let first = raw.trim_start_matches(&WHITESPACE[..]);
        if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
            continue;
        }

        let line = index + 1;
        let mut segments = Segments::new();
        let mut current = first;
        loop {
            let continued = ends_with_continuation(current);
            let segment = if continued {
                &current[..current.len() - 1]
            } else {
                current
            };
            push_segment(&mut segments, segment)
                .map_err(|_| Error::Load(LoadError::LineTooLong { line }))?;
            if !continued {
                break;
            }
            match lines.next() {
                Some((_, next)) => current = next.trim_start_matches(&WHITESPACE[..]),
                None => break,
            }
        }

        let (key, value) = parse_logical_line(&segments, line)?;
        properties.insert_owned(key, value)?;
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("properties parsed, {} entries", properties.len());

    Ok(())
}

/// An odd number of trailing backslashes continues the line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn parse_logical_line(segments: &[&str], line: usize) -> Result<(Key, Value)> {
    let mut chars = segments.iter().flat_map(|s| s.chars()).peekable();

    let mut key = Key::new();
    let mut separator_seen = false;
    while let Some(c) = chars.next() {
        let decoded = match c {
            '\\' => match decode_escape(&mut chars, line)? {
                Some(d) => d,
                None => break,
            },
            '=' | ':' => {
                separator_seen = true;
                break;
            }
            c if WHITESPACE.contains(&c) => break,
            c => c,
        };
        key.write_char(decoded)
            .map_err(|_| Error::Load(LoadError::KeyTooLong { line }))?;
    }

    skip_whitespace(&mut chars);
    if !separator_seen && matches!(chars.peek(), Some('=') | Some(':')) {
        chars.next();
        skip_whitespace(&mut chars);
    }

    let mut value = Value::new();
    while let Some(c) = chars.next() {
        let decoded = if c == '\\' {
            match decode_escape(&mut chars, line)? {
                Some(d) => d,
                None => break,
            }
        } else {
            c
        };
        value
            .write_char(decoded)
            .map_err(|_| Error::Load(LoadError::ValueTooLong { line }))?;
    }

    Ok((key, value))
}

fn skip_whitespace<I: Iterator<Item = char>>(chars: &mut Peekable<I>) {
    while chars.next_if(|c| WHITESPACE.contains(c)).is_some() {}
}

/// Decode the char after a backslash. `None` at end of input.
fn decode_escape<I: Iterator<Item = char>>(
    chars: &mut Peekable<I>,
    line: usize,
) -> Result<Option<char>> {
    let Some(c) = chars.next() else {
        return Ok(None);
    };
    let decoded = match c {
        't' => '\t',
        'n' => '\n',
        'r' => '\r',
        'f' => '\x0c',
        'u' => {
            let malformed = Error::Load(LoadError::MalformedEscape { line });
            let mut code = hex_code(chars).ok_or_else(|| malformed.clone())?;
            if (HIGH_SURROGATE..LOW_SURROGATE).contains(&code) {
                // A high surrogate must be followed by an escaped low surrogate.
                let low = match (chars.next(), chars.next()) {
                    (Some('\\'), Some('u')) => hex_code(chars),
                    _ => None,
                }
                .filter(|low| (LOW_SURROGATE..=0xDFFF).contains(low))
                .ok_or_else(|| malformed.clone())?;
                code = 0x10000 + ((code - HIGH_SURROGATE) << 10) + (low - LOW_SURROGATE);
            }
            char::from_u32(code).ok_or(malformed)?
        }
        other => other,
    };
    Ok(Some(decoded))
}

const HIGH_SURROGATE: u32 = 0xD800;
const LOW_SURROGATE: u32 = 0xDC00;

/// Read the four hex digits of a `\u` escape.
fn hex_code<I: Iterator<Item = char>>(chars: &mut Peekable<I>) -> Option<u32> {
    let mut code = 0u32;
    for _ in 0..4 {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    Some(code)
}
