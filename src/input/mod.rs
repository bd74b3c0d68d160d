//! Module defining the stages which turn raw log bytes into validated events: decoding,
//! line splitting, multi-line record reassembly, and record parsing.

use serde::de::{self, Unexpected};
use serde_json::Value;

use crate::domain::Event;
use crate::error::{Error, record_parse_error};

mod assembler;
mod decoder;
mod splitter;


pub(crate) use assembler::{RecordAssembler, Step};
pub(crate) use decoder::Decoder;
pub(crate) use splitter::LineSplitter;

/// How a record candidate was delimited in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Framing {
    /// One physical line
    Line,
    /// A `{` ... `}` sentinel block
    Block,
}

/// Parses one record candidate.
///
/// The whole text must be a single JSON value. A sentinel block may additionally end in surplus
/// `}` lines, which happens when its interior already closes the object.
///
/// `Ok(None)` is a well-formed record that is not an event (no `post`), which is not an error.
/// A bare `null` is not a record at all and counts as malformed.
/// `line` is the index of the line that completed the record and is only used for reporting.
pub(crate) fn parse_record(
    text: &str,
    framing: Framing,
    line: usize,
    excerpt_len: usize,
) -> Result<Option<Event>, Error> {
    let to_error = |source: serde_json::Error| record_parse_error(line, text, excerpt_len, source);
    let value = parse_value(text, framing).map_err(to_error)?;
    if value.is_null() {
        let source = <serde_json::Error as de::Error>::invalid_type(Unexpected::Unit, &"a record");
        return Err(to_error(source));
    }
    Ok(Event::from_value(value))
}

fn parse_value(text: &str, framing: Framing) -> Result<Value, serde_json::Error> {
    let strict = serde_json::from_str(text);
    if strict.is_ok() || framing == Framing::Line {
        return strict;
    }
    let mut candidate = text.trim_end();
    while let Some(shorter) = candidate.strip_suffix('}') {
        candidate = shorter.trim_end();
        if let Ok(value) = serde_json::from_str(candidate) {
            return Ok(value);
        }
    }
    strict
}
