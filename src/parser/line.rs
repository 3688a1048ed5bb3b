//! Line classification: header, continuation, or body.

use crate::model::field::HeaderField;

/// What a single input line means for the record under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Starts a recognized header. `value` is trimmed.
    Header { field: HeaderField, value: &'a str },
    /// Extends the active field with the whole, untrimmed line.
    Continuation(&'a str),
    /// Looks like `Name: value` but `Name` is not recognized. Handled as a
    /// continuation of the active field after a diagnostic.
    UnknownHeader { name: &'a str, value: &'a str, line: &'a str },
    /// A line after `X-FileName`.
    Body(&'a str),
}

/// Classify `line` given whether the body has been reached.
///
/// The text before the first colon is matched case-sensitively against the
/// recognized header names. The active field is not consulted: a line that
/// does not start a recognized header always continues whatever came before.
pub fn classify(line: &str, in_body: bool) -> LineClass<'_> {
    if in_body {
        return LineClass::Body(line);
    }

    let Some((name, value)) = line.split_once(':') else {
        return LineClass::Continuation(line);
    };

    match HeaderField::from_name(name) {
        Some(field) => LineClass::Header {
            field,
            value: value.trim(),
        },
        None if is_header_name(name) => LineClass::UnknownHeader {
            name,
            value: value.trim(),
            line,
        },
        None => LineClass::Continuation(line),
    }
}

/// RFC 5322 field-name characters: printable ASCII except colon, no spaces.
fn is_header_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| (b'!'..=b'~').contains(&b) && b != b':')
}
