//! Stateful line-oriented parser for Enron corpus message files.
//!
//! Each file is read line-by-line. Until `X-FileName` has been consumed a
//! line either starts a recognized header or continues the previous one;
//! afterwards every line is body. Malformed input never fails the parse:
//! only I/O errors are reported.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::config::{ParserConfig, ValidityGate};
use crate::error::{IngestError, Result};
use crate::model::email::Email;
use crate::model::field::{HeaderField, MergeMode};
use crate::parser::line::{self, LineClass};
use crate::parser::{body, builder};

/// Read buffer size; corpus messages are small.
const READ_BUFFER_SIZE: usize = 64 * 1024;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parses single message files into [`Email`] records.
///
/// The parser holds no per-file state, so one instance can be reused for
/// every file of a walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailParser {
    gate: ValidityGate,
}

impl EmailParser {
    pub fn new(config: &ParserConfig) -> Self {
        Self::with_gate(config.validity_gate)
    }

    pub fn with_gate(gate: ValidityGate) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> ValidityGate {
        self.gate
    }

    /// Open and parse the file at `path`.
    ///
    /// Failing to open the file is an error. Content that is not an email
    /// is not: the partially built record comes back and
    /// [`Email::is_email`] reports `false`.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Email> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
        let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
        self.parse_reader(reader, path)
    }

    /// Parse a message from any buffered reader. `source` names the input in
    /// diagnostics and errors.
    pub fn parse_reader<R: BufRead>(&self, mut reader: R, source: &Path) -> Result<Email> {
        let mut state = LineState::new(source);
        let mut line_buf: Vec<u8> = Vec::with_capacity(4096);
        let mut first_line = true;

        loop {
            line_buf.clear();
            let read = reader
                .read_until(b'\n', &mut line_buf)
                .map_err(|e| IngestError::io(source, e))?;
            if read == 0 {
                break; // EOF
            }

            let text = decode_line(&line_buf, first_line);
            let entered_body = state.feed(&text);

            let at_gate = match self.gate {
                ValidityGate::FirstLine => first_line,
                ValidityGate::HeaderEnd => entered_body,
            };
            first_line = false;

            if at_gate && !state.email.is_email() {
                debug!(
                    path = %source.display(),
                    gate = ?self.gate,
                    "No Message-ID, not an email; stopping early"
                );
                break;
            }
        }

        Ok(state.email)
    }
}

/// Parse `path` with the default configuration.
pub fn parse_email(path: impl AsRef<Path>) -> Result<Email> {
    EmailParser::default().parse_file(path)
}

/// Per-file parse state: the record plus the active field and body flag.
struct LineState<'a> {
    email: Email,
    current: Option<HeaderField>,
    in_body: bool,
    source: &'a Path,
}

impl<'a> LineState<'a> {
    fn new(source: &'a Path) -> Self {
        Self {
            email: Email::default(),
            current: None,
            in_body: false,
            source,
        }
    }

    /// Process one line. Returns `true` if this line ended the header block.
    fn feed(&mut self, text: &str) -> bool {
        match line::classify(text, self.in_body) {
            LineClass::Body(text) => {
                body::append_line(&mut self.email.body, text);
                false
            }
            LineClass::Header { field, value } => {
                self.current = Some(field);
                builder::apply(&mut self.email, field, MergeMode::Assign, value, self.source);
                self.in_body = field.is_terminal();
                self.in_body
            }
            LineClass::UnknownHeader { name, value, line: raw } => {
                warn!(
                    field = name,
                    value = value,
                    path = %self.source.display(),
                    "Unrecognized header, treating line as continuation"
                );
                self.continue_field(raw);
                false
            }
            LineClass::Continuation(text) => {
                self.continue_field(text);
                false
            }
        }
    }

    fn continue_field(&mut self, text: &str) {
        match self.current {
            Some(field) => {
                builder::apply(&mut self.email, field, MergeMode::Append, text, self.source);
            }
            None => trace!(
                path = %self.source.display(),
                line = text,
                "Continuation before any header, discarded"
            ),
        }
    }
}

/// Strip the line terminator (and a leading BOM on the first line) and
/// decode. Invalid UTF-8 falls back to Windows-1252, which accepts every byte.
fn decode_line(raw: &[u8], first_line: bool) -> Cow<'_, str> {
    let mut bytes = raw.strip_suffix(b"\n").unwrap_or(raw);
    bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    if first_line {
        bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes).0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_with(gate: ValidityGate, text: &str) -> Email {
        EmailParser::with_gate(gate)
            .parse_reader(Cursor::new(text.as_bytes()), Path::new("test/1."))
            .expect("in-memory parse")
    }

    fn parse(text: &str) -> Email {
        parse_with(ValidityGate::FirstLine, text)
    }

    const HEADERS: &str = "Message-ID: <1.JavaMail.evans@thyme>\n\
        Date: Mon, 14 May 2001 16:39:00 -0700 (PDT)\n\
        From: phillip.allen@enron.com\n\
        To: tim.belden@enron.com\n\
        Subject: Forecast\n\
        X-FileName: pallen (Non-Privileged).pst\n";

    #[test]
    fn test_message_id_is_trimmed() {
        let email = parse("Message-ID:   <42.JavaMail.evans@thyme>  \n");
        assert_eq!(email.message_id, "<42.JavaMail.evans@thyme>");
    }

    #[test]
    fn test_body_after_x_filename() {
        let email = parse(&format!("{HEADERS}hello\nworld\n"));
        assert_eq!(email.body, "\nhello\nworld");
        assert_eq!(email.x_filename, "pallen (Non-Privileged).pst");
    }

    #[test]
    fn test_header_like_lines_in_body_are_body() {
        let email = parse(&format!("{HEADERS}\nFrom: someone@else.com\nSubject: quoted\n"));
        assert_eq!(email.from, "phillip.allen@enron.com");
        assert_eq!(email.subject, "Forecast");
        assert_eq!(email.body, "\n\nFrom: someone@else.com\nSubject: quoted");
    }

    #[test]
    fn test_missing_message_id_stops_after_first_line() {
        let email = parse("Date: Mon, 14 May 2001\nFrom: a@enron.com\nX-FileName: x\nbody\n");
        assert!(!email.is_email());
        assert_eq!(email.date, "Mon, 14 May 2001");
        assert!(email.from.is_empty());
        assert!(email.body.is_empty());
    }

    #[test]
    fn test_header_end_gate_tolerates_late_message_id() {
        let email = parse_with(
            ValidityGate::HeaderEnd,
            "Date: Mon, 14 May 2001\nMessage-ID: <late@thyme>\nX-FileName: x\nbody\n",
        );
        assert_eq!(email.message_id, "<late@thyme>");
        assert_eq!(email.body, "\nbody");
    }

    #[test]
    fn test_header_end_gate_skips_body_without_message_id() {
        let email = parse_with(
            ValidityGate::HeaderEnd,
            "Date: Mon, 14 May 2001\nFrom: a@enron.com\nX-FileName: x\nbody\n",
        );
        assert!(!email.is_email());
        assert_eq!(email.from, "a@enron.com");
        assert!(email.body.is_empty());
    }

    #[test]
    fn test_multiline_recipients() {
        let email = parse(
            "Message-ID: <2@thyme>\n\
             To: john.arnold@enron.com, hunter.shively@enron.com, \n\
             \tmike.grigsby@enron.com\n\
             Cc: a@enron.com, \n\
             \tb@enron.com\n",
        );
        assert_eq!(
            email.to,
            vec![
                "john.arnold@enron.com",
                "hunter.shively@enron.com",
                "mike.grigsby@enron.com"
            ]
        );
        assert_eq!(email.cc, vec!["a@enron.com", "b@enron.com"]);
    }

    #[test]
    fn test_subject_and_from_continuations() {
        let email = parse("Message-ID: <3@thyme>\nFrom: a\nb@enron.com\nSubject: Re: long\nsubject\n");
        assert_eq!(email.from, "ab@enron.com");
        assert_eq!(email.subject, "Re: long\nsubject");
    }

    #[test]
    fn test_unknown_header_continues_active_field() {
        let email = parse("Message-ID: <4@thyme>\nSubject: Agenda\nItem:one\n");
        assert_eq!(email.subject, "Agenda\nItem:one");
    }

    #[test]
    fn test_crlf_and_bom_are_stripped() {
        let email = parse("\u{feff}Message-ID: <5@thyme>\r\nX-FileName: x\r\nline\r\n");
        assert_eq!(email.message_id, "<5@thyme>");
        assert_eq!(email.body, "\nline");
    }

    #[test]
    fn test_latin1_bytes_are_decoded() {
        let raw = b"Message-ID: <6@thyme>\nX-FileName: x\ncaf\xe9\n";
        let email = EmailParser::default()
            .parse_reader(Cursor::new(&raw[..]), Path::new("test/6."))
            .expect("parse");
        assert_eq!(email.body, "\ncafé");
    }

    #[test]
    fn test_last_line_without_newline() {
        let email = parse(&format!("{HEADERS}no newline at end"));
        assert_eq!(email.body, "\nno newline at end");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = format!("{HEADERS}body\n");
        assert_eq!(parse(&text), parse(&text));
    }

    #[test]
    fn test_decode_line_keeps_inner_whitespace() {
        assert_eq!(decode_line(b"  indented \r\n", false), "  indented ");
        assert_eq!(decode_line(b"", false), "");
    }
}
