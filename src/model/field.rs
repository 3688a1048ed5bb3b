//! The closed set of recognized header fields and their merge policies.

use std::fmt;

/// A header field recognized by the parser.
///
/// Variants are listed in the order they appear in Enron corpus files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    MessageId,
    Date,
    From,
    To,
    Cc,
    Bcc,
    Subject,
    MimeVersion,
    ContentType,
    ContentTransferEncoding,
    XFrom,
    XTo,
    XCc,
    XBcc,
    XFolder,
    XOrigin,
    XFileName,
}

/// How a field's text becomes its stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Stored as trimmed text. Continuation lines are appended after `separator`.
    Raw { separator: &'static str },
    /// Email addresses found in the text, then display-name tokens.
    Extracted,
    /// Comma-separated pieces, each trimmed.
    CommaSplit,
}

/// Whether the builder replaces the stored value or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// A header line: the value replaces whatever was stored.
    Assign,
    /// A continuation line: the value extends what was stored.
    Append,
}

impl HeaderField {
    /// Every recognized field, in corpus order.
    pub const ALL: [HeaderField; 17] = [
        HeaderField::MessageId,
        HeaderField::Date,
        HeaderField::From,
        HeaderField::To,
        HeaderField::Cc,
        HeaderField::Bcc,
        HeaderField::Subject,
        HeaderField::MimeVersion,
        HeaderField::ContentType,
        HeaderField::ContentTransferEncoding,
        HeaderField::XFrom,
        HeaderField::XTo,
        HeaderField::XCc,
        HeaderField::XBcc,
        HeaderField::XFolder,
        HeaderField::XOrigin,
        HeaderField::XFileName,
    ];

    /// The header name exactly as it appears before the colon.
    pub fn name(self) -> &'static str {
        match self {
            HeaderField::MessageId => "Message-ID",
            HeaderField::Date => "Date",
            HeaderField::From => "From",
            HeaderField::To => "To",
            HeaderField::Cc => "Cc",
            HeaderField::Bcc => "Bcc",
            HeaderField::Subject => "Subject",
            HeaderField::MimeVersion => "Mime-Version",
            HeaderField::ContentType => "Content-Type",
            HeaderField::ContentTransferEncoding => "Content-Transfer-Encoding",
            HeaderField::XFrom => "X-From",
            HeaderField::XTo => "X-To",
            HeaderField::XCc => "X-cc",
            HeaderField::XBcc => "X-bcc",
            HeaderField::XFolder => "X-Folder",
            HeaderField::XOrigin => "X-Origin",
            HeaderField::XFileName => "X-FileName",
        }
    }

    /// Look up a field by its header name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// The merge policy for this field.
    pub fn value_kind(self) -> ValueKind {
        match self {
            HeaderField::To
            | HeaderField::Cc
            | HeaderField::Bcc
            | HeaderField::XCc
            | HeaderField::XBcc => ValueKind::Extracted,
            HeaderField::XTo => ValueKind::CommaSplit,
            HeaderField::Subject => ValueKind::Raw { separator: "\n" },
            HeaderField::MessageId
            | HeaderField::Date
            | HeaderField::From
            | HeaderField::MimeVersion
            | HeaderField::ContentType
            | HeaderField::ContentTransferEncoding
            | HeaderField::XFrom
            | HeaderField::XFolder
            | HeaderField::XOrigin
            | HeaderField::XFileName => ValueKind::Raw { separator: "" },
        }
    }

    /// `true` for the last header; every line after it is body.
    pub fn is_terminal(self) -> bool {
        self == HeaderField::XFileName
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
