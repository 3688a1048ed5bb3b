//! The parsed email record.

use serde::{Deserialize, Serialize};

use super::field::HeaderField;

/// One parsed message from the Enron corpus.
///
/// Serialized field names follow the header names of the source files so
/// that search queries can use them directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    #[serde(rename = "Message-ID")]
    pub message_id: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "From")]
    pub from: String,
    /// Addresses found in `To:` followed by display-name tokens.
    #[serde(rename = "To")]
    pub to: Vec<String>,
    #[serde(rename = "CC")]
    pub cc: Vec<String>,
    #[serde(rename = "BCC")]
    pub bcc: Vec<String>,
    /// Continuation lines are joined with `\n`.
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Mime-Version")]
    pub mime_version: String,
    #[serde(rename = "Content-Type")]
    pub content_type: String,
    #[serde(rename = "Content-Transfer-Encoding")]
    pub content_transfer_encoding: String,
    /// Sender as rendered by the originating client.
    #[serde(rename = "X-From")]
    pub x_from: String,
    /// Recipients as rendered by the originating client, split on commas.
    #[serde(rename = "X-To")]
    pub x_to: Vec<String>,
    #[serde(rename = "X-cc")]
    pub x_cc: Vec<String>,
    #[serde(rename = "X-bcc")]
    pub x_bcc: Vec<String>,
    #[serde(rename = "X-Folder")]
    pub x_folder: String,
    #[serde(rename = "X-Origin")]
    pub x_origin: String,
    #[serde(rename = "X-FileName")]
    pub x_filename: String,
    /// Every line after `X-FileName`, each preceded by `\n`.
    #[serde(rename = "Body")]
    pub body: String,
}

impl Email {
    /// A record counts as an email once its Message-ID is populated.
    pub fn is_email(&self) -> bool {
        !self.message_id.is_empty()
    }

    /// The text slot backing a single-valued field, if `field` is one.
    pub fn text_mut(&mut self, field: HeaderField) -> Option<&mut String> {
        let slot = match field {
            HeaderField::MessageId => &mut self.message_id,
            HeaderField::Date => &mut self.date,
            HeaderField::From => &mut self.from,
            HeaderField::Subject => &mut self.subject,
            HeaderField::MimeVersion => &mut self.mime_version,
            HeaderField::ContentType => &mut self.content_type,
            HeaderField::ContentTransferEncoding => &mut self.content_transfer_encoding,
            HeaderField::XFrom => &mut self.x_from,
            HeaderField::XFolder => &mut self.x_folder,
            HeaderField::XOrigin => &mut self.x_origin,
            HeaderField::XFileName => &mut self.x_filename,
            HeaderField::To
            | HeaderField::Cc
            | HeaderField::Bcc
            | HeaderField::XTo
            | HeaderField::XCc
            | HeaderField::XBcc => return None,
        };
        Some(slot)
    }

    /// The list slot backing a multi-valued field, if `field` is one.
    pub fn list_mut(&mut self, field: HeaderField) -> Option<&mut Vec<String>> {
        let slot = match field {
            HeaderField::To => &mut self.to,
            HeaderField::Cc => &mut self.cc,
            HeaderField::Bcc => &mut self.bcc,
            HeaderField::XTo => &mut self.x_to,
            HeaderField::XCc => &mut self.x_cc,
            HeaderField::XBcc => &mut self.x_bcc,
            _ => return None,
        };
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_exactly_one_slot() {
        let mut email = Email::default();
        for field in HeaderField::ALL {
            let text = email.text_mut(field).is_some();
            let list = email.list_mut(field).is_some();
            assert!(text ^ list, "{field} should map to exactly one slot");
        }
    }

    #[test]
    fn test_is_email() {
        let mut email = Email::default();
        assert!(!email.is_email());
        email.message_id = "<1.JavaMail.evans@thyme>".to_string();
        assert!(email.is_email());
    }

    #[test]
    fn test_json_keys_follow_header_names() {
        let email = Email {
            message_id: "<id>".to_string(),
            x_cc: vec!["a@b.com".to_string()],
            ..Default::default()
        };
        let value = serde_json::to_value(&email).expect("serialize");
        assert_eq!(value["Message-ID"], "<id>");
        assert_eq!(value["X-cc"][0], "a@b.com");
        assert!(value.get("CC").is_some());
        assert!(value.get("X-FileName").is_some());
        assert!(value.get("message_id").is_none());
    }
}
