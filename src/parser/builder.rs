//! Field value builder: writes header text into an [`Email`] according to
//! the field's merge policy.

use std::path::Path;

use tracing::warn;

use crate::model::email::Email;
use crate::model::field::{HeaderField, MergeMode, ValueKind};
use crate::parser::extract;

/// Store `text` into the slot for `field`.
///
/// `Assign` replaces the slot (header line), `Append` extends it
/// (continuation line). Extracted and comma-split fields append their newly
/// computed values to the existing list; raw fields append the text after
/// the field's separator. `source` only appears in diagnostics.
pub fn apply(email: &mut Email, field: HeaderField, mode: MergeMode, text: &str, source: &Path) {
    match field.value_kind() {
        ValueKind::Raw { separator } => {
            let Some(slot) = email.text_mut(field) else {
                return report_mismatch(field, text, source);
            };
            match mode {
                MergeMode::Assign => {
                    slot.clear();
                    slot.push_str(text);
                }
                MergeMode::Append => {
                    slot.push_str(separator);
                    slot.push_str(text);
                }
            }
        }
        ValueKind::Extracted => {
            let values = extract::addresses_and_names(text);
            merge_list(email, field, mode, values, text, source);
        }
        ValueKind::CommaSplit => {
            let values = extract::split_commas(text);
            merge_list(email, field, mode, values, text, source);
        }
    }
}

fn merge_list(
    email: &mut Email,
    field: HeaderField,
    mode: MergeMode,
    values: Vec<String>,
    text: &str,
    source: &Path,
) {
    let Some(slot) = email.list_mut(field) else {
        return report_mismatch(field, text, source);
    };
    match mode {
        MergeMode::Assign => *slot = values,
        MergeMode::Append => slot.extend(values),
    }
}

fn report_mismatch(field: HeaderField, value: &str, source: &Path) {
    warn!(
        field = field.name(),
        value = value,
        path = %source.display(),
        "No record slot for field, value dropped"
    );
}
