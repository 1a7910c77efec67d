//! Document assembly and filename derivation

use serde::{Deserialize, Serialize};

use vcf_model::VcardVersion;

/// One rendered property line, tagged with the property key that
/// produced it
#[derive(Debug, Clone)]
pub(crate) struct PropertyLine {
    pub property: String,
    pub text: String,
}

impl PropertyLine {
    pub(crate) fn new(property: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            text: text.into(),
        }
    }

    /// The value part of the line (after the first `:`)
    pub(crate) fn value(&self) -> &str {
        self.text.split_once(':').map_or("", |(_, value)| value)
    }
}

/// A rendered vCard document plus its derived output filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vcard {
    /// UTF-8 text block terminated by `END:VCARD\n`
    pub content: String,
    /// Filename derived from the structured name, `.vcf` suffix included
    pub filename: String,
}

/// Wrap rendered property lines in the BEGIN/VERSION/END envelope.
pub(crate) fn assemble(version: VcardVersion, lines: &[PropertyLine]) -> String {
    let mut content = format!("BEGIN:VCARD\nVERSION:{version}\n");
    for line in lines {
        content.push_str(&line.text);
        content.push('\n');
    }
    content.push_str("END:VCARD\n");
    content
}

/// Build the output filename from the structured-name value: non-empty
/// components hyphen-joined, `.vcf` appended.
pub(crate) fn derive_filename(n_value: &str) -> String {
    let mut filename: String = n_value
        .split(';')
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    filename.push_str(".vcf");
    filename
}

/// Whether every component of a structured-name value is empty.
pub(crate) fn structured_name_is_empty(n_value: &str) -> bool {
    n_value.split(';').all(str::is_empty)
}
