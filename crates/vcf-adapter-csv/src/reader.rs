//! CSV reader
//!
//! Decodes source bytes, parses them with the `csv` crate, and zips the
//! header row with each data row into a [`ContactRecord`]. Short rows
//! simply leave their trailing columns absent, matching how downstream
//! rendering treats missing columns.

use std::path::Path;

use vcf_model::ContactRecord;

use crate::config::CsvConfig;
use crate::errors::{CsvError, CsvResult};

/// Reader for contact CSV files
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    config: CsvConfig,
}

impl CsvReader {
    /// Create a reader with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with the given configuration
    #[must_use]
    pub fn with_config(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Read contact records from a file.
    ///
    /// # Errors
    ///
    /// Returns a [`CsvError`] when the file cannot be read, decoded, or
    /// parsed.
    pub fn read_path(&self, path: &Path) -> CsvResult<Vec<ContactRecord>> {
        let bytes = std::fs::read(path)
            .map_err(|e| CsvError::io(path.display().to_string(), e.to_string()))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "parsing csv");
        self.read_bytes(&bytes)
    }

    /// Read contact records from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`CsvError`] when decoding or parsing fails.
    pub fn read_bytes(&self, bytes: &[u8]) -> CsvResult<Vec<ContactRecord>> {
        let text = self.decode(bytes)?;
        self.read_str(&text)
    }

    /// Read contact records from already-decoded text.
    ///
    /// # Errors
    ///
    /// Returns a [`CsvError`] when the header is missing or a row fails
    /// to parse.
    pub fn read_str(&self, text: &str) -> CsvResult<Vec<ContactRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter_u8())
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| CsvError::read_at(1, e.to_string()))?
            .clone();
        if headers.is_empty() {
            return Err(CsvError::MissingHeader);
        }

        let mut contacts = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|e| {
                let line = e
                    .position()
                    .map_or(0, |p| usize::try_from(p.line()).unwrap_or(0));
                CsvError::read_at(line, e.to_string())
            })?;

            // zip stops at the shorter side: short rows lose trailing
            // columns, long rows lose unnamed cells
            let contact: ContactRecord = headers.iter().zip(row.iter()).collect();
            contacts.push(contact);
        }

        tracing::debug!(contacts = contacts.len(), "parsed csv");
        Ok(contacts)
    }

    fn decode(&self, bytes: &[u8]) -> CsvResult<String> {
        let encoding = match self.config.encoding.as_deref() {
            Some(label) => encoding_rs::Encoding::for_label(label.as_bytes())
                .ok_or_else(|| CsvError::decode(format!("unknown encoding label '{label}'")))?,
            None => encoding_rs::UTF_8,
        };

        // decode() sniffs a BOM first, so a UTF-16 export with a BOM
        // still round-trips under the UTF-8 default
        let (text, used, had_errors) = encoding.decode(bytes);
        if had_errors {
            return Err(CsvError::decode(format!(
                "input is not valid {}; adjust the source encoding",
                used.name()
            )));
        }
        Ok(text.into_owned())
    }
}
