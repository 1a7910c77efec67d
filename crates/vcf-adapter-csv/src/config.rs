//! CSV configuration options

/// Configuration for reading contact CSV files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvConfig {
    /// Field delimiter character (default: semicolon, the format most
    /// address-book exports use)
    pub delimiter: char,
    /// Source encoding label (WHATWG names, e.g. `windows-1252`);
    /// `None` means UTF-8 with BOM sniffing
    pub encoding: Option<String>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            encoding: None,
        }
    }
}

impl CsvConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delimiter character
    #[must_use]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the source encoding label
    #[must_use]
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// Convert delimiter to u8 for the csv crate
    #[must_use]
    pub fn delimiter_u8(&self) -> u8 {
        self.delimiter as u8
    }
}
