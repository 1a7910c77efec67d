//! Error types for the CSV adapter

use thiserror::Error;

/// Errors that can occur when reading contact CSV files
#[derive(Error, Debug, Clone)]
pub enum CsvError {
    /// CSV parse error with line context
    #[error("CSV read error at line {line}: {message}")]
    Read { line: usize, message: String },

    /// The source bytes could not be decoded with the configured encoding
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// The file has no header row to name columns
    #[error("CSV file has no header row")]
    MissingHeader,

    /// I/O error with path context
    #[error("IO error for '{path}': {message}")]
    Io { path: String, message: String },
}

impl CsvError {
    /// Create a read error at a specific line
    pub fn read_at(line: usize, message: impl Into<String>) -> Self {
        Self::Read {
            line,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an I/O error with path context
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Get the line number if available
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::Read { line, .. } if *line > 0 => Some(*line),
            _ => None,
        }
    }
}

/// Result type alias for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;
