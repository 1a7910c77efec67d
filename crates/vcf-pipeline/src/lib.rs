#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # vcf-pipeline
//!
//! Batch orchestration for CSV-to-vCard conversion.
//!
//! Discovers source files, feeds each contact through the renderer, and
//! exports the results either as one file per contact or as combined
//! multi-entry files with optional size-based splitting. Failed contacts
//! are counted and logged, never fatal; only structural problems (bad
//! mapping, unreadable source root) abort a run.

pub mod config;
pub mod converter;
pub mod discover;
pub mod export;

pub use config::ConvertConfig;
pub use converter::{ConvertStats, Converter, FileReport};
pub use discover::discover_sources;

use thiserror::Error;

/// Errors that can occur in the pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Csv(#[from] vcf_adapter_csv::CsvError),

    #[error(transparent)]
    Render(#[from] vcf_render::RenderError),

    #[error("Source not found: {path}")]
    SourceNotFound { path: String },

    #[error("IO error during {operation} for '{path}': {message}")]
    Io {
        operation: String,
        path: String,
        message: String,
    },
}

impl Error {
    /// Build a missing-source error.
    pub fn source_not_found(path: impl Into<String>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    /// Build a structured I/O error with operation/path context.
    pub fn io(
        operation: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Crate-local result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
