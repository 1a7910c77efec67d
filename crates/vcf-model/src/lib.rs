#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # vcf-model
//!
//! Core data model for the csv2vcard engine.
//!
//! This crate provides the types shared by every other crate in the
//! workspace: the column-keyed [`ContactRecord`], the closed
//! [`VcardVersion`] enum, and the typed diagnostic stream emitted by the
//! mapping resolver and renderer.

/// Severity-tagged diagnostics for recoverable conditions.
pub mod diagnostics;
/// Column-keyed contact record sourced from one CSV row.
pub mod record;
/// Supported vCard output versions.
pub mod version;

pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use record::ContactRecord;
pub use version::VcardVersion;

use thiserror::Error;

/// Errors that can occur when working with the core model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unsupported vCard version {requested}. Currently supported: 3 or 4")]
    UnsupportedVersion { requested: u8 },
}

impl Error {
    /// Build an unsupported-version error for the requested version number.
    pub fn unsupported_version(requested: u8) -> Self {
        Self::UnsupportedVersion { requested }
    }
}

/// Crate-local result type for model operations.
pub type Result<T> = std::result::Result<T, Error>;
