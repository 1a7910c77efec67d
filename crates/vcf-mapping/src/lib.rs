#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # vcf-mapping
//!
//! The mapping resolver: owns the declarative table linking vCard
//! properties to source-record columns.
//!
//! A mapping comes either from the built-in default table
//! ([`MappingSpec::builtin_default`]) or from a user-supplied JSON/YAML file
//! ([`loader::load_path`]). Either way, the loosely-shaped source data is
//! resolved once, at load time, into the closed [`PropertyRule`] variant
//! set; rendering never probes shapes again.

pub mod loader;
pub mod rule;
pub mod spec;

pub use loader::{LoadedMapping, MappingPolicy, from_json_str, from_yaml_str, load_path};
pub use rule::{PropertyRule, RuleKind, TypedSource};
pub use spec::MappingSpec;

use thiserror::Error;

/// Errors that can occur when loading a mapping
///
/// All of these are fatal for the run: a conversion cannot proceed
/// without a usable mapping.
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Mapping file is not valid structured data: {message}")]
    Format { message: String },

    #[error("Failed to read mapping file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Mapping must be an object of property entries, got {found}")]
    TopLevelShape { found: String },

    #[error("Unrecognized mapping entry for '{property}': {detail}")]
    UnrecognizedEntry { property: String, detail: String },
}

impl MappingError {
    /// Build a format error from a parser message.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Build an I/O error with path context.
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Build a strict-mode rejection for an entry shape.
    pub fn unrecognized(property: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::UnrecognizedEntry {
            property: property.into(),
            detail: detail.into(),
        }
    }
}

/// Crate-local result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
