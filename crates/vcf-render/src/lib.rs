#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # vcf-render
//!
//! The vCard renderer: turns one [`vcf_model::ContactRecord`] plus a
//! resolved [`vcf_mapping::MappingSpec`] into a syntactically valid vCard
//! text block and a derived filename.
//!
//! Rendering is a pure function of its inputs (plus the clock, for the
//! synthesized `REV` property). No state persists between contacts, and a
//! shared mapping can be read concurrently; parallelizing across contacts
//! is entirely the caller's choice.

mod binary;
pub mod document;
pub mod renderer;
mod text;

pub use document::Vcard;
pub use renderer::{RenderOptions, RenderOutcome, Renderer};

use thiserror::Error;

/// Errors that can abort rendering
///
/// Under the default permissive policy rendering never fails; malformed
/// fields become diagnostics. Strict policy promotes them to
/// [`RenderError::Property`].
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Property {property}: {message}")]
    Property { property: String, message: String },
}

impl RenderError {
    /// Build a strict-mode property failure.
    pub fn property(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Property {
            property: property.into(),
            message: message.into(),
        }
    }
}

/// Crate-local result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
