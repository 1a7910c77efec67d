//! Typed diagnostics
//!
//! Recoverable conditions never abort a batch. Instead the mapping
//! resolver and renderer emit [`Diagnostic`] values the caller can log,
//! count, or escalate, decoupling the core from any logging destination.
//! Warning-severity diagnostics accompany a usable result; error-severity
//! diagnostics explain why a contact produced no document.

use serde::{Deserialize, Serialize};

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// A single property was skipped; the rest of the document stands
    Warning,
    /// The whole contact failed to produce a document
    Error,
}

/// The condition a diagnostic reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// A mapped source column is absent from the contact record
    MissingColumn,
    /// An EMAIL value without an `@`
    MalformedEmail,
    /// A GENDER value outside the controlled vocabulary
    InvalidGender,
    /// A GEO value without a `;` separator
    InvalidGeo,
    /// A KEY/LOGO/PHOTO value that is neither a URI nor valid base64
    BogusBinaryData,
    /// A CONCAT result that is blank after separator stripping
    BlankFormattedName,
    /// A structured name whose components are all empty
    EmptyStructuredName,
    /// FN or N is absent from the rendered document entirely
    MissingNameProperty,
    /// A mapping entry whose shape matches no known rule kind
    UnrecognizedRule,
    /// A CONCAT directive whose payload is not a list of columns
    NonListConcat,
}

impl DiagnosticCode {
    /// Short human-readable description of the condition
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::MissingColumn => "source record has no such column",
            Self::MalformedEmail => "no valid email address",
            Self::InvalidGender => "invalid gender value",
            Self::InvalidGeo => "invalid geo data",
            Self::BogusBinaryData => "bogus data, neither URI nor base64",
            Self::BlankFormattedName => "no valid formatted-name entry",
            Self::EmptyStructuredName => "structured name is empty",
            Self::MissingNameProperty => "required name property was not rendered",
            Self::UnrecognizedRule => "unrecognized mapping entry shape",
            Self::NonListConcat => "CONCAT does not contain a list of columns",
        }
    }
}

/// One recoverable condition, tied to the vCard property it affects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The condition being reported
    pub code: DiagnosticCode,
    /// Warning (property skipped) or error (contact abandoned)
    pub severity: Severity,
    /// The vCard property key the condition applies to
    pub property: String,
    /// The offending data or column name
    pub detail: String,
}

impl Diagnostic {
    /// Build a warning-severity diagnostic.
    pub fn warning(
        code: DiagnosticCode,
        property: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            property: property.into(),
            detail: detail.into(),
        }
    }

    /// Build an error-severity diagnostic.
    pub fn error(
        code: DiagnosticCode,
        property: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity: Severity::Error,
            property: property.into(),
            detail: detail.into(),
        }
    }

    /// Whether this diagnostic abandoned the contact
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.property, self.code.describe())?;
        if !self.detail.is_empty() {
            write!(f, " ({})", self.detail)?;
        }
        Ok(())
    }
}
