//! vCard version selection
//!
//! Only versions 3.0 and 4.0 are supported. The two differ in parameter
//! syntax for typed and binary properties, so the renderer branches on
//! this enum; anything else is rejected before any rendering starts.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Supported vCard output versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VcardVersion {
    /// vCard 3.0 (RFC 2426 parameter syntax)
    V3,
    /// vCard 4.0 (RFC 6350 parameter syntax)
    V4,
}

impl VcardVersion {
    /// Resolve a caller-supplied version number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedVersion`] for anything other than 3 or 4.
    pub fn from_number(requested: u8) -> Result<Self> {
        match requested {
            3 => Ok(Self::V3),
            4 => Ok(Self::V4),
            other => Err(Error::unsupported_version(other)),
        }
    }

    /// The plain version number (3 or 4)
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::V3 => 3,
            Self::V4 => 4,
        }
    }
}

impl std::fmt::Display for VcardVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.0", self.number())
    }
}
