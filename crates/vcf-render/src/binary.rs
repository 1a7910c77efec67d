//! Binary/URI property payloads
//!
//! `KEY`, `LOGO`, and `PHOTO` carry either a URI reference or inline
//! base64 data, with parameter syntax that differs between vCard 3.0 and
//! 4.0. The type/media-type pairs are fixed per property.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use vcf_model::VcardVersion;

/// The three properties with binary payload handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryKind {
    Key,
    Logo,
    Photo,
}

impl BinaryKind {
    pub(crate) fn for_property(property: &str) -> Option<Self> {
        match property {
            "KEY" => Some(Self::Key),
            "LOGO" => Some(Self::Logo),
            "PHOTO" => Some(Self::Photo),
            _ => None,
        }
    }

    /// The v3 `TYPE=` parameter value
    fn type_param(self) -> &'static str {
        match self {
            Self::Key => "PGP",
            Self::Logo => "PNG",
            Self::Photo => "JPEG",
        }
    }

    /// The v4 `MEDIATYPE=` parameter value
    fn media_type(self) -> &'static str {
        match self {
            Self::Key => "application/pgp-keys",
            Self::Logo => "image/png",
            Self::Photo => "image/jpeg",
        }
    }
}

/// Render a binary property line, or `None` when the value is neither a
/// URI nor decodable base64.
pub(crate) fn render_line(
    property: &str,
    kind: BinaryKind,
    value: &str,
    version: VcardVersion,
) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.to_lowercase().starts_with("http") {
        return Some(match version {
            VcardVersion::V3 => format!("{property};TYPE={}:{value}", kind.type_param()),
            VcardVersion::V4 => format!("{property};MEDIATYPE={}:{value}", kind.media_type()),
        });
    }

    STANDARD.decode(trimmed).ok()?;

    // The v4 inline form is not the RFC 6350 data: URI ordering; existing
    // consumers expect the parameter-style layout.
    Some(match version {
        VcardVersion::V3 => format!("{property};TYPE={};ENCODING=b:{value}", kind.type_param()),
        VcardVersion::V4 => format!("{property};data:{};base64,{value}", kind.media_type()),
    })
}
