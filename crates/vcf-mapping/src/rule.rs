//! Property rules
//!
//! Each mapping entry resolves to exactly one [`PropertyRule`] variant.
//! The variants mirror the four shapes a mapping file may use for a
//! property: a single column, an ordered component list, a TYPE-keyed
//! variant map, or a CONCAT directive.

use serde::{Deserialize, Serialize};

/// How one vCard property draws from the source record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyRule {
    /// One column feeds the property value directly
    Column(String),

    /// An ordered column list joined positionally with `;`
    /// (structured properties such as `N`)
    Components(Vec<String>),

    /// A `TYPE`-keyed variant map: each label renders its own line
    /// (`ADR`, `EMAIL`, `TEL`)
    Typed(Vec<(String, TypedSource)>),

    /// Columns concatenated into one free-text string with separator
    /// characters stripped (`FN`)
    Concat(Vec<String>),
}

/// Source for one label inside a TYPE-keyed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypedSource {
    /// A single column; rendered only when present and non-empty
    Column(String),
    /// An ordered component list; missing columns leave empty segments
    Components(Vec<String>),
}

/// Discriminant of a [`PropertyRule`], for callers that only need the
/// branch kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Column,
    Components,
    Typed,
    Concat,
}

impl PropertyRule {
    /// Which rendering branch this rule selects
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Column(_) => RuleKind::Column,
            Self::Components(_) => RuleKind::Components,
            Self::Typed(_) => RuleKind::Typed,
            Self::Concat(_) => RuleKind::Concat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_kinds_match_variants() {
        assert_eq!(PropertyRule::Column("geo".into()).kind(), RuleKind::Column);
        assert_eq!(
            PropertyRule::Components(vec!["last_name".into()]).kind(),
            RuleKind::Components
        );
        assert_eq!(
            PropertyRule::Typed(vec![("WORK".into(), TypedSource::Column("email".into()))]).kind(),
            RuleKind::Typed
        );
        assert_eq!(
            PropertyRule::Concat(vec!["title".into()]).kind(),
            RuleKind::Concat
        );
    }
}
