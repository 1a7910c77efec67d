//! Mapping specification
//!
//! An ordered set of `(property, rule)` entries. Iteration order is the
//! order properties appear in the rendered document, so a loaded mapping
//! preserves the order of its file and the built-in table keeps a stable
//! alphabetical-ish property order.

use serde::{Deserialize, Serialize};

use crate::rule::{PropertyRule, TypedSource};

/// The declarative table linking vCard properties to source columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSpec {
    entries: Vec<(String, PropertyRule)>,
}

impl MappingSpec {
    /// Create an empty spec
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, keeping insertion order
    pub fn push(&mut self, property: impl Into<String>, rule: PropertyRule) {
        self.entries.push((property.into(), rule));
    }

    /// Look up the rule for a property key
    #[must_use]
    pub fn rule(&self, property: &str) -> Option<&PropertyRule> {
        self.entries
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, rule)| rule)
    }

    /// Iterate entries in document order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &PropertyRule)> {
        self.entries.iter().map(|(key, rule)| (key.as_str(), rule))
    }

    /// Number of mapped properties
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the spec maps nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The built-in default mapping.
    ///
    /// Every lowercase value is a column name expected in the source CSV
    /// header.
    #[must_use]
    pub fn builtin_default() -> Self {
        let mut spec = Self::new();

        spec.push(
            "ADR",
            typed(&[
                (
                    "HOME",
                    components(&[
                        "postbox_home",
                        "address_home",
                        "city_home",
                        "region_home",
                        "zip_home",
                        "country_home",
                    ]),
                ),
                (
                    "WORK",
                    components(&["postbox", "address", "city", "region", "zip", "country"]),
                ),
            ]),
        );
        spec.push("ANNIVERSARY", column("anniversary"));
        spec.push("BDAY", column("birthday"));
        spec.push("CATEGORIES", column("categories"));
        spec.push(
            "EMAIL",
            typed(&[("HOME", src("email_home")), ("WORK", src("email"))]),
        );
        spec.push("FN", concat(&["title", "last_name", "first_name"]));
        spec.push("GENDER", column("gender"));
        spec.push("GEO", column("geo"));
        spec.push("KEY", column("key"));
        spec.push("LOGO", column("logo"));
        spec.push(
            "N",
            PropertyRule::Components(
                ["last_name", "first_name", "second_name", "title", "suffix"]
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            ),
        );
        spec.push("NOTE", column("remarks"));
        spec.push("NICKNAME", column("nickname"));
        spec.push("ORG", column("company"));
        spec.push("PHOTO", column("photo"));
        spec.push("ROLE", column("role"));
        spec.push(
            "TEL",
            typed(&[
                ("HOME,CELL", src("mobile_phone_home")),
                ("HOME,FAX", src("fax_home")),
                ("HOME,PAGER", src("pager_home")),
                ("HOME,VOICE", src("phone_home")),
                ("HOME,VIDEO", src("video_phone_home")),
                ("HOME,TEXTPHONE", src("text_phone_home")),
                ("HOME,TEXT", src("text_home")),
                ("WORK,CELL", src("mobile_phone")),
                ("WORK,FAX", src("fax")),
                ("WORK,PAGER", src("pager")),
                ("WORK,VOICE", src("phone")),
                ("WORK,VIDEO", src("video_phone")),
                ("WORK,TEXTPHONE", src("text_phone")),
                ("WORK,TEXT", src("text")),
            ]),
        );
        spec.push("TITLE", column("title"));
        spec.push("TZ", column("timezone"));
        spec.push("UID", column("uuid"));
        spec.push("URL", column("webpage"));

        spec
    }
}

fn column(name: &str) -> PropertyRule {
    PropertyRule::Column(name.to_string())
}

fn concat(names: &[&str]) -> PropertyRule {
    PropertyRule::Concat(names.iter().map(ToString::to_string).collect())
}

fn typed(labels: &[(&str, TypedSource)]) -> PropertyRule {
    PropertyRule::Typed(
        labels
            .iter()
            .map(|(label, source)| ((*label).to_string(), source.clone()))
            .collect(),
    )
}

fn src(name: &str) -> TypedSource {
    TypedSource::Column(name.to_string())
}

fn components(names: &[&str]) -> TypedSource {
    TypedSource::Components(names.iter().map(ToString::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleKind;

    #[test]
    fn default_table_covers_all_properties() {
        let spec = MappingSpec::builtin_default();
        let keys: Vec<&str> = spec.entries().map(|(key, _)| key).collect();
        assert_eq!(
            keys,
            [
                "ADR",
                "ANNIVERSARY",
                "BDAY",
                "CATEGORIES",
                "EMAIL",
                "FN",
                "GENDER",
                "GEO",
                "KEY",
                "LOGO",
                "N",
                "NOTE",
                "NICKNAME",
                "ORG",
                "PHOTO",
                "ROLE",
                "TEL",
                "TITLE",
                "TZ",
                "UID",
                "URL"
            ]
        );
    }

    #[test]
    fn default_structured_name_components() {
        let spec = MappingSpec::builtin_default();
        match spec.rule("N") {
            Some(PropertyRule::Components(cols)) => {
                assert_eq!(
                    cols,
                    &["last_name", "first_name", "second_name", "title", "suffix"]
                );
            }
            other => panic!("expected N component list, got {other:?}"),
        }
    }

    #[test]
    fn default_formatted_name_is_concat() {
        let spec = MappingSpec::builtin_default();
        match spec.rule("FN") {
            Some(PropertyRule::Concat(cols)) => {
                assert_eq!(cols, &["title", "last_name", "first_name"]);
            }
            other => panic!("expected FN concat, got {other:?}"),
        }
    }

    #[test]
    fn default_tel_has_all_fourteen_variants() {
        let spec = MappingSpec::builtin_default();
        match spec.rule("TEL") {
            Some(PropertyRule::Typed(labels)) => {
                assert_eq!(labels.len(), 14);
                assert_eq!(labels[0].0, "HOME,CELL");
                assert_eq!(
                    labels[10],
                    ("WORK,VOICE".to_string(), TypedSource::Column("phone".to_string()))
                );
            }
            other => panic!("expected TEL typed rule, got {other:?}"),
        }
    }

    #[test]
    fn default_adr_home_has_six_components() {
        let spec = MappingSpec::builtin_default();
        match spec.rule("ADR") {
            Some(PropertyRule::Typed(labels)) => {
                let (label, source) = &labels[0];
                assert_eq!(label, "HOME");
                match source {
                    TypedSource::Components(cols) => assert_eq!(cols.len(), 6),
                    TypedSource::Column(_) => panic!("expected component list"),
                }
            }
            other => panic!("expected ADR typed rule, got {other:?}"),
        }
    }

    #[test]
    fn lookup_by_property_key() {
        let spec = MappingSpec::builtin_default();
        assert_eq!(spec.rule("NOTE"), Some(&PropertyRule::Column("remarks".into())));
        assert_eq!(spec.rule("UID").map(PropertyRule::kind), Some(RuleKind::Column));
        assert_eq!(spec.rule("IMPP"), None);
    }
}
