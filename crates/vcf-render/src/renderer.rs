//! Property rendering
//!
//! Walks the mapping in entry order, renders each property through the
//! branch its rule selects, synthesizes `REV` when absent, then assembles
//! the document and derives the filename. Per-field problems become
//! warning diagnostics under the permissive policy and hard errors under
//! the strict policy; an unusable name abandons the contact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vcf_mapping::{MappingPolicy, MappingSpec, PropertyRule, TypedSource};
use vcf_model::{ContactRecord, Diagnostic, DiagnosticCode, VcardVersion};

use crate::binary::{self, BinaryKind};
use crate::document::{self, PropertyLine, Vcard};
use crate::text;
use crate::{RenderError, Result};

/// Options for one rendering run
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Target vCard version
    pub version: VcardVersion,
    /// Skip-and-warn or fail-fast for malformed per-field data
    pub policy: MappingPolicy,
}

impl RenderOptions {
    /// Options for the given version with the default permissive policy
    #[must_use]
    pub fn new(version: VcardVersion) -> Self {
        Self {
            version,
            policy: MappingPolicy::default(),
        }
    }

    /// Set the field policy
    #[must_use]
    pub fn policy(mut self, policy: MappingPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Result of rendering one contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOutcome {
    /// The document, or `None` when the contact failed to produce a
    /// usable name
    pub vcard: Option<Vcard>,
    /// Everything worth reporting about this contact
    pub diagnostics: Vec<Diagnostic>,
}

impl RenderOutcome {
    /// Whether a document was produced
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.vcard.is_some()
    }
}

/// Renders contacts against one read-only mapping
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    mapping: &'a MappingSpec,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    /// Create a renderer over a resolved mapping
    #[must_use]
    pub fn new(mapping: &'a MappingSpec, options: RenderOptions) -> Self {
        Self { mapping, options }
    }

    /// Render one contact using the current wall clock for `REV`.
    ///
    /// # Errors
    ///
    /// Fails only under [`MappingPolicy::Strict`], when the first
    /// malformed field is promoted to a [`RenderError::Property`].
    pub fn render(&self, contact: &ContactRecord) -> Result<RenderOutcome> {
        self.render_at(contact, Utc::now())
    }

    /// Render one contact with an explicit timestamp for `REV`.
    ///
    /// Rendering the same inputs with the same timestamp is byte-identical.
    ///
    /// # Errors
    ///
    /// Same as [`Renderer::render`].
    pub fn render_at(
        &self,
        contact: &ContactRecord,
        timestamp: DateTime<Utc>,
    ) -> Result<RenderOutcome> {
        let mut lines: Vec<PropertyLine> = Vec::new();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();

        for (property, rule) in self.mapping.entries() {
            match rule {
                PropertyRule::Typed(labels) => {
                    self.render_typed(property, labels, contact, &mut lines, &mut diagnostics)?;
                }
                PropertyRule::Concat(columns) => {
                    self.render_concat(property, columns, contact, &mut lines, &mut diagnostics)?;
                }
                PropertyRule::Components(columns) => {
                    self.render_components(property, columns, contact, &mut lines, &mut diagnostics)?;
                }
                PropertyRule::Column(column) => {
                    self.render_column(property, column, contact, &mut lines, &mut diagnostics)?;
                }
            }
        }

        if !lines.iter().any(|line| line.property == "REV") {
            let stamp = timestamp.format("%Y%m%dT%H%M%SZ");
            lines.push(PropertyLine::new("REV", format!("REV:{stamp}")));
        }

        if let Some(failure) = name_failure(&lines) {
            diagnostics.push(failure);
            return Ok(RenderOutcome {
                vcard: None,
                diagnostics,
            });
        }

        // name_failure guarantees an N line exists here
        let n_value = lines
            .iter()
            .find(|line| line.property == "N")
            .map_or("", PropertyLine::value);
        let filename = document::derive_filename(n_value);
        let content = document::assemble(self.options.version, &lines);
        tracing::debug!(%filename, properties = lines.len(), "rendered vcard");

        Ok(RenderOutcome {
            vcard: Some(Vcard { content, filename }),
            diagnostics,
        })
    }

    /// TYPE-map branch: one line per type label.
    fn render_typed(
        &self,
        property: &str,
        labels: &[(String, TypedSource)],
        contact: &ContactRecord,
        lines: &mut Vec<PropertyLine>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        for (label, source) in labels {
            match source {
                TypedSource::Components(columns) => {
                    let segments =
                        self.collect_segments(property, columns, contact, diagnostics)?;
                    lines.push(PropertyLine::new(
                        property,
                        format!("{property};TYPE={label}:{}", segments.join(";")),
                    ));
                }
                TypedSource::Column(column) => match contact.get(column) {
                    None => {
                        self.report(
                            DiagnosticCode::MissingColumn,
                            property,
                            column.clone(),
                            diagnostics,
                        )?;
                    }
                    Some("") => {}
                    Some(value) => {
                        if property == "EMAIL" && !value.contains('@') {
                            self.report(
                                DiagnosticCode::MalformedEmail,
                                property,
                                value,
                                diagnostics,
                            )?;
                            continue;
                        }
                        lines.push(PropertyLine::new(
                            property,
                            format!("{property};TYPE={label}:{value}"),
                        ));
                    }
                },
            }
        }
        Ok(())
    }

    /// CONCAT branch: visual concatenation with separators stripped.
    fn render_concat(
        &self,
        property: &str,
        columns: &[String],
        contact: &ContactRecord,
        lines: &mut Vec<PropertyLine>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        let mut value = String::new();
        for column in columns {
            match contact.get(column) {
                Some(raw) => value.push_str(text::strip_separators(raw).trim()),
                None => self.report(
                    DiagnosticCode::MissingColumn,
                    property,
                    column.clone(),
                    diagnostics,
                )?,
            }
        }

        let value = value.trim();
        if value.is_empty() {
            self.report(DiagnosticCode::BlankFormattedName, property, "", diagnostics)?;
        } else {
            lines.push(PropertyLine::new(property, format!("{property}:{value}")));
        }
        Ok(())
    }

    /// Ordered-list branch: positional components joined with `;`.
    fn render_components(
        &self,
        property: &str,
        columns: &[String],
        contact: &ContactRecord,
        lines: &mut Vec<PropertyLine>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        let segments = self.collect_segments(property, columns, contact, diagnostics)?;
        lines.push(PropertyLine::new(
            property,
            format!("{property}:{}", segments.join(";")),
        ));
        Ok(())
    }

    /// Single-column branch, with binary and controlled-vocabulary
    /// specializations.
    fn render_column(
        &self,
        property: &str,
        column: &str,
        contact: &ContactRecord,
        lines: &mut Vec<PropertyLine>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        let Some(value) = contact.get(column) else {
            return self.report(
                DiagnosticCode::MissingColumn,
                property,
                column,
                diagnostics,
            );
        };

        if let Some(kind) = BinaryKind::for_property(property) {
            if value.trim().is_empty() {
                return Ok(());
            }
            match binary::render_line(property, kind, value, self.options.version) {
                Some(text) => lines.push(PropertyLine::new(property, text)),
                None => self.report(
                    DiagnosticCode::BogusBinaryData,
                    property,
                    column,
                    diagnostics,
                )?,
            }
            return Ok(());
        }

        match property {
            "GENDER" => {
                let upper = value.to_uppercase();
                if !text::is_valid_gender(&upper) {
                    self.report(DiagnosticCode::InvalidGender, property, value, diagnostics)?;
                } else if !upper.is_empty() {
                    lines.push(PropertyLine::new(property, format!("{property}:{upper}")));
                }
            }
            "GEO" => {
                if !value.contains(';') {
                    self.report(DiagnosticCode::InvalidGeo, property, value, diagnostics)?;
                } else if !value.is_empty() {
                    lines.push(PropertyLine::new(property, format!("{property}:{value}")));
                }
            }
            _ => {
                if !value.is_empty() {
                    lines.push(PropertyLine::new(property, format!("{property}:{value}")));
                }
            }
        }
        Ok(())
    }

    /// Look up each listed column, substituting an empty segment (and
    /// warning) for missing ones so the separator count stays fixed.
    fn collect_segments(
        &self,
        property: &str,
        columns: &[String],
        contact: &ContactRecord,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<String>> {
        let mut segments = Vec::with_capacity(columns.len());
        for column in columns {
            match contact.get(column) {
                Some(value) => segments.push(value.to_string()),
                None => {
                    self.report(
                        DiagnosticCode::MissingColumn,
                        property,
                        column.clone(),
                        diagnostics,
                    )?;
                    segments.push(String::new());
                }
            }
        }
        Ok(segments)
    }

    /// Record a warning, or fail fast under the strict policy.
    fn report(
        &self,
        code: DiagnosticCode,
        property: &str,
        detail: impl Into<String>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        let detail = detail.into();
        match self.options.policy {
            MappingPolicy::Strict => Err(RenderError::property(
                property,
                format!("{} ({detail})", code.describe()),
            )),
            MappingPolicy::Permissive => {
                diagnostics.push(Diagnostic::warning(code, property, detail));
                Ok(())
            }
        }
    }
}

/// The document-validity check: a contact without a usable formatted and
/// structured name produces no document.
fn name_failure(lines: &[PropertyLine]) -> Option<Diagnostic> {
    let formatted = lines.iter().find(|line| line.property == "FN");
    match formatted {
        None => {
            return Some(Diagnostic::error(
                DiagnosticCode::MissingNameProperty,
                "FN",
                "",
            ));
        }
        Some(line) if line.value().is_empty() => {
            return Some(Diagnostic::error(
                DiagnosticCode::BlankFormattedName,
                "FN",
                "",
            ));
        }
        Some(_) => {}
    }

    let structured = lines.iter().find(|line| line.property == "N");
    match structured {
        None => Some(Diagnostic::error(
            DiagnosticCode::MissingNameProperty,
            "N",
            "",
        )),
        Some(line) if document::structured_name_is_empty(line.value()) => Some(
            Diagnostic::error(DiagnosticCode::EmptyStructuredName, "N", ""),
        ),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn frozen_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 11, 24, 12, 30, 45).unwrap()
    }

    fn minimal_contact() -> ContactRecord {
        [("last_name", "Gump"), ("first_name", "Forrest"), ("title", "Shrimp Man")]
            .into_iter()
            .collect()
    }

    fn spec_with(entries: &[(&str, PropertyRule)]) -> MappingSpec {
        let mut spec = MappingSpec::new();
        for (property, rule) in entries {
            spec.push(*property, rule.clone());
        }
        spec
    }

    fn name_rules() -> Vec<(&'static str, PropertyRule)> {
        vec![
            (
                "FN",
                PropertyRule::Concat(vec!["title".into(), "last_name".into(), "first_name".into()]),
            ),
            (
                "N",
                PropertyRule::Components(vec![
                    "last_name".into(),
                    "first_name".into(),
                    "second_name".into(),
                    "title".into(),
                    "suffix".into(),
                ]),
            ),
        ]
    }

    #[test]
    fn typed_list_preserves_separator_count_for_missing_columns() {
        let mut entries = name_rules();
        entries.push((
            "ADR",
            PropertyRule::Typed(vec![(
                "WORK".into(),
                TypedSource::Components(vec!["a".into(), "b".into()]),
            )]),
        ));
        let spec = spec_with(&entries);
        let mut contact = minimal_contact();
        contact.insert("a", "value_a");

        let renderer = Renderer::new(&spec, RenderOptions::new(VcardVersion::V4));
        let outcome = renderer.render_at(&contact, frozen_clock()).unwrap();
        let vcard = outcome.vcard.unwrap();

        assert!(vcard.content.contains("ADR;TYPE=WORK:value_a;\n"));
        assert!(
            outcome
                .diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::MissingColumn && d.detail == "b")
        );
    }

    #[test]
    fn concat_strips_separators_without_joining() {
        let mut spec = spec_with(&name_rules());
        spec.push("X-TEST", PropertyRule::Column("unused".into()));
        let contact: ContactRecord = [
            ("title", "Dr."),
            ("last_name", "O'Brien,Jr"),
            ("first_name", "Anne"),
            ("unused", ""),
        ]
        .into_iter()
        .collect();

        let renderer = Renderer::new(&spec, RenderOptions::new(VcardVersion::V4));
        let outcome = renderer.render_at(&contact, frozen_clock()).unwrap();

        assert!(outcome.vcard.unwrap().content.contains("FN:Dr.O'BrienJrAnne\n"));
    }

    #[test]
    fn malformed_email_is_skipped_with_warning() {
        let mut entries = name_rules();
        entries.push((
            "EMAIL",
            PropertyRule::Typed(vec![("WORK".into(), TypedSource::Column("email".into()))]),
        ));
        let spec = spec_with(&entries);
        let mut contact = minimal_contact();
        contact.insert("email", "not-an-address");

        let renderer = Renderer::new(&spec, RenderOptions::new(VcardVersion::V4));
        let outcome = renderer.render_at(&contact, frozen_clock()).unwrap();

        assert!(!outcome.vcard.unwrap().content.contains("EMAIL"));
        assert!(
            outcome
                .diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::MalformedEmail)
        );
    }

    #[test]
    fn gender_vocabulary_is_enforced_and_uppercased() {
        let mut entries = name_rules();
        entries.push(("GENDER", PropertyRule::Column("gender".into())));
        let spec = spec_with(&entries);
        let renderer = Renderer::new(&spec, RenderOptions::new(VcardVersion::V4));

        let mut contact = minimal_contact();
        contact.insert("gender", "m");
        let outcome = renderer.render_at(&contact, frozen_clock()).unwrap();
        assert!(outcome.vcard.unwrap().content.contains("GENDER:M\n"));

        let mut contact = minimal_contact();
        contact.insert("gender", "x");
        let outcome = renderer.render_at(&contact, frozen_clock()).unwrap();
        assert!(!outcome.vcard.unwrap().content.contains("GENDER"));
        assert!(
            outcome
                .diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::InvalidGender)
        );
    }

    #[test]
    fn geo_requires_separator() {
        let mut entries = name_rules();
        entries.push(("GEO", PropertyRule::Column("geo".into())));
        let spec = spec_with(&entries);
        let renderer = Renderer::new(&spec, RenderOptions::new(VcardVersion::V4));

        let mut contact = minimal_contact();
        contact.insert("geo", "48.85;2.35");
        let outcome = renderer.render_at(&contact, frozen_clock()).unwrap();
        assert!(outcome.vcard.unwrap().content.contains("GEO:48.85;2.35\n"));

        let mut contact = minimal_contact();
        contact.insert("geo", "48.85 2.35");
        let outcome = renderer.render_at(&contact, frozen_clock()).unwrap();
        assert!(!outcome.vcard.unwrap().content.contains("GEO"));
        assert!(
            outcome
                .diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::InvalidGeo)
        );
    }

    #[test]
    fn rev_is_synthesized_when_absent() {
        let spec = spec_with(&name_rules());
        let renderer = Renderer::new(&spec, RenderOptions::new(VcardVersion::V4));
        let outcome = renderer
            .render_at(&minimal_contact(), frozen_clock())
            .unwrap();

        assert!(outcome.vcard.unwrap().content.contains("REV:20231124T123045Z\n"));
    }

    #[test]
    fn mapped_rev_suppresses_synthesis() {
        let mut entries = name_rules();
        entries.push(("REV", PropertyRule::Column("revision".into())));
        let spec = spec_with(&entries);
        let mut contact = minimal_contact();
        contact.insert("revision", "20200101T000000Z");

        let renderer = Renderer::new(&spec, RenderOptions::new(VcardVersion::V4));
        let outcome = renderer.render_at(&contact, frozen_clock()).unwrap();
        let content = outcome.vcard.unwrap().content;

        assert!(content.contains("REV:20200101T000000Z\n"));
        assert!(!content.contains("REV:20231124T123045Z"));
    }

    #[test]
    fn rendering_is_idempotent_under_a_frozen_clock() {
        let spec = spec_with(&name_rules());
        let renderer = Renderer::new(&spec, RenderOptions::new(VcardVersion::V3));
        let contact = minimal_contact();

        let first = renderer.render_at(&contact, frozen_clock()).unwrap();
        let second = renderer.render_at(&contact, frozen_clock()).unwrap();
        assert_eq!(first.vcard, second.vcard);
    }

    #[test]
    fn contact_without_any_mapped_column_yields_no_document() {
        let spec = spec_with(&name_rules());
        let renderer = Renderer::new(&spec, RenderOptions::new(VcardVersion::V4));
        let contact = ContactRecord::new();

        let outcome = renderer.render_at(&contact, frozen_clock()).unwrap();
        assert!(outcome.vcard.is_none());
        assert!(outcome.diagnostics.iter().any(Diagnostic::is_error));
    }

    #[test]
    fn all_empty_structured_name_yields_no_document() {
        let spec = spec_with(&name_rules());
        let renderer = Renderer::new(&spec, RenderOptions::new(VcardVersion::V4));
        let contact: ContactRecord = [
            ("last_name", ""),
            ("first_name", ""),
            ("second_name", ""),
            ("title", "Dr."),
            ("suffix", ""),
        ]
        .into_iter()
        .collect();

        // title feeds FN, so FN is non-blank while N has content too
        let outcome = renderer.render_at(&contact, frozen_clock()).unwrap();
        assert!(outcome.succeeded());

        let contact: ContactRecord = [
            ("last_name", ""),
            ("first_name", ""),
            ("second_name", ""),
            ("title", ""),
            ("suffix", ""),
        ]
        .into_iter()
        .collect();
        let outcome = renderer.render_at(&contact, frozen_clock()).unwrap();
        assert!(outcome.vcard.is_none());
    }

    #[test]
    fn strict_policy_fails_fast_on_missing_column() {
        let spec = spec_with(&name_rules());
        let options = RenderOptions::new(VcardVersion::V4).policy(MappingPolicy::Strict);
        let renderer = Renderer::new(&spec, options);
        let mut contact = minimal_contact();
        contact.insert("second_name", "");
        contact.insert("suffix", "");

        // complete contact passes
        let outcome = renderer.render_at(&contact, frozen_clock()).unwrap();
        assert!(outcome.succeeded());

        // a gap fails fast instead of warning
        let partial: ContactRecord =
            [("last_name", "Gump"), ("first_name", "Forrest"), ("title", "x")]
                .into_iter()
                .collect();
        let err = renderer.render_at(&partial, frozen_clock()).unwrap_err();
        assert!(matches!(err, RenderError::Property { .. }));
    }
}
