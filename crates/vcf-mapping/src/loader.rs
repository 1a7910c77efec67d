//! Mapping loader
//!
//! Parses an external mapping file (JSON, or YAML by extension) and
//! resolves its duck-typed entries into the closed [`PropertyRule`] set.
//! Files that are not valid structured data are fatal; individual entries
//! with unrecognized shapes follow the configured [`MappingPolicy`].

use std::path::Path;

use serde_json::Value;

use vcf_model::{Diagnostic, DiagnosticCode};

use crate::rule::{PropertyRule, TypedSource};
use crate::spec::MappingSpec;
use crate::{MappingError, Result};

/// How to treat malformed mapping entries (and, downstream, malformed
/// per-field data during rendering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingPolicy {
    /// Skip the offending entry and record a warning diagnostic
    #[default]
    Permissive,
    /// Fail fast on the first offending entry
    Strict,
}

/// A resolved mapping plus the warnings produced while resolving it
#[derive(Debug, Clone)]
pub struct LoadedMapping {
    /// The usable specification
    pub spec: MappingSpec,
    /// Warning diagnostics for dropped entries (empty under [`MappingPolicy::Strict`])
    pub diagnostics: Vec<Diagnostic>,
}

/// Load a mapping file.
///
/// `.yml` / `.yaml` files parse as YAML, anything else as JSON.
///
/// # Errors
///
/// Returns a [`MappingError`] when the file cannot be read, is not valid
/// structured data, or (under [`MappingPolicy::Strict`]) contains an
/// unrecognized entry.
pub fn load_path(path: &Path, policy: MappingPolicy) -> Result<LoadedMapping> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| MappingError::io(path.display().to_string(), e.to_string()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

    if is_yaml {
        from_yaml_str(&content, policy)
    } else {
        from_json_str(&content, policy)
    }
}

/// Resolve a mapping from JSON text.
///
/// # Errors
///
/// Returns a [`MappingError`] on invalid JSON or, under strict policy,
/// on unrecognized entries.
pub fn from_json_str(json: &str, policy: MappingPolicy) -> Result<LoadedMapping> {
    let value: Value = serde_json::from_str(json).map_err(|e| MappingError::format(e.to_string()))?;
    resolve(&value, policy)
}

/// Resolve a mapping from YAML text.
///
/// # Errors
///
/// Returns a [`MappingError`] on invalid YAML or, under strict policy,
/// on unrecognized entries.
pub fn from_yaml_str(yaml: &str, policy: MappingPolicy) -> Result<LoadedMapping> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(yaml).map_err(|e| MappingError::format(e.to_string()))?;
    let value = serde_json::to_value(value).map_err(|e| MappingError::format(e.to_string()))?;
    resolve(&value, policy)
}

/// Resolve an already-parsed structured value into a [`MappingSpec`].
///
/// # Errors
///
/// Returns a [`MappingError`] when the top level is not an object or,
/// under strict policy, when an entry shape is unrecognized.
pub fn resolve(value: &Value, policy: MappingPolicy) -> Result<LoadedMapping> {
    let Value::Object(map) = value else {
        return Err(MappingError::TopLevelShape {
            found: value_type_name(value).to_string(),
        });
    };

    let mut spec = MappingSpec::new();
    let mut diagnostics = Vec::new();

    for (property, entry) in map {
        if is_falsy(entry) {
            continue;
        }
        if let Some(rule) = resolve_entry(property, entry, policy, &mut diagnostics)? {
            spec.push(property, rule);
        }
    }

    Ok(LoadedMapping { spec, diagnostics })
}

fn resolve_entry(
    property: &str,
    entry: &Value,
    policy: MappingPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<PropertyRule>> {
    match entry {
        Value::String(column) => Ok(Some(PropertyRule::Column(column.clone()))),
        Value::Array(items) => match string_list(items) {
            Some(columns) => Ok(Some(PropertyRule::Components(columns))),
            None => reject(
                DiagnosticCode::UnrecognizedRule,
                property,
                "component list contains non-string members",
                policy,
                diagnostics,
            ),
        },
        Value::Object(fields) => {
            if let Some(type_map) = fields.get("TYPE") {
                resolve_typed(property, type_map, policy, diagnostics)
            } else if let Some(concat) = fields.get("CONCAT") {
                match concat {
                    Value::Array(items) => match string_list(items) {
                        Some(columns) if !columns.is_empty() => {
                            Ok(Some(PropertyRule::Concat(columns)))
                        }
                        Some(_) => Ok(None),
                        None => reject(
                            DiagnosticCode::NonListConcat,
                            property,
                            "CONCAT list contains non-string members",
                            policy,
                            diagnostics,
                        ),
                    },
                    other => reject(
                        DiagnosticCode::NonListConcat,
                        property,
                        format!("CONCAT payload is {}", value_type_name(other)),
                        policy,
                        diagnostics,
                    ),
                }
            } else {
                reject(
                    DiagnosticCode::UnrecognizedRule,
                    property,
                    "object entry carries neither TYPE nor CONCAT",
                    policy,
                    diagnostics,
                )
            }
        }
        other => reject(
            DiagnosticCode::UnrecognizedRule,
            property,
            format!("entry is {}", value_type_name(other)),
            policy,
            diagnostics,
        ),
    }
}

fn resolve_typed(
    property: &str,
    type_map: &Value,
    policy: MappingPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<PropertyRule>> {
    let Value::Object(labels) = type_map else {
        return reject(
            DiagnosticCode::UnrecognizedRule,
            property,
            format!("TYPE payload is {}", value_type_name(type_map)),
            policy,
            diagnostics,
        );
    };

    let mut resolved = Vec::new();
    for (label, source) in labels {
        if is_falsy(source) {
            continue;
        }
        match source {
            Value::String(column) => {
                resolved.push((label.clone(), TypedSource::Column(column.clone())));
            }
            Value::Array(items) => match string_list(items) {
                Some(columns) => resolved.push((label.clone(), TypedSource::Components(columns))),
                None => {
                    reject::<()>(
                        DiagnosticCode::UnrecognizedRule,
                        property,
                        format!("TYPE label '{label}' contains non-string members"),
                        policy,
                        diagnostics,
                    )?;
                }
            },
            other => {
                reject::<()>(
                    DiagnosticCode::UnrecognizedRule,
                    property,
                    format!("TYPE label '{label}' is {}", value_type_name(other)),
                    policy,
                    diagnostics,
                )?;
            }
        }
    }

    if resolved.is_empty() {
        Ok(None)
    } else {
        Ok(Some(PropertyRule::Typed(resolved)))
    }
}

/// Record a warning and drop the entry, or fail fast under strict policy.
fn reject<T>(
    code: DiagnosticCode,
    property: &str,
    detail: impl Into<String>,
    policy: MappingPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<T>> {
    let detail = detail.into();
    match policy {
        MappingPolicy::Strict => Err(MappingError::unrecognized(property, detail)),
        MappingPolicy::Permissive => {
            tracing::warn!(property, %detail, "dropping unrecognized mapping entry");
            diagnostics.push(Diagnostic::warning(code, property, detail));
            Ok(None)
        }
    }
}

/// Collect an all-string array, dropping empty column names the way the
/// renderer ignores falsy sub-keys.
fn string_list(items: &[Value]) -> Option<Vec<String>> {
    let mut columns = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) if s.is_empty() => {}
            Value::String(s) => columns.push(s.clone()),
            Value::Null => {}
            _ => return None,
        }
    }
    Some(columns)
}

/// Absent/falsy mapping entries are skipped entirely.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
