//! Free-text helpers

/// Characters that act as vCard separators and must not leak into
/// concatenated free-text values.
const SEPARATORS: [char; 3] = [',', ';', ':'];

/// Strip vCard separator characters from a concatenation part.
pub(crate) fn strip_separators(value: &str) -> String {
    value.replace(SEPARATORS, "")
}

/// The closed GENDER vocabulary, upper-cased.
pub(crate) fn is_valid_gender(upper: &str) -> bool {
    matches!(upper, "" | "M" | "F" | "O" | "N" | "U")
}
