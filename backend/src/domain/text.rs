//! Free-text normalisation shared by record drafts.

/// Trim `value` and return it only when something remains.
///
/// # Examples
/// ```
/// use casebook::domain::text::normalise_required;
///
/// assert_eq!(normalise_required("  Login Flow "), Some("Login Flow".to_owned()));
/// assert_eq!(normalise_required("   "), None);
/// ```
pub fn normalise_required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Trim optional free text; blank values collapse to `None`.
pub fn normalise_optional(value: Option<&str>) -> Option<String> {
    value.and_then(normalise_required)
}
