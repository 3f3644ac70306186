/// Placeholder stored when a donor has neither a first nor a last name.
pub const UNKNOWN_NAME: &str = "unknown";

/// A first/last name pair with blanks filled in.
///
/// When exactly one side is blank it takes the other side's value, so a donor
/// known only by a last name ends up with that value in both columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub first: String,
    pub last: String,
}

impl ResolvedName {
    /// Resolves a required pair: both blank becomes [`UNKNOWN_NAME`] twice.
    pub fn resolve(first: Option<&str>, last: Option<&str>) -> Self {
        Self::fill(first, last, UNKNOWN_NAME)
    }

    /// Resolves an optional pair (English names): both blank stays blank.
    pub fn resolve_optional(first: Option<&str>, last: Option<&str>) -> Self {
        Self::fill(first, last, "")
    }

    fn fill(first: Option<&str>, last: Option<&str>, placeholder: &str) -> Self {
        let first = first.map(str::trim).unwrap_or_default();
        let last = last.map(str::trim).unwrap_or_default();

        let (first, last) = match (first.is_empty(), last.is_empty()) {
            (true, true) => (placeholder, placeholder),
            (true, false) => (last, last),
            (false, true) => (first, first),
            (false, false) => (first, last),
        };

        Self {
            first: first.to_string(),
            last: last.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.first == UNKNOWN_NAME && self.last == UNKNOWN_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_present_kept() {
        let name = ResolvedName::resolve(Some("ישראל"), Some("ברוינר"));
        assert_eq!(name.first, "ישראל");
        assert_eq!(name.last, "ברוינר");
    }

    #[test]
    fn test_blank_first_takes_last() {
        let name = ResolvedName::resolve(Some("  "), Some("כהן"));
        assert_eq!(name.first, "כהן");
        assert_eq!(name.last, "כהן");
    }

    #[test]
    fn test_missing_last_takes_first() {
        let name = ResolvedName::resolve(Some("Moshe"), None);
        assert_eq!(name.first, "Moshe");
        assert_eq!(name.last, "Moshe");
    }

    #[test]
    fn test_both_blank_is_placeholder() {
        let name = ResolvedName::resolve(None, Some(""));
        assert_eq!(name.first, UNKNOWN_NAME);
        assert_eq!(name.last, UNKNOWN_NAME);
        assert!(name.is_placeholder());
    }

    #[test]
    fn test_optional_pair_stays_blank() {
        let name = ResolvedName::resolve_optional(None, None);
        assert_eq!(name.first, "");
        assert_eq!(name.last, "");

        let name = ResolvedName::resolve_optional(None, Some("Brauner"));
        assert_eq!(name.first, "Brauner");
    }
}
