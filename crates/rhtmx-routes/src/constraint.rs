use regex::Regex;

use crate::PatternError;

/// Regular-expression constraint attached to a capture, e.g. `:id(\d+)`
///
/// The expression is anchored: it must match the whole segment value, never a
/// substring of it.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::ParameterConstraint;
///
/// let digits = ParameterConstraint::new("id", r"\d+").unwrap();
/// assert!(digits.validate("42"));
/// assert!(!digits.validate("42a"));
/// assert_eq!(digits.as_str(), r"\d+");
/// ```
#[derive(Debug, Clone)]
pub struct ParameterConstraint {
    source: String,
    regex: Regex,
}

impl ParameterConstraint {
    /// Compiles `source` for the capture `name`
    pub fn new(name: &str, source: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
            PatternError::InvalidConstraint {
                name: name.to_string(),
                constraint: source.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Checks a single segment value against the constraint
    pub fn validate(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// The expression as written in the pattern
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for ParameterConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for ParameterConstraint {}

impl std::fmt::Display for ParameterConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_is_anchored() {
        let c = ParameterConstraint::new("slug", "[a-z]+").unwrap();
        assert!(c.validate("hello"));
        assert!(!c.validate("hello-world"));
        assert!(!c.validate("Hello"));
    }

    #[test]
    fn test_constraint_alternation_is_anchored() {
        let c = ParameterConstraint::new("kind", "new|edit").unwrap();
        assert!(c.validate("new"));
        assert!(c.validate("edit"));
        assert!(!c.validate("renew"));
        assert!(!c.validate("editor"));
    }

    #[test]
    fn test_invalid_constraint() {
        let err = ParameterConstraint::new("id", "[0-9").unwrap_err();
        assert!(matches!(
            err,
            PatternError::InvalidConstraint { ref name, ref constraint, .. }
                if name == "id" && constraint == "[0-9"
        ));
    }

    #[test]
    fn test_constraint_equality_by_source() {
        let a = ParameterConstraint::new("a", r"\d+").unwrap();
        let b = ParameterConstraint::new("b", r"\d+").unwrap();
        let c = ParameterConstraint::new("c", r"\w+").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
