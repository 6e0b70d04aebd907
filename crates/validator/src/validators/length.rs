//! String length validators
//!
//! Length is measured in Unicode scalar values unless a `bytes` constructor
//! is used.

use crate::foundation::ValidationError;

/// How to count string length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthMode {
    Bytes,
    #[default]
    Chars,
}

impl LengthMode {
    #[inline]
    fn measure(self, input: &str) -> usize {
        match self {
            LengthMode::Bytes => input.len(),
            LengthMode::Chars => input.chars().count(),
        }
    }
}

crate::validator! {
    /// Validates that a string is not empty.
    pub NotEmpty for str;
    rule(input) { !input.is_empty() }
    error(input) { ValidationError::new("not_empty", "Must not be empty") }
    fn not_empty();
}

crate::validator! {
    /// Validates that a string has at least `min` characters.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MinLength { min: usize, mode: LengthMode } for str;
    rule(self, input) { self.mode.measure(input) >= self.min }
    error(self, input) { ValidationError::min_length(self.min, self.mode.measure(input)) }
    new(min: usize) { Self { min, mode: LengthMode::Chars } }
    fn min_length(min: usize);
}

impl MinLength {
    /// Creates a minimum length validator that counts bytes.
    #[must_use]
    pub fn bytes(min: usize) -> Self {
        Self {
            min,
            mode: LengthMode::Bytes,
        }
    }
}

crate::validator! {
    /// Validates that a string has at most `max` characters.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MaxLength { max: usize } for str;
    rule(self, input) { input.chars().count() <= self.max }
    error(self, input) {
        ValidationError::new("max_length", format!("Must be at most {} characters", self.max))
            .with_param("max", self.max.to_string())
            .with_param("actual", input.chars().count().to_string())
    }
    fn max_length(max: usize);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("Andi", false)]
    #[case("SDN 1", true)]
    #[case("Andi Saputra", true)]
    fn test_min_length_five(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(min_length(5).validate(input).is_ok(), ok);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // five chars, ten bytes
        let input = "ÄÖÜäö";
        assert!(min_length(5).validate(input).is_ok());
        assert!(MinLength::bytes(11).validate(input).is_err());
    }

    #[test]
    fn test_min_length_error_leaves_field_unset() {
        let error = min_length(5).validate("SD").unwrap_err();
        assert_eq!(error.field, None);
        assert_eq!(error.param("actual"), Some("2"));
    }

    #[test]
    fn test_not_empty() {
        assert!(not_empty().validate("x").is_ok());
        assert_eq!(not_empty().validate("").unwrap_err().code, "not_empty");
    }

    #[test]
    fn test_max_length() {
        assert!(max_length(3).validate("abc").is_ok());
        assert_eq!(max_length(3).validate("abcd").unwrap_err().param("actual"), Some("4"));
    }
}
