//! String content validators

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::ValidationError;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

crate::validator! {
    /// Validates email format: a local part, `@`, and a dotted domain.
    pub Email { pattern: Regex } for str;
    rule(self, input) { self.pattern.is_match(input) }
    error(self, input) { ValidationError::invalid_format("email") }
    new() {
        Self {
            pattern: EMAIL_REGEX.clone(),
        }
    }
    fn email();
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;
    use rstest::rstest;

    #[rstest]
    #[case("x@y.com")]
    #[case("andi@rubin.com")]
    #[case("ANDI@Rubin.COM")]
    #[case("first.last+tag@mail.example.co.id")]
    fn test_accepts(#[case] input: &str) {
        assert!(email().validate(input).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("not-an-email")]
    #[case("@example.com")]
    #[case("user@")]
    #[case("user@localhost")]
    #[case("user name@example.com")]
    fn test_rejects(#[case] input: &str) {
        let error = email().validate(input).unwrap_err();
        assert_eq!(error.code, "invalid_format");
        assert_eq!(error.param("expected"), Some("email"));
        assert_eq!(error.field, None);
    }
}
