//! Core validation types and traits
//!
//! - **Traits**: [`Validate`], [`ValidateExt`], [`AsyncValidate`]
//! - **Errors**: [`ValidationError`], [`ValidationErrors`]
//!
//! Validators are generic over their input type and compose through
//! [`ValidateExt`]:
//!
//! ```
//! use formulir_validator::prelude::*;
//!
//! let school = not_empty().and(min_length(5));
//! assert!(school.validate("SDN 1").is_ok());
//! assert!(school.validate("SD").is_err());
//! ```

pub mod error;
pub mod traits;

pub use error::{ValidationError, ValidationErrors};
pub use traits::{AsyncValidate, Validate, ValidateExt};

/// Runs every validator against the same input and collects all failures,
/// unlike [`ValidateExt::and`] which stops at the first.
pub fn validate_all<I: ?Sized>(
    input: &I,
    validators: &[&dyn Validate<Input = I>],
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for validator in validators {
        errors.push_result(validator.validate(input));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{email, min_length};

    #[test]
    fn test_validate_all_collects_every_failure() {
        let min = min_length(20);
        let format = email();
        let errors = validate_all("nope", &[&min, &format]);

        let codes: Vec<_> = errors.errors().iter().map(|e| e.code.as_ref()).collect();
        assert_eq!(codes, ["min_length", "invalid_format"]);
    }
}
