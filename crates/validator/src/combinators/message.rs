//! MESSAGE combinator - custom error messages

use std::borrow::Cow;

use crate::foundation::{Validate, ValidationError};

/// Replaces the error message of a validator.
///
/// The original error is kept as a nested error so its params survive.
#[derive(Debug, Clone)]
pub struct WithMessage<V> {
    inner: V,
    message: String,
    code: Option<String>,
}

impl<V> WithMessage<V> {
    pub fn new(inner: V, message: impl Into<String>) -> Self {
        Self {
            inner,
            message: message.into(),
            code: None,
        }
    }

    /// Also replaces the error code.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V> Validate for WithMessage<V>
where
    V: Validate,
{
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.inner.validate(input).map_err(|original| {
            let code = self
                .code
                .clone()
                .map_or_else(|| original.code.clone(), Cow::Owned);
            let mut error = ValidationError::new(code, self.message.clone());
            error.params.clone_from(&original.params);
            error.with_nested_error(original)
        })
    }
}

pub fn with_message<V>(validator: V, message: impl Into<String>) -> WithMessage<V> {
    WithMessage::new(validator, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::min_length;

    #[test]
    fn test_message_replaced_code_kept() {
        let validator = with_message(min_length(5), "Name must be at least 5 characters");
        let error = validator.validate("Andi").unwrap_err();

        assert_eq!(error.code, "min_length");
        assert_eq!(error.message, "Name must be at least 5 characters");
        assert_eq!(error.param("min"), Some("5"));
        assert_eq!(error.nested.len(), 1);
    }

    #[test]
    fn test_code_override() {
        let validator = with_message(min_length(5), "too short").with_code("name_short");
        let error = validator.validate("x").unwrap_err();
        assert_eq!(error.code, "name_short");
    }
}
