//! OPTIONAL combinator - validates Option types

use crate::foundation::{Validate, ValidationError};

/// Makes a validator work with `Option` inputs; `None` always passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Optional<V> {
    pub(crate) inner: V,
}

impl<V> Optional<V> {
    pub fn new(inner: V) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V, T> Validate for Optional<V>
where
    V: Validate<Input = T>,
{
    type Input = Option<T>;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        match input {
            None => Ok(()),
            Some(value) => self.inner.validate(value),
        }
    }
}

pub fn optional<V>(validator: V) -> Optional<V> {
    Optional::new(validator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::one_of;

    #[test]
    fn test_none_passes() {
        let validator = optional(one_of(vec!["membaca", "game"]));
        assert!(validator.validate(&None).is_ok());
    }

    #[test]
    fn test_some_is_checked() {
        let validator = optional(one_of(vec!["membaca", "game"]));
        assert!(validator.validate(&Some("game")).is_ok());
        assert!(validator.validate(&Some("masak")).is_err());
    }
}
