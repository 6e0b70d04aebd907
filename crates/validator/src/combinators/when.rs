//! WHEN combinator - conditional validation

use crate::foundation::{Validate, ValidationError};

/// Applies `validator` only when `condition` returns `true`; otherwise passes.
///
/// ```
/// use formulir_validator::prelude::*;
///
/// // Only check the format once something was typed.
/// let validator = email().when(|s: &str| !s.is_empty());
/// assert!(validator.validate("").is_ok());
/// assert!(validator.validate("andi@").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct When<V, C> {
    pub(crate) validator: V,
    pub(crate) condition: C,
}

impl<V, C> When<V, C> {
    pub fn new(validator: V, condition: C) -> Self {
        Self {
            validator,
            condition,
        }
    }
}

impl<V, C> Validate for When<V, C>
where
    V: Validate,
    C: Fn(&V::Input) -> bool,
{
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if (self.condition)(input) {
            self.validator.validate(input)
        } else {
            Ok(())
        }
    }
}

pub fn when<V, C>(validator: V, condition: C) -> When<V, C>
where
    V: Validate,
    C: Fn(&V::Input) -> bool,
{
    When::new(validator, condition)
}
