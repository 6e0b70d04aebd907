//! Validators for `Option` inputs

use std::marker::PhantomData;

use crate::foundation::{Validate, ValidationError};

/// Validates that an `Option` is `Some`.
///
/// ```
/// use formulir_validator::prelude::*;
///
/// assert!(required::<u8>().validate(&Some(1)).is_ok());
/// assert!(required::<u8>().validate(&None).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Required<T> {
    _phantom: PhantomData<T>,
}

impl<T> Validate for Required<T> {
    type Input = Option<T>;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if input.is_some() {
            Ok(())
        } else {
            Err(ValidationError::new("required", "Value is required"))
        }
    }
}

#[must_use]
pub fn required<T>() -> Required<T> {
    Required {
        _phantom: PhantomData,
    }
}
