//! Collection size validators

use std::marker::PhantomData;

use crate::foundation::{Validate, ValidationError};

/// Validates that a slice has at least `min` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinSize<T> {
    min: usize,
    _phantom: PhantomData<T>,
}

impl<T> Validate for MinSize<T> {
    type Input = [T];

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let size = input.len();
        if size >= self.min {
            Ok(())
        } else {
            Err(ValidationError::new(
                "min_size",
                format!("Must have at least {} entries, got {}", self.min, size),
            )
            .with_param("min", self.min.to_string())
            .with_param("actual", size.to_string()))
        }
    }
}

/// ```
/// use formulir_validator::validators::min_size;
/// use formulir_validator::foundation::Validate;
///
/// let validator = min_size::<u8>(1);
/// assert!(validator.validate(&[1]).is_ok());
/// assert!(validator.validate(&[]).is_err());
/// ```
#[must_use]
pub fn min_size<T>(min: usize) -> MinSize<T> {
    MinSize {
        min,
        _phantom: PhantomData,
    }
}
