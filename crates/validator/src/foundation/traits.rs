//! Core traits for the validation system

use async_trait::async_trait;

use crate::combinators::{And, Optional, When, WithMessage};
use crate::foundation::ValidationError;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The trait every synchronous validator implements.
///
/// # Examples
///
/// ```
/// use formulir_validator::foundation::{Validate, ValidationError};
///
/// struct NoSpaces;
///
/// impl Validate for NoSpaces {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Result<(), ValidationError> {
///         if input.contains(' ') {
///             Err(ValidationError::new("no_spaces", "Must not contain spaces"))
///         } else {
///             Ok(())
///         }
///     }
/// }
///
/// assert!(NoSpaces.validate("andi").is_ok());
/// ```
pub trait Validate {
    /// The type being validated. `?Sized` so `str` and `[T]` work directly.
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;
}

// ============================================================================
// VALIDATOR EXTENSION TRAIT
// ============================================================================

/// Combinator methods, implemented for every [`Validate`].
///
/// ```
/// use formulir_validator::prelude::*;
///
/// let name = not_empty()
///     .message("Name is required")
///     .and(min_length(5).message("Name must be at least 5 characters"));
///
/// let error = name.validate("Andi").unwrap_err();
/// assert_eq!(error.message, "Name must be at least 5 characters");
/// ```
pub trait ValidateExt: Validate + Sized {
    /// Both validators must pass; the first failure is returned.
    fn and<V>(self, other: V) -> And<Self, V>
    where
        V: Validate<Input = Self::Input>,
    {
        And::new(self, other)
    }

    /// Runs the validator only when `condition` holds for the input.
    fn when<C>(self, condition: C) -> When<Self, C>
    where
        C: Fn(&Self::Input) -> bool,
    {
        When::new(self, condition)
    }

    /// Lifts the validator to `Option<Input>`; `None` passes.
    fn optional(self) -> Optional<Self>
    where
        Self::Input: Sized,
    {
        Optional::new(self)
    }

    /// Replaces the failure message, keeping the original as a nested error.
    fn message(self, message: impl Into<String>) -> WithMessage<Self> {
        WithMessage::new(self, message)
    }
}

impl<T: Validate> ValidateExt for T {}

// ============================================================================
// ASYNC VALIDATOR TRAIT
// ============================================================================

/// A validator whose verdict needs I/O or a delay, such as a uniqueness
/// lookup against a remote registry.
///
/// Callers decide when to run it (on blur, debounced on change) and must
/// discard results that arrive after the input has changed.
#[async_trait]
pub trait AsyncValidate: Send + Sync {
    type Input: ?Sized + Sync;

    async fn validate_async(&self, input: &Self::Input) -> Result<(), ValidationError>;
}
