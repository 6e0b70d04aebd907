//! `use formulir_validator::prelude::*;` brings in the traits, error types,
//! built-in validators and combinators.

pub use crate::foundation::{
    AsyncValidate, Validate, ValidateExt, ValidationError, ValidationErrors, validate_all,
};

pub use crate::validators::*;

pub use crate::combinators::{
    And, Optional, When, WithMessage, and, optional, when, with_message,
};
