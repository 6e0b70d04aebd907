//! # formulir-validator
//!
//! Composable, type-safe field validators for the formulir form engine.
//!
//! ```
//! use formulir_validator::prelude::*;
//!
//! let name = not_empty()
//!     .message("Name is required")
//!     .and(min_length(5).message("Name must be at least 5 characters"));
//!
//! assert!(name.validate("Andi Saputra").is_ok());
//! assert_eq!(name.validate("").unwrap_err().message, "Name is required");
//! ```
//!
//! Use the [`validator!`] macro for new validators, or implement
//! [`Validate`](foundation::Validate) by hand. Checks that need I/O
//! implement [`AsyncValidate`](foundation::AsyncValidate).

// ValidationError is the error type of every validator; boxing it buys nothing.
#![allow(clippy::result_large_err)]

pub mod combinators;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod validators;
