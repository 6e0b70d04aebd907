//! Validator combinators
//!
//! Usually reached through [`ValidateExt`](crate::foundation::ValidateExt)
//! rather than constructed directly.

mod and;
mod message;
mod optional;
mod when;

pub use and::{And, and};
pub use message::{WithMessage, with_message};
pub use optional::{Optional, optional};
pub use when::{When, when};
