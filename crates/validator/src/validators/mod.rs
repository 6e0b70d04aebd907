//! Built-in validators
//!
//! - **String**: [`NotEmpty`], [`MinLength`], [`MaxLength`], [`Email`]
//! - **Ordering**: [`Min`], [`Max`]
//! - **Collection**: [`MinSize`]
//! - **Choice**: [`OneOf`]
//! - **Nullable**: [`Required`]

mod choice;
mod content;
mod length;
mod nullable;
mod range;
mod size;

pub use choice::{OneOf, one_of};
pub use content::{Email, email};
pub use length::{LengthMode, MaxLength, MinLength, NotEmpty, max_length, min_length, not_empty};
pub use nullable::{Required, required};
pub use range::{Max, Min, max, min};
pub use size::{MinSize, min_size};
