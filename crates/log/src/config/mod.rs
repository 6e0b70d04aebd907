//! Configuration types
//!
//! - `base`: [`Config`], [`Format`], [`Level`]
//! - `display`: [`DisplayConfig`]
//! - `presets`: development, production and test setups

mod base;
mod display;
mod presets;

pub use base::{Config, Format, Level};
pub use display::DisplayConfig;
