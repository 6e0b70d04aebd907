pub mod catalog;
pub mod submit;
