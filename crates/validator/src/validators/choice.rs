//! Membership validators

use std::fmt::Debug;

use crate::foundation::ValidationError;

crate::validator! {
    /// Validates that a value is one of a fixed set of options.
    pub OneOf<T: PartialEq + Debug> { allowed: Vec<T> } for T;
    rule(self, input) { self.allowed.contains(input) }
    error(self, input) {
        ValidationError::new("one_of", "Must be one of the listed options")
            .with_param("actual", format!("{input:?}"))
            .with_param("allowed", self.allowed.len().to_string())
    }
    fn one_of(allowed: Vec<T>);
}
