//! Events broadcast by a [`Form`](crate::Form)

use formulir_validator::foundation::ValidationError;

use crate::field::{Field, FieldPath};
use crate::submit::SubmitPhase;

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// A value was set (possibly to what it already was).
    ValueChanged { path: FieldPath },

    /// Validation ran for a field.
    Validated {
        path: FieldPath,
        errors: Vec<ValidationError>,
    },

    /// An async check or lookup started or finished.
    ValidatingChanged { path: FieldPath, validating: bool },

    /// The sub-hobby options were recomputed.
    OptionsChanged { count: usize },

    /// The email passed the availability check.
    EmailVerified,

    /// The UI should move focus to (or open the picker of) `to`.
    Advance { to: Field },

    EducationAdded { index: usize },

    EducationRemoved { index: usize },

    PhaseChanged { phase: SubmitPhase },

    /// Submit was blocked by these fields.
    SubmitBlocked { fields: Vec<FieldPath> },

    /// The sink accepted the values.
    Submitted,

    /// All values were replaced by the defaults.
    Reset,
}

impl FormEvent {
    /// The field path this event is about, if any.
    #[must_use]
    pub fn path(&self) -> Option<FieldPath> {
        match self {
            Self::ValueChanged { path }
            | Self::Validated { path, .. }
            | Self::ValidatingChanged { path, .. } => Some(*path),
            Self::Advance { to } => Some(FieldPath::Field(*to)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_reset(&self) -> bool {
        matches!(self, Self::Reset)
    }
}
