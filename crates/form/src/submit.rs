//! Submission: lifecycle phases, outcomes and the sink that receives
//! the values.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::field::FieldPath;
use crate::rules::FieldErrors;
use crate::values::FormValues;

/// Where a submit stands.
///
/// `Idle -> Validating -> Submitting -> Idle` on success and
/// `Idle -> Validating -> Invalid -> Idle` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Invalid,
}

impl SubmitPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Invalid => "invalid",
        }
    }

    /// Mutations are ignored while the values are with the sink.
    #[must_use]
    pub fn accepts_input(self) -> bool {
        self != Self::Submitting
    }
}

/// The result of [`Form::submit`](crate::Form::submit).
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The sink accepted this snapshot.
    Submitted(FormValues),
    /// At least one rule failed; nothing reached the sink.
    Invalid { errors: FieldErrors },
    /// An async check on these fields has not finished yet.
    Pending { fields: Vec<FieldPath> },
    /// Another submit is in progress.
    Busy,
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }

    /// Errors of an `Invalid` outcome.
    #[must_use]
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid { errors } => Some(errors),
            _ => None,
        }
    }
}

/// Receives the values of a successful submit, like a results screen.
pub trait SubmitSink {
    fn present(&self, values: &FormValues) -> Result<()>;
}

impl<F> SubmitSink for F
where
    F: Fn(&FormValues) -> Result<()>,
{
    fn present(&self, values: &FormValues) -> Result<()> {
        self(values)
    }
}

/// Keeps every submitted snapshot in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    submitted: Mutex<Vec<FormValues>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn submitted(&self) -> Vec<FormValues> {
        self.submitted.lock().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<FormValues> {
        self.submitted.lock().last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.submitted.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.submitted.lock().is_empty()
    }
}

impl SubmitSink for MemorySink {
    fn present(&self, values: &FormValues) -> Result<()> {
        self.submitted.lock().push(values.clone());
        Ok(())
    }
}

/// The submitted request as the results screen prints it.
pub fn render_request(values: &FormValues) -> Result<String> {
    serde_json::to_string_pretty(values).map_err(FormError::from)
}
