//! Per-field state and flags

use bitflags::bitflags;
use formulir_validator::foundation::ValidationError;

bitflags! {
    /// Flags describing where a field stands.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u8 {
        /// Value changed since the form was opened or reset.
        const DIRTY = 0b0000_0001;
        /// A value was set or the field was blurred.
        const TOUCHED = 0b0000_0010;
        /// No validation error is recorded.
        const VALID = 0b0000_0100;
        /// An async check or lookup is running.
        const VALIDATING = 0b0000_1000;
        /// Accepts input.
        const ENABLED = 0b0001_0000;
        /// Lost focus at least once.
        const BLURRED = 0b0010_0000;
    }
}

/// Runtime state of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    flags: FieldFlags,
    errors: Vec<ValidationError>,
}

impl FieldMeta {
    /// Enabled, valid, untouched.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: FieldFlags::ENABLED | FieldFlags::VALID,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn flags(&self) -> FieldFlags {
        self.flags
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.flags.contains(FieldFlags::DIRTY)
    }

    #[must_use]
    pub fn is_touched(&self) -> bool {
        self.flags.contains(FieldFlags::TOUCHED)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.flags.contains(FieldFlags::VALID)
    }

    #[must_use]
    pub fn is_validating(&self) -> bool {
        self.flags.contains(FieldFlags::VALIDATING)
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.flags.contains(FieldFlags::ENABLED)
    }

    #[must_use]
    pub fn is_blurred(&self) -> bool {
        self.flags.contains(FieldFlags::BLURRED)
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// The message a form shows under the field: the first error, and
    /// nothing at all while the field is disabled.
    #[must_use]
    pub fn visible_error(&self) -> Option<&str> {
        if !self.is_enabled() {
            return None;
        }
        self.errors.first().map(|error| error.message.as_ref())
    }

    /// Replaces the errors and updates `VALID`.
    pub fn set_errors(&mut self, errors: Vec<ValidationError>) {
        self.flags.set(FieldFlags::VALID, errors.is_empty());
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
        self.flags.insert(FieldFlags::VALID);
    }

    pub fn mark_dirty(&mut self) {
        self.flags.insert(FieldFlags::DIRTY);
    }

    pub fn mark_touched(&mut self) {
        self.flags.insert(FieldFlags::TOUCHED);
    }

    pub fn mark_blurred(&mut self) {
        self.flags.insert(FieldFlags::BLURRED | FieldFlags::TOUCHED);
    }

    /// Returns true if the flag changed.
    pub fn set_validating(&mut self, validating: bool) -> bool {
        let changed = self.is_validating() != validating;
        self.flags.set(FieldFlags::VALIDATING, validating);
        changed
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.flags.set(FieldFlags::ENABLED, enabled);
    }
}

impl Default for FieldMeta {
    fn default() -> Self {
        Self::new()
    }
}
