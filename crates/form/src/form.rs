//! The form: field store, validation and dependency resolution behind one
//! handle.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use formulir_validator::foundation::{AsyncValidate, ValidationError};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::{Notify, broadcast};
use tokio_util::sync::CancellationToken;

use crate::catalog::{Catalog, LabelValue};
use crate::checks::{EmailAvailability, SubHobbyLookup};
use crate::config::FormConfig;
use crate::error::{FormError, Result};
use crate::event::FormEvent;
use crate::field::{Field, FieldPath, FieldValue};
use crate::rules::{FieldErrors, FormRules};
use crate::section::Section;
use crate::state::FieldMeta;
use crate::store::FieldStore;
use crate::submit::{SubmitOutcome, SubmitPhase, SubmitSink};
use crate::values::{Education, FormDefaults, FormValues};

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builds a [`Form`]. Anything not set falls back to the built-in catalog,
/// an empty form and [`FormConfig::default`].
#[derive(Debug, Default)]
pub struct FormBuilder {
    catalog: Option<Catalog>,
    defaults: Option<FormDefaults>,
    config: FormConfig,
}

impl FormBuilder {
    #[must_use]
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn defaults(mut self, defaults: impl Into<FormDefaults>) -> Self {
        self.defaults = Some(defaults.into());
        self
    }

    #[must_use]
    pub fn config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    /// Fails only when the config does not validate.
    pub fn build(self) -> Result<Form> {
        self.config.validate()?;

        let catalog = Arc::new(self.catalog.unwrap_or_default());
        let defaults = self
            .defaults
            .unwrap_or_else(|| FormDefaults::new(FormValues::empty()));
        let config = self.config;

        let (events, _) = broadcast::channel(config.event_capacity);
        let mut state = FormState::new(defaults.values().clone());
        state.sync_sub_hobby(&catalog);

        let shared = Shared {
            state: Mutex::new(state),
            rules: FormRules::new(Arc::clone(&catalog), config.education),
            email_check: EmailAvailability::new(
                &config.registered_emails,
                config.email_check_delay(),
            ),
            lookup: SubHobbyLookup::new(Arc::clone(&catalog), config.hobby_lookup_delay()),
            catalog,
            defaults,
            config,
            events,
            cancel: CancellationToken::new(),
            settled: Notify::new(),
        };

        Ok(Form {
            shared: Arc::new(shared),
        })
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

struct FormState {
    store: FieldStore,
    phase: SubmitPhase,
    /// The current email passed the availability check.
    email_safe: bool,
    /// Result of the last availability check, kept until the email changes.
    email_error: Option<ValidationError>,
    sub_hobby_options: Vec<LabelValue>,
    email_generation: u64,
    hobby_generation: u64,
    /// Spawned checks that have not finished.
    pending: usize,
}

impl FormState {
    fn new(values: FormValues) -> Self {
        Self {
            store: FieldStore::new(values),
            phase: SubmitPhase::Idle,
            email_safe: false,
            email_error: None,
            sub_hobby_options: Vec::new(),
            email_generation: 0,
            hobby_generation: 0,
            pending: 0,
        }
    }

    /// Derives the sub-hobby options and enabled flag from the hobby.
    fn sync_sub_hobby(&mut self, catalog: &Catalog) {
        let hobby = self.store.values().hobby.as_ref();
        self.sub_hobby_options = hobby
            .map(|hobby| catalog.sub_hobbies(&hobby.value).to_vec())
            .unwrap_or_default();
        let enabled = hobby.is_some();
        self.store.field_meta_mut(Field::SubHobby).set_enabled(enabled);
    }
}

struct Shared {
    state: Mutex<FormState>,
    rules: FormRules,
    email_check: EmailAvailability,
    lookup: SubHobbyLookup,
    catalog: Arc<Catalog>,
    defaults: FormDefaults,
    config: FormConfig,
    events: broadcast::Sender<FormEvent>,
    cancel: CancellationToken,
    settled: Notify,
}

impl Shared {
    fn emit(&self, event: FormEvent) {
        // no subscribers is fine
        self.events.send(event).ok();
    }

    fn set_phase(&self, state: &mut FormState, phase: SubmitPhase) {
        if state.phase != phase {
            state.phase = phase;
            self.emit(FormEvent::PhaseChanged { phase });
        }
    }

    fn set_validating(&self, state: &mut FormState, field: Field, validating: bool) {
        if state.store.field_meta_mut(field).set_validating(validating) {
            self.emit(FormEvent::ValidatingChanged {
                path: field.into(),
                validating,
            });
        }
    }

    /// Runs the rules for `path`, stores the errors and returns them.
    fn revalidate(&self, state: &mut FormState, path: FieldPath) -> Vec<ValidationError> {
        let mut errors = self.rules.check(path, state.store.values(), Utc::now());
        if path == FieldPath::Field(Field::Email)
            && let Some(error) = &state.email_error
        {
            errors.push(error.clone());
        }

        if let Some(meta) = state.store.meta_mut(path) {
            meta.set_errors(errors.clone());
        }
        self.emit(FormEvent::Validated {
            path,
            errors: errors.clone(),
        });
        errors
    }

    /// Touches and validates every field.
    fn validate_all(&self, state: &mut FormState) -> FieldErrors {
        let mut failed = FieldErrors::new();
        for path in state.store.paths() {
            if let Some(meta) = state.store.meta_mut(path) {
                meta.mark_touched();
            }
            let errors = self.revalidate(state, path);
            if !errors.is_empty() {
                failed.insert(path, errors);
            }
        }
        failed
    }

    fn finish_task(&self) {
        let mut state = self.state.lock();
        state.pending = state.pending.saturating_sub(1);
        if state.pending == 0 {
            self.settled.notify_waiters();
        }
    }

    fn apply_email_check(&self, generation: u64, result: std::result::Result<(), ValidationError>) {
        let mut state = self.state.lock();
        if state.email_generation != generation {
            tracing::debug!(generation, "Discarded stale email check");
            return;
        }

        self.set_validating(&mut state, Field::Email, false);
        match result {
            Ok(()) => {
                tracing::debug!("Email is available");
                state.email_safe = true;
                state.email_error = None;
                self.emit(FormEvent::EmailVerified);
            }
            Err(error) => {
                tracing::warn!(email = %state.store.values().email, "Email is already registered");
                state.email_safe = false;
                state.email_error = Some(error);
            }
        }
        self.revalidate(&mut state, Field::Email.into());
    }

    fn apply_sub_hobbies(&self, generation: u64, items: Vec<LabelValue>) {
        let mut state = self.state.lock();
        if state.hobby_generation != generation {
            tracing::debug!(generation, "Discarded stale sub-hobby lookup");
            return;
        }

        let count = items.len();
        state.sub_hobby_options = items;
        self.set_validating(&mut state, Field::SubHobby, false);
        tracing::debug!(count, "Sub-hobby options loaded");
        self.emit(FormEvent::OptionsChanged { count });

        if state.store.values().sub_hobby.is_none() && count > 0 {
            self.emit(FormEvent::Advance {
                to: Field::SubHobby,
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// A form instance.
///
/// Setters validate synchronously and schedule the async checks on the
/// current tokio runtime. Only the latest check per field may update
/// state; [`close`](Self::close) or dropping the form cancels them all.
///
/// ```no_run
/// # async fn demo() -> formulir_form::Result<()> {
/// use formulir_form::prelude::*;
///
/// let form = Form::builder().build()?;
/// form.set_value(Field::Email, "budi@rubin.com")?;
/// form.blur(Field::Email)?;
/// form.settled().await;
/// assert!(form.is_email_verified());
/// # Ok(())
/// # }
/// ```
pub struct Form {
    shared: Arc<Shared>,
}

impl Form {
    #[must_use]
    pub fn builder() -> FormBuilder {
        FormBuilder::default()
    }

    /// A form over the built-in catalog with empty defaults.
    pub fn new(config: FormConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    // -- Reads ------------------------------------------------------------

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
        self.shared.events.subscribe()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.shared.catalog
    }

    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.shared.config
    }

    #[must_use]
    pub fn values(&self) -> FormValues {
        self.shared.state.lock().store.values().clone()
    }

    #[must_use]
    pub fn value(&self, path: impl Into<FieldPath>) -> Option<FieldValue> {
        self.shared.state.lock().store.value(path.into())
    }

    #[must_use]
    pub fn meta(&self, path: impl Into<FieldPath>) -> Option<FieldMeta> {
        self.shared.state.lock().store.meta(path.into()).cloned()
    }

    /// Increases on every value change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.shared.state.lock().store.version()
    }

    #[must_use]
    pub fn phase(&self) -> SubmitPhase {
        self.shared.state.lock().phase
    }

    #[must_use]
    pub fn sub_hobby_options(&self) -> Vec<LabelValue> {
        self.shared.state.lock().sub_hobby_options.clone()
    }

    #[must_use]
    pub fn is_email_safe(&self) -> bool {
        self.shared.state.lock().email_safe
    }

    /// Valid, not being checked, and confirmed available.
    #[must_use]
    pub fn is_email_verified(&self) -> bool {
        let state = self.shared.state.lock();
        let meta = state.store.field_meta(Field::Email);
        state.email_safe && meta.is_valid() && !meta.is_validating()
    }

    /// True when no rule fails for the current values.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let state = self.shared.state.lock();
        state.email_error.is_none()
            && self
                .shared
                .rules
                .check_all(state.store.values(), Utc::now())
                .is_empty()
    }

    /// Recorded errors per field, as last shown.
    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        let state = self.shared.state.lock();
        state
            .store
            .paths()
            .into_iter()
            .filter_map(|path| {
                let errors = state.store.meta(path)?.errors();
                (!errors.is_empty()).then(|| (path, errors.to_vec()))
            })
            .collect()
    }

    #[must_use]
    pub fn visible_error(&self, path: impl Into<FieldPath>) -> Option<String> {
        let state = self.shared.state.lock();
        state
            .store
            .meta(path.into())
            .and_then(|meta| meta.visible_error().map(str::to_owned))
    }

    /// Drives the visibility of a reset action.
    #[must_use]
    pub fn has_values(&self) -> bool {
        self.shared.state.lock().store.values().has_values()
    }

    /// True when every field in `section` passes its rules.
    #[must_use]
    pub fn section_valid(&self, section: Section) -> bool {
        let state = self.shared.state.lock();
        if section.contains(Field::Email.into()) && state.email_error.is_some() {
            return false;
        }
        let now = Utc::now();
        state
            .store
            .paths()
            .into_iter()
            .filter(|path| section.contains(*path))
            .all(|path| self.shared.rules.check(path, state.store.values(), now).is_empty())
    }

    // -- Mutations --------------------------------------------------------

    /// Sets a value, validates it and resolves its dependents.
    ///
    /// Ignored while a submit is with the sink.
    pub fn set_value(&self, path: impl Into<FieldPath>, value: impl Into<FieldValue>) -> Result<()> {
        self.ensure_open()?;
        let path = path.into();
        let shared = &self.shared;
        let mut state = shared.state.lock();
        if !state.phase.accepts_input() {
            tracing::debug!(path = %path, "Ignored change while submitting");
            return Ok(());
        }

        let changed = state.store.set(path, value.into())?;
        tracing::debug!(path = %path, changed, "Value set");
        shared.emit(FormEvent::ValueChanged { path });

        match path {
            FieldPath::Field(Field::Email) if changed => {
                state.email_safe = false;
                state.email_error = None;
                state.email_generation += 1;
                shared.set_validating(&mut state, Field::Email, false);
            }
            FieldPath::Field(Field::Hobby) => self.hobby_changed(&mut state),
            _ => {}
        }

        let errors = shared.revalidate(&mut state, path);
        if path == FieldPath::Field(Field::Educations) {
            for entry in state.store.paths() {
                if matches!(entry, FieldPath::Education { .. }) {
                    shared.revalidate(&mut state, entry);
                }
            }
        }

        let values = state.store.values();
        match path {
            FieldPath::Field(Field::BirthDate)
                if changed && errors.is_empty() && values.birth_date.is_some() =>
            {
                shared.emit(FormEvent::Advance { to: Field::Job });
            }
            FieldPath::Field(Field::Job) if changed && values.job.is_some() => {
                shared.emit(FormEvent::Advance { to: Field::Hobby });
            }
            _ => {}
        }
        Ok(())
    }

    /// Sets a value from JSON addressed by a path such as
    /// `"educations[0].school"`.
    ///
    /// Choices may be given as `{label, value}` or as the catalog value.
    pub fn set_json(&self, path: &str, json: Value) -> Result<()> {
        let path: FieldPath = path.parse()?;
        let hobby = self.shared.state.lock().store.values().hobby.clone();
        let value = FieldValue::from_json(path, json, &self.shared.catalog, hobby.as_ref())?;
        self.set_value(path, value)
    }

    /// Marks a field blurred. Blurring the email starts the availability
    /// check unless the email is empty, malformed or already verified.
    pub fn blur(&self, path: impl Into<FieldPath>) -> Result<()> {
        self.ensure_open()?;
        let path = path.into();
        let mut state = self.shared.state.lock();
        if !state.phase.accepts_input() {
            return Ok(());
        }
        state
            .store
            .meta_mut(path)
            .ok_or_else(|| FormError::unknown_field(path.to_string()))?
            .mark_blurred();

        if path == FieldPath::Field(Field::Email) {
            self.start_email_check(&mut state);
        }
        Ok(())
    }

    pub fn push_education(&self, entry: Education) -> Result<usize> {
        self.ensure_open()?;
        let mut state = self.shared.state.lock();
        if !state.phase.accepts_input() {
            return Ok(state.store.values().educations.len().saturating_sub(1));
        }
        let index = state.store.push_education(entry);
        tracing::debug!(index, "Education added");
        self.shared.emit(FormEvent::EducationAdded { index });
        self.shared
            .revalidate(&mut state, Field::Educations.into());
        Ok(index)
    }

    /// Returns false when nothing was removed: out of range, or the last
    /// remaining entry.
    pub fn remove_education(&self, index: usize) -> Result<bool> {
        self.ensure_open()?;
        let mut state = self.shared.state.lock();
        if !state.phase.accepts_input() || !state.store.remove_education(index) {
            return Ok(false);
        }
        tracing::debug!(index, "Education removed");
        self.shared.emit(FormEvent::EducationRemoved { index });
        self.shared
            .revalidate(&mut state, Field::Educations.into());
        Ok(true)
    }

    /// Restores the defaults and clears every field's state. Checks still
    /// running are discarded when they finish.
    pub fn reset(&self) -> Result<()> {
        self.ensure_open()?;
        let shared = &self.shared;
        let mut state = shared.state.lock();
        if !state.phase.accepts_input() {
            return Ok(());
        }

        state.store.reset(shared.defaults.values().clone());
        state.email_safe = false;
        state.email_error = None;
        state.email_generation += 1;
        state.hobby_generation += 1;
        state.sync_sub_hobby(&shared.catalog);
        state.phase = SubmitPhase::Idle;

        tracing::debug!("Form reset");
        shared.emit(FormEvent::Reset);
        Ok(())
    }

    /// Validates everything and hands the values to `sink` when nothing
    /// fails. Invalid input is an outcome, not an error.
    pub fn submit(&self, sink: &dyn SubmitSink) -> Result<SubmitOutcome> {
        self.ensure_open()?;
        let shared = &self.shared;

        let values = {
            let mut state = shared.state.lock();
            if state.phase != SubmitPhase::Idle {
                return Ok(SubmitOutcome::Busy);
            }
            shared.set_phase(&mut state, SubmitPhase::Validating);

            if state.store.field_meta(Field::Email).is_validating() {
                shared.set_phase(&mut state, SubmitPhase::Idle);
                tracing::info!("Submit waits for the email check");
                return Ok(SubmitOutcome::Pending {
                    fields: vec![Field::Email.into()],
                });
            }

            let errors = shared.validate_all(&mut state);
            if !errors.is_empty() {
                shared.set_phase(&mut state, SubmitPhase::Invalid);
                let fields: Vec<FieldPath> = errors.keys().copied().collect();
                tracing::info!(failed = fields.len(), "Submit blocked by invalid fields");
                shared.emit(FormEvent::SubmitBlocked { fields });
                shared.set_phase(&mut state, SubmitPhase::Idle);
                return Ok(SubmitOutcome::Invalid { errors });
            }

            shared.set_phase(&mut state, SubmitPhase::Submitting);
            state.store.values().clone()
        };

        let presented = sink.present(&values);
        shared.set_phase(&mut shared.state.lock(), SubmitPhase::Idle);

        match presented {
            Ok(()) => {
                tracing::info!(name = %values.name, "Form submitted");
                shared.emit(FormEvent::Submitted);
                Ok(SubmitOutcome::Submitted(values))
            }
            Err(error) => {
                tracing::warn!(error = %error, "Submit sink failed");
                Err(error)
            }
        }
    }

    /// Resolves once no spawned check is running.
    pub async fn settled(&self) {
        loop {
            let notified = self.shared.settled.notified();
            if self.shared.state.lock().pending == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Cancels every pending check. Later mutations fail with
    /// [`FormError::Closed`].
    pub fn close(&self) {
        if !self.shared.cancel.is_cancelled() {
            tracing::debug!("Form closed");
            self.shared.cancel.cancel();
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    // -- Internals --------------------------------------------------------

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(FormError::Closed)
        } else {
            Ok(())
        }
    }

    /// Clears the sub-hobby, recomputes its options and starts the
    /// debounced lookup.
    fn hobby_changed(&self, state: &mut FormState) {
        let shared = &self.shared;
        let was_loading = state.store.field_meta(Field::SubHobby).is_validating();

        state.hobby_generation += 1;
        if let Some(previous) = state.store.clear_sub_hobby() {
            tracing::debug!(sub_hobby = %previous.value, "Sub hobby cleared");
        }
        state.sync_sub_hobby(&shared.catalog);
        shared.emit(FormEvent::OptionsChanged {
            count: state.sub_hobby_options.len(),
        });

        let Some(hobby) = state.store.values().hobby.clone() else {
            if was_loading {
                shared.emit(FormEvent::ValidatingChanged {
                    path: Field::SubHobby.into(),
                    validating: false,
                });
            }
            return;
        };

        let generation = state.hobby_generation;
        let task_shared = Arc::clone(shared);
        let started = self.spawn(state, "sub_hobby_lookup", async move {
            let shared = task_shared;
            let lookup = async {
                tokio::time::sleep(shared.config.hobby_debounce()).await;
                let current = shared.state.lock().hobby_generation == generation;
                if current {
                    Some(shared.lookup.load(&hobby.value).await)
                } else {
                    None
                }
            };
            let items = tokio::select! {
                items = lookup => items,
                () = shared.cancel.cancelled() => {
                    tracing::debug!("Sub-hobby lookup cancelled");
                    return;
                }
            };
            match items {
                Some(items) => shared.apply_sub_hobbies(generation, items),
                None => tracing::debug!(generation, "Hobby changed during debounce"),
            }
        });

        if started {
            state.store.field_meta_mut(Field::SubHobby).set_validating(true);
            shared.emit(FormEvent::ValidatingChanged {
                path: Field::SubHobby.into(),
                validating: true,
            });
        }
    }

    fn start_email_check(&self, state: &mut FormState) {
        let shared = &self.shared;
        let email = state.store.values().email.clone();
        let meta_valid = state.store.field_meta(Field::Email).is_valid();

        if email.is_empty() || !shared.rules.email_is_well_formed(&email) {
            tracing::debug!("Email check skipped for malformed email");
            return;
        }
        if state.email_safe && meta_valid {
            tracing::debug!("Email already verified");
            return;
        }

        state.email_generation += 1;
        let generation = state.email_generation;
        let task_shared = Arc::clone(shared);
        let started = self.spawn(state, "email_check", async move {
            let shared = task_shared;
            tracing::debug!(generation, "Email check started");
            let result = tokio::select! {
                result = shared.email_check.validate_async(&email) => result,
                () = shared.cancel.cancelled() => {
                    tracing::debug!("Email check cancelled");
                    return;
                }
            };
            shared.apply_email_check(generation, result);
        });

        if started {
            shared.set_validating(state, Field::Email, true);
        }
    }

    /// Spawns `task` on the current runtime and counts it until it ends.
    /// Without a runtime the check is skipped.
    fn spawn<F>(&self, state: &mut FormState, check: &'static str, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!(check, "No tokio runtime, check skipped");
            return false;
        };

        state.pending += 1;
        let shared = Arc::clone(&self.shared);
        handle.spawn(async move {
            task.await;
            shared.finish_task();
        });
        true
    }
}

impl Drop for Form {
    fn drop(&mut self) {
        self.shared.cancel.cancel();
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Form")
            .field("version", &state.store.version())
            .field("phase", &state.phase)
            .field("pending", &state.pending)
            .field("closed", &self.shared.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}
