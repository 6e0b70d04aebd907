//! A hand-rolled form: one handler per field, errors kept as plain
//! messages, no rule table and no async email check.

use std::sync::Arc;
use std::time::Duration;

use formulir_validator::prelude::*;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::catalog::{Catalog, LabelValue};
use crate::config::FormConfig;
use crate::error::Result;

/// The message shown under each field, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobby: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_hobby: Option<String>,
}

impl ManualErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ManualRequest<'a> {
    name: &'a str,
    email: &'a str,
    job: &'a LabelValue,
    hobby: &'a LabelValue,
    sub_hobby: &'a LabelValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualSubmit {
    /// The request JSON handed to the results screen.
    Submitted(String),
    /// Nothing was sent; these are the errors now shown.
    Blocked(ManualErrors),
}

#[derive(Debug, Default)]
struct ManualState {
    name: String,
    email: String,
    job: Option<LabelValue>,
    hobby: Option<LabelValue>,
    sub_hobby: Option<LabelValue>,
    sub_hobby_loading: bool,
    errors: ManualErrors,
    generation: u64,
}

#[derive(Debug)]
struct ManualShared {
    state: Mutex<ManualState>,
    catalog: Arc<Catalog>,
    lookup_delay: Duration,
    cancel: CancellationToken,
}

#[derive(Debug)]
pub struct ManualForm {
    shared: Arc<ManualShared>,
}

impl ManualForm {
    #[must_use]
    pub fn new(catalog: Catalog, config: &FormConfig) -> Self {
        Self {
            shared: Arc::new(ManualShared {
                state: Mutex::new(ManualState::default()),
                catalog: Arc::new(catalog),
                lookup_delay: config.hobby_lookup_delay(),
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn on_name_change(&self, value: &str) {
        let check = not_empty()
            .message("Name is required")
            .and(min_length(5).message("Name must be at least 5 characters"));
        let mut state = self.shared.state.lock();
        state.name = value.to_owned();
        state.errors.name = check.validate(value).err().map(|e| e.message.into_owned());
    }

    pub fn on_email_change(&self, value: &str) {
        let check = not_empty()
            .message("Email is required")
            .and(email().message("Invalid email format"));
        let mut state = self.shared.state.lock();
        state.email = value.to_owned();
        state.errors.email = check.validate(value).err().map(|e| e.message.into_owned());
    }

    pub fn on_job_change(&self, job: LabelValue) {
        let mut state = self.shared.state.lock();
        state.job = Some(job);
        state.errors.job = None;
    }

    /// Clears the sub-hobby and marks it loading for the lookup delay.
    pub fn on_hobby_change(&self, hobby: LabelValue) {
        let mut state = self.shared.state.lock();
        tracing::debug!(hobby = %hobby.value, "Manual form hobby changed");
        state.hobby = Some(hobby);
        state.sub_hobby = None;
        state.errors.hobby = None;
        state.generation += 1;

        let Ok(handle) = Handle::try_current() else {
            tracing::warn!("No tokio runtime, sub-hobby loading skipped");
            state.sub_hobby_loading = false;
            return;
        };

        state.sub_hobby_loading = true;
        let generation = state.generation;
        let shared = Arc::clone(&self.shared);
        handle.spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(shared.lookup_delay) => {}
                () = shared.cancel.cancelled() => return,
            }
            let mut state = shared.state.lock();
            if state.generation == generation {
                state.sub_hobby_loading = false;
            }
        });
    }

    pub fn on_sub_hobby_change(&self, sub_hobby: LabelValue) {
        let mut state = self.shared.state.lock();
        state.sub_hobby = Some(sub_hobby);
        state.errors.sub_hobby = None;
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.shared.state.lock().name.clone()
    }

    #[must_use]
    pub fn email(&self) -> String {
        self.shared.state.lock().email.clone()
    }

    #[must_use]
    pub fn job(&self) -> Option<LabelValue> {
        self.shared.state.lock().job.clone()
    }

    #[must_use]
    pub fn hobby(&self) -> Option<LabelValue> {
        self.shared.state.lock().hobby.clone()
    }

    #[must_use]
    pub fn sub_hobby(&self) -> Option<LabelValue> {
        self.shared.state.lock().sub_hobby.clone()
    }

    /// Sub-hobbies of the selected hobby.
    #[must_use]
    pub fn sub_hobbies(&self) -> Vec<LabelValue> {
        let state = self.shared.state.lock();
        state
            .hobby
            .as_ref()
            .map(|hobby| self.shared.catalog.sub_hobbies(&hobby.value).to_vec())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_sub_hobby_loading(&self) -> bool {
        self.shared.state.lock().sub_hobby_loading
    }

    #[must_use]
    pub fn errors(&self) -> ManualErrors {
        self.shared.state.lock().errors.clone()
    }

    /// Every field filled and the sub-hobbies done loading.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        Self::ready(&self.shared.state.lock())
    }

    /// Returns the request JSON, or fills "required" errors for the
    /// empty fields.
    pub fn submit(&self) -> Result<ManualSubmit> {
        let mut state = self.shared.state.lock();
        if Self::ready(&state)
            && let (Some(job), Some(hobby), Some(sub_hobby)) =
                (&state.job, &state.hobby, &state.sub_hobby)
        {
            let request = ManualRequest {
                name: &state.name,
                email: &state.email,
                job,
                hobby,
                sub_hobby,
            };
            let json = serde_json::to_string(&request)?;
            tracing::info!("Manual form submitted");
            return Ok(ManualSubmit::Submitted(json));
        }

        if state.name.is_empty() {
            state.errors.name = Some("Name is required".into());
        }
        if state.email.is_empty() {
            state.errors.email = Some("Email is required".into());
        }
        if state.job.is_none() {
            state.errors.job = Some("Job is required".into());
        }
        if state.hobby.is_none() {
            state.errors.hobby = Some("Hobby is required".into());
        }
        if state.hobby.is_some() && state.sub_hobby.is_none() {
            state.errors.sub_hobby = Some("Sub hobby is required".into());
        }
        Ok(ManualSubmit::Blocked(state.errors.clone()))
    }

    fn ready(state: &ManualState) -> bool {
        !state.name.is_empty()
            && !state.email.is_empty()
            && state.job.is_some()
            && state.hobby.is_some()
            && state.sub_hobby.is_some()
            && !state.sub_hobby_loading
    }
}

impl Drop for ManualForm {
    fn drop(&mut self) {
        self.shared.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn manual() -> ManualForm {
        ManualForm::new(Catalog::builtin(), &FormConfig::default())
    }

    #[test]
    fn test_handlers_set_messages() {
        let form = manual();

        form.on_name_change("");
        assert_eq!(form.errors().name.as_deref(), Some("Name is required"));
        form.on_name_change("Andi");
        assert_eq!(
            form.errors().name.as_deref(),
            Some("Name must be at least 5 characters")
        );
        form.on_name_change("Andi Saputra");
        assert_eq!(form.errors().name, None);

        form.on_email_change("andi@");
        assert_eq!(form.errors().email.as_deref(), Some("Invalid email format"));
    }

    #[test]
    fn test_submit_fills_required_errors() {
        let form = manual();
        form.on_hobby_change(LabelValue::new("Game", "game"));

        let ManualSubmit::Blocked(errors) = form.submit().unwrap() else {
            panic!("empty form must not submit");
        };
        assert_eq!(
            errors,
            ManualErrors {
                name: Some("Name is required".into()),
                email: Some("Email is required".into()),
                job: Some("Job is required".into()),
                hobby: None,
                sub_hobby: Some("Sub hobby is required".into()),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_blocks_submit_until_lookup_delay() {
        let form = manual();
        form.on_name_change("Andi Saputra");
        form.on_email_change("andi@rubin.com");
        form.on_job_change(LabelValue::new("Guru", "guru"));
        form.on_hobby_change(LabelValue::new("Membaca", "membaca"));
        form.on_sub_hobby_change(LabelValue::new("Novel", "Novel"));

        assert!(form.is_sub_hobby_loading());
        assert!(!form.can_submit());

        tokio::time::sleep(Duration::from_millis(1_001)).await;
        assert!(form.can_submit());

        let ManualSubmit::Submitted(json) = form.submit().unwrap() else {
            panic!("complete form must submit");
        };
        let request: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(request["subHobby"]["value"], "Novel");
        assert_eq!(request["job"]["label"], "Guru");
    }

    #[tokio::test(start_paused = true)]
    async fn test_hobby_change_restarts_loading() {
        let form = manual();
        form.on_hobby_change(LabelValue::new("Membaca", "membaca"));
        tokio::time::sleep(Duration::from_millis(600)).await;
        form.on_hobby_change(LabelValue::new("Game", "game"));

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(form.is_sub_hobby_loading());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!form.is_sub_hobby_loading());
        assert_eq!(form.sub_hobbies().len(), 2);
        assert_eq!(form.sub_hobby(), None);
    }
}
