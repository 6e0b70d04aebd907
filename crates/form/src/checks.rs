//! Asynchronous checks: email availability and the sub-hobby lookup.
//!
//! Both only simulate latency with a sleep; callers own scheduling,
//! cancellation and stale-result handling.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use formulir_validator::foundation::{AsyncValidate, ValidationError};

use crate::catalog::{Catalog, LabelValue};

/// Reports an email as taken when it matches a registered address,
/// ignoring case.
#[derive(Debug, Clone)]
pub struct EmailAvailability {
    registered: Vec<String>,
    delay: Duration,
}

impl EmailAvailability {
    pub fn new<I, S>(registered: I, delay: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            registered: registered
                .into_iter()
                .map(|email| email.as_ref().trim().to_lowercase())
                .collect(),
            delay,
        }
    }

    #[must_use]
    pub fn is_registered(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.registered.iter().any(|taken| *taken == email)
    }
}

#[async_trait]
impl AsyncValidate for EmailAvailability {
    type Input = str;

    async fn validate_async(&self, input: &str) -> Result<(), ValidationError> {
        tokio::time::sleep(self.delay).await;
        if self.is_registered(input) {
            Err(ValidationError::new("email_registered", "Email is already registered")
                .with_field("email"))
        } else {
            Ok(())
        }
    }
}

/// Loads the sub-hobby list for a hobby after a delay.
#[derive(Debug, Clone)]
pub struct SubHobbyLookup {
    catalog: Arc<Catalog>,
    delay: Duration,
}

impl SubHobbyLookup {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, delay: Duration) -> Self {
        Self { catalog, delay }
    }

    pub async fn load(&self, hobby_value: &str) -> Vec<LabelValue> {
        tokio::time::sleep(self.delay).await;
        self.catalog.sub_hobbies(hobby_value).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_registered_ignores_case() {
        let check = EmailAvailability::new(["andi@rubin.com"], Duration::ZERO);
        assert!(check.is_registered("ANDI@Rubin.com"));
        assert!(check.is_registered(" andi@rubin.com "));
        assert!(!check.is_registered("budi@rubin.com"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_waits_for_delay() {
        let check = EmailAvailability::new(["andi@rubin.com"], Duration::from_millis(1_500));
        let started = Instant::now();

        let error = check.validate_async("Andi@Rubin.com").await.unwrap_err();

        assert_eq!(error.code, "email_registered");
        assert_eq!(error.message, "Email is already registered");
        assert!(started.elapsed() >= Duration::from_millis(1_500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_returns_catalog_items() {
        let lookup = SubHobbyLookup::new(Arc::new(Catalog::builtin()), Duration::from_secs(1));

        let items = lookup.load("membaca").await;
        assert_eq!(items.len(), 2);
        assert!(lookup.load("unknown").await.is_empty());
    }
}
