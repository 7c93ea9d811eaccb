//! Application state for the Cashflow Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::reminders::{InMemoryRepository, RecordRepository};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration, the record source for the reminder batch and the
/// secret guarding the cron endpoint.
#[derive(Clone)]
pub struct AppState {
    /// The loaded calendar, tax and benefit configuration.
    config: Arc<ConfigLoader>,
    /// Source of recurring records for reminders.
    records: Arc<dyn RecordRepository>,
    /// Bearer token required by `/cron/reminders`.
    cron_secret: Option<String>,
}

impl AppState {
    /// Creates a new application state with no records and no cron secret.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            records: Arc::new(InMemoryRepository::default()),
            cron_secret: None,
        }
    }

    /// Replaces the record source.
    pub fn with_records(mut self, records: impl RecordRepository + 'static) -> Self {
        self.records = Arc::new(records);
        self
    }

    /// Sets the secret required by the cron endpoint. Empty secrets are ignored.
    pub fn with_cron_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        self.cron_secret = (!secret.is_empty()).then_some(secret);
        self
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the record source.
    pub fn records(&self) -> &dyn RecordRepository {
        self.records.as_ref()
    }

    /// Returns true if `token` matches the configured cron secret.
    ///
    /// Always false when no secret is configured.
    pub fn cron_authorized(&self, token: Option<&str>) -> bool {
        match (&self.cron_secret, token) {
            (Some(secret), Some(token)) => constant_time_eq(secret.as_bytes(), token.as_bytes()),
            _ => false,
        }
    }
}

/// Compares two byte strings in time that depends only on their lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn state() -> AppState {
        AppState::new(ConfigLoader::from_config(EngineConfig::default()))
    }

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_cron_requires_configured_secret() {
        assert!(!state().cron_authorized(Some("anything")));
        assert!(!state().with_cron_secret("").cron_authorized(Some("")));
    }

    #[test]
    fn test_cron_secret_must_match() {
        let state = state().with_cron_secret("s3cret");
        assert!(state.cron_authorized(Some("s3cret")));
        assert!(!state.cron_authorized(Some("wrong")));
        assert!(!state.cron_authorized(None));
    }

    #[test]
    fn test_cron_secret_rejects_same_length_tokens() {
        let state = state().with_cron_secret("s3cret");
        assert!(!state.cron_authorized(Some("s3creT")));
        assert!(!state.cron_authorized(Some("t3cret")));
        assert!(!state.cron_authorized(Some("s3cre")));
        assert!(!state.cron_authorized(Some("s3cret ")));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"", b""));
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
