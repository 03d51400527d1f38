//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! - **Sessions**: every assessment is an explicit [`AssessmentSession`]
//!   context object in a [`Store`]. Sessions never share mutable state.
//! - **Suggestion rules**: loaded once at startup, shared read-only.
//! - **Advisor**: optional completion client. Absent means the advisory
//!   endpoint answers 503.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use dmo_advisor::{Advisor, HttpCompletionClient};
use dmo_classify::SuggestionRules;
use dmo_state::AssessmentSession;
use parking_lot::RwLock;
use uuid::Uuid;

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await` points.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: Uuid, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    /// Retrieve a snapshot of a record by ID.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// Atomically read-validate-update a record.
    ///
    /// The closure runs under a single write lock, so overlapping requests
    /// against the same record are serialised. Returns `None` if the record
    /// doesn't exist, or `Some(result)` with the closure's `Result`.
    pub fn try_update<R, E>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().get_mut(id).map(f)
    }

    /// Remove a record by ID.
    pub fn remove(&self, id: &Uuid) -> Option<T> {
        self.data.write().remove(id)
    }

    /// Number of live records.
    pub(crate) fn len(&self) -> usize {
        self.data.read().len()
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Store of live assessment sessions keyed by session UUID.
pub type SessionStore = Store<AssessmentSession>;

// -- Configuration ------------------------------------------------------------

/// Server configuration read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Optional YAML file overriding the built-in suggestion rules.
    pub rules_path: Option<PathBuf>,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            rules_path: None,
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Variables: `PORT` (default 8080), `DMO_SUGGESTION_RULES`,
    /// `DMO_LOG_FORMAT` (`json` for JSON logs).
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            rules_path: lookup("DMO_SUGGESTION_RULES")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            log_json: lookup("DMO_LOG_FORMAT")
                .is_some_and(|f| f.eq_ignore_ascii_case("json")),
        }
    }
}

// -- Application State --------------------------------------------------------

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub rules: Arc<SuggestionRules>,
    pub advisor: Option<Arc<Advisor<HttpCompletionClient>>>,
}

impl AppState {
    /// Built-in rules, no advisor.
    pub fn new() -> Self {
        Self::with_services(SuggestionRules::builtin().clone(), None)
    }

    /// Empty session store around the given rules and optional advisor.
    pub fn with_services(
        rules: SuggestionRules,
        advisor: Option<Advisor<HttpCompletionClient>>,
    ) -> Self {
        Self {
            sessions: SessionStore::new(),
            rules: Arc::new(rules),
            advisor: advisor.map(Arc::new),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmo_core::Response;
    use dmo_state::WorkflowError;

    #[test]
    fn store_round_trip() {
        let store: Store<AssessmentSession> = Store::new();
        let session = AssessmentSession::new();
        let id = *session.id().as_uuid();
        assert!(store.insert(id, session).is_none());
        assert_eq!(store.len(), 1);
        assert!(store.get(&id).is_some());
        assert!(store.remove(&id).is_some());
        assert!(store.remove(&id).is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn try_update_is_all_or_nothing() {
        let store: Store<AssessmentSession> = Store::new();
        let session = AssessmentSession::new();
        let id = *session.id().as_uuid();
        store.insert(id, session);

        let rejected = store.try_update(&id, |s| {
            s.record("individuals", "privacy", 0, Response::High)
        });
        assert!(matches!(rejected, Some(Err(WorkflowError::WrongPhase { .. }))));

        let applied = store.try_update(&id, |s| {
            s.begin()?;
            s.record("individuals", "privacy", 0, Response::High)
        });
        assert!(matches!(applied, Some(Ok(None))));
        assert_eq!(store.get(&id).map(|s| s.answers().len()), Some(1));

        assert!(store
            .try_update(&Uuid::new_v4(), |s| s.begin())
            .is_none());
    }

    #[test]
    fn clones_share_the_same_map() {
        let a: Store<AssessmentSession> = Store::new();
        let b = a.clone();
        a.insert(Uuid::new_v4(), AssessmentSession::new());
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn config_from_lookup() {
        let cfg = AppConfig::from_lookup(|k| match k {
            "PORT" => Some("9090".into()),
            "DMO_SUGGESTION_RULES" => Some("/etc/dmo/rules.yaml".into()),
            "DMO_LOG_FORMAT" => Some("JSON".into()),
            _ => None,
        });
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.rules_path, Some(PathBuf::from("/etc/dmo/rules.yaml")));
        assert!(cfg.log_json);

        let cfg = AppConfig::from_lookup(|k| (k == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(cfg.port, 8080);
        assert!(cfg.rules_path.is_none());
        assert!(!cfg.log_json);
    }

    #[test]
    fn debug_output_redacts_advisor_key() {
        let config = dmo_advisor::AdvisorConfig::from_lookup(|var| {
            (var == "DMO_COMPLETION_API_KEY").then(|| "sk-SUPERSECRET".to_string())
        })
        .unwrap();
        let advisor = Advisor::from_config(&config).unwrap();
        let state = AppState::with_services(SuggestionRules::standard(), Some(advisor));

        let rendered = format!("{state:?}");
        assert!(!rendered.contains("sk-SUPERSECRET"), "{rendered}");
        assert!(rendered.contains("[REDACTED]"));
    }
}
