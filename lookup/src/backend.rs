use async_trait::async_trait;
use scout_filter_types::Entity;
use scout_filter_types::EntityKind;
use thiserror::Error;

/// Failure reported by a search backend: network trouble, a non-2xx
/// status, or an unparseable payload. Distinct from an empty result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("search backend failed: {message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// External search endpoint for locations and handles.
///
/// Implementations must be idempotent per `(kind, query)`: the lookup
/// layer may re-issue the same query after a cache eviction. No retry
/// is performed here; a failure is surfaced once and the caller decides.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, kind: EntityKind, query: &str) -> Result<Vec<Entity>, BackendError>;
}
