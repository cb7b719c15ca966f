use async_trait::async_trait;
use scout_filter_types::FilterSet;
use thiserror::Error;

/// Failure reported by the external commit collaborator.
///
/// The backend contract is all-or-nothing: on failure nothing may have
/// been applied server-side, otherwise the engine's "overlay preserved
/// on failure" guarantee would mislead the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("filter commit rejected: {message}")]
pub struct CommitError {
    pub message: String,
}

impl CommitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// External "commit filters to the search backend" collaborator,
/// invoked by [`crate::FilterDraftStore::apply`] with the fully merged
/// filter set.
#[async_trait]
pub trait CommitBackend: Send + Sync {
    async fn commit(&self, filters: &FilterSet) -> Result<(), CommitError>;
}
