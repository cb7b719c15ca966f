use crate::backend::BackendError;
use scout_filter_types::EntityKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup for {kind} failed: {source}")]
    Backend {
        kind: EntityKind,
        #[source]
        source: BackendError,
    },
}

pub type Result<T> = std::result::Result<T, LookupError>;
