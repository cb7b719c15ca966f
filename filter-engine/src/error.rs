use crate::backend::CommitError;
use scout_filter_types::Platform;
use scout_filter_types::SlotKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    /// The slot is not usable on the current platform.
    #[error("filter slot {slot} is disabled on {platform}")]
    SlotDisabled { slot: SlotKey, platform: Platform },

    /// A scalar slot was staged with a value the platform's constraint
    /// profile marks illegal. Nothing from the offending patch was
    /// staged.
    #[error("value rejected for slot {slot}: {reason}")]
    ValueRejected { slot: SlotKey, reason: String },

    /// The external commit collaborator refused the merged filter set.
    /// The pending overlay is preserved so the user can retry.
    #[error(transparent)]
    Apply(#[from] CommitError),
}

pub type Result<T> = std::result::Result<T, FilterError>;
