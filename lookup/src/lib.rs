//! # Scout Lookup
//!
//! Debounced remote search for filter entities (locations, handles).
//!
//! [`RemoteLookup`] owns the three timing concerns the filter panel
//! needs but must never reimplement per widget:
//!
//! - **Debounce**: no network call until the query has been stable for
//!   a quiet interval (default 300ms).
//! - **Supersession**: a newer query invalidates interest in an older
//!   one, keyed by a monotonic sequence number per entity kind; a stale
//!   response is discarded, never surfaced.
//! - **Caching**: responses are cached per `(kind, query)` and every
//!   response that reaches the caller is merged into the shared
//!   [`scout_filter_types::SharedNameTable`], which is what lets a
//!   display name outlive the search widget that fetched it.

mod backend;
mod error;
mod lookup;

pub use backend::BackendError;
pub use backend::SearchBackend;
pub use error::LookupError;
pub use error::Result;
pub use lookup::LookupConfig;
pub use lookup::LookupOutcome;
pub use lookup::RemoteLookup;
