//! # Scout Constraints
//!
//! Platform-dependent eligibility and value rules for filter slots.
//!
//! Each platform carries a static [`ConstraintProfile`] declaring which
//! slots are usable and which value subsets are legal (e.g. some
//! platforms only accept country-level audience locations). The
//! [`ConstraintCatalog`] façade is what the engine and a UI consult:
//! the UI to decide whether to render a control at all, the engine to
//! sanitize every staged edit and to re-validate everything when the
//! platform changes.

mod catalog;
mod profile;

pub use catalog::ConstraintCatalog;
pub use profile::ConstraintProfile;
pub use profile::RestagePolicy;
