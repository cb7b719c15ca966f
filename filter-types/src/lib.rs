//! # Scout Filter Types
//!
//! Shared data model for the influencer-discovery filter engine:
//! platforms, searchable entities, filter slots and their values, the
//! committed/staged filter set, and the name-resolution table that maps
//! opaque entity ids to human-readable display names.
//!
//! This crate is deliberately free of behavior beyond invariant checks;
//! the reconciliation logic lives in `scout-filter-engine` and the
//! asynchronous lookup machinery in `scout-lookup`.

mod entity;
mod filter_set;
mod name_table;
mod platform;
mod slots;

pub use entity::Entity;
pub use entity::EntityKind;
pub use entity::TypeTag;
pub use filter_set::FilterPatch;
pub use filter_set::FilterSet;
pub use name_table::NameResolutionTable;
pub use name_table::SharedNameTable;
pub use platform::Platform;
pub use slots::LocationRef;
pub use slots::LocationScope;
pub use slots::NumericRange;
pub use slots::RangeError;
pub use slots::SlotKey;
pub use slots::SlotShape;
pub use slots::SlotValue;
pub use slots::WeightedLocation;

/// Weight bounds for weighted location selections, inclusive.
pub const MIN_WEIGHT: u8 = 1;
pub const MAX_WEIGHT: u8 = 100;

/// Default weight assigned to a newly toggled weighted entry, before the
/// remaining-budget rule is applied.
pub const DEFAULT_WEIGHT: u8 = 20;
