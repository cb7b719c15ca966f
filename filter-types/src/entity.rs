use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;

/// Kind of entity a remote search endpoint can return.
///
/// Keys both the per-kind minimum query length and the supersession
/// bookkeeping in the lookup service, and partitions the name-resolution
/// table so clearing location names cannot disturb handle names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "title_case")]
pub enum EntityKind {
    Location,
    Handle,
}

/// Granularity tag carried by every searchable entity.
///
/// Location entities are tagged `Country`/`Region`/`City`; handle search
/// results are tagged `Account`. Constraint profiles restrict which tags
/// are legal per platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Country,
    Region,
    City,
    Account,
}

/// One entity as returned by a remote search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Opaque backend identifier.
    pub id: String,

    /// Human-readable name, captured at search time.
    pub display_name: String,

    /// Granularity tag.
    pub type_tag: TypeTag,
}

impl Entity {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            type_tag,
        }
    }
}
