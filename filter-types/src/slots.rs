use crate::MAX_WEIGHT;
use crate::MIN_WEIGHT;
use crate::TypeTag;
use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumIter;
use thiserror::Error;

/// The fixed set of filter slots, in presentation order.
///
/// Declaration order is load-bearing: active-filter descriptors are
/// emitted in this order regardless of the order edits were staged.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum SlotKey {
    #[strum(serialize = "Creator locations")]
    CreatorLocations,
    #[strum(serialize = "Audience locations")]
    AudienceLocations,
    #[strum(serialize = "Location scope")]
    LocationScope,
    #[strum(serialize = "Followers")]
    Followers,
    #[strum(serialize = "Engagement rate")]
    EngagementRate,
    #[strum(serialize = "Creator age")]
    CreatorAge,
    #[strum(serialize = "Creator gender")]
    CreatorGender,
    #[strum(serialize = "Keywords")]
    Keywords,
}

/// Whether a slot holds a collection or a single scalar value.
///
/// Sanitization drops illegal members from collection slots but leaves
/// scalar slots untouched, so callers can reject the whole edit instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotShape {
    Collection,
    Scalar,
}

impl SlotKey {
    pub fn shape(self) -> SlotShape {
        match self {
            SlotKey::CreatorLocations
            | SlotKey::AudienceLocations
            | SlotKey::Keywords => SlotShape::Collection,
            SlotKey::LocationScope
            | SlotKey::Followers
            | SlotKey::EngagementRate
            | SlotKey::CreatorAge
            | SlotKey::CreatorGender => SlotShape::Scalar,
        }
    }

    /// True for slots whose values reference location entities.
    pub fn is_location_slot(self) -> bool {
        matches!(self, SlotKey::CreatorLocations | SlotKey::AudienceLocations)
    }
}

/// Finest location granularity a search may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum LocationScope {
    Country,
    Region,
    City,
}

/// A location reference inside a slot value. Carries the granularity
/// tag captured at selection time so constraint sanitization can judge
/// each member without a remote round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    pub id: String,
    pub tag: TypeTag,
}

impl LocationRef {
    pub fn new(id: impl Into<String>, tag: TypeTag) -> Self {
        Self { id: id.into(), tag }
    }
}

/// A location selection carrying an audience-percentage weight.
///
/// The weight is clamped to `[MIN_WEIGHT, MAX_WEIGHT]` on construction;
/// the sum across a selection is advisory and never enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedLocation {
    pub id: String,
    pub tag: TypeTag,
    pub weight: u8,
}

impl WeightedLocation {
    pub fn new(id: impl Into<String>, tag: TypeTag, weight: u8) -> Self {
        Self {
            id: id.into(),
            tag,
            weight: weight.clamp(MIN_WEIGHT, MAX_WEIGHT),
        }
    }
}

/// An inclusive numeric range with optional open ends.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("range minimum {min} exceeds maximum {max}")]
    Inverted { min: f64, max: f64 },
}

impl NumericRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Result<Self, RangeError> {
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(RangeError::Inverted { min: lo, max: hi });
            }
        }
        Ok(Self { min, max })
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn between(min: f64, max: f64) -> Result<Self, RangeError> {
        Self::new(Some(min), Some(max))
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// The complete value of one filter slot.
///
/// Overlay entries always hold a whole `SlotValue`, never a partial
/// patch of one, so merging committed and staged state is a plain
/// per-slot replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum SlotValue {
    Locations(Vec<LocationRef>),
    WeightedLocations(Vec<WeightedLocation>),
    Scope(LocationScope),
    Range(NumericRange),
    Choice(String),
    TextList(Vec<String>),
}

impl SlotValue {
    /// True when the value carries no usable content: an empty
    /// collection or a fully open range. Empty values are staged to
    /// express "clear this slot" and are pruned at apply time.
    pub fn is_empty(&self) -> bool {
        match self {
            SlotValue::Locations(ids) => ids.is_empty(),
            SlotValue::WeightedLocations(entries) => entries.is_empty(),
            SlotValue::TextList(items) => items.is_empty(),
            SlotValue::Range(range) => range.is_unbounded(),
            SlotValue::Choice(choice) => choice.is_empty(),
            SlotValue::Scope(_) => false,
        }
    }

    /// The inactive value matching a slot's shape, used to stage
    /// "clear this slot".
    pub fn empty_for(slot: SlotKey) -> Self {
        match slot {
            SlotKey::CreatorLocations => SlotValue::Locations(Vec::new()),
            SlotKey::AudienceLocations => SlotValue::WeightedLocations(Vec::new()),
            SlotKey::Keywords => SlotValue::TextList(Vec::new()),
            SlotKey::Followers | SlotKey::EngagementRate | SlotKey::CreatorAge => {
                SlotValue::Range(NumericRange::default())
            }
            SlotKey::CreatorGender => SlotValue::Choice(String::new()),
            SlotKey::LocationScope => SlotValue::Scope(LocationScope::Country),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn slot_order_is_declaration_order() {
        let keys: Vec<SlotKey> = SlotKey::iter().collect();
        assert_eq!(keys[0], SlotKey::CreatorLocations);
        assert_eq!(keys[1], SlotKey::AudienceLocations);
        assert_eq!(*keys.last().unwrap(), SlotKey::Keywords);
    }

    #[test]
    fn weighted_location_clamps_on_construction() {
        assert_eq!(WeightedLocation::new("L1", TypeTag::Country, 0).weight, 1);
        assert_eq!(WeightedLocation::new("L1", TypeTag::Country, 250).weight, 100);
        assert_eq!(WeightedLocation::new("L1", TypeTag::Country, 40).weight, 40);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            NumericRange::new(Some(50.0), Some(10.0)),
            Err(RangeError::Inverted {
                min: 50.0,
                max: 10.0
            })
        );
        assert!(NumericRange::between(10.0, 50.0).is_ok());
    }

    #[test]
    fn empty_values_report_empty() {
        assert!(SlotValue::Locations(vec![]).is_empty());
        assert!(SlotValue::Range(NumericRange::default()).is_empty());
        assert!(!SlotValue::Scope(LocationScope::City).is_empty());
        assert!(!SlotValue::Locations(vec![LocationRef::new("L1", TypeTag::City)]).is_empty());
    }
}
