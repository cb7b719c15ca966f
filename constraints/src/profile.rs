use scout_filter_types::LocationScope;
use scout_filter_types::Platform;
use scout_filter_types::SlotKey;
use scout_filter_types::TypeTag;
use serde::Deserialize;
use serde::Serialize;

/// What happens to a committed slot that a platform switch has altered
/// via sanitization.
///
/// `ReviewRequired` stages the sanitized value so the user can inspect
/// it before it takes effect; `AutoApply` writes it straight into the
/// committed set. Only the location-scope restriction auto-applies;
/// every other slot is treated conservatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestagePolicy {
    ReviewRequired,
    AutoApply,
}

/// Per-platform rule set, read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintProfile {
    /// Slots that are usable on this platform.
    pub enabled_slots: Vec<SlotKey>,

    /// Legal granularity tags for location-valued slots.
    pub legal_location_tags: Vec<TypeTag>,

    /// Finest location scope the platform can target.
    pub finest_scope: LocationScope,

    /// Legal values for the creator-gender slot.
    pub gender_choices: Vec<&'static str>,
}

impl ConstraintProfile {
    pub(crate) fn for_platform(platform: Platform) -> ConstraintProfile {
        match platform {
            Platform::Instagram => ConstraintProfile {
                enabled_slots: all_slots(),
                legal_location_tags: vec![TypeTag::Country, TypeTag::Region, TypeTag::City],
                finest_scope: LocationScope::City,
                gender_choices: GENDER_CHOICES.to_vec(),
            },
            // TikTok audience targeting is country-level only, and its
            // search API has no keyword facet.
            Platform::TikTok => ConstraintProfile {
                enabled_slots: all_slots()
                    .into_iter()
                    .filter(|slot| *slot != SlotKey::Keywords)
                    .collect(),
                legal_location_tags: vec![TypeTag::Country],
                finest_scope: LocationScope::Country,
                gender_choices: GENDER_CHOICES.to_vec(),
            },
            Platform::YouTube => ConstraintProfile {
                enabled_slots: all_slots(),
                legal_location_tags: vec![TypeTag::Country, TypeTag::Region],
                finest_scope: LocationScope::Region,
                gender_choices: GENDER_CHOICES.to_vec(),
            },
        }
    }

    pub fn is_enabled(&self, slot: SlotKey) -> bool {
        self.enabled_slots.contains(&slot)
    }

    pub fn allows_tag(&self, tag: TypeTag) -> bool {
        self.legal_location_tags.contains(&tag)
    }

    pub fn restage_policy(&self, slot: SlotKey) -> RestagePolicy {
        match slot {
            SlotKey::LocationScope => RestagePolicy::AutoApply,
            _ => RestagePolicy::ReviewRequired,
        }
    }
}

const GENDER_CHOICES: &[&str] = &["any", "female", "male"];

fn all_slots() -> Vec<SlotKey> {
    use strum::IntoEnumIterator;
    SlotKey::iter().collect()
}
