use crate::profile::ConstraintProfile;
use crate::profile::RestagePolicy;
use scout_filter_types::Platform;
use scout_filter_types::SlotKey;
use scout_filter_types::SlotShape;
use scout_filter_types::SlotValue;
use tracing::debug;

/// Stateless lookup of platform-dependent slot rules.
///
/// `sanitize` is the member-wise workhorse: collection values lose their
/// illegal members, scalar values come back untouched even when illegal
/// (the caller rejects the whole edit instead), and the location scope
/// is clamped to the finest granularity the platform can target.
#[derive(Debug, Default, Clone)]
pub struct ConstraintCatalog;

impl ConstraintCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn profile(&self, platform: Platform) -> ConstraintProfile {
        ConstraintProfile::for_platform(platform)
    }

    pub fn is_slot_enabled(&self, platform: Platform, slot: SlotKey) -> bool {
        self.profile(platform).is_enabled(slot)
    }

    pub fn is_value_legal(&self, platform: Platform, slot: SlotKey, value: &SlotValue) -> bool {
        let profile = self.profile(platform);
        if !profile.is_enabled(slot) {
            return false;
        }
        match value {
            SlotValue::Locations(refs) => refs.iter().all(|r| profile.allows_tag(r.tag)),
            SlotValue::WeightedLocations(entries) => {
                entries.iter().all(|e| profile.allows_tag(e.tag))
            }
            SlotValue::Scope(scope) => *scope <= profile.finest_scope,
            SlotValue::Choice(choice) => {
                choice.is_empty() || profile.gender_choices.contains(&choice.as_str())
            }
            SlotValue::Range(_) | SlotValue::TextList(_) => true,
        }
    }

    /// Returns the value with illegal members dropped.
    ///
    /// Collection slots are filtered member-wise; scalar slots are
    /// returned unchanged except for the location scope, which is
    /// clamped rather than rejected because a coarser scope is always a
    /// legal substitute for a finer one.
    pub fn sanitize(&self, platform: Platform, slot: SlotKey, value: SlotValue) -> SlotValue {
        let profile = self.profile(platform);
        match (slot.shape(), value) {
            (SlotShape::Collection, SlotValue::Locations(refs)) => {
                let before = refs.len();
                let kept: Vec<_> = refs.into_iter().filter(|r| profile.allows_tag(r.tag)).collect();
                if kept.len() != before {
                    debug!(
                        %platform,
                        %slot,
                        dropped = before - kept.len(),
                        "sanitize dropped illegal location members"
                    );
                }
                SlotValue::Locations(kept)
            }
            (SlotShape::Collection, SlotValue::WeightedLocations(entries)) => {
                let before = entries.len();
                let kept: Vec<_> = entries
                    .into_iter()
                    .filter(|e| profile.allows_tag(e.tag))
                    .collect();
                if kept.len() != before {
                    debug!(
                        %platform,
                        %slot,
                        dropped = before - kept.len(),
                        "sanitize dropped illegal weighted-location members"
                    );
                }
                SlotValue::WeightedLocations(kept)
            }
            (_, SlotValue::Scope(scope)) => SlotValue::Scope(scope.min(profile.finest_scope)),
            (_, other) => other,
        }
    }

    pub fn restage_policy(&self, platform: Platform, slot: SlotKey) -> RestagePolicy {
        self.profile(platform).restage_policy(slot)
    }
}
