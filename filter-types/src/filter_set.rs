use crate::SlotKey;
use crate::SlotValue;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// A complete filter configuration: one optional value per slot.
///
/// The engine keeps two of these notionally: the committed set, and the
/// result of merging the committed set with the pending overlay. Slots
/// absent from the map are at their default (inactive) state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    slots: BTreeMap<SlotKey, SlotValue>,
}

impl FilterSet {
    pub fn get(&self, slot: SlotKey) -> Option<&SlotValue> {
        self.slots.get(&slot)
    }

    pub fn set(&mut self, slot: SlotKey, value: SlotValue) {
        self.slots.insert(slot, value);
    }

    pub fn remove(&mut self, slot: SlotKey) -> Option<SlotValue> {
        self.slots.remove(&slot)
    }

    pub fn contains(&self, slot: SlotKey) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &SlotValue)> {
        self.slots.iter().map(|(k, v)| (*k, v))
    }

    /// Per-slot merge: the overlay's value wins wherever it has one.
    pub fn merged_with(&self, overlay: &FilterPatch) -> FilterSet {
        let mut merged = self.clone();
        for (slot, value) in overlay.iter() {
            merged.set(slot, value.clone());
        }
        merged
    }

    /// Drops empty values (cleared collections, fully open ranges).
    /// Used when promoting a merged set to committed, so a staged
    /// "clear this slot" edit becomes a genuine absence.
    pub fn pruned(&self) -> FilterSet {
        let slots = self
            .slots
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (*k, v.clone()))
            .collect();
        FilterSet { slots }
    }
}

/// A sparse set of whole-slot replacements: the pending overlay, and the
/// argument shape for staging edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterPatch {
    slots: BTreeMap<SlotKey, SlotValue>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style convenience for staging a single slot.
    pub fn with(mut self, slot: SlotKey, value: SlotValue) -> Self {
        self.slots.insert(slot, value);
        self
    }

    pub fn set(&mut self, slot: SlotKey, value: SlotValue) {
        self.slots.insert(slot, value);
    }

    pub fn get(&self, slot: SlotKey) -> Option<&SlotValue> {
        self.slots.get(&slot)
    }

    pub fn remove(&mut self, slot: SlotKey) -> Option<SlotValue> {
        self.slots.remove(&slot)
    }

    pub fn contains(&self, slot: SlotKey) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &SlotValue)> {
        self.slots.iter().map(|(k, v)| (*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = SlotKey> + '_ {
        self.slots.keys().copied()
    }
}

impl FromIterator<(SlotKey, SlotValue)> for FilterPatch {
    fn from_iter<I: IntoIterator<Item = (SlotKey, SlotValue)>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocationRef;
    use crate::NumericRange;
    use crate::TypeTag;
    use pretty_assertions::assert_eq;

    fn loc(id: &str) -> LocationRef {
        LocationRef::new(id, TypeTag::Country)
    }

    #[test]
    fn overlay_wins_per_slot() {
        let mut committed = FilterSet::default();
        committed.set(SlotKey::CreatorLocations, SlotValue::Locations(vec![loc("L1")]));
        committed.set(SlotKey::Followers, SlotValue::Range(NumericRange::at_least(1000.0)));

        let overlay =
            FilterPatch::new().with(SlotKey::CreatorLocations, SlotValue::Locations(vec![loc("L2")]));

        let merged = committed.merged_with(&overlay);
        assert_eq!(
            merged.get(SlotKey::CreatorLocations),
            Some(&SlotValue::Locations(vec![loc("L2")]))
        );
        assert_eq!(
            merged.get(SlotKey::Followers),
            Some(&SlotValue::Range(NumericRange::at_least(1000.0)))
        );
    }

    #[test]
    fn empty_overlay_merge_is_identity() {
        let mut committed = FilterSet::default();
        committed.set(SlotKey::Keywords, SlotValue::TextList(vec!["vegan".into()]));
        assert_eq!(committed.merged_with(&FilterPatch::new()), committed);
    }

    #[test]
    fn pruned_drops_cleared_slots() {
        let mut set = FilterSet::default();
        set.set(SlotKey::CreatorLocations, SlotValue::Locations(vec![]));
        set.set(SlotKey::Keywords, SlotValue::TextList(vec!["fitness".into()]));

        let pruned = set.pruned();
        assert!(!pruned.contains(SlotKey::CreatorLocations));
        assert!(pruned.contains(SlotKey::Keywords));
    }
}
