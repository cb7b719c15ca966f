use scout_filter_types::DEFAULT_WEIGHT;
use scout_filter_types::Entity;
use scout_filter_types::EntityKind;
use scout_filter_types::MAX_WEIGHT;
use scout_filter_types::MIN_WEIGHT;
use scout_filter_types::SharedNameTable;
use scout_filter_types::SlotValue;
use scout_filter_types::WeightedLocation;

/// One selected entity with its audience-percentage weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEntry {
    pub entity: Entity,
    pub weight: u8,
}

/// Ordered weighted multi-select: audience-location percentages.
///
/// Invariants: each weight stays within `[1, 100]`; the sum across the
/// selection is advisory only. The UI should flag a sum past 100, but
/// the engine never silently re-clamps existing entries when a new one
/// is added; only the default weight assigned to a *new* entry
/// respects the remaining budget: `min(20, max(1, 100 - current_sum))`.
#[derive(Debug)]
pub struct WeightedSelection {
    kind: EntityKind,
    names: SharedNameTable,
    entries: Vec<WeightedEntry>,
}

impl WeightedSelection {
    pub fn new(kind: EntityKind, names: SharedNameTable) -> Self {
        Self {
            kind,
            names,
            entries: Vec::new(),
        }
    }

    /// Toggles an entity; a newly added entry receives the
    /// remaining-budget default weight.
    pub fn toggle(&mut self, entity: Entity) {
        if let Some(pos) = self.entries.iter().position(|e| e.entity.id == entity.id) {
            self.entries.remove(pos);
            return;
        }
        let weight = self.default_weight();
        self.names.record_selection(self.kind, &entity);
        self.entries.push(WeightedEntry { entity, weight });
    }

    /// Sets one entry's weight, clamped to `[1, 100]`. Sibling entries
    /// are never renormalized. Returns false if the id is not selected.
    pub fn set_weight(&mut self, id: &str, weight: u8) -> bool {
        match self.entries.iter_mut().find(|e| e.entity.id == id) {
            Some(entry) => {
                entry.weight = weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.entity.id != id);
        self.entries.len() != before
    }

    pub fn snapshot(&self) -> &[WeightedEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|e| u32::from(e.weight)).sum()
    }

    /// Advisory overflow flag for the UI; nothing in the engine
    /// enforces it.
    pub fn is_over_allocated(&self) -> bool {
        self.total_weight() > u32::from(MAX_WEIGHT)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The complete slot value this selection proposes.
    pub fn slot_value(&self) -> SlotValue {
        SlotValue::WeightedLocations(
            self.entries
                .iter()
                .map(|e| WeightedLocation::new(e.entity.id.clone(), e.entity.type_tag, e.weight))
                .collect(),
        )
    }

    fn default_weight(&self) -> u8 {
        let remaining = i64::from(MAX_WEIGHT) - i64::from(self.total_weight());
        let budget = remaining.clamp(i64::from(MIN_WEIGHT), i64::from(DEFAULT_WEIGHT));
        budget as u8
    }
}
