use scout_filter_types::Entity;
use scout_filter_types::EntityKind;
use scout_filter_types::LocationRef;
use scout_filter_types::SharedNameTable;
use scout_filter_types::SlotValue;

/// Ordered unweighted multi-select: the working list behind a location
/// (or handle) picker, prior to being staged.
///
/// The ledger holds no authority over the committed filter. Every
/// mutation synchronously yields the complete new slot value via
/// [`SelectionLedger::slot_value`], which the caller stages into the
/// draft store. Display names are captured at toggle time and recorded
/// into the shared name table, so they survive after the picker that
/// fetched them is torn down.
#[derive(Debug)]
pub struct SelectionLedger {
    kind: EntityKind,
    names: SharedNameTable,
    entries: Vec<Entity>,
}

impl SelectionLedger {
    pub fn new(kind: EntityKind, names: SharedNameTable) -> Self {
        Self {
            kind,
            names,
            entries: Vec::new(),
        }
    }

    /// Toggles an entity: removes it when already selected, otherwise
    /// appends it with the name and tag captured now (never re-resolved
    /// later).
    pub fn toggle(&mut self, entity: Entity) {
        if let Some(pos) = self.entries.iter().position(|e| e.id == entity.id) {
            self.entries.remove(pos);
            return;
        }
        self.names.record_selection(self.kind, &entity);
        self.entries.push(entity);
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn snapshot(&self) -> &[Entity] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The complete slot value this selection proposes.
    pub fn slot_value(&self) -> SlotValue {
        SlotValue::Locations(
            self.entries
                .iter()
                .map(|e| LocationRef::new(e.id.clone(), e.type_tag))
                .collect(),
        )
    }
}
