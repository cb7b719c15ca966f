use crate::Entity;
use crate::EntityKind;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

/// Id-to-display-name store shared by ledgers, the lookup service and
/// the draft store.
///
/// Resolution consults three tiers in priority order:
/// 1. `selections`: names recorded when an entity was toggled into a
///    selection ledger; authoritative for anything currently selected.
/// 2. `results`: every entity returned by a non-superseded lookup
///    response. This tier is what lets a name outlive the search widget
///    that fetched it.
/// 3. A synthetic `"<Kind> <id>"` fallback when nothing is known yet.
///
/// The table never shrinks except via [`NameResolutionTable::clear_kind`].
#[derive(Debug, Default)]
pub struct NameResolutionTable {
    selections: HashMap<EntityKind, HashMap<String, String>>,
    results: HashMap<EntityKind, HashMap<String, String>>,
}

impl NameResolutionTable {
    /// Records a name captured at selection time (tier 1).
    pub fn record_selection(&mut self, kind: EntityKind, entity: &Entity) {
        self.selections
            .entry(kind)
            .or_default()
            .insert(entity.id.clone(), entity.display_name.clone());
    }

    /// Merges a lookup response into the running cache (tier 2).
    pub fn merge_results(&mut self, kind: EntityKind, entities: &[Entity]) {
        let tier = self.results.entry(kind).or_default();
        for entity in entities {
            tier.insert(entity.id.clone(), entity.display_name.clone());
        }
    }

    pub fn resolve(&self, kind: EntityKind, id: &str) -> Option<&str> {
        self.selections
            .get(&kind)
            .and_then(|tier| tier.get(id))
            .or_else(|| self.results.get(&kind).and_then(|tier| tier.get(id)))
            .map(String::as_str)
    }

    /// Resolution with the synthetic tier-3 fallback.
    pub fn resolve_or_synthetic(&self, kind: EntityKind, id: &str) -> String {
        match self.resolve(kind, id) {
            Some(name) => name.to_string(),
            None => format!("{kind} {id}"),
        }
    }

    /// Drops both mutable tiers for one kind. Invoked by the draft
    /// store's `clear` for the entity kinds the filter panel owns.
    pub fn clear_kind(&mut self, kind: EntityKind) {
        self.selections.remove(&kind);
        self.results.remove(&kind);
    }

    pub fn len(&self) -> usize {
        let count = |tiers: &HashMap<EntityKind, HashMap<String, String>>| {
            tiers.values().map(HashMap::len).sum::<usize>()
        };
        count(&self.selections) + count(&self.results)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cloneable handle to a [`NameResolutionTable`] shared across the
/// engine, ledgers and the async lookup service.
///
/// The scheduling model is single-threaded cooperative, so the lock is
/// only ever contended across await points; poisoning is recovered
/// rather than propagated because the table holds no invariants a
/// panicking writer could break mid-update.
#[derive(Debug, Clone, Default)]
pub struct SharedNameTable(Arc<Mutex<NameResolutionTable>>);

impl SharedNameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_selection(&self, kind: EntityKind, entity: &Entity) {
        self.lock().record_selection(kind, entity);
    }

    pub fn merge_results(&self, kind: EntityKind, entities: &[Entity]) {
        self.lock().merge_results(kind, entities);
    }

    pub fn resolve_or_synthetic(&self, kind: EntityKind, id: &str) -> String {
        self.lock().resolve_or_synthetic(kind, id)
    }

    pub fn resolve(&self, kind: EntityKind, id: &str) -> Option<String> {
        self.lock().resolve(kind, id).map(str::to_string)
    }

    pub fn clear_kind(&self, kind: EntityKind) {
        self.lock().clear_kind(kind);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NameResolutionTable> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
