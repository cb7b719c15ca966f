use crate::backend::CommitBackend;
use crate::error::FilterError;
use crate::error::Result;
use crate::propagation::DeferredQueue;
use scout_constraints::ConstraintCatalog;
use scout_constraints::RestagePolicy;
use scout_filter_types::EntityKind;
use scout_filter_types::FilterPatch;
use scout_filter_types::FilterSet;
use scout_filter_types::LocationRef;
use scout_filter_types::NumericRange;
use scout_filter_types::Platform;
use scout_filter_types::SharedNameTable;
use scout_filter_types::SlotKey;
use scout_filter_types::SlotShape;
use scout_filter_types::SlotValue;
use scout_filter_types::WeightedLocation;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Derived, presentation-ready description of one active filter slot.
/// Recomputed on every read; never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveFilter {
    pub slot: SlotKey,
    pub label: String,
    pub value: SlotValue,
}

/// Result of a successful [`FilterDraftStore::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The merged filter set was committed to the search backend.
    Committed,
    /// The overlay was empty; nothing was sent.
    NothingStaged,
}

/// Borrowed view of one element of a collection-valued slot, handed to
/// the matcher of [`FilterDraftStore::remove_one`].
#[derive(Debug)]
pub enum SlotItem<'a> {
    Location(&'a LocationRef),
    Weighted(&'a WeightedLocation),
    Text(&'a str),
}

impl SlotItem<'_> {
    /// Convenience for the common "match by id" case; text items match
    /// on their content.
    pub fn matches_id(&self, id: &str) -> bool {
        match self {
            SlotItem::Location(r) => r.id == id,
            SlotItem::Weighted(w) => w.id == id,
            SlotItem::Text(t) => *t == id,
        }
    }
}

type Listener = Box<dyn FnMut(&BTreeSet<SlotKey>, &[ActiveFilter])>;

/// The draft-state reconciliation engine behind the filter panel.
///
/// Holds the last-committed filter set and a sparse overlay of pending
/// whole-slot edits. Edits accumulate via [`stage`](Self::stage) and
/// stay invisible to the search backend until an explicit
/// [`apply`](Self::apply). Listener notifications are deferred: state
/// changes mark slots into a [`DeferredQueue`] and the host drains it
/// once per scheduling turn via [`pump`](Self::pump), so a listener
/// always sees a settled snapshot and can never reenter the store
/// mid-update.
pub struct FilterDraftStore {
    platform: Platform,
    catalog: ConstraintCatalog,
    committed: FilterSet,
    overlay: FilterPatch,
    names: SharedNameTable,
    backend: Arc<dyn CommitBackend>,
    queue: DeferredQueue<SlotKey>,
    listeners: Vec<Listener>,
}

impl FilterDraftStore {
    pub fn new(platform: Platform, backend: Arc<dyn CommitBackend>, names: SharedNameTable) -> Self {
        Self {
            platform,
            catalog: ConstraintCatalog::new(),
            committed: FilterSet::default(),
            overlay: FilterPatch::new(),
            names,
            backend,
            queue: DeferredQueue::new(),
            listeners: Vec::new(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// True while any edit is staged but not applied.
    pub fn is_dirty(&self) -> bool {
        !self.overlay.is_empty()
    }

    /// Stages a set of whole-slot edits into the pending overlay.
    ///
    /// The call is atomic: if any slot is disabled on the current
    /// platform, or any scalar value is illegal, nothing is staged.
    /// Collection values are sanitized member-wise instead of rejected;
    /// dropped members are logged.
    pub fn stage(&mut self, patch: FilterPatch) -> Result<()> {
        for (slot, value) in patch.iter() {
            if !self.catalog.is_slot_enabled(self.platform, slot) {
                return Err(FilterError::SlotDisabled {
                    slot,
                    platform: self.platform,
                });
            }
            if slot.shape() == SlotShape::Scalar
                && !self.catalog.is_value_legal(self.platform, slot, value)
            {
                return Err(FilterError::ValueRejected {
                    slot,
                    reason: format!("illegal value for {slot} on {}", self.platform),
                });
            }
        }

        for (slot, value) in patch.iter() {
            let sanitized = self.catalog.sanitize(self.platform, slot, value.clone());
            debug!(%slot, "staged filter edit");
            self.overlay.set(slot, sanitized);
            self.queue.schedule(slot);
        }
        Ok(())
    }

    /// The committed set with the pending overlay merged over it.
    /// Computed fresh on every call.
    pub fn display_filters(&self) -> FilterSet {
        self.committed.merged_with(&self.overlay)
    }

    /// Human-readable descriptors for every non-empty slot of
    /// [`display_filters`](Self::display_filters), in slot declaration
    /// order. Names are resolved through the shared name table, falling
    /// back to a synthetic `"<Kind> <id>"` when nothing is known yet.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let display = self.display_filters();
        SlotKey::iter()
            .filter_map(|slot| {
                let value = display.get(slot)?;
                if value.is_empty() {
                    return None;
                }
                Some(ActiveFilter {
                    slot,
                    label: self.label_for(slot, value),
                    value: value.clone(),
                })
            })
            .collect()
    }

    /// Commits the merged filter set to the search backend.
    ///
    /// No-op when nothing is staged. On success the merged set (with
    /// cleared slots pruned) becomes the committed set and the overlay
    /// empties atomically. On failure the overlay is left untouched so
    /// the user can retry, and the error is surfaced, never swallowed.
    pub async fn apply(&mut self) -> Result<ApplyOutcome> {
        if self.overlay.is_empty() {
            return Ok(ApplyOutcome::NothingStaged);
        }

        let merged = self.display_filters().pruned();
        if let Err(err) = self.backend.commit(&merged).await {
            warn!(error = %err, "filter commit failed; overlay preserved");
            return Err(FilterError::Apply(err));
        }

        let staged: Vec<SlotKey> = self.overlay.keys().collect();
        self.committed = merged;
        self.overlay.clear();
        for slot in staged {
            self.queue.schedule(slot);
        }
        info!(slots = self.committed.len(), "filters applied");
        Ok(ApplyOutcome::Committed)
    }

    /// Resets committed set and overlay to defaults, and drops the
    /// resolved names for the entity kinds this panel owns. Synchronous;
    /// never triggers an apply.
    pub fn clear(&mut self) {
        let touched: BTreeSet<SlotKey> = self
            .committed
            .iter()
            .map(|(slot, _)| slot)
            .chain(self.overlay.keys())
            .collect();

        self.committed = FilterSet::default();
        self.overlay.clear();
        self.names.clear_kind(EntityKind::Location);
        for slot in touched {
            self.queue.schedule(slot);
        }
        info!("filters cleared");
    }

    /// Removes the first entry matching `matcher` from a
    /// collection-valued slot by restaging the slot without it. Operates
    /// on the staged value when the slot is already in the overlay,
    /// otherwise restages from the committed value. Returns whether
    /// anything was removed.
    pub fn remove_one(&mut self, slot: SlotKey, matcher: impl Fn(&SlotItem<'_>) -> bool) -> bool {
        let base = self
            .overlay
            .get(slot)
            .cloned()
            .or_else(|| self.committed.get(slot).cloned());

        let restaged = match base {
            Some(SlotValue::Locations(mut refs)) => {
                let pos = refs.iter().position(|r| matcher(&SlotItem::Location(r)));
                match pos {
                    Some(pos) => {
                        refs.remove(pos);
                        SlotValue::Locations(refs)
                    }
                    None => return false,
                }
            }
            Some(SlotValue::WeightedLocations(mut entries)) => {
                let pos = entries.iter().position(|e| matcher(&SlotItem::Weighted(e)));
                match pos {
                    Some(pos) => {
                        entries.remove(pos);
                        SlotValue::WeightedLocations(entries)
                    }
                    None => return false,
                }
            }
            Some(SlotValue::TextList(mut items)) => {
                let pos = items.iter().position(|t| matcher(&SlotItem::Text(t)));
                match pos {
                    Some(pos) => {
                        items.remove(pos);
                        SlotValue::TextList(items)
                    }
                    None => return false,
                }
            }
            _ => return false,
        };

        debug!(%slot, "removed one entry via restage");
        self.overlay.set(slot, restaged);
        self.queue.schedule(slot);
        true
    }

    /// Switches platform and re-sanitizes every slot of both the
    /// committed set and the overlay against the new platform's
    /// constraint profile.
    ///
    /// Overlay slots are replaced in place. A committed-only slot that
    /// sanitization alters is *staged* so the user can review it before
    /// it takes effect, unless its restage policy is
    /// [`RestagePolicy::AutoApply`] (the location-scope restriction).
    /// Slots disabled on the new platform are dropped from the overlay
    /// and, if committed, restaged as empty for review.
    pub fn on_platform_change(&mut self, platform: Platform) {
        if platform == self.platform {
            return;
        }
        info!(from = %self.platform, to = %platform, "platform changed; re-validating all slots");
        self.platform = platform;

        for slot in SlotKey::iter() {
            if !self.catalog.is_slot_enabled(platform, slot) {
                if self.overlay.remove(slot).is_some() {
                    self.queue.schedule(slot);
                }
                if self.committed.contains(slot) {
                    self.overlay.set(slot, SlotValue::empty_for(slot));
                    self.queue.schedule(slot);
                }
                continue;
            }

            if let Some(value) = self.overlay.get(slot).cloned() {
                let sanitized = self.catalog.sanitize(platform, slot, value.clone());
                if sanitized != value {
                    self.overlay.set(slot, sanitized);
                    self.queue.schedule(slot);
                }
            } else if let Some(value) = self.committed.get(slot).cloned() {
                let sanitized = self.catalog.sanitize(platform, slot, value.clone());
                if sanitized == value {
                    continue;
                }
                match self.catalog.restage_policy(platform, slot) {
                    RestagePolicy::AutoApply => {
                        debug!(%slot, "platform switch auto-applied sanitized value");
                        self.committed.set(slot, sanitized);
                    }
                    RestagePolicy::ReviewRequired => {
                        debug!(%slot, "platform switch staged sanitized value for review");
                        self.overlay.set(slot, sanitized);
                    }
                }
                self.queue.schedule(slot);
            }
        }
    }

    /// Registers a listener for deferred change notifications. Each
    /// drain delivers the coalesced set of changed slots and a fresh
    /// active-filter snapshot.
    pub fn subscribe(&mut self, listener: impl FnMut(&BTreeSet<SlotKey>, &[ActiveFilter]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Drains pending propagations. Called by the host once per
    /// scheduling turn; several changes within a turn coalesce into a
    /// single delivery reflecting the state at drain time.
    pub fn pump(&mut self) {
        if !self.queue.is_pending() {
            return;
        }
        let slots = self.queue.drain();
        let snapshot = self.active_filters();
        for listener in &mut self.listeners {
            listener(&slots, &snapshot);
        }
    }

    fn label_for(&self, slot: SlotKey, value: &SlotValue) -> String {
        let rendered = match value {
            SlotValue::Locations(refs) => refs
                .iter()
                .map(|r| self.names.resolve_or_synthetic(EntityKind::Location, &r.id))
                .collect::<Vec<_>>()
                .join(", "),
            SlotValue::WeightedLocations(entries) => entries
                .iter()
                .map(|e| {
                    let name = self.names.resolve_or_synthetic(EntityKind::Location, &e.id);
                    format!("{name} {}%", e.weight)
                })
                .collect::<Vec<_>>()
                .join(", "),
            SlotValue::Scope(scope) => scope.to_string(),
            SlotValue::Range(range) => render_range(range),
            SlotValue::Choice(choice) => choice.clone(),
            SlotValue::TextList(items) => items.join(", "),
        };
        format!("{slot}: {rendered}")
    }
}

fn render_range(range: &NumericRange) -> String {
    match (range.min, range.max) {
        (Some(min), Some(max)) => format!("{}\u{2013}{}", render_bound(min), render_bound(max)),
        (Some(min), None) => format!("\u{2265} {}", render_bound(min)),
        (None, Some(max)) => format!("\u{2264} {}", render_bound(max)),
        (None, None) => String::new(),
    }
}

fn render_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CommitError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use scout_filter_types::Entity;
    use scout_filter_types::LocationScope;
    use scout_filter_types::TypeTag;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicBool;
    use std::sync::atomic::Ordering;

    /// Commit collaborator that records every filter set it receives
    /// and can be switched into a failing mode.
    #[derive(Default)]
    struct RecordingBackend {
        commits: Mutex<Vec<FilterSet>>,
        fail: AtomicBool,
    }

    impl RecordingBackend {
        fn commits(&self) -> Vec<FilterSet> {
            self.commits.lock().unwrap().clone()
        }

        fn set_failing(&self, failing: bool) {
            self.fail.store(failing, Ordering::Relaxed);
        }
    }

    #[async_trait]
    impl CommitBackend for RecordingBackend {
        async fn commit(&self, filters: &FilterSet) -> std::result::Result<(), CommitError> {
            if self.fail.load(Ordering::Relaxed) {
                return Err(CommitError::new("backend refused"));
            }
            self.commits.lock().unwrap().push(filters.clone());
            Ok(())
        }
    }

    fn store_on(platform: Platform) -> (FilterDraftStore, Arc<RecordingBackend>, SharedNameTable) {
        let backend = Arc::new(RecordingBackend::default());
        let names = SharedNameTable::new();
        let store = FilterDraftStore::new(platform, backend.clone(), names.clone());
        (store, backend, names)
    }

    fn loc(id: &str, tag: TypeTag) -> LocationRef {
        LocationRef::new(id, tag)
    }

    fn creator_locations(ids: &[(&str, TypeTag)]) -> FilterPatch {
        FilterPatch::new().with(
            SlotKey::CreatorLocations,
            SlotValue::Locations(ids.iter().map(|(id, tag)| loc(id, *tag)).collect()),
        )
    }

    #[test]
    fn display_equals_committed_when_overlay_is_empty() {
        let (store, _, _) = store_on(Platform::Instagram);
        assert_eq!(store.display_filters(), FilterSet::default());
        assert!(!store.is_dirty());
    }

    #[test]
    fn display_is_committed_with_overlay_winning_per_slot() {
        let (mut store, _, _) = store_on(Platform::Instagram);
        store
            .stage(creator_locations(&[("AU", TypeTag::Country)]))
            .unwrap();
        store
            .stage(
                FilterPatch::new()
                    .with(SlotKey::Followers, SlotValue::Range(NumericRange::at_least(1000.0))),
            )
            .unwrap();

        let display = store.display_filters();
        assert_eq!(
            display.get(SlotKey::CreatorLocations),
            Some(&SlotValue::Locations(vec![loc("AU", TypeTag::Country)]))
        );
        assert_eq!(
            display.get(SlotKey::Followers),
            Some(&SlotValue::Range(NumericRange::at_least(1000.0)))
        );
        assert!(store.is_dirty());
    }

    #[tokio::test]
    async fn apply_commits_the_merged_set_and_empties_the_overlay() {
        let (mut store, backend, _) = store_on(Platform::Instagram);
        store
            .stage(creator_locations(&[("AU", TypeTag::Country)]))
            .unwrap();

        assert_eq!(store.apply().await.unwrap(), ApplyOutcome::Committed);
        assert!(!store.is_dirty());

        // What was sent is textually identical to what is now displayed.
        let commits = backend.commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0], store.display_filters());

        // A second apply with nothing staged is a no-op.
        assert_eq!(store.apply().await.unwrap(), ApplyOutcome::NothingStaged);
        assert_eq!(backend.commits().len(), 1);
    }

    #[tokio::test]
    async fn apply_failure_preserves_the_overlay_for_retry() {
        let (mut store, backend, _) = store_on(Platform::Instagram);
        store
            .stage(creator_locations(&[("AU", TypeTag::Country)]))
            .unwrap();

        backend.set_failing(true);
        assert!(matches!(store.apply().await, Err(FilterError::Apply(_))));
        assert!(store.is_dirty());

        backend.set_failing(false);
        assert_eq!(store.apply().await.unwrap(), ApplyOutcome::Committed);
        assert!(!store.is_dirty());
    }

    #[tokio::test]
    async fn staged_clear_prunes_the_slot_on_apply() {
        let (mut store, backend, _) = store_on(Platform::Instagram);
        store
            .stage(creator_locations(&[("AU", TypeTag::Country)]))
            .unwrap();
        store.apply().await.unwrap();

        store
            .stage(FilterPatch::new().with(SlotKey::CreatorLocations, SlotValue::Locations(vec![])))
            .unwrap();
        store.apply().await.unwrap();

        assert!(!store.display_filters().contains(SlotKey::CreatorLocations));
        assert!(!backend.commits()[1].contains(SlotKey::CreatorLocations));
    }

    #[test]
    fn clear_resets_everything_including_location_names() {
        let (mut store, _, names) = store_on(Platform::Instagram);
        names.record_selection(
            EntityKind::Location,
            &Entity::new("AU", "Australia", TypeTag::Country),
        );
        store
            .stage(creator_locations(&[("AU", TypeTag::Country)]))
            .unwrap();

        store.clear();
        assert!(store.active_filters().is_empty());
        assert!(!store.is_dirty());
        assert_eq!(names.resolve(EntityKind::Location, "AU"), None);
    }

    #[test]
    fn active_filters_resolve_names_learned_from_unrelated_searches() {
        let (mut store, _, names) = store_on(Platform::Instagram);
        // Name learned earlier, e.g. from a search in a widget that has
        // since been unmounted.
        names.merge_results(
            EntityKind::Location,
            &[Entity::new("L1", "Lisbon", TypeTag::City)],
        );

        store.stage(creator_locations(&[("L1", TypeTag::City)])).unwrap();

        let active = store.active_filters();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Creator locations: Lisbon");
    }

    #[test]
    fn unknown_ids_get_synthetic_labels() {
        let (mut store, _, _) = store_on(Platform::Instagram);
        store.stage(creator_locations(&[("L9", TypeTag::City)])).unwrap();

        let active = store.active_filters();
        assert_eq!(active[0].label, "Creator locations: Location L9");
    }

    #[test]
    fn active_filters_follow_slot_declaration_order() {
        let (mut store, _, _) = store_on(Platform::Instagram);
        store
            .stage(FilterPatch::new().with(SlotKey::Keywords, SlotValue::TextList(vec!["vegan".into()])))
            .unwrap();
        store
            .stage(creator_locations(&[("AU", TypeTag::Country)]))
            .unwrap();

        let slots: Vec<SlotKey> = store.active_filters().iter().map(|f| f.slot).collect();
        assert_eq!(slots, vec![SlotKey::CreatorLocations, SlotKey::Keywords]);
    }

    #[test]
    fn remove_one_leaves_the_rest_of_the_slot_and_other_slots_alone() {
        let (mut store, _, _) = store_on(Platform::Instagram);
        store
            .stage(creator_locations(&[
                ("AU", TypeTag::Country),
                ("CA", TypeTag::Country),
                ("US", TypeTag::Country),
            ]))
            .unwrap();
        store
            .stage(FilterPatch::new().with(SlotKey::Keywords, SlotValue::TextList(vec!["vegan".into()])))
            .unwrap();

        assert!(store.remove_one(SlotKey::CreatorLocations, |item| item.matches_id("CA")));

        assert_eq!(
            store.display_filters().get(SlotKey::CreatorLocations),
            Some(&SlotValue::Locations(vec![
                loc("AU", TypeTag::Country),
                loc("US", TypeTag::Country),
            ]))
        );
        assert_eq!(
            store.display_filters().get(SlotKey::Keywords),
            Some(&SlotValue::TextList(vec!["vegan".into()]))
        );
    }

    #[tokio::test]
    async fn remove_one_restages_from_committed_when_not_staged() {
        let (mut store, _, _) = store_on(Platform::Instagram);
        store
            .stage(creator_locations(&[("AU", TypeTag::Country), ("CA", TypeTag::Country)]))
            .unwrap();
        store.apply().await.unwrap();
        assert!(!store.is_dirty());

        assert!(store.remove_one(SlotKey::CreatorLocations, |item| item.matches_id("AU")));

        // Committed set untouched; the trimmed value is staged.
        assert!(store.is_dirty());
        assert_eq!(
            store.display_filters().get(SlotKey::CreatorLocations),
            Some(&SlotValue::Locations(vec![loc("CA", TypeTag::Country)]))
        );
    }

    #[test]
    fn remove_one_misses_return_false() {
        let (mut store, _, _) = store_on(Platform::Instagram);
        assert!(!store.remove_one(SlotKey::CreatorLocations, |item| item.matches_id("AU")));
    }

    #[test]
    fn stage_rejects_disabled_slots_atomically() {
        let (mut store, _, _) = store_on(Platform::TikTok);
        let patch = FilterPatch::new()
            .with(SlotKey::Followers, SlotValue::Range(NumericRange::at_least(1000.0)))
            .with(SlotKey::Keywords, SlotValue::TextList(vec!["vegan".into()]));

        assert!(matches!(
            store.stage(patch),
            Err(FilterError::SlotDisabled {
                slot: SlotKey::Keywords,
                ..
            })
        ));
        // Nothing from the patch landed.
        assert!(!store.is_dirty());
    }

    #[test]
    fn stage_rejects_illegal_scalars_atomically() {
        let (mut store, _, _) = store_on(Platform::Instagram);
        let patch = FilterPatch::new()
            .with(SlotKey::CreatorGender, SlotValue::Choice("nonbinary".into()))
            .with(SlotKey::Followers, SlotValue::Range(NumericRange::at_least(1000.0)));

        assert!(matches!(
            store.stage(patch),
            Err(FilterError::ValueRejected {
                slot: SlotKey::CreatorGender,
                ..
            })
        ));
        assert!(!store.is_dirty());
    }

    #[test]
    fn stage_sanitizes_collection_members_instead_of_rejecting() {
        let (mut store, _, _) = store_on(Platform::TikTok);
        store
            .stage(creator_locations(&[
                ("AU", TypeTag::Country),
                ("SYD", TypeTag::City),
            ]))
            .unwrap();

        assert_eq!(
            store.display_filters().get(SlotKey::CreatorLocations),
            Some(&SlotValue::Locations(vec![loc("AU", TypeTag::Country)]))
        );
    }

    #[tokio::test]
    async fn platform_switch_stages_stripped_committed_collections_for_review() {
        let (mut store, backend, _) = store_on(Platform::Instagram);
        store
            .stage(creator_locations(&[
                ("AU", TypeTag::Country),
                ("SYD", TypeTag::City),
            ]))
            .unwrap();
        store.apply().await.unwrap();
        assert!(!store.is_dirty());

        store.on_platform_change(Platform::TikTok);

        // The stripped value is staged, not silently committed.
        assert!(store.is_dirty());
        assert_eq!(
            store.display_filters().get(SlotKey::CreatorLocations),
            Some(&SlotValue::Locations(vec![loc("AU", TypeTag::Country)]))
        );
        // Committed still holds the pre-switch value until the user
        // applies; nothing was sent to the backend by the switch.
        assert_eq!(backend.commits().len(), 1);
    }

    #[tokio::test]
    async fn platform_switch_auto_applies_the_location_scope() {
        let (mut store, _, _) = store_on(Platform::Instagram);
        store
            .stage(FilterPatch::new().with(SlotKey::LocationScope, SlotValue::Scope(LocationScope::City)))
            .unwrap();
        store.apply().await.unwrap();

        store.on_platform_change(Platform::YouTube);

        // Scope clamps straight into the committed set; no review step.
        assert!(!store.is_dirty());
        assert_eq!(
            store.display_filters().get(SlotKey::LocationScope),
            Some(&SlotValue::Scope(LocationScope::Region))
        );
    }

    #[tokio::test]
    async fn platform_switch_restages_disabled_committed_slots_as_empty() {
        let (mut store, _, _) = store_on(Platform::Instagram);
        store
            .stage(FilterPatch::new().with(SlotKey::Keywords, SlotValue::TextList(vec!["vegan".into()])))
            .unwrap();
        store.apply().await.unwrap();

        store.on_platform_change(Platform::TikTok);

        assert!(store.is_dirty());
        let active_slots: Vec<SlotKey> = store.active_filters().iter().map(|f| f.slot).collect();
        assert!(!active_slots.contains(&SlotKey::Keywords));
    }

    #[test]
    fn platform_switch_drops_disabled_staged_slots() {
        let (mut store, _, _) = store_on(Platform::Instagram);
        store
            .stage(FilterPatch::new().with(SlotKey::Keywords, SlotValue::TextList(vec!["vegan".into()])))
            .unwrap();

        store.on_platform_change(Platform::TikTok);

        assert!(!store.is_dirty());
        assert!(store.active_filters().is_empty());
    }

    #[test]
    fn platform_switch_sanitizes_staged_values_in_place() {
        let (mut store, _, _) = store_on(Platform::Instagram);
        store
            .stage(creator_locations(&[
                ("AU", TypeTag::Country),
                ("SYD", TypeTag::City),
            ]))
            .unwrap();

        store.on_platform_change(Platform::TikTok);

        assert_eq!(
            store.display_filters().get(SlotKey::CreatorLocations),
            Some(&SlotValue::Locations(vec![loc("AU", TypeTag::Country)]))
        );
    }

    #[test]
    fn pump_coalesces_changes_and_delivers_the_latest_state() {
        let (mut store, _, _) = store_on(Platform::Instagram);
        let seen: Arc<Mutex<Vec<(usize, Vec<SlotKey>)>>> = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = seen.clone();
            store.subscribe(move |slots, snapshot| {
                seen.lock()
                    .unwrap()
                    .push((snapshot.len(), slots.iter().copied().collect()));
            });
        }

        // Two edits to the same slot plus one to another, all within a
        // single turn.
        store
            .stage(creator_locations(&[("AU", TypeTag::Country)]))
            .unwrap();
        store
            .stage(creator_locations(&[("AU", TypeTag::Country), ("CA", TypeTag::Country)]))
            .unwrap();
        store
            .stage(FilterPatch::new().with(SlotKey::Keywords, SlotValue::TextList(vec!["vegan".into()])))
            .unwrap();
        store.pump();

        let deliveries = seen.lock().unwrap().clone();
        assert_eq!(deliveries.len(), 1);
        let (snapshot_len, slots) = &deliveries[0];
        // The single delivery reflects the final state of the turn.
        assert_eq!(*snapshot_len, 2);
        assert_eq!(slots, &vec![SlotKey::CreatorLocations, SlotKey::Keywords]);

        // Nothing pending: pump is a no-op, no duplicate delivery.
        store.pump();
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn weighted_labels_render_resolved_names_with_percentages() {
        let (mut store, _, names) = store_on(Platform::Instagram);
        names.merge_results(
            EntityKind::Location,
            &[Entity::new("AU", "Australia", TypeTag::Country)],
        );
        store
            .stage(FilterPatch::new().with(
                SlotKey::AudienceLocations,
                SlotValue::WeightedLocations(vec![WeightedLocation::new("AU", TypeTag::Country, 40)]),
            ))
            .unwrap();

        assert_eq!(
            store.active_filters()[0].label,
            "Audience locations: Australia 40%"
        );
    }

    #[test]
    fn range_labels_render_compact_bounds() {
        assert_eq!(render_range(&NumericRange::at_least(1000.0)), "\u{2265} 1000");
        assert_eq!(
            render_range(&NumericRange::between(2.5, 7.0).unwrap()),
            "2.5\u{2013}7"
        );
    }
}
