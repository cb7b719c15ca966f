use std::collections::BTreeSet;

/// Deferred-propagation queue with last-value-wins coalescing.
///
/// State changes schedule a key here instead of notifying listeners
/// inline; the host drains the queue once per scheduling turn. A key
/// scheduled several times within one turn drains exactly once, and
/// because the propagated value is computed at drain time the listener
/// always observes the latest state, never the state at schedule time
/// and never a half-applied update.
#[derive(Debug, Default)]
pub struct DeferredQueue<K: Ord> {
    pending: BTreeSet<K>,
}

impl<K: Ord> DeferredQueue<K> {
    pub fn new() -> Self {
        Self {
            pending: BTreeSet::new(),
        }
    }

    pub fn schedule(&mut self, key: K) {
        self.pending.insert(key);
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Hands back the coalesced key set and resets the queue. Keys
    /// scheduled while a drain's listeners run land in the next turn.
    pub fn drain(&mut self) -> BTreeSet<K> {
        std::mem::take(&mut self.pending)
    }
}
