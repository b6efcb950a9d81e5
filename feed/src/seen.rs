use crate::identity::EventIdentity;
use std::collections::HashSet;

/// Per-match memory of events that already have commentary.
///
/// Membership only grows; a new match gets a new set.
#[derive(Debug, Clone, Default)]
pub struct SeenSet {
    inner: HashSet<EventIdentity>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &EventIdentity) -> bool {
        self.inner.contains(key)
    }

    /// Returns `true` if the key was not seen before.
    pub fn add(&mut self, key: EventIdentity) -> bool {
        self.inner.insert(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
