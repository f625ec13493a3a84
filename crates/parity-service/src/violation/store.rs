//! In-memory violation store.

use std::collections::HashSet;
use std::sync::RwLock;

use tracing::{debug, warn};

use parity_core::types::id::ViolationId;
use parity_entity::violation::{Violation, ViolationPatch};

/// The session's single source of truth for violation records.
///
/// Records keep the order they were loaded in. Updates for unknown ids
/// are silent no-ops because UI actions may race with a data refresh.
#[derive(Debug, Default)]
pub struct ViolationStore {
    items: RwLock<Vec<Violation>>,
}

impl ViolationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection. Later duplicates of an id are dropped.
    pub fn set_all(&self, list: Vec<Violation>) {
        let mut seen = HashSet::with_capacity(list.len());
        let before = list.len();
        let unique: Vec<Violation> = list
            .into_iter()
            .filter(|v| seen.insert(v.id.clone()))
            .collect();
        if unique.len() != before {
            warn!(
                dropped = before - unique.len(),
                "Duplicate violation ids dropped on load"
            );
        }
        debug!(count = unique.len(), "Violation store loaded");
        *self.items.write().unwrap_or_else(|e| e.into_inner()) = unique;
    }

    /// Snapshot of every record in load order.
    pub fn all(&self) -> Vec<Violation> {
        self.items.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Look up one record.
    pub fn get(&self, id: &ViolationId) -> Option<Violation> {
        self.items
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|v| &v.id == id)
            .cloned()
    }

    /// Records matching `predicate`, in load order.
    pub fn find<F>(&self, predicate: F) -> Vec<Violation>
    where
        F: Fn(&Violation) -> bool,
    {
        self.items
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|v| predicate(v))
            .cloned()
            .collect()
    }

    /// Apply a partial update. Returns `false` if the id is unknown.
    pub fn update(&self, id: &ViolationId, patch: &ViolationPatch) -> bool {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        match items.iter_mut().find(|v| &v.id == id) {
            Some(violation) => {
                patch.apply(violation);
                true
            }
            None => {
                debug!(violation_id = %id, "Update for unknown violation ignored");
                false
            }
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::mock::MockViolationGenerator;

    fn store_with(count: usize) -> ViolationStore {
        let store = ViolationStore::new();
        store.set_all(MockViolationGenerator::new(7).generate(count));
        store
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let store = store_with(3);
        let before = store.all();
        assert!(!store.update(&ViolationId::from("missing"), &ViolationPatch::reason("Other")));
        assert_eq!(store.all(), before);
    }

    #[test]
    fn test_update_applies_patch() {
        let store = store_with(3);
        let id = store.all()[1].id.clone();
        assert!(store.update(&id, &ViolationPatch::reason("Other")));
        assert_eq!(store.get(&id).unwrap().reason, "Other");
    }

    #[test]
    fn test_find_by_predicate() {
        let store = store_with(10);
        store.update(&ViolationId::from("v4"), &ViolationPatch::reason("Other"));
        let resolved = store.find(|v| v.reason == "Other");
        assert!(resolved.iter().any(|v| v.id.as_str() == "v4"));
        assert!(resolved.iter().all(Violation::is_resolved));
        assert!(store.find(|_| false).is_empty());
    }

    #[test]
    fn test_set_all_drops_duplicate_ids() {
        let mut list = MockViolationGenerator::new(1).generate(2);
        let mut dup = list[0].clone();
        dup.hotel_name = "Shadow".to_string();
        list.push(dup);
        let store = ViolationStore::new();
        store.set_all(list);
        assert_eq!(store.len(), 2);
        assert_ne!(store.all()[0].hotel_name, "Shadow");
    }
}
