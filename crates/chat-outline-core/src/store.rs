//! Per-document cache of synthetic headings.
//!
//! Entries are replaced wholesale: a reader sees either the previous scan or
//! the new one, never a mix. The store lives until [`SyntheticHeadingStore::clear`]
//! is called at teardown.

use crate::{DocumentId, HeadingRecord};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared handle to the synthetic heading cache.
///
/// Cloning the handle shares the underlying map, so the orchestrator (the
/// writer) and the overlay (the reader) can each hold one.
#[derive(Debug, Clone, Default)]
pub struct SyntheticHeadingStore {
    entries: Arc<RwLock<HashMap<DocumentId, Arc<[HeadingRecord]>>>>,
}

impl SyntheticHeadingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entry for `id` with `records`.
    pub fn set(&self, id: DocumentId, records: Vec<HeadingRecord>) {
        let records: Arc<[HeadingRecord]> = records.into();
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, records);
    }

    /// Current entry for `id`, or `None` when the document was never scanned.
    pub fn get(&self, id: &DocumentId) -> Option<Arc<[HeadingRecord]>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of documents with an entry.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no document has an entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn record(text: &str, line: usize) -> HeadingRecord {
        HeadingRecord {
            text: text.to_string(),
            level: 1,
            start: Position::new(line, 0, 0),
            end: Position::new(line, 1, 1),
        }
    }

    #[test]
    fn test_get_distinguishes_absent_from_empty() {
        let store = SyntheticHeadingStore::new();
        let scanned = DocumentId::new("scanned.md");
        store.set(scanned.clone(), Vec::new());

        assert!(store.get(&DocumentId::new("never.md")).is_none());
        assert_eq!(store.get(&scanned).as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_set_replaces_whole_entry() {
        // Given: A document with two cached headings
        let store = SyntheticHeadingStore::new();
        let id = DocumentId::new("chat.md");
        store.set(id.clone(), vec![record("a", 1), record("b", 4)]);

        // When: A later scan finds a single heading
        store.set(id.clone(), vec![record("c", 2)]);

        // Then: Only the latest scan is visible
        let entry = store.get(&id);
        assert_eq!(entry.as_deref(), Some(&[record("c", 2)][..]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_readers_keep_their_snapshot() {
        let store = SyntheticHeadingStore::new();
        let id = DocumentId::new("chat.md");
        store.set(id.clone(), vec![record("old", 1)]);

        let snapshot = store.get(&id);
        store.set(id.clone(), vec![record("new", 1)]);

        assert_eq!(snapshot.as_deref(), Some(&[record("old", 1)][..]));
    }

    #[test]
    fn test_clones_share_entries() {
        let writer = SyntheticHeadingStore::new();
        let reader = writer.clone();

        writer.set(DocumentId::new("a.md"), vec![record("a", 0)]);

        assert!(reader.get(&DocumentId::new("a.md")).is_some());
    }

    #[test]
    fn test_clear_empties_store() {
        let store = SyntheticHeadingStore::new();
        store.set(DocumentId::new("a.md"), vec![record("a", 0)]);
        store.set(DocumentId::new("b.md"), vec![record("b", 0)]);

        store.clear();

        assert!(store.is_empty());
        assert!(store.get(&DocumentId::new("a.md")).is_none());
    }
}
