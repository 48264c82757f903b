//! Read interception for the host's heading index.
//!
//! [`OverlayIndex`] wraps the host's [`HeadingIndexSource`] and answers every
//! heading index request with the real index plus any synthetic headings
//! cached for that document. The wrapped source is never modified, and
//! [`OverlayIndex::into_inner`] hands it back untouched, so unwrapping is the
//! whole of "restoring" the original accessor.

use crate::merge::merge_headings;
use crate::{DocumentId, HeadingIndex, HeadingIndexSource, SyntheticHeadingStore};

/// Heading index source that overlays cached synthetic headings.
#[derive(Debug)]
pub struct OverlayIndex<S> {
    inner: S,
    store: SyntheticHeadingStore,
}

impl<S: HeadingIndexSource> OverlayIndex<S> {
    /// Wrap `inner`, reading synthetic headings from `store`.
    pub const fn new(inner: S, store: SyntheticHeadingStore) -> Self {
        Self { inner, store }
    }

    /// The wrapped source.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// The cache this overlay reads from.
    pub const fn store(&self) -> &SyntheticHeadingStore {
        &self.store
    }

    /// Unwrap, returning the original source.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: HeadingIndexSource> HeadingIndexSource for OverlayIndex<S> {
    fn heading_index(&self, id: &DocumentId) -> Option<HeadingIndex> {
        let index = self.inner.heading_index(id)?;

        let Some(synthetic) = self.store.get(id).filter(|records| !records.is_empty()) else {
            return Some(index);
        };

        let headings = merge_headings(&index.headings, Some(&synthetic[..])).into_owned();
        Some(HeadingIndex { headings, ..index })
    }
}
