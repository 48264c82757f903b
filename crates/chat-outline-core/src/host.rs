//! Capabilities the overlay needs from its host.
//!
//! The host owns documents, the authoritative heading index, the active
//! document and the change notifications. Everything here is an interface so
//! tests can substitute mocks and [`FsWorkspace`](crate::FsWorkspace) can
//! provide a filesystem-backed implementation.
//!
//! The async traits are `?Send`: hosts deliver events one at a time on a
//! single task, and an announcement may synchronously re-enter the
//! orchestrator that issued it.

use crate::{DocumentId, HeadingIndex, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of the heading index for a document.
///
/// This is the accessor the overlay wraps.
pub trait HeadingIndexSource {
    /// Heading index for `id`, or `None` when the host knows nothing about it.
    fn heading_index(&self, id: &DocumentId) -> Option<HeadingIndex>;
}

/// Reads the current full text of a document.
#[async_trait(?Send)]
pub trait DocumentReader {
    /// Read the document text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`](crate::Error::Read) when the text is unavailable.
    async fn read_document(&self, id: &DocumentId) -> Result<String>;
}

/// Tells the host (and every listener on its change signal) that the index
/// for a document should be considered updated.
#[async_trait(?Send)]
pub trait ChangeAnnouncer {
    /// Announce a content change for `id`.
    ///
    /// Implementations may deliver the signal back to the orchestrator before
    /// returning.
    async fn announce_content_changed(&self, id: &DocumentId);
}

/// Knows which document is currently active, if any.
pub trait ActiveDocument {
    /// Identifier of the active document.
    fn active_document(&self) -> Option<DocumentId>;
}

impl<T: HeadingIndexSource + ?Sized> HeadingIndexSource for Arc<T> {
    fn heading_index(&self, id: &DocumentId) -> Option<HeadingIndex> {
        (**self).heading_index(id)
    }
}

#[async_trait(?Send)]
impl<T: DocumentReader + ?Sized> DocumentReader for Arc<T> {
    async fn read_document(&self, id: &DocumentId) -> Result<String> {
        (**self).read_document(id).await
    }
}

#[async_trait(?Send)]
impl<T: ChangeAnnouncer + ?Sized> ChangeAnnouncer for Arc<T> {
    async fn announce_content_changed(&self, id: &DocumentId) {
        (**self).announce_content_changed(id).await;
    }
}

impl<T: ActiveDocument + ?Sized> ActiveDocument for Arc<T> {
    fn active_document(&self) -> Option<DocumentId> {
        (**self).active_document()
    }
}
