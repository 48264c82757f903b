//! Filesystem-backed host.
//!
//! Documents are files under a root directory, identified by their
//! `/`-separated path relative to that root. The authoritative heading index
//! comes from [`MarkdownParser`], and change announcements are broadcast to
//! any subscriber.

use crate::{
    ActiveDocument, ChangeAnnouncer, DocumentId, DocumentReader, Error, HeadingIndex,
    HeadingIndexSource, MarkdownParser, Result,
};
use async_trait::async_trait;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tokio::sync::broadcast;

const ANNOUNCE_CAPACITY: usize = 64;

/// A directory of documents acting as the host.
pub struct FsWorkspace {
    root: PathBuf,
    active: Mutex<Option<DocumentId>>,
    changes: broadcast::Sender<DocumentId>,
    /// Created on first use and shared by every heading index query.
    parser: Mutex<Option<MarkdownParser>>,
}

impl fmt::Debug for FsWorkspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsWorkspace")
            .field("root", &self.root)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl FsWorkspace {
    /// Create a workspace rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let (changes, _) = broadcast::channel(ANNOUNCE_CAPACITY);
        Self {
            root: root.into(),
            active: Mutex::new(None),
            changes,
            parser: Mutex::new(None),
        }
    }

    /// Directory documents are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Make `id` the active document (or clear it with `None`).
    pub fn set_active(&self, id: Option<DocumentId>) {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner) = id;
    }

    /// Receive every document id announced as changed from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DocumentId> {
        self.changes.subscribe()
    }

    /// Filesystem path of a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the id is absolute or climbs out of
    /// the root.
    pub fn path_of(&self, id: &DocumentId) -> Result<PathBuf> {
        let relative = Path::new(id.as_str());
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || id.as_str().is_empty() {
            return Err(Error::NotFound(format!("{id} is outside the workspace")));
        }
        Ok(self.root.join(relative))
    }

    fn parse(&self, text: &str) -> Result<HeadingIndex> {
        let mut slot = self.parser.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(MarkdownParser::new()?);
        }
        match slot.as_mut() {
            Some(parser) => parser.parse(text),
            None => Err(Error::Parse("markdown parser unavailable".into())),
        }
    }
}

#[async_trait(?Send)]
impl DocumentReader for FsWorkspace {
    async fn read_document(&self, id: &DocumentId) -> Result<String> {
        let path = self.path_of(id).map_err(|e| Error::read(id, e))?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::read(id, e))
    }
}

impl HeadingIndexSource for FsWorkspace {
    fn heading_index(&self, id: &DocumentId) -> Option<HeadingIndex> {
        // `HeadingIndexSource` is synchronous, so this read blocks the
        // calling thread even when queried from async code.
        let text = std::fs::read_to_string(self.path_of(id).ok()?).ok()?;
        match self.parse(&text) {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::warn!(document = %id, "failed to index headings: {e}");
                None
            },
        }
    }
}

#[async_trait(?Send)]
impl ChangeAnnouncer for FsWorkspace {
    async fn announce_content_changed(&self, id: &DocumentId) {
        // No subscribers is fine; there is nobody to tell.
        let _ = self.changes.send(id.clone());
    }
}

impl ActiveDocument for FsWorkspace {
    fn active_document(&self) -> Option<DocumentId> {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
