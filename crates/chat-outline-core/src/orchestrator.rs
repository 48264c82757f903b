//! Keeps the synthetic heading cache in step with document edits.
//!
//! For every update the orchestrator reads the document, scans it, replaces
//! the cache entry and then announces the change through the host so that
//! outline consumers re-query the (overlaid) heading index. The host answers
//! that announcement with another content-changed signal for the same
//! document; an `AnnounceGuard` marks the document as announcing for the whole
//! announcement so the echo is recognised and dropped instead of looping.
//!
//! Read failures never escape: the previous cache entry stays in place and
//! the failure is reported as [`UpdateOutcome::ReadFailed`].

use crate::config::{DocumentsConfig, GuardScope};
use crate::scanner::CalloutScanner;
use crate::{
    ActiveDocument, ChangeAnnouncer, Config, DocumentId, DocumentReader, SyntheticHeadingStore,
};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// What an update request ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The document was rescanned and its cache entry replaced.
    Updated {
        /// Document that was updated.
        document: DocumentId,
        /// Number of synthetic headings now cached for it.
        headings: usize,
    },
    /// The signal was our own announcement coming back and was ignored.
    Suppressed {
        /// Document the signal was for.
        document: DocumentId,
    },
    /// The document type is not scanned.
    Skipped {
        /// Document the signal was for.
        document: DocumentId,
    },
    /// The document text could not be read; the cache was left alone.
    ReadFailed {
        /// Document that could not be read.
        document: DocumentId,
    },
}

/// Documents currently announcing, with a nesting count.
type Announcing = Mutex<HashMap<DocumentId, usize>>;

/// Marks a document as announcing until dropped.
///
/// Nested guards for the same document are counted, so the mark is only
/// cleared when the outermost guard goes away.
#[must_use = "the document stops being marked as announcing when the guard is dropped"]
pub(crate) struct AnnounceGuard<'a> {
    announcing: &'a Announcing,
    document: DocumentId,
}

impl<'a> AnnounceGuard<'a> {
    fn enter(announcing: &'a Announcing, document: DocumentId) -> Self {
        *announcing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(document.clone())
            .or_insert(0) += 1;
        Self {
            announcing,
            document,
        }
    }
}

impl Drop for AnnounceGuard<'_> {
    fn drop(&mut self) {
        let mut announcing = self
            .announcing
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(depth) = announcing.get_mut(&self.document) {
            *depth -= 1;
            if *depth == 0 {
                announcing.remove(&self.document);
            }
        }
    }
}

/// Reacts to host signals by rescanning documents into the synthetic cache.
pub struct UpdateOrchestrator<R, A, W> {
    reader: R,
    announcer: A,
    workspace: W,
    store: SyntheticHeadingStore,
    scanner: CalloutScanner,
    documents: DocumentsConfig,
    guard_scope: GuardScope,
    announcing: Announcing,
}

impl<R, A, W> UpdateOrchestrator<R, A, W>
where
    R: DocumentReader,
    A: ChangeAnnouncer,
    W: ActiveDocument,
{
    /// Create an orchestrator writing into `store`.
    pub fn new(
        reader: R,
        announcer: A,
        workspace: W,
        store: SyntheticHeadingStore,
        config: &Config,
    ) -> Self {
        Self {
            reader,
            announcer,
            workspace,
            store,
            scanner: CalloutScanner::from_config(&config.scanner),
            documents: config.documents.clone(),
            guard_scope: config.overlay.guard_scope,
            announcing: Mutex::new(HashMap::new()),
        }
    }

    /// The cache this orchestrator writes to.
    pub const fn store(&self) -> &SyntheticHeadingStore {
        &self.store
    }

    /// Whether `id` is in the middle of announcing its own update.
    pub fn is_announcing(&self, id: &DocumentId) -> bool {
        self.announcing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Handle a content-changed signal for `id`.
    pub async fn on_content_changed(&self, id: &DocumentId) -> UpdateOutcome {
        if self.is_suppressed(id) {
            debug!(document = %id, "ignoring our own change announcement");
            return UpdateOutcome::Suppressed {
                document: id.clone(),
            };
        }
        self.update(id).await
    }

    /// Handle an active-document-changed signal.
    ///
    /// Returns `None` when no document is active.
    pub async fn on_active_document_changed(&self) -> Option<UpdateOutcome> {
        let id = self.workspace.active_document()?;
        Some(self.update(&id).await)
    }

    /// Scan the document that is already active when the overlay starts.
    pub async fn start(&self) -> Option<UpdateOutcome> {
        let id = self.workspace.active_document()?;
        tracing::info!(document = %id, "scanning active document");
        Some(self.update(&id).await)
    }

    fn is_suppressed(&self, id: &DocumentId) -> bool {
        let announcing = self
            .announcing
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match self.guard_scope {
            GuardScope::PerDocument => announcing.contains_key(id),
            GuardScope::Global => !announcing.is_empty(),
        }
    }

    async fn update(&self, id: &DocumentId) -> UpdateOutcome {
        if !self.documents.accepts(id.extension()) {
            debug!(document = %id, "not a scanned document type");
            return UpdateOutcome::Skipped {
                document: id.clone(),
            };
        }

        let content = match self.reader.read_document(id).await {
            Ok(content) => content,
            Err(e) => {
                warn!(document = %id, category = e.category(), "keeping cached callouts: {e}");
                return UpdateOutcome::ReadFailed {
                    document: id.clone(),
                };
            },
        };

        let headings = self.scanner.scan(&content);
        let count = headings.len();
        self.store.set(id.clone(), headings);
        debug!(document = %id, headings = count, "cached chat callouts");

        {
            let _guard = AnnounceGuard::enter(&self.announcing, id.clone());
            self.announcer.announce_content_changed(id).await;
        }

        UpdateOutcome::Updated {
            document: id.clone(),
            headings: count,
        }
    }
}
