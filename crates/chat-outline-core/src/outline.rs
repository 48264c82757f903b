//! Lifecycle of the callout overlay.
//!
//! [`ChatOutline`] ties the pieces together: it owns the [`OverlayIndex`]
//! that consumers query instead of the host's own heading index, and the
//! [`UpdateOrchestrator`] that keeps the overlay's cache current. Host
//! signals arrive either through the `on_*` methods or as [`HostEvent`]s fed
//! to [`ChatOutline::run`].
//!
//! ```rust,no_run
//! use chat_outline_core::{ChatOutline, Config, DocumentId, FsWorkspace, HeadingIndexSource};
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let host = Arc::new(FsWorkspace::new("notes"));
//! host.set_active(Some(DocumentId::new("chat.md")));
//!
//! let outline = ChatOutline::new(
//!     Arc::clone(&host),
//!     Arc::clone(&host),
//!     Arc::clone(&host),
//!     Arc::clone(&host),
//!     &Config::default(),
//! );
//! outline.start().await;
//! let index = outline.heading_index(&DocumentId::new("chat.md"));
//! let _original = outline.teardown();
//! # }
//! ```

use crate::{
    ActiveDocument, ChangeAnnouncer, Config, DocumentId, DocumentReader, HeadingIndex,
    HeadingIndexSource, OverlayIndex, SyntheticHeadingStore, UpdateOrchestrator, UpdateOutcome,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Signals delivered by the host's event bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A document's content changed.
    ContentChanged(DocumentId),
    /// A different document became active.
    ActiveDocumentChanged,
}

/// The installed overlay: interceptor plus orchestrator.
pub struct ChatOutline<S, R, A, W> {
    index: OverlayIndex<S>,
    orchestrator: UpdateOrchestrator<R, A, W>,
}

impl<S, R, A, W> ChatOutline<S, R, A, W>
where
    S: HeadingIndexSource,
    R: DocumentReader,
    A: ChangeAnnouncer,
    W: ActiveDocument,
{
    /// Install the overlay over `source`.
    pub fn new(source: S, reader: R, announcer: A, workspace: W, config: &Config) -> Self {
        let store = SyntheticHeadingStore::new();
        Self {
            index: OverlayIndex::new(source, store.clone()),
            orchestrator: UpdateOrchestrator::new(reader, announcer, workspace, store, config),
        }
    }

    /// Scan the document that is active at start-up, if any.
    pub async fn start(&self) -> Option<UpdateOutcome> {
        self.orchestrator.start().await
    }

    /// The interceptor to hand to heading index consumers.
    pub const fn index(&self) -> &OverlayIndex<S> {
        &self.index
    }

    /// The orchestrator keeping the cache current.
    pub const fn orchestrator(&self) -> &UpdateOrchestrator<R, A, W> {
        &self.orchestrator
    }

    /// Handle a content-changed signal.
    pub async fn on_content_changed(&self, id: &DocumentId) -> UpdateOutcome {
        self.orchestrator.on_content_changed(id).await
    }

    /// Handle an active-document-changed signal.
    pub async fn on_active_document_changed(&self) -> Option<UpdateOutcome> {
        self.orchestrator.on_active_document_changed().await
    }

    /// Dispatch one host event.
    pub async fn handle(&self, event: HostEvent) -> Option<UpdateOutcome> {
        match event {
            HostEvent::ContentChanged(id) => Some(self.on_content_changed(&id).await),
            HostEvent::ActiveDocumentChanged => self.on_active_document_changed().await,
        }
    }

    /// Process events one at a time, in arrival order, until every sender is
    /// dropped. Returns the number of events handled.
    pub async fn run(&self, mut events: mpsc::UnboundedReceiver<HostEvent>) -> usize {
        let mut handled = 0;
        while let Some(event) = events.recv().await {
            let outcome = self.handle(event).await;
            debug!(?outcome, "host event handled");
            handled += 1;
        }
        handled
    }

    /// Remove the overlay: clear the cache and hand back the original source.
    pub fn teardown(self) -> S {
        self.index.store().clear();
        info!("chat outline overlay removed");
        self.index.into_inner()
    }
}

impl<S, R, A, W> HeadingIndexSource for ChatOutline<S, R, A, W>
where
    S: HeadingIndexSource,
{
    fn heading_index(&self, id: &DocumentId) -> Option<HeadingIndex> {
        self.index.heading_index(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{Error, HeadingRecord, Position, Result};
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    const CHAT: &str = "# Title\n> [!chat-r]\n> Hello\n> there\nSome text";

    /// In-memory host playing every role.
    #[derive(Clone, Default)]
    struct MemoryHost {
        documents: Rc<RefCell<HashMap<DocumentId, String>>>,
        real: Rc<RefCell<HashMap<DocumentId, HeadingIndex>>>,
        active: Rc<RefCell<Option<DocumentId>>>,
        announced: Rc<RefCell<Vec<DocumentId>>>,
    }

    impl MemoryHost {
        fn with_chat() -> Self {
            let host = Self::default();
            let id = DocumentId::new("chat.md");
            host.documents.borrow_mut().insert(id.clone(), CHAT.to_string());
            host.real.borrow_mut().insert(
                id,
                HeadingIndex {
                    headings: vec![HeadingRecord {
                        text: "Title".to_string(),
                        level: 1,
                        start: Position::new(0, 0, 0),
                        end: Position::new(0, 7, 7),
                    }],
                    line_count: 5,
                    diagnostics: Vec::new(),
                },
            );
            host
        }
    }

    impl HeadingIndexSource for MemoryHost {
        fn heading_index(&self, id: &DocumentId) -> Option<HeadingIndex> {
            self.real.borrow().get(id).cloned()
        }
    }

    #[async_trait(?Send)]
    impl DocumentReader for MemoryHost {
        async fn read_document(&self, id: &DocumentId) -> Result<String> {
            self.documents
                .borrow()
                .get(id)
                .cloned()
                .ok_or_else(|| Error::read(id, "missing"))
        }
    }

    #[async_trait(?Send)]
    impl ChangeAnnouncer for MemoryHost {
        async fn announce_content_changed(&self, id: &DocumentId) {
            self.announced.borrow_mut().push(id.clone());
        }
    }

    impl ActiveDocument for MemoryHost {
        fn active_document(&self) -> Option<DocumentId> {
            self.active.borrow().clone()
        }
    }

    type TestOutline = ChatOutline<MemoryHost, MemoryHost, MemoryHost, MemoryHost>;

    fn install(host: &MemoryHost) -> TestOutline {
        ChatOutline::new(
            host.clone(),
            host.clone(),
            host.clone(),
            host.clone(),
            &Config::default(),
        )
    }

    fn texts(index: &HeadingIndex) -> Vec<(&str, usize)> {
        index
            .headings
            .iter()
            .map(|h| (h.text.as_str(), h.start.line))
            .collect()
    }

    #[tokio::test]
    async fn test_end_to_end_merge_and_teardown() {
        // Given: An active document with a title and a chat callout
        let host = MemoryHost::with_chat();
        *host.active.borrow_mut() = Some(DocumentId::new("chat.md"));
        let outline = install(&host);
        let id = DocumentId::new("chat.md");

        // When: The overlay starts
        outline.start().await;

        // Then: The index seen through the overlay includes the callout
        let index = outline.heading_index(&id).unwrap();
        assert_eq!(texts(&index), vec![("Title", 0), ("Hello there", 1)]);
        assert_eq!(*host.announced.borrow(), vec![id.clone()]);

        // When: The overlay is removed
        let store = outline.index().store().clone();
        let original = outline.teardown();

        // Then: The original source is unaffected and the cache is empty
        assert_eq!(texts(&original.heading_index(&id).unwrap()), vec![("Title", 0)]);
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_start_without_active_document() {
        let host = MemoryHost::with_chat();
        let outline = install(&host);

        assert_eq!(outline.start().await, None);
        assert!(host.announced.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_run_processes_events_in_order() {
        // Given: A queue with a content change, an active-document change and a failing read
        let host = MemoryHost::with_chat();
        host.documents
            .borrow_mut()
            .insert(DocumentId::new("other.md"), "> [!chat-l]\n> hey".to_string());
        *host.active.borrow_mut() = Some(DocumentId::new("other.md"));
        let outline = install(&host);

        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(HostEvent::ContentChanged(DocumentId::new("chat.md")))
            .unwrap();
        tx.send(HostEvent::ActiveDocumentChanged).unwrap();
        tx.send(HostEvent::ContentChanged(DocumentId::new("deleted.md")))
            .unwrap();
        drop(tx);

        // When: The loop drains the queue
        let handled = outline.run(rx).await;

        // Then: Every event was handled and the successful ones were announced in order
        assert_eq!(handled, 3);
        assert_eq!(
            *host.announced.borrow(),
            vec![DocumentId::new("chat.md"), DocumentId::new("other.md")]
        );
        assert_eq!(outline.index().store().len(), 2);
    }

    #[tokio::test]
    async fn test_handle_reports_outcomes() {
        let host = MemoryHost::with_chat();
        let outline = install(&host);

        let outcome = outline
            .handle(HostEvent::ContentChanged(DocumentId::new("chat.md")))
            .await;
        assert_eq!(
            outcome,
            Some(UpdateOutcome::Updated {
                document: DocumentId::new("chat.md"),
                headings: 1
            })
        );

        assert_eq!(outline.handle(HostEvent::ActiveDocumentChanged).await, None);
    }

    #[tokio::test]
    async fn test_edits_are_reflected_on_next_query() {
        let host = MemoryHost::with_chat();
        let outline = install(&host);
        let id = DocumentId::new("chat.md");
        outline.on_content_changed(&id).await;

        host.documents.borrow_mut().insert(
            id.clone(),
            "# Title\n\n> [!chat-l]\n> first\n\n> [!chat-r]\n> second".to_string(),
        );
        outline.on_content_changed(&id).await;

        let index = outline.heading_index(&id).unwrap();
        assert_eq!(
            texts(&index),
            vec![("Title", 0), ("first", 2), ("second", 5)]
        );
    }
}
