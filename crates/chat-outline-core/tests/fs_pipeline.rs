#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

use chat_outline_core::{
    ChatOutline, Config, DocumentId, FsWorkspace, GuardScope, HeadingIndexSource, HostEvent,
};
use std::sync::Arc;
use tokio::sync::mpsc;

type FsOutline =
    ChatOutline<Arc<FsWorkspace>, Arc<FsWorkspace>, Arc<FsWorkspace>, Arc<FsWorkspace>>;

fn install(host: &Arc<FsWorkspace>, config: &Config) -> FsOutline {
    ChatOutline::new(
        Arc::clone(host),
        Arc::clone(host),
        Arc::clone(host),
        Arc::clone(host),
        config,
    )
}

fn titles(outline: &FsOutline, id: &DocumentId) -> Vec<(String, usize)> {
    outline
        .heading_index(id)
        .expect("document is indexed")
        .headings
        .into_iter()
        .map(|h| (h.text, h.start.line))
        .collect()
}

#[tokio::test]
async fn edits_on_disk_flow_through_the_event_loop() -> anyhow::Result<()> {
    // Given: A workspace with one chat document open
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join("chat.md"),
        "# Title\n> [!chat-r]\n> Hello\n> there\nSome text\n",
    )?;
    let host = Arc::new(FsWorkspace::new(dir.path()));
    let id = DocumentId::new("chat.md");
    host.set_active(Some(id.clone()));
    let mut announcements = host.subscribe();

    let outline = install(&host, &Config::default());
    outline.start().await;

    // Then: The overlay shows the callout and consumers were told
    assert_eq!(
        titles(&outline, &id),
        vec![("Title".to_string(), 0), ("Hello there".to_string(), 1)]
    );
    assert_eq!(announcements.recv().await?, id);

    // When: The file changes and the host reports it
    std::fs::write(
        dir.path().join("chat.md"),
        "# Title\n\n## Part\n> [!chat-l]\n> Reply\n",
    )?;
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(HostEvent::ContentChanged(id.clone()))?;
    drop(tx);
    assert_eq!(outline.run(rx).await, 1);

    // Then: The next query reflects the edit
    assert_eq!(
        titles(&outline, &id),
        vec![
            ("Title".to_string(), 0),
            ("Part".to_string(), 2),
            ("Reply".to_string(), 3)
        ]
    );
    assert_eq!(announcements.recv().await?, id);

    // When: The overlay is removed
    let original = outline.teardown();

    // Then: The host's own index has no callouts
    let plain: Vec<String> = original
        .heading_index(&id)
        .unwrap()
        .headings
        .into_iter()
        .map(|h| h.text)
        .collect();
    assert_eq!(plain, vec!["Title", "Part"]);
    Ok(())
}

#[tokio::test]
async fn deleted_document_keeps_last_good_headings() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("chat.md"), "> [!chat-r]\n> kept\n")?;
    let host = Arc::new(FsWorkspace::new(dir.path()));
    let id = DocumentId::new("chat.md");

    let mut config = Config::default();
    config.overlay.guard_scope = GuardScope::Global;
    let outline = install(&host, &config);
    outline.on_content_changed(&id).await;

    std::fs::remove_file(dir.path().join("chat.md"))?;
    outline.on_content_changed(&id).await;

    let cached = outline.index().store().get(&id).expect("entry survives");
    assert_eq!(cached[0].text, "kept");
    Ok(())
}
