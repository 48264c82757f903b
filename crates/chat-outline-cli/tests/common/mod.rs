#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// The sample document with one real heading and one chat callout.
#[allow(dead_code)]
pub const CHAT_DOC: &str = "# Title\n> [!chat-r]\n> Hello\n> there\nSome text\n";

/// Create a configured `chat-outline` command isolated from user config.
#[allow(dead_code)]
pub fn chat_outline_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("chat-outline"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("CHAT_OUTLINE_CONFIG", dir.join("no-such-config.toml"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write `content` to `name` inside a fresh temp dir.
#[allow(dead_code)]
pub fn doc_in_tempdir(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("failed to write document");
    (dir, path)
}
