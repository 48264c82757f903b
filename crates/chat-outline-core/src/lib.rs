//! # chat-outline-core
//!
//! Surfaces chat callouts (`> [!chat-r]` / `> [!chat-l]` blockquotes) as
//! level-1 headings in a markdown host's outline, without touching the
//! documents or the host's own heading index.
//!
//! ## Architecture
//!
//! - **Scanning**: [`CalloutScanner`] turns document text into synthetic
//!   [`HeadingRecord`]s, one per callout block
//! - **Caching**: [`SyntheticHeadingStore`] keeps the latest scan per document
//! - **Interception**: [`OverlayIndex`] wraps the host's [`HeadingIndexSource`]
//!   and merges cached headings into every index it returns
//! - **Orchestration**: [`UpdateOrchestrator`] rescans on host signals and
//!   announces changes, suppressing its own echo
//! - **Lifecycle**: [`ChatOutline`] installs, drives and removes the overlay
//!
//! The host is reached only through the traits in [`host`]; [`FsWorkspace`]
//! implements them over a directory of markdown files, with
//! [`MarkdownParser`] providing the authoritative heading index.
//!
//! ## Quick Start
//!
//! ```rust
//! use chat_outline_core::{merge_headings, scan, MarkdownParser};
//!
//! let text = "# Title\n> [!chat-r]\n> Hello\n> there\nSome text";
//!
//! let real = MarkdownParser::new()?.parse(text)?.headings;
//! let synthetic = scan(text);
//! let merged = merge_headings(&real, Some(&synthetic[..]));
//!
//! let titles: Vec<&str> = merged.iter().map(|h| h.text.as_str()).collect();
//! assert_eq!(titles, ["Title", "Hello there"]);
//! # Ok::<(), chat_outline_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, Error>`]. Update failures inside
//! the orchestrator are absorbed and reported as [`UpdateOutcome`]s rather
//! than errors, so a bad read never disturbs the host.

/// Configuration loading and defaults
pub mod config;
/// Error types and result aliases
pub mod error;
/// Filesystem-backed host
pub mod fs_host;
/// Capabilities required from the host application
pub mod host;
/// Ordering-preserving merge of real and synthetic headings
pub mod merge;
/// Change-driven cache updates with echo suppression
pub mod orchestrator;
/// Overlay lifecycle and host event loop
pub mod outline;
/// Heading index interception
pub mod overlay;
/// Tree-sitter based markdown heading parser
pub mod parser;
/// Chat callout scanner
pub mod scanner;
/// Per-document synthetic heading cache
pub mod store;
/// Core data types
pub mod types;

// Re-export commonly used types
pub use config::{Config, DocumentsConfig, GuardScope, OverlayConfig, ScannerConfig};
pub use error::{Error, Result};
pub use fs_host::FsWorkspace;
pub use host::{ActiveDocument, ChangeAnnouncer, DocumentReader, HeadingIndexSource};
pub use merge::merge_headings;
pub use orchestrator::{UpdateOrchestrator, UpdateOutcome};
pub use outline::{ChatOutline, HostEvent};
pub use overlay::OverlayIndex;
pub use parser::MarkdownParser;
pub use scanner::{CalloutScanner, scan, truncate_display};
pub use store::SyntheticHeadingStore;
pub use types::*;
