use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a document known to the host, e.g. `notes/chat.md`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap a host identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File extension of the final path segment, if any.
    pub fn extension(&self) -> Option<&str> {
        let name = self.0.rsplit('/').next().unwrap_or(&self.0);
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A point in a document.
///
/// `offset` counts characters from the start of the document, where every
/// line contributes its content plus exactly one newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based column, in characters.
    pub column: usize,
    /// Zero-based character offset from the start of the document.
    pub offset: usize,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// One entry of a document's heading list.
///
/// Real records come from the host's heading index; synthetic records are
/// produced by the callout scanner and always have level 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    /// Display text of the heading.
    pub text: String,
    /// Heading depth (1 for top-level).
    pub level: usize,
    /// Where the heading starts.
    pub start: Position,
    /// Where the heading ends.
    pub end: Position,
}

/// The host's heading index for one document.
///
/// Only `headings` is touched by the overlay; every other field is passed
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadingIndex {
    /// Headings in document order.
    pub headings: Vec<HeadingRecord>,
    /// Number of lines in the indexed document.
    pub line_count: usize,
    /// Problems noticed while building the index.
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub line: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warn,
    Info,
}

/// The two recognized chat callout flavours (`[!chat-r]` and `[!chat-l]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutKind {
    /// `> [!chat-r]`
    Right,
    /// `> [!chat-l]`
    Left,
}

impl CalloutKind {
    /// Map the marker suffix (`r`/`l`) to a kind.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "r" => Some(Self::Right),
            "l" => Some(Self::Left),
            _ => None,
        }
    }
}
