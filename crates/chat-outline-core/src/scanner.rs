//! Line scanner that turns chat callouts into synthetic headings.
//!
//! A chat callout is a header line `> [!chat-r]` or `> [!chat-l]` (trailing
//! whitespace allowed) followed by one or more `> `-prefixed lines:
//!
//! ```text
//! > [!chat-r]
//! > Hello
//! > there
//! ```
//!
//! Each block with at least one continuation line becomes a level 1
//! [`HeadingRecord`] whose text is the joined continuation content and whose
//! positions span from the header line to the last continuation line.
//!
//! Offsets count characters, with exactly one newline per line boundary, so
//! they line up with the positions the host reports for real headings.
//!
//! ```rust
//! use chat_outline_core::scanner::scan;
//!
//! let headings = scan("# Title\n> [!chat-r]\n> Hello\n> there\nSome text");
//! assert_eq!(headings.len(), 1);
//! assert_eq!(headings[0].text, "Hello there");
//! assert_eq!(headings[0].start.line, 1);
//! assert_eq!(headings[0].end.line, 3);
//! ```

use crate::config::ScannerConfig;
use crate::{CalloutKind, HeadingRecord, Position};
use regex::Regex;
use std::sync::LazyLock;

/// Matches a callout header line and captures the kind marker.
static CALLOUT_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^> \[!chat-([rl])\]\s*$").expect("callout header regex is valid")
});

/// Matches a quote line with content after the `> ` prefix.
static QUOTE_CONTINUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^> [^\r\n]").expect("quote continuation regex is valid"));

const QUOTE_PREFIX_LEN: usize = 2;

/// Callout block collected while scanning, before it becomes a heading.
#[derive(Debug)]
struct CalloutBlock<'a> {
    kind: CalloutKind,
    header_line: usize,
    continuation_lines: Vec<&'a str>,
    end_line: usize,
    end_column: usize,
}

/// Scanner producing synthetic headings for chat callouts.
#[derive(Debug, Clone)]
pub struct CalloutScanner {
    max_heading_chars: usize,
    ellipsis: String,
}

impl Default for CalloutScanner {
    fn default() -> Self {
        Self::from_config(&ScannerConfig::default())
    }
}

impl CalloutScanner {
    /// Create a scanner with the default display rules (80 characters, `...`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner from configuration.
    pub fn from_config(config: &ScannerConfig) -> Self {
        Self {
            max_heading_chars: config.max_heading_chars,
            ellipsis: config.ellipsis.clone(),
        }
    }

    /// Scan a whole document and return its synthetic headings in line order.
    pub fn scan(&self, content: &str) -> Vec<HeadingRecord> {
        let lines: Vec<&str> = content.split('\n').collect();
        let widths: Vec<usize> = lines.iter().map(|line| line.chars().count()).collect();

        let mut headings = Vec::new();
        let mut offset = 0;
        let mut index = 0;

        while index < lines.len() {
            if let Some(block) = collect_block(&lines, &widths, index) {
                let span: usize = widths[block.header_line..=block.end_line]
                    .iter()
                    .map(|width| width + 1)
                    .sum();
                let end_offset = offset + span - 1;

                tracing::trace!(
                    kind = ?block.kind,
                    line = block.header_line,
                    lines = block.continuation_lines.len(),
                    "chat callout"
                );

                headings.push(HeadingRecord {
                    text: self.display_text(&block.continuation_lines.join(" ")),
                    level: 1,
                    start: Position::new(block.header_line, 0, offset),
                    end: Position::new(block.end_line, block.end_column, end_offset),
                });

                offset = end_offset + 1;
                index = block.end_line + 1;
                continue;
            }

            offset += widths[index] + 1;
            index += 1;
        }

        headings
    }

    fn display_text(&self, joined: &str) -> String {
        truncate_display(joined.trim(), self.max_heading_chars, &self.ellipsis)
    }
}

/// Scan `content` with the default display rules.
pub fn scan(content: &str) -> Vec<HeadingRecord> {
    CalloutScanner::default().scan(content)
}

/// Shorten `text` to at most `max_chars` characters, ending in `ellipsis`
/// when anything was cut.
///
/// The result never exceeds `max_chars`, even when the ellipsis alone is
/// longer than that; the ellipsis is cut short instead.
pub fn truncate_display(text: &str, max_chars: usize, ellipsis: &str) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(ellipsis.chars().count());
    text.chars()
        .take(keep)
        .chain(ellipsis.chars().take(max_chars - keep))
        .collect()
}

fn header_kind(line: &str) -> Option<CalloutKind> {
    CALLOUT_HEADER_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|marker| CalloutKind::from_marker(marker.as_str()))
}

/// Collect the block headed at `header_line`, or `None` when the line is not
/// a callout header or no continuation line follows it.
fn collect_block<'a>(
    lines: &[&'a str],
    widths: &[usize],
    header_line: usize,
) -> Option<CalloutBlock<'a>> {
    let kind = header_kind(lines[header_line])?;

    let mut block = CalloutBlock {
        kind,
        header_line,
        continuation_lines: Vec::new(),
        end_line: header_line,
        end_column: widths[header_line],
    };

    for (line_no, line) in lines.iter().enumerate().skip(header_line + 1) {
        if !QUOTE_CONTINUATION_RE.is_match(line) {
            break;
        }
        block.continuation_lines.push(&line[QUOTE_PREFIX_LEN..]);
        block.end_line = line_no;
        block.end_column = widths[line_no];
    }

    if block.continuation_lines.is_empty() {
        None
    } else {
        Some(block)
    }
}
