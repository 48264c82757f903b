//! Rendering of heading records for the terminal.
//!
//! Pretty output indents each entry by its level and shows where it starts
//! as `line:column`, both 1-based. Chat callouts are highlighted so they
//! stand out from the document's own headings. JSON output is the plain
//! serde form of the core types.

use anyhow::Result;
use chat_outline_core::{HeadingIndex, HeadingRecord};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;

/// Output format options supported by the CLI
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented, colored listing
    Pretty,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Serialize `value` as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render `headings`, highlighting the ones listed in `callouts`.
pub fn render_pretty(headings: &[HeadingRecord], callouts: &[HeadingRecord]) -> String {
    let mut out = String::new();
    for heading in headings {
        let indent = "  ".repeat(heading.level.saturating_sub(1));
        let location = format!("{}:{}", heading.start.line + 1, heading.start.column + 1);
        let text = if callouts.contains(heading) {
            heading.text.cyan().to_string()
        } else {
            heading.text.bold().to_string()
        };
        let _ = writeln!(out, "{indent}{text}  {}", location.dimmed());
    }
    out
}

/// Render a whole heading index, with any diagnostics after the entries.
pub fn render_index(index: &HeadingIndex, callouts: &[HeadingRecord]) -> String {
    let mut out = render_pretty(&index.headings, callouts);
    for diagnostic in &index.diagnostics {
        let _ = writeln!(out, "{} {}", "warning:".yellow(), diagnostic.message);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_outline_core::Position;

    fn heading(text: &str, level: usize, line: usize, offset: usize) -> HeadingRecord {
        HeadingRecord {
            text: text.to_string(),
            level,
            start: Position::new(line, 0, offset),
            end: Position::new(line, text.len(), offset + text.len()),
        }
    }

    #[test]
    fn test_pretty_indents_by_level_with_one_based_locations() {
        colored::control::set_override(false);
        let headings = vec![heading("Title", 1, 0, 0), heading("Section", 2, 4, 20)];

        let rendered = render_pretty(&headings, &[]);

        assert_eq!(rendered, "Title  1:1\n  Section  5:1\n");
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        assert_eq!(render_pretty(&[], &[]), "");
    }

    #[test]
    fn test_json_is_serde_form() {
        let headings = vec![heading("Hello", 1, 1, 8)];

        let json = to_json(&headings).unwrap_or_default();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap_or_default();

        assert_eq!(value[0]["text"], "Hello");
        assert_eq!(value[0]["start"]["offset"], 8);
    }
}
