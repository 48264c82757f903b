use crate::{Diagnostic, DiagnosticSeverity, Error, HeadingIndex, HeadingRecord, Position, Result};
use tree_sitter::{Node, Parser, TreeCursor};

/// Tree-sitter based heading parser producing the authoritative heading index.
///
/// Positions follow the same conventions as the callout scanner: character
/// columns and character offsets with one newline per line.
pub struct MarkdownParser {
    parser: Parser,
}

impl MarkdownParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_md::LANGUAGE.into())
            .map_err(|e| Error::Parse(format!("Failed to set language: {e}")))?;

        Ok(Self { parser })
    }

    pub fn parse(&mut self, text: &str) -> Result<HeadingIndex> {
        let tree = self
            .parser
            .parse(text, None)
            .ok_or_else(|| Error::Parse("Failed to parse markdown".into()))?;

        let root = tree.root_node();
        let mut diagnostics = Vec::new();

        if root.has_error() {
            diagnostics.push(Diagnostic {
                severity: DiagnosticSeverity::Warn,
                message: "Parse tree contains errors, headings may be incomplete".into(),
                line: None,
            });
        }

        let lines = LineTable::new(text);
        let mut headings = Vec::new();
        let mut cursor = root.walk();
        walk_tree(&mut cursor, |node| match node.kind() {
            "atx_heading" => headings.push(atx_heading(node, text, &lines)),
            "setext_heading" => headings.extend(setext_heading(node, text, &lines)),
            _ => {},
        });

        Ok(HeadingIndex {
            headings,
            line_count: text.lines().count(),
            diagnostics,
        })
    }
}

/// Character offset and width of every line.
struct LineTable<'a> {
    lines: Vec<&'a str>,
    starts: Vec<usize>,
}

impl<'a> LineTable<'a> {
    fn new(text: &'a str) -> Self {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut starts = Vec::with_capacity(lines.len());
        let mut offset = 0;
        for line in &lines {
            starts.push(offset);
            offset += line.chars().count() + 1;
        }
        Self { lines, starts }
    }

    fn line(&self, row: usize) -> &'a str {
        self.lines.get(row).copied().unwrap_or("")
    }

    /// Position of byte `byte_column` on `row`, in characters.
    fn position(&self, row: usize, byte_column: usize) -> Position {
        let line = self.line(row);
        let column = line
            .get(..byte_column.min(line.len()))
            .map_or(0, |prefix| prefix.chars().count());
        let start = self.starts.get(row).copied().unwrap_or(0);
        Position::new(row, column, start + column)
    }

    /// Position just past the visible content of `row`.
    fn line_end(&self, row: usize) -> Position {
        let line = self.line(row);
        self.position(row, line.trim_end_matches('\r').len())
    }
}

fn walk_tree<F>(cursor: &mut TreeCursor, mut callback: F)
where
    F: FnMut(Node),
{
    loop {
        let node = cursor.node();
        callback(node);

        if cursor.goto_first_child() {
            continue;
        }

        if cursor.goto_next_sibling() {
            continue;
        }

        loop {
            if !cursor.goto_parent() {
                return;
            }
            if cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

fn atx_heading(node: Node, text: &str, lines: &LineTable) -> HeadingRecord {
    let row = node.start_position().row;
    let mut level = 1;
    let mut title = None;

    for child in node.children(&mut node.walk()) {
        match child.kind() {
            "atx_h1_marker" => level = 1,
            "atx_h2_marker" => level = 2,
            "atx_h3_marker" => level = 3,
            "atx_h4_marker" => level = 4,
            "atx_h5_marker" => level = 5,
            "atx_h6_marker" => level = 6,
            "inline" => title = Some(text[child.byte_range()].trim().to_string()),
            _ => {},
        }
    }

    let title = title.unwrap_or_else(|| {
        lines
            .line(row)
            .trim()
            .trim_start_matches('#')
            .trim_end_matches('#')
            .trim()
            .to_string()
    });

    HeadingRecord {
        text: title,
        level,
        start: lines.position(row, node.start_position().column),
        end: lines.line_end(row),
    }
}

fn setext_heading(node: Node, text: &str, lines: &LineTable) -> Option<HeadingRecord> {
    let mut level = None;
    let mut title = None;
    let mut underline_row = node.start_position().row;

    for child in node.children(&mut node.walk()) {
        match child.kind() {
            "setext_h1_underline" => {
                level = Some(1);
                underline_row = child.start_position().row;
            },
            "setext_h2_underline" => {
                level = Some(2);
                underline_row = child.start_position().row;
            },
            "paragraph" => title = Some(text[child.byte_range()].trim().to_string()),
            _ => {},
        }
    }

    let row = node.start_position().row;
    Some(HeadingRecord {
        text: title?.split_whitespace().collect::<Vec<_>>().join(" "),
        level: level?,
        start: lines.position(row, node.start_position().column),
        end: lines.line_end(underline_row),
    })
}
