//! Splits a markdown document into heading-bounded blocks.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;

use super::slug::slugify;

static HEADING_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s{0,3}#{1,6}\s+(.+?)\s*#*\s*$").ok());

/// A source line with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

/// Lines under one heading (or the preamble before the first heading).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub heading: Option<String>,
    pub anchor: String,
    pub lines: Vec<Line>,
}

/// Heading text of an ATX heading line, if it is one.
pub fn heading_text(line: &str) -> Option<&str> {
    HEADING_RE
        .as_ref()?
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Tracks fenced code regions (```` ``` ```` and `~~~`).
#[derive(Debug, Default)]
pub struct FenceTracker {
    open: Option<char>,
}

impl FenceTracker {
    /// Feed one line. Returns true if the line is a fence delimiter or inside a fence.
    pub fn in_code(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let fence = if trimmed.starts_with("```") {
            Some('`')
        } else if trimmed.starts_with("~~~") {
            Some('~')
        } else {
            None
        };
        match (self.open, fence) {
            (None, Some(c)) => {
                self.open = Some(c);
                true
            }
            (Some(open), Some(c)) if open == c => {
                self.open = None;
                true
            }
            (Some(_), _) => true,
            (None, None) => false,
        }
    }
}

/// Segment `text` into blocks. Fenced code and lines in `skip` (1-based)
/// are dropped; headings always open a new block. The preamble anchor is
/// the slug of `file_stem`.
pub fn segment(text: &str, file_stem: &str, skip: &FxHashSet<usize>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current = Block {
        heading: None,
        anchor: slugify(file_stem),
        lines: Vec::new(),
    };
    let mut fences = FenceTracker::default();

    for (idx, raw) in text.lines().enumerate() {
        let number = idx + 1;
        if fences.in_code(raw) {
            continue;
        }
        if let Some(heading) = heading_text(raw) {
            let next = Block {
                heading: Some(heading.to_string()),
                anchor: slugify(heading),
                lines: Vec::new(),
            };
            let done = std::mem::replace(&mut current, next);
            if !done.lines.is_empty() {
                blocks.push(done);
            }
            continue;
        }
        if skip.contains(&number) {
            continue;
        }
        current.lines.push(Line {
            number,
            text: raw.to_string(),
        });
    }
    if !current.lines.is_empty() {
        blocks.push(current);
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_open_blocks_and_fences_are_skipped() {
        let doc = "intro line\n# Error Handling\n- Never swallow errors silently\n```\n- MUST not be seen\n```\n## Logging\ntext\n";
        let blocks = segment(doc, "python_guide", &FxHashSet::default());
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].anchor, "python_guide");
        assert_eq!(blocks[0].heading, None);
        assert_eq!(blocks[1].anchor, "error-handling");
        assert_eq!(blocks[1].lines.len(), 1);
        assert_eq!(blocks[1].lines[0].number, 3);
        assert_eq!(blocks[2].heading.as_deref(), Some("Logging"));
    }

    #[test]
    fn skipped_lines_are_dropped() {
        let doc = "# A\none\ntwo\n";
        let skip: FxHashSet<usize> = [2].into_iter().collect();
        let blocks = segment(doc, "a", &skip);
        assert_eq!(blocks[0].lines.len(), 1);
        assert_eq!(blocks[0].lines[0].text, "two");
    }
}
