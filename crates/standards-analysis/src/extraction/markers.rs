//! Explicit rule markers: `<!-- standards:rule ... -->` blocks and
//! `### Rule: <Title>` headings with key bullets.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use standards_core::errors::BuildWarning;
use standards_core::types::SourceRef;

use super::ids::{generate_id, with_category_prefix};
use super::segment::{heading_text, FenceTracker};
use super::slug::slugify;
use crate::build::draft::RuleDraft;

const MARKER_OPEN: &str = "<!-- standards:rule";
const MARKER_CLOSE_TAG: &str = "<!-- /standards:rule";
const MARKER_REQUIRED: &[&str] = &["id", "categories", "severity", "applies_to", "summary", "rationale"];
const HEADING_REQUIRED: &[&str] = &["summary", "rationale", "severity", "applies-to"];

static HEADING_RULE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^#{3}\s+Rule:\s+(?P<title>.+?)\s*$").ok());

static BULLET_KV_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^-\s+(?P<key>[A-Za-z-]+):\s*(?P<value>.+?)\s*$").ok());

/// An explicitly authored rule and the line it starts on.
#[derive(Debug, Clone)]
pub struct ExplicitRule {
    pub draft: RuleDraft,
    pub line: usize,
}

/// Result of scanning one document for explicit markers.
#[derive(Debug, Default)]
pub struct MarkerScan {
    pub rules: Vec<ExplicitRule>,
    /// 1-based lines consumed by markers; excluded from heuristic scanning.
    pub consumed: FxHashSet<usize>,
    pub warnings: Vec<BuildWarning>,
}

/// Scan `text` for explicit rules. Generated ids are claimed in `used_ids`.
pub fn scan_markers(
    text: &str,
    file: &str,
    categories: &[String],
    today: &str,
    used_ids: &mut FxHashSet<String>,
) -> MarkerScan {
    let lines: Vec<&str> = text.lines().collect();
    let mut scan = MarkerScan::default();
    let mut fences = FenceTracker::default();
    let stem = Path::new(file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut anchor = slugify(&stem);
    let primary = categories.iter().min().cloned().unwrap_or_default();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if fences.in_code(line) {
            i += 1;
            continue;
        }
        if let Some(heading) = heading_text(line) {
            anchor = slugify(heading);
        }

        if line.trim_start().starts_with(MARKER_OPEN) {
            i = marker_block(&lines, i, file, &anchor, categories, today, used_ids, &mut scan);
            continue;
        }

        if let Some(title) = heading_rule_title(line) {
            i = heading_rule(&lines, i, &title, file, &anchor, categories, &primary, today, used_ids, &mut scan);
            continue;
        }
        i += 1;
    }
    scan
}

/// Parse a marker block starting at `start`; returns the index after it.
#[allow(clippy::too_many_arguments)]
fn marker_block(
    lines: &[&str],
    start: usize,
    file: &str,
    anchor: &str,
    categories: &[String],
    today: &str,
    used_ids: &mut FxHashSet<String>,
    scan: &mut MarkerScan,
) -> usize {
    let mut meta: FxHashMap<String, String> = FxHashMap::default();
    let mut i = start + 1;
    let mut closed = false;
    while i < lines.len() {
        let line = lines[i];
        if line.contains(MARKER_CLOSE_TAG) {
            closed = true;
            break;
        }
        if let Some((before, _)) = line.split_once("-->") {
            parse_kv(before, &mut meta);
            closed = true;
            break;
        }
        parse_kv(line, &mut meta);
        i += 1;
    }
    let mut end = i.min(lines.len().saturating_sub(1));
    if closed && !lines[end].contains(MARKER_CLOSE_TAG) {
        if let Some(next) = lines.get(end + 1) {
            if next.contains(MARKER_CLOSE_TAG) {
                end += 1;
            }
        }
    }
    let next_index = end + 1;
    scan.consumed.extend((start + 1)..=next_index);

    let missing: Vec<&str> = MARKER_REQUIRED
        .iter()
        .copied()
        .filter(|k| !meta.get(*k).is_some_and(|v| !v.is_empty()))
        .collect();
    if !closed || !missing.is_empty() {
        let message = if closed {
            format!("missing keys: {}", missing.join(", "))
        } else {
            "unterminated marker block".to_string()
        };
        scan.warnings.push(BuildWarning::IgnoredMarker {
            path: file.to_string(),
            line: start + 1,
            message,
        });
        return next_index;
    }

    let id = meta.remove("id").unwrap_or_default();
    if !used_ids.insert(id.clone()) {
        scan.warnings.push(BuildWarning::IgnoredMarker {
            path: file.to_string(),
            line: start + 1,
            message: format!("conflicting id {id}"),
        });
        return next_index;
    }
    let mut category_ids = split_multi(meta.get("categories").map(String::as_str).unwrap_or(""));
    if category_ids.is_empty() {
        category_ids = categories.to_vec();
    }
    let draft = RuleDraft {
        id: Some(id),
        category_ids: Some(category_ids),
        summary: meta.remove("summary"),
        rationale: meta.remove("rationale"),
        severity: meta.remove("severity").map(|s| s.to_lowercase()),
        applies_to: meta.get("applies_to").map(|a| split_multi(a)),
        enforcement_hint: meta.remove("enforcement_hint").filter(|h| !h.is_empty()),
        source: Some(SourceRef {
            file: file.to_string(),
            anchor: anchor.to_string(),
        }),
        last_updated: Some(today.to_string()),
        ..RuleDraft::default()
    };
    scan.rules.push(ExplicitRule {
        draft,
        line: start + 1,
    });
    next_index
}

/// Parse a `### Rule:` heading at `start`; returns the index after its bullets.
#[allow(clippy::too_many_arguments)]
fn heading_rule(
    lines: &[&str],
    start: usize,
    title: &str,
    file: &str,
    anchor: &str,
    categories: &[String],
    primary: &str,
    today: &str,
    used_ids: &mut FxHashSet<String>,
    scan: &mut MarkerScan,
) -> usize {
    let mut bullets: FxHashMap<String, String> = FxHashMap::default();
    let mut i = start + 1;
    while i < lines.len() {
        let raw = lines[i].trim();
        if raw.is_empty() || heading_text(raw).is_some() {
            break;
        }
        if let Some(caps) = BULLET_KV_RE.as_ref().and_then(|re| re.captures(raw)) {
            bullets.insert(caps["key"].to_lowercase(), caps["value"].to_string());
        }
        i += 1;
    }

    let missing: Vec<&str> = HEADING_REQUIRED
        .iter()
        .copied()
        .filter(|k| !bullets.contains_key(*k))
        .collect();
    if !missing.is_empty() {
        scan.warnings.push(BuildWarning::IgnoredMarker {
            path: file.to_string(),
            line: start + 1,
            message: format!("missing bullets: {}", missing.join(", ")),
        });
        return start + 1;
    }

    let base = with_category_prefix(&slugify(title), primary);
    let id = generate_id(&base, used_ids);
    let draft = RuleDraft {
        id: Some(id),
        category_ids: Some(categories.to_vec()),
        summary: bullets.remove("summary"),
        rationale: bullets.remove("rationale"),
        severity: bullets.remove("severity").map(|s| s.to_lowercase()),
        applies_to: bullets.get("applies-to").map(|a| split_multi(a)),
        enforcement_hint: bullets.remove("enforcement-hint"),
        source: Some(SourceRef {
            file: file.to_string(),
            anchor: anchor.to_string(),
        }),
        last_updated: Some(today.to_string()),
        ..RuleDraft::default()
    };
    scan.consumed.extend((start + 1)..=i);
    scan.rules.push(ExplicitRule {
        draft,
        line: start + 1,
    });
    i
}

fn heading_rule_title(line: &str) -> Option<String> {
    HEADING_RULE_RE
        .as_ref()?
        .captures(line)
        .map(|c| c["title"].to_string())
}

fn parse_kv(line: &str, meta: &mut FxHashMap<String, String>) {
    let stripped = line.trim();
    if stripped.is_empty() || stripped.starts_with('#') {
        return;
    }
    if let Some((key, value)) = stripped.split_once(':') {
        meta.insert(key.trim().to_lowercase(), value.trim().to_string());
    }
}

/// Comma-separated if a comma is present, else whitespace-separated.
fn split_multi(raw: &str) -> Vec<String> {
    let parts: Vec<&str> = if raw.contains(',') {
        raw.split(',').collect()
    } else {
        raw.split_whitespace().collect()
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats() -> Vec<String> {
        vec!["markdown".to_string()]
    }

    #[test]
    fn marker_block_is_parsed_and_consumed() {
        let doc = "# Style\n<!-- standards:rule\nid: markdown-single-h1\ncategories: markdown\nseverity: warn\napplies_to: **/*.md\nsummary: One H1 per document\nrationale: Keeps outlines sane.\n-->\n<!-- /standards:rule -->\nafter\n";
        let mut used = FxHashSet::default();
        let scan = scan_markers(doc, "docs/style.md", &cats(), "2025-01-01", &mut used);
        assert_eq!(scan.rules.len(), 1);
        let draft = &scan.rules[0].draft;
        assert_eq!(draft.id.as_deref(), Some("markdown-single-h1"));
        assert_eq!(draft.applies_to.as_deref(), Some(&["**/*.md".to_string()][..]));
        assert_eq!(draft.source.as_ref().unwrap().anchor, "style");
        assert!(used.contains("markdown-single-h1"));
        assert!(scan.consumed.contains(&2));
        assert!(scan.consumed.contains(&10));
        assert!(!scan.consumed.contains(&11));
    }

    #[test]
    fn incomplete_marker_block_is_ignored_with_warning() {
        let doc = "<!-- standards:rule\nid: x-rule\n-->\n";
        let mut used = FxHashSet::default();
        let scan = scan_markers(doc, "a.md", &cats(), "2025-01-01", &mut used);
        assert!(scan.rules.is_empty());
        assert_eq!(scan.warnings.len(), 1);
        assert_eq!(scan.consumed.len(), 3);
        assert!(scan.consumed.contains(&2));
    }

    #[test]
    fn repeated_marker_id_keeps_first_block() {
        let block = "<!-- standards:rule\nid: markdown-single-h1\ncategories: markdown\nseverity: warn\napplies_to: **/*.md\nsummary: One H1 per document\nrationale: Keeps outlines sane.\n-->\n";
        let doc = format!("{block}{block}");
        let mut used = FxHashSet::default();
        let scan = scan_markers(&doc, "a.md", &cats(), "2025-01-01", &mut used);
        assert_eq!(scan.rules.len(), 1);
        assert_eq!(scan.rules[0].line, 1);
        assert_eq!(scan.warnings.len(), 1);
        assert!(scan.warnings[0].to_string().contains("conflicting id markdown-single-h1"));
        assert!(scan.consumed.contains(&12));
    }

    #[test]
    fn heading_rule_requires_all_bullets() {
        let doc = "### Rule: Fence Code Blocks\n- Summary: Always fence code\n- Rationale: Rendering\n- Severity: Error\n- Applies-To: **/*.md\n\n### Rule: Partial\n- Summary: x\n";
        let mut used = FxHashSet::default();
        let scan = scan_markers(doc, "a.md", &cats(), "2025-01-01", &mut used);
        assert_eq!(scan.rules.len(), 1);
        let draft = &scan.rules[0].draft;
        assert_eq!(draft.id.as_deref(), Some("markdown-fence-code-blocks"));
        assert_eq!(draft.severity.as_deref(), Some("error"));
        assert_eq!(draft.source.as_ref().unwrap().anchor, "rule-fence-code-blocks");
        assert_eq!(scan.warnings.len(), 1);
        assert!(scan.consumed.contains(&3));
        assert!(!scan.consumed.contains(&8));
    }
}
