//! Markdown changelog parsing
//!
//! Parses a CHANGELOG.md-style document into per-version entries.
//! Each `## ` heading opens a new version section; everything below it
//! (up to the next `## ` heading) becomes that version's content.
//!
//! Format example:
//! ```text
//! # Changelog
//!
//! ## [1.2.3] (2025-01-01)
//! - fix things
//!
//! ## 1.2.2 (2024-12-01)
//! - older fix
//! ```

use regex::Regex;

use crate::update::compare::is_newer;

/// One version's worth of release notes, extracted from the changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// Version as it appeared in the heading, not normalized. Empty when
    /// the heading carried no recognizable version (lenient, see parser).
    pub version: String,
    /// Release date as it appeared in the heading, `YYYY-MM-DD`
    pub date: Option<String>,
    /// Section body with surrounding whitespace trimmed
    pub content: String,
}

/// Parser for markdown changelog documents
#[derive(Debug, Clone)]
pub struct ChangelogParser {
    /// Regex for a dotted three-part version, optionally bracketed: `[1.2.3]`
    version_re: Regex,
    /// Regex for a parenthesized ISO date: `(2025-01-01)`
    date_re: Regex,
}

impl ChangelogParser {
    pub fn new() -> Self {
        Self {
            // Match: 1.2.3 or [1.2.3] (brackets stripped via the capture)
            version_re: Regex::new(r"\[?(\d+\.\d+\.\d+)\]?").unwrap(),
            // Match: (2025-01-01)
            date_re: Regex::new(r"\((\d{4}-\d{2}-\d{2})\)").unwrap(),
        }
    }

    /// Parse a changelog document into entries, in document order.
    ///
    /// Lines before the first `## ` heading are discarded, as are all
    /// `# ` title lines. A heading whose version or date fails to match
    /// still opens a section; the missing field is simply absent. This
    /// can produce an entry with an empty version string, which callers
    /// treat as never being inside any version window.
    pub fn parse(&self, text: &str) -> Vec<ChangelogEntry> {
        let mut entries = Vec::new();
        let mut open: Option<Section> = None;

        for line in text.lines() {
            if let Some(heading) = line.strip_prefix("## ") {
                if let Some(section) = open.take() {
                    entries.push(section.finish());
                }
                open = Some(Section {
                    version: self
                        .version_re
                        .captures(heading)
                        .map(|c| c[1].to_string())
                        .unwrap_or_default(),
                    date: self
                        .date_re
                        .captures(heading)
                        .map(|c| c[1].to_string()),
                    lines: Vec::new(),
                });
            } else if line.starts_with("# ") {
                // Document titles never belong to a version section
                continue;
            } else if let Some(section) = open.as_mut() {
                section.lines.push(line.to_string());
            }
        }

        if let Some(section) = open.take() {
            entries.push(section.finish());
        }

        entries
    }
}

impl Default for ChangelogParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Section under construction while scanning
struct Section {
    version: String,
    date: Option<String>,
    lines: Vec<String>,
}

impl Section {
    fn finish(self) -> ChangelogEntry {
        ChangelogEntry {
            version: self.version,
            date: self.date,
            content: self.lines.join("\n").trim().to_string(),
        }
    }
}

/// Entries strictly newer than `current` and no newer than `latest`:
/// the half-open upgrade window `(current, latest]`.
///
/// Input order is preserved; nothing is re-sorted.
pub fn entries_between(
    current: &str,
    latest: &str,
    entries: &[ChangelogEntry],
) -> Vec<ChangelogEntry> {
    entries
        .iter()
        .filter(|e| is_newer(&e.version, current) && !is_newer(&e.version, latest))
        .cloned()
        .collect()
}
