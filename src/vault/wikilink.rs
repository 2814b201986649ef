//! Wiki-link parsing
//!
//! Recognizes `[[target]]` and `[[target|alias]]` references in note text.
//! Matching is left to right and non-overlapping; an unterminated `[[`
//! produces nothing.

use std::sync::OnceLock;

use regex::{CaptureMatches, Regex};
use serde::{Deserialize, Serialize};

fn wikilink_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").expect("valid wikilink pattern")
    })
}

/// A single wiki-link occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wikilink {
    /// Matched span, brackets included
    pub text: String,
    /// Link target, trimmed
    pub target: String,
    /// Display alias after `|`, trimmed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Byte offset of the match start
    pub index: usize,
    /// Byte length of the match
    pub length: usize,
}

impl Wikilink {
    /// The term shown to the reader: the alias when present, else the target.
    pub fn display(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.target)
    }
}

/// Iterator over the wiki-links of one text, in order of appearance.
pub struct Wikilinks<'t> {
    captures: CaptureMatches<'static, 't>,
}

impl Iterator for Wikilinks<'_> {
    type Item = Wikilink;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.captures.next()?;
        let full = caps.get(0)?;
        let target = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
        let alias = caps.get(2).map(|m| m.as_str().trim().to_string());

        Some(Wikilink {
            text: full.as_str().to_string(),
            target,
            alias,
            index: full.start(),
            length: full.len(),
        })
    }
}

/// Extract all wiki-links from markdown text
pub fn extract_wikilinks(markdown: &str) -> Wikilinks<'_> {
    Wikilinks {
        captures: wikilink_regex().captures_iter(markdown),
    }
}

/// Normalize a title into the key used to match link targets against notes.
///
/// Lowercases and trims, drops everything outside `[a-z0-9]`, whitespace,
/// `-` and `_`, then turns each run of whitespace/underscores into one `-`.
pub fn slugify(input: &str) -> String {
    let lower = input.to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut in_separator = false;

    for c in lower.trim().chars() {
        if c.is_whitespace() || c == '_' {
            if !in_separator {
                slug.push('-');
                in_separator = true;
            }
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
            in_separator = false;
        }
        // Dropped characters do not break a separator run
    }

    slug
}

/// Wrap the first occurrence of `term` in `content` as a wiki-link.
///
/// Returns `None` when the trimmed term is blank or not present.
pub fn link_first_occurrence(content: &str, term: &str) -> Option<String> {
    let title = term.trim();
    if title.is_empty() {
        return None;
    }

    let idx = content.find(title)?;
    let (before, rest) = content.split_at(idx);
    let after = &rest[title.len()..];
    Some(format!("{}[[{}]]{}", before, title, after))
}
