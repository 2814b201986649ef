//! Card extraction from note text
//!
//! Three independent rules run over each note:
//! - Q/A: a `Q:` line whose very next line is an `A:` line
//! - Definition: the first `# ` heading and the first paragraph after it
//!   that has a blank line on both sides
//! - Cloze: every wiki-link, blanked out of the text around it; the front
//!   is the raw window with any edge whitespace left in place
//!
//! Card ids hash the note id with the text that tells cards apart, so
//! re-extracting an unchanged note yields the same ids.

use std::sync::OnceLock;

use regex::Regex;

use super::models::{Card, CardSource, CardType};
use crate::vault::{extract_wikilinks, Note, Wikilink};

/// Characters of context kept on each side of a cloze term
pub const DEFAULT_CLOZE_CONTEXT_CHARS: usize = 80;

/// Knobs for card extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub cloze_context_chars: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            cloze_context_chars: DEFAULT_CLOZE_CONTEXT_CHARS,
        }
    }
}

/// Extract all cards of one note with default options
pub fn extract_cards(note: &Note) -> Vec<Card> {
    extract_cards_with(note, &ExtractOptions::default())
}

/// Extract all cards of one note: Q/A first, then the definition, then cloze
pub fn extract_cards_with(note: &Note, options: &ExtractOptions) -> Vec<Card> {
    let tags = inline_tags(&note.content);
    let mut cards = Vec::new();

    for (front, back) in qa_pairs(&note.content) {
        let discriminator = format!("{}{}", front, back);
        cards.push(new_card(note, CardType::Qa, &discriminator, front, back, &tags));
    }

    if let Some((front, back)) = definition(&note.content) {
        let discriminator = format!("{}{}", front, back);
        cards.push(new_card(note, CardType::Definition, &discriminator, front, back, &tags));
    }

    for link in extract_wikilinks(&note.content) {
        let term = link.display().to_string();
        let front = cloze_front(&note.content, &link, options.cloze_context_chars);
        let discriminator = format!("{}{}", term, link.index);
        cards.push(new_card(note, CardType::Cloze, &discriminator, front, term, &tags));
    }

    log::debug!("Extracted {} cards from note {}", cards.len(), note.id);
    cards
}

/// Extract cards from every note, note by note in input order
pub fn extract_cards_from_vault(notes: &[Note], options: &ExtractOptions) -> Vec<Card> {
    notes
        .iter()
        .flat_map(|note| extract_cards_with(note, options))
        .collect()
}

fn new_card(
    note: &Note,
    card_type: CardType,
    discriminator: &str,
    front: String,
    back: String,
    tags: &[String],
) -> Card {
    Card {
        id: card_id(card_type, &note.id, discriminator),
        card_type,
        front,
        back,
        tags: tags.to_vec(),
        sources: vec![CardSource {
            path: note.path.clone(),
            note_id: note.id.clone(),
        }],
    }
}

/// `{prefix}_{hash(note id + discriminator)}`
fn card_id(card_type: CardType, note_id: &str, discriminator: &str) -> String {
    let mut input = String::with_capacity(note_id.len() + discriminator.len());
    input.push_str(note_id);
    input.push_str(discriminator);
    format!("{}_{}", card_type.id_prefix(), string_hash(&input))
}

/// Multiply-by-31 string hash over UTF-16 units, rendered in base 36.
///
/// Not cryptographic; only needs to be stable for identical input.
fn string_hash(s: &str) -> String {
    let mut h: i32 = 0;
    for unit in s.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    to_base36(u64::from(h.unsigned_abs()))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

fn question_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*Q\s*:\s*(.*)$").expect("valid question pattern"))
}

fn answer_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*A\s*:\s*(.*)$").expect("valid answer pattern"))
}

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#\s+(.+)$").expect("valid heading pattern"))
}

/// Text after the marker of a `Q:`/`A:` line, trimmed
fn marker_text<'l>(re: &Regex, line: &'l str) -> Option<&'l str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Q/A pairs; the answer must sit on the line right after the question
fn qa_pairs(content: &str) -> Vec<(String, String)> {
    let lines: Vec<&str> = content.lines().collect();
    let mut pairs = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(question) = marker_text(question_regex(), line) else {
            continue;
        };
        let Some(answer) = lines
            .get(i + 1)
            .and_then(|next| marker_text(answer_regex(), next))
        else {
            continue;
        };
        pairs.push((question.to_string(), answer.to_string()));
    }

    pairs
}

/// Text of a top-level heading line (`# Title`), if the line is one
fn heading_text(line: &str) -> Option<&str> {
    heading_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// First heading and the first blank-line-delimited paragraph below it.
///
/// The paragraph must be preceded and followed by a blank line; a
/// paragraph that runs to the end of the note does not count.
fn definition(content: &str) -> Option<(String, String)> {
    let lines: Vec<&str> = content.lines().collect();
    let heading_pos = lines.iter().position(|l| heading_text(l).is_some())?;
    let title = heading_text(lines[heading_pos])?;

    let rest = &lines[heading_pos + 1..];
    let first_blank = rest.iter().position(|l| is_blank(l))?;
    let start = first_blank + rest[first_blank..].iter().position(|l| !is_blank(l))?;
    let len = rest[start..].iter().position(|l| is_blank(l))?;

    let paragraph = rest[start..start + len].join("\n");
    let paragraph = paragraph.trim();
    if paragraph.is_empty() {
        return None;
    }

    Some((title.to_string(), paragraph.to_string()))
}

/// Context window around a link with the link replaced by a cloze marker.
///
/// Only the first occurrence of the link text inside the window is
/// replaced, even if an earlier identical span is not this link.
fn cloze_front(content: &str, link: &Wikilink, context_chars: usize) -> String {
    let link_end = link.index + link.length;

    let start = content[..link.index]
        .char_indices()
        .rev()
        .take(context_chars)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(link.index);
    let end = content[link_end..]
        .char_indices()
        .nth(context_chars)
        .map(|(i, _)| link_end + i)
        .unwrap_or(content.len());

    let marker = format!("{{{{c1::{}}}}}", link.display());
    content[start..end].replacen(&link.text, &marker, 1)
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|\s)#([a-zA-Z][a-zA-Z0-9_/-]*)").expect("valid tag pattern")
    })
}

/// Inline `#tags`, deduplicated, in order of first appearance
fn inline_tags(content: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for cap in tag_regex().captures_iter(content) {
        let tag = &cap[1];
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
