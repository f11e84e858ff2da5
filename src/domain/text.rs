//! Text normalization, sentence segmentation and takeaway extraction

use regex::Regex;
use std::sync::OnceLock;

/// Words that mark a sentence as a stated intention
pub const INTENTION_MARKERS: [&str; 7] = [
    "quero", "pretendo", "vou", "preciso", "devo", "decidi", "planejo",
];

fn whitespace_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Bullet glyphs and the whitespace around them
fn bullet_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\s*[•◦▪‣●]\s*").unwrap())
}

fn intention_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(&format!(r"\b(?:{})\b", INTENTION_MARKERS.join("|"))).unwrap()
    })
}

/// Replace bullets with " - ", collapse whitespace runs to one space, trim
pub fn normalize(text: &str) -> String {
    let dashed = bullet_regex().replace_all(text, " - ");
    whitespace_regex()
        .replace_all(&dashed, " ")
        .trim()
        .to_string()
}

/// Split normalized text after `.`, `!` or `?` when followed by whitespace.
///
/// Each sentence keeps its terminal punctuation. Abbreviations are not
/// special-cased.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(next_idx, next)) = chars.peek() {
            if next.is_whitespace() {
                sentences.push(&text[start..next_idx]);
                start = next_idx;
            }
        } else {
            sentences.push(&text[start..idx + ch.len_utf8()]);
            start = text.len();
        }
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// First sentence (original casing) containing an intention marker as a
/// whole word, or an empty string
pub fn extract_takeaway(sentences: &[String]) -> String {
    sentences
        .iter()
        .find(|s| intention_regex().is_match(&s.to_lowercase()))
        .cloned()
        .unwrap_or_default()
}
