//! Rule-priority mood classification
//!
//! An ordered table of (pattern, ranked candidates) rules evaluated against
//! lower-cased text. Rules are listed by severity so that distress-related
//! categories claim a slot before positive ones when both match.

use crate::domain::mood::MoodPool;
use regex::Regex;
use std::sync::OnceLock;

/// Most labels one entry may receive
pub const MAX_MOODS: usize = 2;

/// Tried in order when no rule matched and fallback is allowed
pub const NEUTRAL_FALLBACK: [&str; 6] =
    ["Thoughtful", "Mellow", "Calm", "Neutral", "Meh", "Balanced"];

/// Pattern category, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodCategory {
    Anxiety,
    Crisis,
    Exhaustion,
    Trapped,
    Frustration,
    Motivation,
    Gratitude,
}

/// One row of the rule table
#[derive(Debug)]
pub struct MoodRule {
    pub category: MoodCategory,
    /// Word stems; a stem matches at a word start
    pub stems: &'static [&'static str],
    /// Labels to try, best first
    pub candidates: &'static [&'static str],
}

pub const MOOD_RULES: [MoodRule; 7] = [
    MoodRule {
        category: MoodCategory::Anxiety,
        stems: &["ansios", "ansiedade", "preocupad", "nervos"],
        candidates: &["Anxious", "Concerned", "Uneasy"],
    },
    MoodRule {
        category: MoodCategory::Crisis,
        stems: &["depress", "morrer", "suicid", "hopeless", "sem raz[aã]o"],
        candidates: &["Depressed", "Hopeless", "Miserable", "Down"],
    },
    MoodRule {
        category: MoodCategory::Exhaustion,
        stems: &["cansad", "exaust", "fatig"],
        candidates: &["Exhausted", "Tired", "Fatigued"],
    },
    MoodRule {
        category: MoodCategory::Trapped,
        stems: &["preso", "pris[aã]o", "trancad"],
        candidates: &["Trapped"],
    },
    MoodRule {
        category: MoodCategory::Frustration,
        stems: &["frustr", "raiva", "irrit", "culpa", "vergonh"],
        candidates: &["Frustrated", "Peeved", "Guilty", "Ashamed"],
    },
    MoodRule {
        category: MoodCategory::Motivation,
        stems: &["inspir", "motivad", "orgulh", "confian"],
        candidates: &["Inspired", "Motivated", "Proud"],
    },
    MoodRule {
        category: MoodCategory::Gratitude,
        stems: &["grat", "feliz", "bem", "esperan", "otimi"],
        candidates: &["Grateful", "Hopeful", "Optimistic", "Good", "Content"],
    },
];

/// Compiled patterns, index-aligned with `MOOD_RULES`
fn rule_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        MOOD_RULES
            .iter()
            .map(|rule| Regex::new(&format!(r"\b(?:{})\w*", rule.stems.join("|"))).unwrap())
            .collect()
    })
}

/// Categories whose pattern matches the text, in priority order
pub fn matching_categories(text: &str) -> Vec<MoodCategory> {
    let lowered = text.to_lowercase();
    MOOD_RULES
        .iter()
        .zip(rule_patterns())
        .filter(|(_, pattern)| pattern.is_match(&lowered))
        .map(|(rule, _)| rule.category)
        .collect()
}

/// Pick up to `MAX_MOODS` labels from the pool.
///
/// For each matching rule the first candidate present in the pool and not
/// already chosen is taken. With `allow_fallback`, an empty result falls
/// back to the first neutral label present in the pool.
pub fn classify(text: &str, pool: &MoodPool, allow_fallback: bool) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut chosen: Vec<String> = Vec::new();

    for (rule, pattern) in MOOD_RULES.iter().zip(rule_patterns()) {
        if chosen.len() >= MAX_MOODS {
            break;
        }
        if !pattern.is_match(&lowered) {
            continue;
        }
        if let Some(label) = rule
            .candidates
            .iter()
            .find(|label| pool.contains(label) && !chosen.iter().any(|c| c == *label))
        {
            chosen.push(label.to_string());
        }
    }

    if chosen.is_empty() && allow_fallback {
        if let Some(label) = NEUTRAL_FALLBACK.iter().find(|label| pool.contains(label)) {
            chosen.push(label.to_string());
        }
    }

    chosen
}
