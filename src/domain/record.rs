//! Journal entries, output records and the dedup key

use crate::domain::date;
use crate::domain::markup::ParsedPage;
use crate::domain::text;
use crate::error::{MoodjourError, Result};
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashSet;

/// Columns in a record store row
pub const RECORD_WIDTH: usize = 18;

/// Column positions read back from the store
pub const DATE_COLUMN: usize = 0;
pub const MOOD_COLUMN: usize = 1;
pub const NOTES_COLUMN: usize = 15;
pub const REFLECTIONS_COLUMN: usize = 16;
pub const TAKEAWAY_COLUMN: usize = 17;

/// Characters of each field kept in a dedup key
pub const KEY_DATE_CHARS: usize = 10;
pub const KEY_TEXT_CHARS: usize = 40;

/// One journal page with a resolved date and normalized text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub title: String,
    pub body: String,
}

impl JournalEntry {
    /// Resolve the header date and normalize title and body
    pub fn from_page(page: &ParsedPage) -> Result<Self> {
        let date = date::resolve_header_date(&page.header)?;
        let body = page.body_text();
        if body.is_empty() {
            return Err(MoodjourError::EmptyEntry(format!(
                "page dated {} has no text",
                date
            )));
        }

        Ok(JournalEntry {
            date,
            title: page.title_text(),
            body,
        })
    }

    /// Title and body as fed to the classifiers
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// One output row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: String,
    pub mood: String,
    pub notes: String,
    pub reflections: String,
    pub takeaway: String,
}

impl Record {
    /// Build a record from an entry and its chosen mood.
    ///
    /// Notes are the title, else the first sentence, else the whole body.
    pub fn build(entry: &JournalEntry, mood: String, time_of_day: NaiveTime) -> Self {
        let sentences = text::split_sentences(&entry.body);
        let notes = if !entry.title.is_empty() {
            entry.title.clone()
        } else {
            sentences
                .first()
                .cloned()
                .unwrap_or_else(|| entry.body.clone())
        };

        Record {
            date: date::format_record_date(entry.date, time_of_day),
            mood,
            notes,
            reflections: entry.body.clone(),
            takeaway: text::extract_takeaway(&sentences),
        }
    }

    /// Fields in store column order, reserved columns blank
    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![String::new(); RECORD_WIDTH];
        row[DATE_COLUMN] = self.date.clone();
        row[MOOD_COLUMN] = self.mood.clone();
        row[NOTES_COLUMN] = self.notes.clone();
        row[REFLECTIONS_COLUMN] = self.reflections.clone();
        row[TAKEAWAY_COLUMN] = self.takeaway.clone();
        row
    }

    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(&self.date, &self.notes, &self.reflections)
    }
}

/// Truncated (date, notes, reflections) triple.
///
/// Prefix truncation means two distinct entries sharing long prefixes
/// compare equal. Kept for compatibility with existing stores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub date: String,
    pub notes: String,
    pub reflections: String,
}

impl DedupKey {
    pub fn new(date: &str, notes: &str, reflections: &str) -> Self {
        DedupKey {
            date: take_chars(date.trim(), KEY_DATE_CHARS),
            notes: take_chars(notes.trim(), KEY_TEXT_CHARS),
            reflections: take_chars(reflections.trim(), KEY_TEXT_CHARS),
        }
    }
}

fn take_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Keys already present in the store plus those accepted during this run
#[derive(Debug, Clone, Default)]
pub struct KeyLedger {
    keys: HashSet<DedupKey>,
}

impl KeyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &DedupKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn insert(&mut self, key: DedupKey) -> bool {
        self.keys.insert(key)
    }

    /// Check-then-insert in one step. Returns whether the key should be
    /// accepted; with `force` it always is.
    pub fn admit(&mut self, key: DedupKey, force: bool) -> bool {
        let fresh = self.keys.insert(key);
        fresh || force
    }
}

impl FromIterator<DedupKey> for KeyLedger {
    fn from_iter<I: IntoIterator<Item = DedupKey>>(iter: I) -> Self {
        KeyLedger {
            keys: iter.into_iter().collect(),
        }
    }
}
