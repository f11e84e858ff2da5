//! Domain layer - Text-to-record pipeline pieces

pub mod date;
pub mod markup;
pub mod mood;
pub mod record;
pub mod text;

pub use markup::{parse_page, MarkupParser, ParsedPage};
pub use mood::{Classification, MoodClassifier, MoodPool, MoodSource};
pub use record::{DedupKey, JournalEntry, KeyLedger, Record};
