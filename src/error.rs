//! Error types for moodjour

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for moodjour
#[derive(Debug, Error)]
pub enum MoodjourError {
    #[error("Malformed journal page: {0}")]
    MalformedInput(String),

    #[error("Unresolved date in page header: '{0}'")]
    UnresolvedDate(String),

    #[error("Journal entry has no body: {0}")]
    EmptyEntry(String),

    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    #[error("Remote mood classifier unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("No mood labels found (record store: {0})")]
    EmptyMoodPool(PathBuf),

    #[error("Record store not found: {0}")]
    StoreMissing(PathBuf),

    #[error("Entries directory not found: {0}")]
    EntriesNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

impl MoodjourError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MoodjourError::EmptyMoodPool(_) => 2,
            MoodjourError::StoreMissing(_) => 3,
            MoodjourError::EntriesNotFound(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            MoodjourError::EmptyMoodPool(path) => {
                format!(
                    "No mood labels found to classify against (record store: {})\n\n\
                    Suggestions:\n\
                    • Export at least one mood entry so the CSV has a Mood column to learn from\n\
                    • List extra moods in a moods file, one per line (--moods-file)\n\
                    • Check the path passed to --csv",
                    path.display()
                )
            }
            MoodjourError::StoreMissing(path) => {
                format!(
                    "Record store not found: {}\n\n\
                    Suggestions:\n\
                    • Place the exported CSV at that path and run again\n\
                    • Point --csv at an existing export\n\
                    • Use --dry-run to preview without writing",
                    path.display()
                )
            }
            MoodjourError::EntriesNotFound(path) => {
                format!(
                    "Entries directory not found: {}\n\n\
                    Suggestions:\n\
                    • Point --entries at the folder holding the exported .html pages\n\
                    • Set `entries` in the config file",
                    path.display()
                )
            }
            MoodjourError::Config(msg) => {
                if msg.contains("time of day") {
                    format!(
                        "{}\n\n\
                        Expected format: HH:MM AM/PM\n\
                        Example: moodjour import --time \"09:30 PM\"",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using MoodjourError
pub type Result<T> = std::result::Result<T, MoodjourError>;
