//! moodjour - Journal pages to mood-log records
//!
//! Reads exported Portuguese journal pages, resolves their dates, extracts
//! notes and a stated intention, infers up to two mood labels and appends
//! the new entries to a mood-log CSV without duplicating earlier imports.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::MoodjourError;
