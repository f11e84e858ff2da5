//! Output formatting utilities

use crate::application::{ImportReport, SkipReason};
use crate::domain::{MoodPool, MoodSource};

/// Format the end-of-run summary of an import
pub fn format_import_summary(report: &ImportReport, dry_run: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!("Pages scanned: {}\n", report.scanned));
    if dry_run {
        output.push_str(&format!("New rows: {}\n", report.accepted()));
    } else {
        output.push_str(&format!("Rows added: {}\n", report.accepted()));
    }

    for reason in [
        SkipReason::Duplicate,
        SkipReason::UnresolvedDate,
        SkipReason::EmptyEntry,
        SkipReason::Malformed,
        SkipReason::Unreadable,
    ] {
        let count = report.skipped_for(reason);
        if count > 0 {
            output.push_str(&format!("Skipped ({}): {}\n", reason, count));
        }
    }

    for source in [MoodSource::Heuristic, MoodSource::Remote, MoodSource::Unassigned] {
        let count = report.from_source(source);
        if count > 0 {
            output.push_str(&format!("Moods ({}): {}\n", source.label(), count));
        }
    }

    output
}

/// Format the mood pool, one label per line
pub fn format_mood_list(pool: &MoodPool) -> String {
    if pool.is_empty() {
        return "No moods found".to_string();
    }

    let mut output = String::new();
    for label in pool {
        output.push_str(label);
        output.push('\n');
    }
    output
}
