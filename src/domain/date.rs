//! Portuguese header date resolution and record date formatting

use crate::error::{MoodjourError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

/// Format used for the configurable time of day, e.g. "12:00 PM"
pub const TIME_OF_DAY_FORMAT: &str = "%I:%M %p";

/// Format of the date column in the record store, e.g. "2024 Sun Mar 3 12:00 PM"
pub const RECORD_DATE_FORMAT: &str = "%Y %a %b %-d %I:%M %p";

/// `<day> de <month> de <year>` inside a lower-cased header line
fn header_date_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(\d{1,2}) de (\p{Ll}+) de (\d{4})").unwrap())
}

/// Month number for a Portuguese month name.
///
/// Accepts lower-case names with or without the cedilla in "março".
pub fn portuguese_month(name: &str) -> Option<u32> {
    let plain = name.replace('ç', "c");
    let month = match plain.as_str() {
        "janeiro" => 1,
        "fevereiro" => 2,
        "marco" => 3,
        "abril" => 4,
        "maio" => 5,
        "junho" => 6,
        "julho" => 7,
        "agosto" => 8,
        "setembro" => 9,
        "outubro" => 10,
        "novembro" => 11,
        "dezembro" => 12,
        _ => return None,
    };
    Some(month)
}

/// Resolve a page header such as "quinta-feira, 3 de março de 2024".
///
/// The weekday is ignored. Unknown months and impossible calendar dates
/// are both `UnresolvedDate`.
pub fn resolve_header_date(header: &str) -> Result<NaiveDate> {
    let lowered = header.trim().to_lowercase();
    let unresolved = || MoodjourError::UnresolvedDate(header.trim().to_string());

    let caps = header_date_regex().captures(&lowered).ok_or_else(unresolved)?;
    let day: u32 = caps[1].parse().map_err(|_| unresolved())?;
    let month = portuguese_month(&caps[2]).ok_or_else(unresolved)?;
    let year: i32 = caps[3].parse().map_err(|_| unresolved())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(unresolved)
}

/// Parse the configured time of day ("12:00 PM")
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), TIME_OF_DAY_FORMAT)
        .map_err(|_| MoodjourError::Config(format!("Invalid time of day: {}", input)))
}

/// Render the record store's date column
pub fn format_record_date(date: NaiveDate, time: NaiveTime) -> String {
    NaiveDateTime::new(date, time)
        .format(RECORD_DATE_FORMAT)
        .to_string()
}
