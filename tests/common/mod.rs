#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// Header row of a mood-log export
pub const HEADER: &str = "Date,Mood,Energy,Pleasantness,People,Places,Events,Activities,\
Weather,Sleep,Steps,Exercise,Mindful,Meals,Screen Time,Notes,Reflections,Takeaways\n";

pub fn moodjour_cmd() -> Command {
    let mut cmd = Command::cargo_bin("moodjour").unwrap();
    cmd.env_remove("OPENAI_API_KEY");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a record store holding the header plus `rows`
pub fn write_store(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("HowWeFeelEmotions.csv");
    let mut contents = HEADER.to_string();
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Write one journal page into the default entries directory
pub fn write_page(dir: &Path, name: &str, header: &str, body_html: &str) {
    let entries = dir.join("AppleJournalEntries").join("Entries");
    fs::create_dir_all(&entries).unwrap();
    let page = format!(
        "<!DOCTYPE html><html><head><title>Journal</title></head><body>\
         <div class=\"pageHeader\">{}</div>{}</body></html>",
        header, body_html
    );
    fs::write(entries.join(name), page).unwrap();
}
