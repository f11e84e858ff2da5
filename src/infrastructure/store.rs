//! CSV record store (mood-log export)

use crate::domain::record::{
    DedupKey, KeyLedger, Record, DATE_COLUMN, MOOD_COLUMN, NOTES_COLUMN, REFLECTIONS_COLUMN,
};
use crate::error::{MoodjourError, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Row-oriented store with one header row followed by data rows
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: PathBuf) -> Self {
        RecordStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Non-empty mood column values. A missing store has none.
    pub fn load_mood_fields(&self) -> Result<Vec<String>> {
        let mut fields = Vec::new();
        self.for_each_row(|row| {
            let mood = field(row, MOOD_COLUMN);
            if !mood.is_empty() {
                fields.push(mood.to_string());
            }
        })?;
        Ok(fields)
    }

    /// Dedup keys of every stored row. A missing store has none.
    pub fn load_keys(&self) -> Result<KeyLedger> {
        let mut keys = Vec::new();
        self.for_each_row(|row| {
            if row.is_empty() {
                return;
            }
            keys.push(DedupKey::new(
                field(row, DATE_COLUMN),
                field(row, NOTES_COLUMN),
                field(row, REFLECTIONS_COLUMN),
            ));
        })?;
        Ok(keys.into_iter().collect())
    }

    /// Append records after the existing rows. The store must already exist.
    pub fn append(&self, records: &[Record]) -> Result<usize> {
        if !self.exists() {
            return Err(MoodjourError::StoreMissing(self.path.clone()));
        }

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        if !ends_with_newline(&self.path)? {
            file.write_all(b"\n")?;
        }
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        for record in records {
            writer.write_record(record.to_row())?;
        }
        writer.flush()?;

        Ok(records.len())
    }

    fn for_each_row<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&StringRecord),
    {
        if !self.exists() {
            return Ok(());
        }

        let file = File::open(&self.path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        for row in reader.records() {
            visit(&row?);
        }
        Ok(())
    }
}

/// Whether appending can start a fresh line (an empty file counts)
fn ends_with_newline(path: &Path) -> Result<bool> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Trimmed field, empty when the row is too short
fn field(row: &StringRecord, index: usize) -> &str {
    row.get(index).map(str::trim).unwrap_or("")
}
