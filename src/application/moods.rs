//! Mood pool use case

use crate::domain::MoodPool;
use crate::error::Result;
use crate::infrastructure::env::load_supplementary_moods;
use crate::infrastructure::RecordStore;
use std::path::Path;

/// Union of the store's mood column and the supplementary list.
/// An empty pool is returned as-is; callers decide whether that is fatal.
pub fn load_pool(csv_path: &Path, moods_file: &Path) -> Result<MoodPool> {
    let store = RecordStore::new(csv_path.to_path_buf());
    let fields = store.load_mood_fields()?;
    let supplementary = load_supplementary_moods(moods_file);
    Ok(MoodPool::build(
        fields.iter().map(String::as_str),
        &supplementary,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_pool_unions_sources() {
        let temp = TempDir::new().unwrap();
        let csv = temp.path().join("moods.csv");
        let extra = temp.path().join("moods.txt");
        fs::write(&csv, "Date,Mood\nx,Anxious;Tired\ny,Calm\n").unwrap();
        fs::write(&extra, "# extra\nGrateful\nCalm\n").unwrap();

        let pool = load_pool(&csv, &extra).unwrap();
        let labels: Vec<&String> = pool.iter().collect();
        assert_eq!(labels, vec!["Anxious", "Calm", "Grateful", "Tired"]);
    }

    #[test]
    fn test_load_pool_without_sources_is_empty() {
        let temp = TempDir::new().unwrap();
        let pool = load_pool(&temp.path().join("a.csv"), &temp.path().join("b.txt")).unwrap();
        assert!(pool.is_empty());
    }
}
