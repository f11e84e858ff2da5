//! The run's universe of valid mood labels

use std::collections::btree_set;
use std::collections::BTreeSet;

/// Separator between labels inside one mood column value
pub const MOOD_SEPARATOR: char = ';';

/// Set of canonical mood labels. Case-significant, sorted, read-only once
/// built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodPool {
    labels: BTreeSet<String>,
}

impl MoodPool {
    /// Union of labels found in existing mood column values (each possibly
    /// `;`-joined) and a supplementary label list
    pub fn build<'a, I>(mood_fields: I, supplementary: &[String]) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut labels = BTreeSet::new();

        for field in mood_fields {
            for label in field.split(MOOD_SEPARATOR) {
                let label = label.trim();
                if !label.is_empty() {
                    labels.insert(label.to_string());
                }
            }
        }

        for label in supplementary {
            let label = label.trim();
            if !label.is_empty() {
                labels.insert(label.to_string());
            }
        }

        MoodPool { labels }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Labels in sorted order
    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.labels.iter()
    }
}

impl<'a> IntoIterator for &'a MoodPool {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

/// Parse a supplementary mood list: one label per line, blank lines and
/// `#` comments ignored
pub fn parse_mood_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|line| line.trim().trim_start_matches('\u{feff}'))
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
