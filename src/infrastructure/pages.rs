//! Journal page discovery

use crate::error::{MoodjourError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions recognised as exported journal pages
const PAGE_EXTENSIONS: [&str; 2] = ["html", "htm"];

/// One page file in the entries directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFile {
    pub name: String,
    pub path: PathBuf,
}

impl PageFile {
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(MoodjourError::Io)
    }
}

/// Flat directory of exported journal pages
#[derive(Debug, Clone)]
pub struct EntriesDirectory {
    root: PathBuf,
}

impl EntriesDirectory {
    pub fn new(root: PathBuf) -> Self {
        EntriesDirectory { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Page files directly inside the directory, sorted by file name
    pub fn list_pages(&self) -> Result<Vec<PageFile>> {
        if !self.root.is_dir() {
            return Err(MoodjourError::EntriesNotFound(self.root.clone()));
        }

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        let mut pages = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_page(entry.path()) {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            pages.push(PageFile {
                name: name.to_string(),
                path: entry.path().to_path_buf(),
            });
        }

        Ok(pages)
    }
}

fn is_page(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            PAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
