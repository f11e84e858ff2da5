//! Environment: `.env` loading and the remote classifier credential

use crate::domain::mood::parse_mood_list;
use crate::error::{MoodjourError, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding the remote classifier credential
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

fn config_dotenv_path(config_file: Option<&Path>) -> Option<PathBuf> {
    let dir = config_file?.parent()?;
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    Some(dir.join(".env"))
}

/// `.env` candidates in load order: the working directory only (parent
/// directories are never searched), then the config file's directory.
fn dotenv_paths(config_file: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(".env")];
    paths.extend(config_dotenv_path(config_file));
    paths
}

/// Load `.env` from the working directory, then from the config file's
/// directory. Variables already set are left alone.
pub fn load_dotenv(config_file: Option<&Path>) {
    for path in dotenv_paths(config_file) {
        if !path.is_file() {
            continue;
        }
        match dotenvy::from_path(&path) {
            Ok(()) => debug!(path = %path.display(), "loaded .env"),
            Err(err) => debug!(path = %path.display(), error = %err, "ignoring .env"),
        }
    }
}

/// Read the credential from the process environment
pub fn api_key() -> Result<String> {
    credential(env::var(API_KEY_VAR).ok())
}

fn credential(value: Option<String>) -> Result<String> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(MoodjourError::MissingCredential(API_KEY_VAR.to_string())),
    }
}

/// Supplementary mood labels, one per line. A missing or unreadable file
/// contributes nothing.
pub fn load_supplementary_moods(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_mood_list(&contents),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "no supplementary moods");
            Vec::new()
        }
    }
}
