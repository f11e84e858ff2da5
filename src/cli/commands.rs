//! CLI command definitions

use crate::infrastructure::Overrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moodjour")]
#[command(about = "Import journal pages into a mood-log CSV", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: moodjour.toml in the current directory, if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import journal pages as new mood-log rows
    Import {
        /// Record store (exported mood-log CSV)
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,

        /// Directory holding the exported .html pages
        #[arg(long, value_name = "DIR")]
        entries: Option<PathBuf>,

        /// Time of day for every imported record (e.g. "12:00 PM")
        #[arg(long, value_name = "TIME")]
        time: Option<String>,

        /// Run the whole pipeline without writing to the store
        #[arg(long)]
        dry_run: bool,

        /// Import entries even if they are already in the store
        #[arg(short, long)]
        force: bool,

        /// Supplementary mood list, one label per line
        #[arg(long, value_name = "PATH")]
        moods_file: Option<PathBuf>,

        /// Model used by the remote mood classifier
        #[arg(long, value_name = "MODEL")]
        llm_model: Option<String>,

        /// Endpoint of the remote mood classifier
        #[arg(long, value_name = "URL")]
        llm_endpoint: Option<String>,

        /// Disable the remote mood classifier
        #[arg(long)]
        llm_off: bool,

        /// Log remote classifier prompts and replies
        #[arg(long)]
        llm_debug: bool,

        /// Worker threads for page preparation
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// List the mood labels available for classification
    Moods {
        /// Record store (exported mood-log CSV)
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,

        /// Supplementary mood list, one label per line
        #[arg(long, value_name = "PATH")]
        moods_file: Option<PathBuf>,
    },
}

impl Commands {
    /// Command line values that override the config file
    pub fn overrides(&self) -> Overrides {
        match self {
            Commands::Import {
                csv,
                entries,
                time,
                moods_file,
                llm_model,
                llm_endpoint,
                llm_off,
                jobs,
                ..
            } => Overrides {
                csv: csv.clone(),
                entries: entries.clone(),
                time: time.clone(),
                moods_file: moods_file.clone(),
                llm_model: llm_model.clone(),
                llm_endpoint: llm_endpoint.clone(),
                llm_off: *llm_off,
                jobs: *jobs,
            },
            Commands::Moods { csv, moods_file } => Overrides {
                csv: csv.clone(),
                moods_file: moods_file.clone(),
                ..Default::default()
            },
        }
    }

    pub fn llm_debug(&self) -> bool {
        matches!(self, Commands::Import { llm_debug: true, .. })
    }
}
