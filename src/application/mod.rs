//! Application layer - Use cases and orchestration

pub mod import;
pub mod moods;

pub use import::{
    build_classifier, run_import, ImportOptions, ImportReport, ImportService, PageOutcome,
    SkipReason,
};
pub use moods::load_pool;
