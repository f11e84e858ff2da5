//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod env;
pub mod openai;
pub mod pages;
pub mod store;

pub use config::{FileConfig, Overrides, Settings};
pub use openai::OpenAiBackend;
pub use pages::{EntriesDirectory, PageFile};
pub use store::RecordStore;
