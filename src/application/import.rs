//! Import use case
//!
//! Turns a directory of journal pages into new rows of the record store.
//! Pages are prepared in parallel; dedup runs afterwards as a single
//! sequential merge in file name order.

use crate::application::moods::load_pool;
use crate::domain::mood::{MoodClassifier, MoodSource, RemoteClassifier, MAX_MOODS};
use crate::domain::{parse_page, JournalEntry, KeyLedger, Record};
use crate::error::{MoodjourError, Result};
use crate::infrastructure::{EntriesDirectory, OpenAiBackend, PageFile, RecordStore, Settings};
use chrono::NaiveTime;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

/// Options for one import run
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Time of day written into every record's date column
    pub record_time: NaiveTime,

    /// Accept entries whose dedup key is already known
    pub force: bool,

    /// Run everything but leave the store untouched
    pub dry_run: bool,

    /// Worker threads for page preparation (None = rayon default)
    pub jobs: Option<usize>,
}

/// Why a page produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    Unreadable,
    Malformed,
    UnresolvedDate,
    EmptyEntry,
    Duplicate,
}

impl SkipReason {
    pub fn label(self) -> &'static str {
        match self {
            SkipReason::Unreadable => "unreadable",
            SkipReason::Malformed => "malformed",
            SkipReason::UnresolvedDate => "unresolved date",
            SkipReason::EmptyEntry => "empty entry",
            SkipReason::Duplicate => "duplicate",
        }
    }

    fn from_error(err: &MoodjourError) -> Self {
        match err {
            MoodjourError::MalformedInput(_) => SkipReason::Malformed,
            MoodjourError::UnresolvedDate(_) => SkipReason::UnresolvedDate,
            MoodjourError::EmptyEntry(_) => SkipReason::EmptyEntry,
            _ => SkipReason::Unreadable,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of preparing one page, before dedup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Ready { record: Record, source: MoodSource },
    Skipped(SkipReason),
}

/// What an import run did
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub scanned: usize,
    pub records: Vec<Record>,
    pub skipped: BTreeMap<SkipReason, usize>,
    pub sources: BTreeMap<MoodSource, usize>,
}

impl ImportReport {
    pub fn accepted(&self) -> usize {
        self.records.len()
    }

    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn from_source(&self, source: MoodSource) -> usize {
        self.sources.get(&source).copied().unwrap_or(0)
    }

    fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }
}

/// Page-to-record pipeline around one classifier
pub struct ImportService {
    classifier: MoodClassifier,
}

impl ImportService {
    pub fn new(classifier: MoodClassifier) -> Self {
        ImportService { classifier }
    }

    pub fn classifier(&self) -> &MoodClassifier {
        &self.classifier
    }

    /// Parse, date, normalize and classify one page
    pub fn prepare_page(&self, name: &str, raw: &str, record_time: NaiveTime) -> PageOutcome {
        let entry = match parse_page(raw).and_then(|page| JournalEntry::from_page(&page)) {
            Ok(entry) => entry,
            Err(err) => {
                let reason = SkipReason::from_error(&err);
                debug!(entry = name, %reason, error = %err, "skipping page");
                return PageOutcome::Skipped(reason);
            }
        };

        let classification = self.classifier.classify(&entry.combined_text(), name);
        let record = Record::build(&entry, classification.joined(), record_time);
        PageOutcome::Ready {
            record,
            source: classification.source,
        }
    }

    /// Prepare every page on a worker pool, then merge in input order
    /// against the ledger. Accepted keys are added to the ledger.
    pub fn process(
        &self,
        pages: &[PageFile],
        ledger: &mut KeyLedger,
        options: &ImportOptions,
    ) -> Result<ImportReport> {
        let prepare = |page: &PageFile| match page.read() {
            Ok(raw) => self.prepare_page(&page.name, &raw, options.record_time),
            Err(err) => {
                warn!(entry = %page.name, error = %err, "could not read page");
                PageOutcome::Skipped(SkipReason::Unreadable)
            }
        };

        let outcomes: Vec<PageOutcome> = match options.jobs {
            Some(jobs) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .map_err(|e| MoodjourError::Config(format!("Invalid jobs setting: {}", e)))?;
                pool.install(|| pages.par_iter().map(prepare).collect())
            }
            None => pages.par_iter().map(prepare).collect(),
        };

        let names = pages.iter().map(|page| page.name.as_str());
        Ok(merge(names.zip(outcomes), ledger, options.force))
    }
}

/// Single-writer dedup merge
fn merge<'a, I>(outcomes: I, ledger: &mut KeyLedger, force: bool) -> ImportReport
where
    I: IntoIterator<Item = (&'a str, PageOutcome)>,
{
    let mut report = ImportReport::default();

    for (name, outcome) in outcomes {
        report.scanned += 1;
        match outcome {
            PageOutcome::Skipped(reason) => report.skip(reason),
            PageOutcome::Ready { record, source } => {
                if !ledger.admit(record.dedup_key(), force) {
                    debug!(entry = name, "skipping duplicate entry");
                    report.skip(SkipReason::Duplicate);
                    continue;
                }
                *report.sources.entry(source).or_insert(0) += 1;
                report.records.push(record);
            }
        }
    }

    report
}

/// Build the two-tier classifier for a run.
///
/// The remote tier is active unless switched off or the credential is
/// missing; a missing credential is reported once and is not fatal. The
/// neutral fallback follows the switch only.
pub fn build_classifier(settings: &Settings, api_key: Result<String>) -> Result<MoodClassifier> {
    let pool = load_pool(&settings.csv_path, &settings.moods_file)?;
    if pool.is_empty() {
        return Err(MoodjourError::EmptyMoodPool(settings.csv_path.clone()));
    }
    info!(moods = pool.len(), "mood pool ready");

    let remote = if settings.llm_off {
        info!("remote mood classifier switched off");
        None
    } else {
        match api_key {
            Ok(key) => {
                let backend = OpenAiBackend::new(
                    key,
                    settings.llm_model.clone(),
                    settings.llm_endpoint.clone(),
                )?;
                info!(model = backend.model(), "remote mood classifier enabled");
                Some(RemoteClassifier::new(Box::new(backend), MAX_MOODS))
            }
            Err(err) => {
                warn!(error = %err, "remote mood classifier disabled");
                None
            }
        }
    };

    Ok(MoodClassifier::new(pool, remote, settings.llm_off))
}

/// Full import: classifier setup, page discovery, dedup, append
pub fn run_import(
    settings: &Settings,
    options: &ImportOptions,
    api_key: Result<String>,
) -> Result<ImportReport> {
    let store = RecordStore::new(settings.csv_path.clone());
    if !options.dry_run && !store.exists() {
        return Err(MoodjourError::StoreMissing(settings.csv_path.clone()));
    }

    let service = ImportService::new(build_classifier(settings, api_key)?);

    let pages = EntriesDirectory::new(settings.entries_dir.clone()).list_pages()?;
    info!(pages = pages.len(), dir = %settings.entries_dir.display(), "scanning journal pages");

    let mut ledger = store.load_keys()?;
    let report = service.process(&pages, &mut ledger, options)?;

    if options.dry_run {
        info!(rows = report.accepted(), "dry run, store left untouched");
    } else {
        let written = store.append(&report.records)?;
        info!(rows = written, csv = %store.path().display(), "rows appended");
    }

    Ok(report)
}
