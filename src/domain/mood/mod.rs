//! Mood inference: pool, heuristic tier, remote tier

pub mod heuristic;
pub mod pool;
pub mod remote;

pub use heuristic::{MoodCategory, MAX_MOODS};
pub use pool::{parse_mood_list, MoodPool, MOOD_SEPARATOR};
pub use remote::{CompletionBackend, RemoteClassifier};

/// Which tier produced an entry's moods
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoodSource {
    Heuristic,
    Remote,
    Unassigned,
}

impl MoodSource {
    pub fn label(self) -> &'static str {
        match self {
            MoodSource::Heuristic => "heuristic",
            MoodSource::Remote => "remote",
            MoodSource::Unassigned => "unassigned",
        }
    }
}

/// Ordered labels chosen for one entry; the first is the primary mood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub moods: Vec<String>,
    pub source: MoodSource,
}

impl Classification {
    /// Labels joined the way the record store expects
    pub fn joined(&self) -> String {
        self.moods.join(&MOOD_SEPARATOR.to_string())
    }
}

/// Two-tier classifier: heuristic rules first, remote tier only when the
/// rules produced nothing.
///
/// The neutral fallback of the heuristic tier is only consulted when
/// `allow_fallback` is set, which follows the `--llm-off` switch. A remote
/// tier that is merely unavailable does not enable it.
pub struct MoodClassifier {
    pool: MoodPool,
    remote: Option<RemoteClassifier>,
    allow_fallback: bool,
}

impl MoodClassifier {
    pub fn new(pool: MoodPool, remote: Option<RemoteClassifier>, allow_fallback: bool) -> Self {
        MoodClassifier {
            pool,
            remote,
            allow_fallback,
        }
    }

    pub fn pool(&self) -> &MoodPool {
        &self.pool
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Classify combined title + body text. `label` only names the entry in
    /// log events.
    pub fn classify(&self, text: &str, label: &str) -> Classification {
        let moods = heuristic::classify(text, &self.pool, self.allow_fallback);
        if !moods.is_empty() {
            return Classification {
                moods,
                source: MoodSource::Heuristic,
            };
        }

        let moods = match &self.remote {
            Some(remote) => remote.choose(text, &self.pool, label),
            None => Vec::new(),
        };
        let source = if moods.is_empty() {
            MoodSource::Unassigned
        } else {
            MoodSource::Remote
        };
        Classification { moods, source }
    }
}
