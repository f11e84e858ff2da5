//! Remote (language model) mood classification
//!
//! Advisory only: any failure degrades to an empty result for that entry.

use crate::domain::mood::{MoodPool, MOOD_SEPARATOR};
use crate::error::Result;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Most characters of entry text sent in one request
pub const MAX_PROMPT_TEXT_CHARS: usize = 2000;

/// Transport to a text-completion service
pub trait CompletionBackend: Send + Sync {
    /// Send one prompt and return the reply text
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// Asks a completion backend to pick labels from the mood pool
pub struct RemoteClassifier {
    backend: Box<dyn CompletionBackend>,
    max_moods: usize,
}

impl RemoteClassifier {
    pub fn new(backend: Box<dyn CompletionBackend>, max_moods: usize) -> Self {
        RemoteClassifier { backend, max_moods }
    }

    /// Choose at most `max_moods` labels from the pool. Never fails; a
    /// transport error, bad status or unreadable payload yields no labels.
    pub fn choose(&self, text: &str, pool: &MoodPool, label: &str) -> Vec<String> {
        if pool.is_empty() || self.max_moods == 0 {
            return Vec::new();
        }

        let prompt = build_prompt(text, pool, self.max_moods);
        debug!(entry = label, %prompt, "remote mood prompt");

        match self.backend.complete(&prompt) {
            Ok(reply) => {
                debug!(entry = label, reply = reply.trim(), "remote mood reply");
                parse_reply(&reply, pool, self.max_moods)
            }
            Err(err) => {
                warn!(entry = label, error = %err, "remote mood classification failed");
                Vec::new()
            }
        }
    }
}

/// Build the request text: sorted pool plus the first
/// `MAX_PROMPT_TEXT_CHARS` characters of the entry
pub fn build_prompt(text: &str, pool: &MoodPool, max_moods: usize) -> String {
    let snippet: String = text.chars().take(MAX_PROMPT_TEXT_CHARS).collect();
    let moods = pool.iter().map(String::as_str).collect::<Vec<_>>().join(", ");

    format!(
        "Escolha até {} moods da lista e responda APENAS com os nomes \
         separados por ';'. Se nenhum servir, responda vazio.\n\n\
         Lista de moods:\n{}\n\nTexto:\n{}\n",
        max_moods, moods, snippet
    )
}

/// Map a `;`-delimited reply onto canonical pool labels, case-insensitively.
/// Unknown and repeated tokens are dropped; the result is capped.
pub fn parse_reply(reply: &str, pool: &MoodPool, max_moods: usize) -> Vec<String> {
    let by_lowercase: HashMap<String, &String> =
        pool.iter().map(|label| (label.to_lowercase(), label)).collect();

    let mut chosen: Vec<String> = Vec::new();
    for token in reply.trim().split(MOOD_SEPARATOR) {
        if chosen.len() >= max_moods {
            break;
        }
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if let Some(label) = by_lowercase.get(&token.to_lowercase()) {
            if !chosen.contains(label) {
                chosen.push((*label).clone());
            }
        }
    }
    chosen
}
