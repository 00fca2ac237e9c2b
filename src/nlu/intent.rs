use serde::{Deserialize, Serialize};

use super::config::NluConfig;
use super::normalize::{normalize, tokens};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Send,
    Select,
    Confirm,
    Cancel,
    Help,
    Unknown,
}

/// Ordered phrase table. Each phrase is stored as normalized tokens and
/// matches a contiguous run of utterance tokens.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    table: Vec<(Intent, Vec<Vec<String>>)>,
}

impl IntentClassifier {
    pub fn new(config: &NluConfig) -> Self {
        let table = config
            .intents
            .iter()
            .filter(|entry| entry.intent != Intent::Unknown)
            .map(|entry| {
                let patterns = entry
                    .phrases
                    .iter()
                    .map(|p| {
                        let norm = normalize(p);
                        tokens(&norm).into_iter().map(str::to_string).collect::<Vec<_>>()
                    })
                    .filter(|p: &Vec<String>| !p.is_empty())
                    .collect();
                (entry.intent, patterns)
            })
            .collect();
        Self { table }
    }

    /// Total: every input maps to exactly one intent.
    pub fn classify(&self, raw: &str) -> Intent {
        let normalized = normalize(raw);
        let words = tokens(&normalized);
        self.classify_tokens(&words)
    }

    pub(crate) fn classify_tokens(&self, words: &[&str]) -> Intent {
        for (intent, patterns) in &self.table {
            if patterns.iter().any(|p| contains_run(words, p)) {
                return *intent;
            }
        }
        Intent::Unknown
    }

    /// Tokens belonging to any phrase of `intent`.
    pub(crate) fn vocabulary(&self, intent: Intent) -> impl Iterator<Item = &str> {
        self.table
            .iter()
            .filter(move |(i, _)| *i == intent)
            .flat_map(|(_, patterns)| patterns.iter().flatten().map(String::as_str))
    }
}

fn contains_run(words: &[&str], pattern: &[String]) -> bool {
    if pattern.len() > words.len() {
        return false;
    }
    words
        .windows(pattern.len())
        .any(|w| w.iter().zip(pattern).all(|(a, b)| *a == b.as_str()))
}
