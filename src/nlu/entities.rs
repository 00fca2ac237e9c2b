use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::config::NluConfig;
use super::normalize::{normalize, tokens, StopwordFilter};
use crate::config::ConfigError;

/// Structured values pulled out of an utterance. Absent values are `None`,
/// never empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySet {
    pub name_guess: Option<String>,
    pub wants_newest: bool,
    /// Digits only, e.g. `"001"` or `"3"` for "tri".
    pub number_guess: Option<String>,
}

#[derive(Debug, Clone)]
struct ClassForms {
    canonical: String,
    forms: HashSet<String>,
}

#[derive(Debug, Clone)]
pub struct EntityExtractor {
    stopwords: StopwordFilter,
    newest_stems: Vec<String>,
    number_words: Vec<(String, u32)>,
    classes: Vec<ClassForms>,
    number_markers: HashSet<String>,
    /// Command words that may precede a filename and are not part of it.
    command_words: HashSet<String>,
    digits: Regex,
    filename: Option<Regex>,
}

fn is_short_number(token: &str) -> bool {
    (1..=5).contains(&token.len()) && token.chars().all(|c| c.is_ascii_digit())
}

impl EntityExtractor {
    pub fn new(config: &NluConfig) -> Result<Self, ConfigError> {
        let normalized = |items: &[String]| -> Vec<String> {
            items
                .iter()
                .map(|s| normalize(s))
                .filter(|s| !s.is_empty())
                .collect()
        };

        let classes = config
            .document_classes
            .iter()
            .map(|c| ClassForms {
                canonical: normalize(&c.name),
                forms: normalized(&c.forms).into_iter().chain([normalize(&c.name)]).collect(),
            })
            .collect();

        let command_words = config
            .intents
            .iter()
            .flat_map(|entry| entry.phrases.iter())
            .flat_map(|p| {
                let norm = normalize(p);
                tokens(&norm).into_iter().map(str::to_string).collect::<Vec<_>>()
            })
            .collect();

        let mut extensions = normalized(&config.extensions);
        extensions.sort_by(|a, b| b.len().cmp(&a.len()));
        let filename = if extensions.is_empty() {
            None
        } else {
            let alternation = extensions
                .iter()
                .map(|e| regex::escape(e.trim_start_matches('.')))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"[\w\-]+(?: [\w\-]+)*\.(?:{})\b", alternation);
            Some(
                Regex::new(&pattern)
                    .map_err(|e| ConfigError::Invalid(format!("filename pattern: {}", e)))?,
            )
        };

        let digits = Regex::new(r"\b\d{1,5}\b")
            .map_err(|e| ConfigError::Invalid(format!("digit pattern: {}", e)))?;

        Ok(Self {
            stopwords: StopwordFilter::new(config)?,
            newest_stems: normalized(&config.newest_stems),
            number_words: config
                .number_words
                .iter()
                .map(|n| (normalize(&n.word), n.value))
                .collect(),
            classes,
            number_markers: normalized(&config.number_markers).into_iter().collect(),
            command_words,
            digits,
            filename,
        })
    }

    /// Normalized, stopword-free form of `raw` that extraction runs on.
    pub fn prepare(&self, raw: &str) -> String {
        self.stopwords.strip(&normalize(raw))
    }

    pub fn extract(&self, raw: &str) -> EntitySet {
        let text = self.prepare(raw);
        let words = tokens(&text);

        let wants_newest = words
            .iter()
            .any(|w| self.newest_stems.iter().any(|stem| w.starts_with(stem.as_str())));

        let number_guess = self.number_guess(&text, &words);

        let name_guess = self
            .filename_guess(&text)
            .or_else(|| self.class_guess(&words, number_guess.as_deref()));

        EntitySet {
            name_guess,
            wants_newest,
            number_guess,
        }
    }

    /// Value of a configured number word, as digits.
    pub(crate) fn number_word_value(&self, token: &str) -> Option<u32> {
        self.number_words
            .iter()
            .find(|(word, _)| word == token)
            .map(|(_, value)| *value)
    }

    pub(crate) fn is_newest_marker(&self, token: &str) -> bool {
        self.newest_stems.iter().any(|stem| token.starts_with(stem.as_str()))
    }

    fn number_guess(&self, text: &str, words: &[&str]) -> Option<String> {
        if let Some(m) = self.digits.find(text) {
            return Some(m.as_str().to_string());
        }
        self.number_words
            .iter()
            .find(|(word, _)| words.contains(&word.as_str()))
            .map(|(_, value)| value.to_string())
    }

    fn filename_guess(&self, text: &str) -> Option<String> {
        let m = self.filename.as_ref()?.find(text)?;
        // The match may start with the command ("posalji ponudu 001.pdf").
        let mut parts: Vec<&str> = m.as_str().split(' ').collect();
        while parts.len() > 1 {
            let head = parts[0];
            if self.command_words.contains(head) || self.is_newest_marker(head) {
                parts.remove(0);
            } else {
                break;
            }
        }
        let name = parts.join(" ");
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Base form of the document class `token` inflects, if any.
    pub(crate) fn class_of(&self, token: &str) -> Option<&str> {
        self.classes
            .iter()
            .find(|c| c.forms.contains(token))
            .map(|c| c.canonical.as_str())
    }

    fn class_guess(&self, words: &[&str], number: Option<&str>) -> Option<String> {
        let mut first_class = None;
        for (i, word) in words.iter().enumerate() {
            let Some(class) = self.class_of(word) else {
                continue;
            };
            first_class.get_or_insert(class);

            let mut j = i + 1;
            if words.get(j).is_some_and(|w| self.number_markers.contains(*w)) {
                j += 1;
            }
            if let Some(n) = words.get(j).filter(|w| is_short_number(w)) {
                return Some(format!("{} {}", class, n));
            }
        }

        match (first_class, number) {
            (Some(class), Some(n)) => Some(format!("{} {}", class, n)),
            _ => None,
        }
    }
}
