//! Text normalization shared by every stage of the interpreter.
//!
//! `normalize` is total and idempotent: lowercase, fold diacritics to ASCII,
//! collapse whitespace. Stopword removal is a separate step that only the
//! entity extractor applies.

use regex::Regex;

use super::config::NluConfig;
use crate::config::ConfigError;

fn fold_char(c: char, out: &mut String) {
    match c {
        'č' | 'ć' | 'ç' => out.push('c'),
        'ž' => out.push('z'),
        'š' => out.push('s'),
        'đ' => out.push_str("dj"),
        'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' => out.push('a'),
        'è' | 'é' | 'ê' | 'ë' => out.push('e'),
        'ì' | 'í' | 'î' | 'ï' => out.push('i'),
        'ò' | 'ó' | 'ô' | 'ö' | 'õ' => out.push('o'),
        'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
        'ñ' => out.push('n'),
        'ý' | 'ÿ' => out.push('y'),
        other => out.push(other),
    }
}

/// Lowercase, fold diacritics, collapse whitespace and trim.
pub fn normalize(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        fold_char(c, &mut folded);
    }
    collapse_whitespace(&folded)
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Alphanumeric runs of already-normalized text. Punctuation separates tokens.
pub fn tokens(normalized: &str) -> Vec<&str> {
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Removes configured filler words on word boundaries.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    pattern: Option<Regex>,
}

impl StopwordFilter {
    pub fn new(config: &NluConfig) -> Result<Self, ConfigError> {
        let mut words: Vec<String> = config
            .stopwords
            .iter()
            .map(|w| normalize(w))
            .filter(|w| !w.is_empty())
            .collect();
        // Longest first so "molim te" is not shadowed by "molim".
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        words.dedup();

        if words.is_empty() {
            return Ok(Self { pattern: None });
        }

        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"\b(?:{})\b", alternation))
            .map_err(|e| ConfigError::Invalid(format!("stopword pattern: {}", e)))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Expects normalized input; returns it without stopwords, whitespace collapsed.
    pub fn strip(&self, normalized: &str) -> String {
        match &self.pattern {
            Some(re) => collapse_whitespace(&re.replace_all(normalized, " ")),
            None => collapse_whitespace(normalized),
        }
    }
}
