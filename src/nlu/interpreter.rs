use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::NluConfig;
use super::entities::{EntityExtractor, EntitySet};
use super::intent::{Intent, IntentClassifier};
use super::normalize::{normalize, tokens};
use crate::config::ConfigError;

/// One finalized ASR result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    /// Recognizer confidence in 0.0..=1.0, when the engine reports one.
    pub confidence: Option<f32>,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
        }
    }

    pub fn with_confidence(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence: Some(confidence.clamp(0.0, 1.0)),
        }
    }
}

pub type CommandId = Uuid;

/// Interpreter output for a single utterance. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub id: CommandId,
    /// Normalized text.
    pub text: String,
    pub original_text: String,
    pub intent: Intent,
    pub entities: EntitySet,
    pub confidence: Option<f32>,
    pub timestamp: DateTime<Utc>,
}

/// What a send/select command should be resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionCue {
    /// Explicit filename or class+number guess.
    Name(String),
    /// No name given, user asked for the most recent document.
    Newest,
    /// Leftover content words, number words turned into digits and class
    /// nouns into their base form.
    Text(String),
    /// Nothing to resolve against.
    Empty,
}

/// Classifier + extractor behind one configuration.
#[derive(Debug, Clone)]
pub struct Interpreter {
    classifier: IntentClassifier,
    extractor: EntityExtractor,
}

impl Interpreter {
    pub fn new(config: &NluConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            classifier: IntentClassifier::new(config),
            extractor: EntityExtractor::new(config)?,
        })
    }

    pub fn classify(&self, raw: &str) -> Intent {
        self.classifier.classify(raw)
    }

    pub fn extract(&self, raw: &str) -> EntitySet {
        self.extractor.extract(raw)
    }

    pub fn interpret(&self, utterance: &Utterance) -> Command {
        Command {
            id: Uuid::new_v4(),
            text: normalize(&utterance.text),
            original_text: utterance.text.clone(),
            intent: self.classify(&utterance.text),
            entities: self.extract(&utterance.text),
            confidence: utterance.confidence,
            timestamp: Utc::now(),
        }
    }

    /// Cue priority: name guess, newest flag, residual words.
    pub fn resolution_cue(&self, command: &Command) -> ResolutionCue {
        if let Some(name) = &command.entities.name_guess {
            return ResolutionCue::Name(name.clone());
        }
        if command.entities.wants_newest {
            return ResolutionCue::Newest;
        }

        let prepared = self.extractor.prepare(&command.original_text);
        let command_words: Vec<&str> = self.classifier.vocabulary(command.intent).collect();
        let residual: Vec<String> = tokens(&prepared)
            .into_iter()
            .filter(|t| !command_words.contains(t))
            .map(|t| {
                if let Some(value) = self.extractor.number_word_value(t) {
                    value.to_string()
                } else if let Some(class) = self.extractor.class_of(t) {
                    class.to_string()
                } else {
                    t.to_string()
                }
            })
            .collect();

        if residual.is_empty() {
            ResolutionCue::Empty
        } else {
            ResolutionCue::Text(residual.join(" "))
        }
    }
}
