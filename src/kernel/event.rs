use super::executor::{ExecutionError, ExecutionReport};
use super::state::ActionId;
use crate::documents::KnownDocument;
use crate::nlu::Utterance;

#[derive(Debug, Clone)]
pub enum Event {
    /// External signals from the recognizer or a text box.
    Input(InputEvent),
    DocumentsReplaced(Vec<KnownDocument>),
    DocumentUpserted(KnownDocument),
    DocumentRemoved(String),
    /// Executor finished (reported back by the driver).
    ExecutionFinished {
        action_id: ActionId,
        result: Result<ExecutionReport, ExecutionError>,
    },
    /// Confirmation timer fired.
    ConfirmationExpired { action_id: ActionId },
}

#[derive(Debug, Clone)]
pub struct InputEvent {
    pub source: String,
    pub content: InputContent,
}

#[derive(Debug, Clone)]
pub enum InputContent {
    ListeningStarted,
    /// Recognizer stopped without a finalized utterance.
    ListeningAborted,
    Utterance(Utterance),
}

impl InputEvent {
    pub fn utterance(source: &str, utterance: Utterance) -> Self {
        Self {
            source: source.to_string(),
            content: InputContent::Utterance(utterance),
        }
    }

    /// Typed text, no recognizer confidence.
    pub fn text(source: &str, text: &str) -> Self {
        Self::utterance(source, Utterance::new(text))
    }

    pub fn listening_started(source: &str) -> Self {
        Self {
            source: source.to_string(),
            content: InputContent::ListeningStarted,
        }
    }

    pub fn listening_aborted(source: &str) -> Self {
        Self {
            source: source.to_string(),
            content: InputContent::ListeningAborted,
        }
    }
}

impl From<InputEvent> for Event {
    fn from(input: InputEvent) -> Self {
        Event::Input(input)
    }
}
