//! Croatian command understanding: normalize → classify → extract → resolve.
//!
//! Everything in here is pure and `Send + Sync`; the stateful part lives in
//! `kernel`.

pub mod config;
pub mod entities;
pub mod intent;
pub mod interpreter;
pub mod normalize;
pub mod resolver;

pub use config::NluConfig;
pub use entities::{EntityExtractor, EntitySet};
pub use intent::{Intent, IntentClassifier};
pub use interpreter::{Command, CommandId, Interpreter, ResolutionCue, Utterance};
pub use normalize::{normalize, StopwordFilter};
pub use resolver::{fuzzy_find_doc, nearest_alternatives, newest};
