use serde::{Deserialize, Serialize};

use super::intent::Intent;

/// Language tables for the interpreter.
///
/// Everything the classifier and extractor match against lives here so a
/// deployment can retune or relocalize without touching code. Entries are
/// normalized at construction time, so diacritics are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NluConfig {
    /// Discourse fillers removed before entity extraction.
    pub stopwords: Vec<String>,
    /// Ordered intent table. Earlier entries win when an utterance matches several.
    pub intents: Vec<IntentPhrases>,
    /// Cardinal number words with their value.
    pub number_words: Vec<NumberWord>,
    /// Token prefixes that mark a "newest document" request.
    pub newest_stems: Vec<String>,
    pub document_classes: Vec<DocumentClass>,
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
    /// Tokens allowed between a class noun and its number ("ponuda broj 5").
    pub number_markers: Vec<String>,
    pub help_examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentPhrases {
    pub intent: Intent,
    pub phrases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberWord {
    pub word: String,
    pub value: u32,
}

/// A document class noun and the inflected forms that refer to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentClass {
    /// Canonical (nominative singular) form used in name guesses.
    pub name: String,
    pub forms: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn phrases(intent: Intent, items: &[&str]) -> IntentPhrases {
    IntentPhrases {
        intent,
        phrases: strings(items),
    }
}

fn class(name: &str, forms: &[&str]) -> DocumentClass {
    DocumentClass {
        name: name.to_string(),
        forms: strings(forms),
    }
}

impl Default for NluConfig {
    fn default() -> Self {
        let number_words = [
            ("nula", 0),
            ("jedan", 1),
            ("jedna", 1),
            ("jedno", 1),
            ("dva", 2),
            ("dvije", 2),
            ("tri", 3),
            ("četiri", 4),
            ("pet", 5),
            ("šest", 6),
            ("sedam", 7),
            ("osam", 8),
            ("devet", 9),
            ("deset", 10),
        ]
        .into_iter()
        .map(|(word, value)| NumberWord {
            word: word.to_string(),
            value,
        })
        .collect();

        Self {
            stopwords: strings(&[
                "molim", "molim te", "daj", "ajde", "hajde", "samo", "znači", "dakle", "ovaj",
                "evo", "mi", "meni", "taj", "to", "ono", "baš", "onda", "pa", "sad", "sada",
                "hm", "hmm", "eee", "ee", "aha", "jel", "li",
            ]),
            intents: vec![
                phrases(
                    Intent::Send,
                    &["pošalji", "pošaljite", "šalji", "proslijedi", "otpremi", "send"],
                ),
                phrases(
                    Intent::Select,
                    &[
                        "odaberi", "izaberi", "označi", "otvori", "pokaži", "prikaži", "nađi",
                        "pronađi", "traži", "select",
                    ],
                ),
                phrases(
                    Intent::Confirm,
                    &[
                        "da", "potvrdi", "potvrđujem", "može", "ok", "okej", "točno", "jasan zvuk",
                        "jasno", "u redu", "slažem se", "izvrši", "yes", "confirm",
                    ],
                ),
                phrases(
                    Intent::Cancel,
                    &[
                        "ne", "nemoj", "odustani", "poništi", "prekini", "otkaži", "zaboravi",
                        "stop", "cancel",
                    ],
                ),
                phrases(
                    Intent::Help,
                    &["pomoć", "upomoć", "što mogu", "što znaš", "kako", "help"],
                ),
            ],
            number_words,
            newest_stems: strings(&["najnovij", "najzadnj", "najsvježij", "posljednj"]),
            document_classes: vec![
                class("ponuda", &["ponuda", "ponudu", "ponude", "ponudi", "ponudom"]),
                class("pozicija", &["pozicija", "poziciju", "pozicije", "poziciji"]),
                class("komad", &["komad", "komada", "komadu"]),
                class("projekt", &["projekt", "projekta", "projektu", "projektom"]),
                class("račun", &["račun", "računa", "računu", "računom"]),
                class(
                    "otpremnica",
                    &["otpremnica", "otpremnicu", "otpremnice", "otpremnici"],
                ),
                class("testnik", &["testnik", "testnika", "testniku"]),
                class(
                    "specifikacija",
                    &["specifikacija", "specifikaciju", "specifikacije", "specifikaciji"],
                ),
            ],
            extensions: strings(&["pdf", "xlsx", "xls", "docx", "png", "jpg", "jpeg"]),
            number_markers: strings(&["br", "broj"]),
            help_examples: strings(&[
                "pošalji ponudu 001",
                "odaberi najnoviji dokument",
                "pošalji testnik.pdf",
                "jasan zvuk (potvrda)",
                "poništi (odustajanje)",
            ]),
        }
    }
}
