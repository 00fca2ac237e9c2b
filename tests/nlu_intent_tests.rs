use glasnik::nlu::config::IntentPhrases;
use glasnik::nlu::{Intent, IntentClassifier, NluConfig};

fn classifier() -> IntentClassifier {
    IntentClassifier::new(&NluConfig::default())
}

#[test]
fn test_every_synonym_maps_to_its_intent() {
    let config = NluConfig::default();
    let classifier = IntentClassifier::new(&config);

    for entry in &config.intents {
        for phrase in &entry.phrases {
            assert_eq!(
                classifier.classify(phrase),
                entry.intent,
                "phrase {:?} misclassified",
                phrase
            );
        }
    }
}

#[test]
fn test_classification_is_total() {
    let c = classifier();
    for input in ["", "   ", "asdkjh qwe", "🎙️", "1234", "...", "ДОКУМЕНТ"] {
        assert_eq!(c.classify(input), Intent::Unknown, "input {:?}", input);
    }
}

#[test]
fn test_spoken_forms_with_diacritics() {
    let c = classifier();
    assert_eq!(c.classify("Pošalji ponudu 001"), Intent::Send);
    assert_eq!(c.classify("odaberi najnoviji dokument"), Intent::Select);
    assert_eq!(c.classify("Jasan zvuk"), Intent::Confirm);
    assert_eq!(c.classify("PONIŠTI"), Intent::Cancel);
    assert_eq!(c.classify("pomoć"), Intent::Help);
}

#[test]
fn test_whole_word_matching_avoids_embedded_synonyms() {
    let c = classifier();
    // "da" lives inside "dalje", "ne" inside "nedjelja"
    assert_eq!(c.classify("idemo dalje"), Intent::Unknown);
    assert_eq!(c.classify("nedjelja"), Intent::Unknown);
    assert_eq!(c.classify("da"), Intent::Confirm);
}

#[test]
fn test_priority_order_breaks_ties() {
    let c = classifier();
    // send outranks confirm
    assert_eq!(c.classify("da, pošalji ponudu"), Intent::Send);
    // select outranks cancel
    assert_eq!(c.classify("ne, odaberi račun"), Intent::Select);
    // confirm outranks cancel
    assert_eq!(c.classify("da ne"), Intent::Confirm);
}

#[test]
fn test_multi_word_phrase_requires_contiguous_tokens() {
    let c = classifier();
    assert_eq!(c.classify("u redu je"), Intent::Confirm);
    assert_eq!(c.classify("jasan je zvuk"), Intent::Unknown);
}

#[test]
fn test_table_order_is_configurable() {
    let config = NluConfig {
        intents: vec![
            IntentPhrases {
                intent: Intent::Cancel,
                phrases: vec!["ne".to_string()],
            },
            IntentPhrases {
                intent: Intent::Confirm,
                phrases: vec!["da".to_string()],
            },
        ],
        ..NluConfig::default()
    };
    let c = IntentClassifier::new(&config);
    assert_eq!(c.classify("da ne"), Intent::Cancel);
    assert_eq!(c.classify("pošalji"), Intent::Unknown);
}
