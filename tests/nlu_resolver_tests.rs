use chrono::{TimeZone, Utc};
use glasnik::nlu::resolver::score;
use glasnik::nlu::{fuzzy_find_doc, nearest_alternatives, newest};
use glasnik::KnownDocument;

fn doc(id: &str, name: &str) -> KnownDocument {
    KnownDocument::new(id, name, Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap())
}

fn doc_at(id: &str, name: &str, day: u32) -> KnownDocument {
    KnownDocument::new(id, name, Utc.with_ymd_and_hms(2024, 3, day, 8, 0, 0).unwrap())
}

#[test]
fn test_zero_overlap_never_matches() {
    let docs = vec![doc("1", "Ponuda 001.pdf"), doc("2", "Racun 55.pdf")];
    assert!(fuzzy_find_doc("zzzznotpresent", &docs).is_none());
}

#[test]
fn test_empty_inputs() {
    let docs = vec![doc("1", "Ponuda 001.pdf")];
    assert!(fuzzy_find_doc("", &docs).is_none());
    assert!(fuzzy_find_doc("   ", &docs).is_none());
    assert!(fuzzy_find_doc("ponuda", &[]).is_none());
}

#[test]
fn test_exact_match_outranks_partial_overlap() {
    let docs = vec![doc("1", "ponuda 001"), doc("2", "ponuda 002")];
    let found = fuzzy_find_doc("ponuda 001", &docs).unwrap();
    assert_eq!(found.id, "1");

    // order does not matter for a strictly better score
    let docs = vec![doc("2", "ponuda 002"), doc("1", "ponuda 001")];
    assert_eq!(fuzzy_find_doc("ponuda 001", &docs).unwrap().id, "1");
}

#[test]
fn test_score_formula() {
    let cue = "ponuda 001";
    // 2 overlap + 2 exact + 1 prefix
    assert_eq!(score(cue, &doc("a", "Ponuda 001")), 5);
    // 2 overlap + 1 prefix
    assert_eq!(score(cue, &doc("b", "Ponuda 001.pdf")), 3);
    // 1 overlap
    assert_eq!(score(cue, &doc("c", "ponuda 002")), 1);
    assert_eq!(score(cue, &doc("d", "Racun 55.pdf")), 0);
}

#[test]
fn test_ties_resolve_to_first_document() {
    let docs = vec![doc("a", "Ponuda A"), doc("b", "Ponuda B")];
    assert_eq!(fuzzy_find_doc("ponuda", &docs).unwrap().id, "a");
}

#[test]
fn test_longer_names_accumulate_overlap() {
    let docs = vec![doc("short", "ponuda"), doc("long", "kopija ponuda 001 final")];
    assert_eq!(fuzzy_find_doc("ponuda 001", &docs).unwrap().id, "long");
}

#[test]
fn test_missing_name_is_no_match() {
    let docs = vec![doc("nameless", ""), doc("2", "Racun 55.pdf")];
    assert_eq!(fuzzy_find_doc("racun", &docs).unwrap().id, "2");
    assert!(fuzzy_find_doc("ponuda", &docs).is_none());
}

#[test]
fn test_diacritics_in_names_and_cue() {
    let docs = vec![doc("1", "Račun 55.pdf")];
    assert_eq!(fuzzy_find_doc("racun 55", &docs).unwrap().id, "1");
    assert_eq!(fuzzy_find_doc("RAČUN", &docs).unwrap().id, "1");
}

#[test]
fn test_end_to_end_lookup() {
    let docs = vec![doc("1", "Ponuda 001.pdf"), doc("2", "Racun 55.pdf")];
    assert_eq!(fuzzy_find_doc("ponuda 001", &docs).unwrap().name, "Ponuda 001.pdf");
}

#[test]
fn test_newest_by_creation_time() {
    let docs = vec![
        doc_at("old", "a", 1),
        doc_at("new", "b", 20),
        doc_at("mid", "c", 10),
        doc_at("new-dup", "d", 20),
    ];
    assert_eq!(newest(&docs).unwrap().id, "new");
    assert!(newest(&[]).is_none());
}

#[test]
fn test_alternatives_for_near_miss() {
    let docs = vec![doc("2", "Racun 55.pdf"), doc("1", "Ponuda 001.pdf")];
    assert!(fuzzy_find_doc("ponudu", &docs).is_none());

    let alternatives = nearest_alternatives("ponudu", &docs, 3, 0.7);
    assert_eq!(alternatives.len(), 1);
    assert_eq!(alternatives[0].id, "1");

    assert!(nearest_alternatives("ponudu", &docs, 0, 0.7).is_empty());
    assert!(nearest_alternatives("", &docs, 3, 0.0).is_empty());
}
