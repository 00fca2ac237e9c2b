use glasnik::nlu::{EntityExtractor, EntitySet, NluConfig};

fn extractor() -> EntityExtractor {
    EntityExtractor::new(&NluConfig::default()).unwrap()
}

#[test]
fn test_explicit_filename() {
    let e = extractor().extract("posalji testnik.pdf");
    assert_eq!(e.name_guess.as_deref(), Some("testnik.pdf"));
    assert!(!e.wants_newest);
}

#[test]
fn test_filename_after_fillers_and_with_separators() {
    let x = extractor();
    assert_eq!(
        x.extract("daj mi testnik.pdf").name_guess.as_deref(),
        Some("testnik.pdf")
    );
    assert_eq!(
        x.extract("pošalji izvjestaj_q3-final.XLSX").name_guess.as_deref(),
        Some("izvjestaj_q3-final.xlsx")
    );
    assert_eq!(
        x.extract("otvori sliku nacrt.jpeg").name_guess.as_deref(),
        Some("sliku nacrt.jpeg")
    );
}

#[test]
fn test_filename_keeps_leading_document_words() {
    let e = extractor().extract("pošalji ponudu 001.pdf");
    assert_eq!(e.name_guess.as_deref(), Some("ponudu 001.pdf"));
}

#[test]
fn test_class_and_number_with_marker() {
    let e = extractor().extract("odaberi ponudu broj 001");
    assert_eq!(e.name_guess.as_deref(), Some("ponuda 001"));
    assert_eq!(e.number_guess.as_deref(), Some("001"));
}

#[test]
fn test_class_and_number_abbreviated_marker() {
    let e = extractor().extract("pošalji račun br. 55");
    assert_eq!(e.name_guess.as_deref(), Some("racun 55"));
}

#[test]
fn test_class_with_number_word_is_synthesized() {
    let e = extractor().extract("pošalji otpremnicu tri");
    assert_eq!(e.number_guess.as_deref(), Some("3"));
    assert_eq!(e.name_guess.as_deref(), Some("otpremnica 3"));
}

#[test]
fn test_adjacent_number_beats_synthesis() {
    // first class noun has no number, the second one does
    let e = extractor().extract("ponuda ili račun 12");
    assert_eq!(e.name_guess.as_deref(), Some("racun 12"));
}

#[test]
fn test_digits_win_over_number_words() {
    let e = extractor().extract("pošalji dva dokumenta broj 12");
    assert_eq!(e.number_guess.as_deref(), Some("12"));
    assert_eq!(e.name_guess, None);
}

#[test]
fn test_number_word_alone() {
    let e = extractor().extract("odaberi četiri");
    assert_eq!(e.number_guess.as_deref(), Some("4"));
    assert_eq!(e.name_guess, None);
}

#[test]
fn test_long_numbers_are_not_numbers() {
    let e = extractor().extract("pošalji 123456");
    assert_eq!(e.number_guess, None);
}

#[test]
fn test_newest_flag() {
    let e = extractor().extract("posalji najnoviji dokument");
    assert!(e.wants_newest);
    assert_eq!(e.name_guess, None);

    let e = extractor().extract("otvori najzadnju ponudu");
    assert!(e.wants_newest);
    assert_eq!(e.name_guess, None);
}

#[test]
fn test_newest_flag_coexists_with_name() {
    let e = extractor().extract("pošalji najnoviju ponudu 7");
    assert!(e.wants_newest);
    assert_eq!(e.name_guess.as_deref(), Some("ponuda 7"));
}

#[test]
fn test_end_to_end_entities() {
    let e = extractor().extract("pošalji ponudu 001");
    assert_eq!(e.name_guess.as_deref(), Some("ponuda 001"));
    assert!(!e.wants_newest);
}

#[test]
fn test_nothing_found_is_none_not_empty() {
    let x = extractor();
    assert_eq!(x.extract(""), EntitySet::default());
    assert_eq!(x.extract("molim"), EntitySet::default());

    let e = x.extract("pošalji nešto");
    assert_eq!(e.name_guess, None);
    assert_eq!(e.number_guess, None);
}
