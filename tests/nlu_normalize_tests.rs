use glasnik::nlu::normalize::{normalize, tokens, StopwordFilter};
use glasnik::nlu::NluConfig;

#[test]
fn test_diacritics_fold_to_ascii() {
    let out = normalize("Č Ć Ž Š Đ");
    assert_eq!(out, "c c z s dj");
    assert!(out.is_ascii());
}

#[test]
fn test_latin_accents_and_case() {
    assert_eq!(normalize("Café À LA Crème"), "cafe a la creme");
    assert_eq!(normalize("PONIŠTI"), "ponisti");
    assert_eq!(normalize("Pronađi"), "pronadji");
}

#[test]
fn test_whitespace_collapsed_and_trimmed() {
    assert_eq!(normalize("  Pošalji\tPONUDU\n\n 001  "), "posalji ponudu 001");
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   \t\n"), "");
}

#[test]
fn test_normalize_is_idempotent() {
    let samples = [
        "",
        "Pošalji ponudu 001",
        "  Đuro   ŠTEFANIĆ  ",
        "İstanbul ẞtraße",
        "ñandú ÿ ý ç",
        "testnik.pdf",
        "emoji 🎙️ and  tabs\t\t",
        "ДОКУМЕНТ",
    ];
    for s in samples {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
    }
}

#[test]
fn test_tokens_split_on_punctuation() {
    assert_eq!(tokens("ponuda br. 001, molim"), vec!["ponuda", "br", "001", "molim"]);
    assert_eq!(tokens("testnik.pdf"), vec!["testnik", "pdf"]);
    assert!(tokens("").is_empty());
}

#[test]
fn test_stopwords_removed_on_word_boundaries() {
    let filter = StopwordFilter::new(&NluConfig::default()).unwrap();

    assert_eq!(filter.strip("molim te posalji mi ponudu"), "posalji ponudu");
    assert_eq!(filter.strip("ajde daj samo testnik.pdf"), "testnik.pdf");
    // "sada" is a stopword, "sadrzaj" is not touched
    assert_eq!(filter.strip("sada sadrzaj"), "sadrzaj");
    assert_eq!(filter.strip(""), "");
}

#[test]
fn test_empty_stopword_list_only_collapses() {
    let config = NluConfig {
        stopwords: Vec::new(),
        ..NluConfig::default()
    };
    let filter = StopwordFilter::new(&config).unwrap();
    assert_eq!(filter.strip("molim  posalji"), "molim posalji");
}
