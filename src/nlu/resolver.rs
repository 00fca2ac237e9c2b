//! Fuzzy document resolution.
//!
//! Score = (cue words found inside the normalized name)
//!       + 2 if the name equals the cue
//!       + 1 if the name starts with the cue.
//!
//! No length normalization: long names collect more overlap. Callers and
//! tests depend on this exact formula.

use super::normalize::normalize;
use crate::documents::KnownDocument;

/// Relevance of `document` for an already-normalized cue.
pub fn score(normalized_cue: &str, document: &KnownDocument) -> u32 {
    if normalized_cue.is_empty() {
        return 0;
    }
    let name = normalize(&document.name);
    if name.is_empty() {
        return 0;
    }

    let overlap = normalized_cue
        .split(' ')
        .filter(|word| name.contains(word))
        .count() as u32;
    let exact = if name == normalized_cue { 2 } else { 0 };
    let prefix = if name.starts_with(normalized_cue) { 1 } else { 0 };

    overlap + exact + prefix
}

/// Best-scoring document, or `None` when nothing scores above zero.
/// Ties go to the earliest document in `documents`.
pub fn fuzzy_find_doc<'a>(cue: &str, documents: &'a [KnownDocument]) -> Option<&'a KnownDocument> {
    let cue = normalize(cue);
    if cue.is_empty() || documents.is_empty() {
        return None;
    }

    let mut best: Option<(&KnownDocument, u32)> = None;
    for doc in documents {
        let s = score(&cue, doc);
        // Strict comparison keeps the first document on ties.
        if s > 0 && best.map_or(true, |(_, top)| s > top) {
            best = Some((doc, s));
        }
    }
    best.map(|(doc, _)| doc)
}

/// Most recently created document; the earliest in the list wins ties.
pub fn newest(documents: &[KnownDocument]) -> Option<&KnownDocument> {
    let mut best: Option<&KnownDocument> = None;
    for doc in documents {
        if best.map_or(true, |b| doc.created_at > b.created_at) {
            best = Some(doc);
        }
    }
    best
}

/// Documents closest to the cue by Jaro-Winkler similarity, for "did you
/// mean" feedback after a failed resolution.
pub fn nearest_alternatives<'a>(
    cue: &str,
    documents: &'a [KnownDocument],
    limit: usize,
    min_similarity: f64,
) -> Vec<&'a KnownDocument> {
    let cue = normalize(cue);
    if cue.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(usize, f64, &KnownDocument)> = documents
        .iter()
        .enumerate()
        .filter(|(_, d)| !d.name.trim().is_empty())
        .map(|(i, d)| (i, strsim::jaro_winkler(&cue, &normalize(&d.name)), d))
        .filter(|(_, sim, _)| *sim >= min_similarity)
        .collect();

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    ranked.into_iter().take(limit).map(|(_, _, d)| d).collect()
}
