//! Heuristic location of the "results" portion of an abstract.
//!
//! Many PubMed abstracts are unstructured free text without section labels.
//! This module makes a best-effort guess at where the results are reported:
//! an explicit results marker when one exists, otherwise the middle
//! sentences of the abstract.

/// Markers tried one at a time; the first marker that occurs anywhere in
/// the text wins, even if a later marker occurs earlier in the text.
const RESULTS_MARKERS: [&str; 3] = ["results:", "results ", "result:"];

/// Characters taken from a marker position onward.
const MARKER_WINDOW: usize = 500;

/// Characters taken from the start when the abstract cannot be split.
const HEAD_WINDOW: usize = 400;

/// Extract a best-effort "results" excerpt from abstract text.
///
/// Always returns a string and never fails, including on empty input.
///
/// # Example
///
/// ```
/// use pubmed_abstracts::extract_results_snippet;
///
/// let abstract_text = "Background. Results: the drug worked in 90% of cases.";
/// let snippet = extract_results_snippet(abstract_text);
/// assert!(snippet.starts_with("Results:"));
/// ```
pub fn extract_results_snippet(abstract_text: &str) -> String {
    if abstract_text.is_empty() {
        return String::new();
    }

    let start_idx = RESULTS_MARKERS
        .iter()
        .find_map(|marker| find_ascii_ignore_case(abstract_text, marker));

    match start_idx {
        Some(start) => take_chars(&abstract_text[start..], MARKER_WINDOW)
            .trim()
            .to_string(),
        None => middle_sentences(abstract_text),
    }
}

/// No explicit marker: take the middle two sentence-like fragments, or the
/// head of the text when there are too few fragments to pick a middle.
fn middle_sentences(text: &str) -> String {
    let sentences: Vec<&str> = text.split(". ").collect();
    if sentences.len() >= 3 {
        let middle = sentences.len() / 2;
        sentences[middle..middle + 2].join(". ").trim().to_string()
    } else {
        take_chars(text, HEAD_WINDOW).trim().to_string()
    }
}

/// Byte index of the first case-insensitive occurrence of an ASCII needle.
///
/// A match always starts on an ASCII byte, so the returned index is a char
/// boundary of the haystack.
fn find_ascii_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Prefix of `s` containing at most `n` characters.
fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
