//! Console rendering of extracted article records.

use crate::pubmed::models::ArticleRecord;

const WRAP_WIDTH: usize = 80;

/// Render a batch of records as a console report, in order.
pub fn render_records(records: &[ArticleRecord]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        out.push_str(&render_record(i + 1, record));
    }
    out
}

/// Render one record with its 1-based position in the result list.
pub fn render_record(index: usize, record: &ArticleRecord) -> String {
    let mut out = String::new();
    out.push_str(&"=".repeat(WRAP_WIDTH));
    out.push('\n');
    out.push_str(&format!("[{}] PMID: {}\n", index, record.pmid));
    out.push_str(&format!("Title: {}\n", record.title));
    out.push_str(&format!("Journal: {} ({})\n", record.journal, record.year));
    if record.authors.is_empty() {
        out.push_str("Authors: n/a\n");
    } else {
        out.push_str(&format!("Authors: {}\n", record.authors.join(", ")));
    }
    if !record.doi.is_empty() {
        out.push_str(&format!("DOI: {}\n", record.doi));
    }
    out.push_str("\nRESULTS (Snippet):\n");
    out.push_str(&fill(&record.results_snippet, WRAP_WIDTH));
    out.push_str("\n\nFULL ABSTRACT:\n");
    out.push_str(&fill(&record.abstract_text, WRAP_WIDTH));
    out.push_str("\n\n");
    out
}

/// Greedy word wrap; collapses whitespace runs, never splits a word.
fn fill(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.chars().count() + 1 + word.chars().count() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ArticleRecord {
        ArticleRecord {
            pmid: "12345678".to_string(),
            title: "A study".to_string(),
            journal: "Nature".to_string(),
            year: "2021".to_string(),
            authors: vec!["Doe, Jane".to_string(), "Smith, John".to_string()],
            abstract_text: "Background. Results: it worked.".to_string(),
            doi: "10.1/x".to_string(),
            results_snippet: "Results: it worked.".to_string(),
        }
    }

    #[test]
    fn test_render_record_layout() {
        let out = render_record(1, &sample_record());
        assert!(out.starts_with(&"=".repeat(80)));
        assert!(out.contains("[1] PMID: 12345678\n"));
        assert!(out.contains("Journal: Nature (2021)\n"));
        assert!(out.contains("Authors: Doe, Jane, Smith, John\n"));
        assert!(out.contains("DOI: 10.1/x\n"));
        assert!(out.contains("RESULTS (Snippet):\nResults: it worked."));
    }

    #[test]
    fn test_empty_authors_render_as_na() {
        let mut record = sample_record();
        record.authors.clear();
        let out = render_record(2, &record);
        assert!(out.contains("Authors: n/a\n"));
    }

    #[test]
    fn test_doi_line_only_when_present() {
        let mut record = sample_record();
        record.doi.clear();
        let out = render_record(1, &record);
        assert!(!out.contains("DOI:"));
    }

    #[test]
    fn test_fill_wraps_at_width() {
        let text = "word ".repeat(40);
        let wrapped = fill(&text, 20);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 20);
        }
        assert!(wrapped.lines().count() > 1);
    }

    #[test]
    fn test_fill_keeps_short_text_on_one_line() {
        assert_eq!(fill("short text", 80), "short text");
    }
}
