use crate::error::{PubMedError, Result};
use crate::pubmed::models::ArticleRecord;
use crate::pubmed::snippet::extract_results_snippet;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::BufReader;
use std::mem;
use tracing::{debug, instrument};

/// Parse all article records from an EFetch batch XML response.
///
/// Returns one [`ArticleRecord`] per `<PubmedArticle>` element, in document
/// order. A record missing any field still produces a complete structure
/// with empty defaults; the only fatal condition is input that cannot be
/// read as XML at all.
///
/// # Arguments
///
/// * `xml` - The raw XML string from the PubMed EFetch API, containing zero
///   or more articles
///
/// # Example
///
/// ```ignore
/// let xml = r#"<?xml version="1.0"?>
/// <PubmedArticleSet>
///   <PubmedArticle>...</PubmedArticle>
/// </PubmedArticleSet>"#;
///
/// let records = parse_records_from_xml(xml)?;
/// println!("Parsed {} records", records.len());
/// ```
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse_records_from_xml(xml: &str) -> Result<Vec<ArticleRecord>> {
    let mut reader = Reader::from_reader(BufReader::new(xml.as_bytes()));

    let mut records: Vec<ArticleRecord> = Vec::new();
    let mut saw_element = false;
    let mut depth: usize = 0;

    // Per-record fields, reset at each <PubmedArticle>
    let mut pmid = String::new();
    let mut title = String::new();
    let mut journal = String::new();
    let mut year: Option<String> = None;
    let mut medline_date: Option<String> = None;
    let mut authors: Vec<String> = Vec::new();
    let mut abstract_parts: Vec<String> = Vec::new();
    let mut doi = String::new();
    let mut doi_found = false;

    let mut in_article = false;
    let mut in_pmid = false;
    let mut in_article_title = false;
    let mut title_done = false;
    let mut in_journal = false;
    let mut in_journal_title = false;
    let mut journal_done = false;
    let mut in_journal_issue = false;
    let mut in_pub_date = false;
    let mut in_year = false;
    let mut in_medline_date = false;
    let mut in_author = false;
    let mut in_last_name = false;
    let mut in_fore_name = false;
    let mut in_abstract_text = false;
    let mut in_article_id = false;

    let mut current_author_last = String::new();
    let mut current_author_fore = String::new();
    let mut current_segment_label: Option<String> = None;
    let mut current_segment_text = String::new();
    let mut current_id_type = String::new();
    let mut current_id_text = String::new();

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                saw_element = true;
                depth += 1;
                match e.name().as_ref() {
                    b"PubmedArticle" => {
                        in_article = true;
                        pmid.clear();
                        title.clear();
                        title_done = false;
                        journal.clear();
                        journal_done = false;
                        year = None;
                        medline_date = None;
                        authors.clear();
                        abstract_parts.clear();
                        doi.clear();
                        doi_found = false;
                    }
                    b"PMID" if in_article => in_pmid = true,
                    b"ArticleTitle" if in_article && !title_done => in_article_title = true,
                    b"Journal" if in_article => in_journal = true,
                    b"Title" if in_journal && !journal_done => in_journal_title = true,
                    b"JournalIssue" if in_journal => in_journal_issue = true,
                    b"PubDate" if in_journal_issue => in_pub_date = true,
                    b"Year" if in_pub_date && year.is_none() => {
                        in_year = true;
                        year = Some(String::new());
                    }
                    b"MedlineDate" if in_pub_date && medline_date.is_none() => {
                        in_medline_date = true;
                        medline_date = Some(String::new());
                    }
                    b"Author" if in_article => {
                        in_author = true;
                        current_author_last.clear();
                        current_author_fore.clear();
                    }
                    b"LastName" if in_author => in_last_name = true,
                    b"ForeName" if in_author => in_fore_name = true,
                    b"AbstractText" if in_article => {
                        in_abstract_text = true;
                        current_segment_text.clear();
                        current_segment_label = label_attribute(e);
                    }
                    b"ArticleId" if in_article => {
                        in_article_id = true;
                        current_id_text.clear();
                        current_id_type = id_type_attribute(e);
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                saw_element = true;
                match e.name().as_ref() {
                    // An element that is present but empty still counts for
                    // the presence-based fallbacks below
                    b"Year" if in_pub_date && year.is_none() => year = Some(String::new()),
                    b"MedlineDate" if in_pub_date && medline_date.is_none() => {
                        medline_date = Some(String::new());
                    }
                    b"AbstractText" if in_article => {
                        abstract_parts.push(format_segment(label_attribute(e).as_deref(), ""));
                    }
                    b"ArticleId" if in_article && !doi_found => {
                        if id_type_attribute(e) == "doi" {
                            doi_found = true;
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                depth = depth.saturating_sub(1);
                match e.name().as_ref() {
                    b"PubmedArticle" => {
                        if in_article {
                            let abstract_text = abstract_parts.join("\n");
                            let results_snippet = extract_results_snippet(&abstract_text);
                            records.push(ArticleRecord {
                                pmid: mem::take(&mut pmid),
                                title: mem::take(&mut title).trim().to_string(),
                                journal: mem::take(&mut journal).trim().to_string(),
                                year: year.take().or(medline_date.take()).unwrap_or_default(),
                                authors: mem::take(&mut authors),
                                abstract_text,
                                doi: mem::take(&mut doi),
                                results_snippet,
                            });
                            abstract_parts.clear();
                            in_article = false;
                        }
                    }
                    b"PMID" => in_pmid = false,
                    b"ArticleTitle" => {
                        if in_article_title {
                            title_done = true;
                        }
                        in_article_title = false;
                    }
                    b"Journal" => in_journal = false,
                    b"Title" => {
                        if in_journal_title {
                            journal_done = true;
                        }
                        in_journal_title = false;
                    }
                    b"JournalIssue" => in_journal_issue = false,
                    b"PubDate" => {
                        in_pub_date = false;
                        in_year = false;
                        in_medline_date = false;
                    }
                    b"Year" => in_year = false,
                    b"MedlineDate" => in_medline_date = false,
                    b"Author" => {
                        if in_author
                            && (!current_author_last.is_empty()
                                || !current_author_fore.is_empty())
                        {
                            authors
                                .push(format!("{}, {}", current_author_last, current_author_fore));
                        }
                        in_author = false;
                    }
                    b"LastName" => in_last_name = false,
                    b"ForeName" => in_fore_name = false,
                    b"AbstractText" => {
                        if in_abstract_text {
                            abstract_parts.push(format_segment(
                                current_segment_label.as_deref(),
                                &current_segment_text,
                            ));
                            current_segment_label = None;
                            in_abstract_text = false;
                        }
                    }
                    b"ArticleId" => {
                        if in_article_id && !doi_found && current_id_type == "doi" {
                            doi = mem::take(&mut current_id_text);
                            doi_found = true;
                        }
                        in_article_id = false;
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| PubMedError::XmlError(format!("failed to decode XML text: {e}")))?
                    .into_owned();

                if in_abstract_text {
                    current_segment_text.push_str(&text);
                } else if in_article_title {
                    title.push_str(&text);
                } else if in_journal_title {
                    journal.push_str(&text);
                } else if in_year {
                    if let Some(year) = year.as_mut() {
                        year.push_str(&text);
                    }
                } else if in_medline_date {
                    if let Some(date) = medline_date.as_mut() {
                        date.push_str(&text);
                    }
                } else if in_last_name && in_author {
                    current_author_last = text;
                } else if in_fore_name && in_author {
                    current_author_fore = text;
                } else if in_pmid {
                    if pmid.is_empty() {
                        pmid = text;
                    }
                } else if in_article_id {
                    current_id_text.push_str(&text);
                }
            }
            Ok(Event::Eof) => {
                // A document that ends inside an open element was truncated;
                // no partial result may escape
                if depth > 0 {
                    return Err(PubMedError::XmlError(
                        "unexpected end of document inside an open element".to_string(),
                    ));
                }
                break;
            }
            Err(e) => {
                return Err(PubMedError::XmlError(format!("XML parsing error: {e}")));
            }
            _ => {}
        }
        buf.clear();
    }

    if !saw_element {
        return Err(PubMedError::XmlError(
            "no XML elements found in document".to_string(),
        ));
    }

    debug!(records = records.len(), "Completed batch XML parsing");
    Ok(records)
}

/// Format one abstract segment, inlining its section label when present.
fn format_segment(label: Option<&str>, text: &str) -> String {
    let text = text.trim();
    match label {
        Some(label) => format!("{}: {}", label, text),
        None => text.to_string(),
    }
}

fn label_attribute(e: &BytesStart) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"Label" {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}

fn id_type_attribute(e: &BytesStart) -> String {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"IdType" {
            return String::from_utf8_lossy(&attr.value).to_string();
        }
    }
    String::new()
}
