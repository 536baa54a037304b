use serde::{Deserialize, Serialize};

/// A bibliographic record extracted from an EFetch batch response
///
/// Every field is always present; a field that is missing in the source
/// record comes back as an empty string (or an empty author list) rather
/// than an error.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ArticleRecord {
    /// PubMed ID
    pub pmid: String,
    /// Article title
    pub title: String,
    /// Journal name
    pub journal: String,
    /// Publication year, or the free-form Medline date when no structured
    /// year exists
    pub year: String,
    /// Authors as "Last, First" in citation order
    pub authors: Vec<String>,
    /// All abstract segments joined by newlines, section labels inlined
    pub abstract_text: String,
    /// First DOI listed for the article, empty when none
    pub doi: String,
    /// Heuristic excerpt of the results portion of the abstract
    pub results_snippet: String,
}

/// Sort order for ESearch requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Rank results by relevance to the query (NCBI "Best Match")
    Relevance,
    /// Most recently published first
    PubDate,
}

impl SortOrder {
    /// The value NCBI expects in the `sort` query parameter
    pub fn as_api_param(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::PubDate => "pub_date",
        }
    }
}
