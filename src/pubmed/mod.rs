//! PubMed record retrieval and extraction
//!
//! This module covers the whole pipeline: searching PubMed via ESearch,
//! fetching abstract-bearing records in a single batch EFetch call, parsing
//! the batch XML into normalized [`ArticleRecord`]s, and locating a
//! best-effort "results" excerpt inside each abstract.

pub mod client;
pub mod models;
pub mod parser;
pub mod responses;
pub mod snippet;

// Re-export public types
pub use client::PubMedClient;
pub use models::{ArticleRecord, SortOrder};
pub use parser::parse_records_from_xml;
pub use snippet::extract_results_snippet;
