//! # pubmed-abstracts
//!
//! Retrieve bibliographic records from PubMed and extract structured fields
//! (title, journal, year, authors, abstract, identifiers) plus a heuristic
//! "results" excerpt from free-text abstracts.
//!
//! ## Features
//!
//! - **Batch extraction**: Parse an EFetch `PubmedArticleSet` into ordered,
//!   fully populated [`ArticleRecord`]s; missing fields never fail
//! - **Results heuristic**: Locate a results-bearing snippet inside
//!   unstructured abstract text
//! - **E-utilities plumbing**: ESearch and batch EFetch over reqwest
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_abstracts::{PubMedClient, SortOrder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::new();
//!
//!     let records = client
//!         .search_and_fetch("covid-19 vaccine efficacy", 3, Some(&SortOrder::Relevance))
//!         .await?;
//!
//!     for record in records {
//!         println!("{}: {}", record.pmid, record.title);
//!         println!("  {}", record.results_snippet);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! The extraction core is also usable without any network access:
//!
//! ```
//! use pubmed_abstracts::parse_records_from_xml;
//!
//! let xml = "<PubmedArticleSet></PubmedArticleSet>";
//! let records = parse_records_from_xml(xml)?;
//! assert!(records.is_empty());
//! # Ok::<(), pubmed_abstracts::PubMedError>(())
//! ```

pub mod config;
pub mod error;
pub mod pubmed;
pub mod render;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use error::{PubMedError, Result};
pub use pubmed::{
    ArticleRecord, PubMedClient, SortOrder, extract_results_snippet, parse_records_from_xml,
};
pub use render::{render_record, render_records};
