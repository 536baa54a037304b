use anyhow::Result;
use pubmed_abstracts::{PubMedClient, SortOrder, render_records};
use tracing_subscriber::EnvFilter;

// Fixed demo invocation; there is no argument surface.
const QUERY: &str = "covid-19 vaccine efficacy";
const MAX_RESULTS: usize = 3;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let client = PubMedClient::new();

    let pmids = client
        .search_articles(QUERY, MAX_RESULTS, Some(&SortOrder::Relevance))
        .await?;
    println!("Found PMIDs: {}", pmids.join(", "));

    let pmid_refs: Vec<&str> = pmids.iter().map(String::as_str).collect();
    let records = client.fetch_records(&pmid_refs).await?;
    print!("{}", render_records(&records));

    Ok(())
}
