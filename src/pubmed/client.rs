use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::pubmed::models::{ArticleRecord, SortOrder};
use crate::pubmed::parser::parse_records_from_xml;
use crate::pubmed::responses::ESearchResult;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

/// Client for the NCBI E-utilities PubMed endpoints
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a new PubMed client with default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_abstracts::PubMedClient;
    ///
    /// let client = PubMedClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a new PubMed client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_abstracts::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new().with_email("researcher@university.edu");
    /// let client = PubMedClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let base_url = config.effective_base_url().to_string();

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.effective_user_agent())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            config,
        }
    }

    /// Search for articles matching a query string
    ///
    /// Issues an ESearch request and returns the PMIDs of matching
    /// articles, at most `limit` of them, in the order NCBI ranks them.
    ///
    /// # Errors
    ///
    /// * `PubMedError::RequestError` - If the HTTP request fails
    /// * `PubMedError::JsonError` - If the response body is not valid JSON
    /// * `PubMedError::ApiError` - On a non-success HTTP status or an NCBI
    ///   error payload
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_abstracts::{PubMedClient, SortOrder};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let pmids = client
    ///         .search_articles("covid-19 vaccine efficacy", 5, Some(&SortOrder::Relevance))
    ///         .await?;
    ///     println!("Found {} articles", pmids.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, sort), fields(query = %query, limit = limit))]
    pub async fn search_articles(
        &self,
        query: &str,
        limit: usize,
        sort: Option<&SortOrder>,
    ) -> Result<Vec<String>> {
        if query.trim().is_empty() {
            debug!("Empty query provided, returning empty results");
            return Ok(Vec::new());
        }

        let mut url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&retmode=json",
            self.base_url,
            urlencoding::encode(query),
            limit
        );
        if let Some(sort_order) = sort {
            url.push_str(&format!("&sort={}", sort_order.as_api_param()));
        }
        self.append_api_params(&mut url);

        debug!("Making ESearch API request");
        let response = self.get_checked(&url).await?;
        let body = response.text().await?;
        let search_result: ESearchResult = serde_json::from_str(&body)?;

        if let Some(error_msg) = &search_result.esearchresult.error {
            return Err(PubMedError::ApiError {
                status: 200,
                message: format!("NCBI ESearch API error: {error_msg}"),
            });
        }

        info!(
            found = search_result.esearchresult.idlist.len(),
            "ESearch completed"
        );
        Ok(search_result.esearchresult.idlist)
    }

    /// Fetch article records for a list of PMIDs in one batch request
    ///
    /// Issues a single EFetch request with the comma-joined ids and parses
    /// the returned `PubmedArticleSet` into [`ArticleRecord`]s. The order
    /// of the result follows the order of records in the response document.
    ///
    /// # Errors
    ///
    /// * `PubMedError::InvalidPmid` - If any id is not a plain digit string
    /// * `PubMedError::RequestError` - If the HTTP request fails
    /// * `PubMedError::XmlError` - If the response is not parseable XML
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_abstracts::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let records = client.fetch_records(&["31978945", "33515491"]).await?;
    ///     for record in records {
    ///         println!("{}: {}", record.pmid, record.title);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(count = pmids.len()))]
    pub async fn fetch_records(&self, pmids: &[&str]) -> Result<Vec<ArticleRecord>> {
        if pmids.is_empty() {
            return Ok(Vec::new());
        }

        for pmid in pmids {
            if pmid.trim().is_empty() || !pmid.chars().all(|c| c.is_ascii_digit()) {
                warn!(pmid = %pmid, "Invalid PMID format provided");
                return Err(PubMedError::InvalidPmid {
                    pmid: (*pmid).to_string(),
                });
            }
        }

        let mut url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml&rettype=abstract",
            self.base_url,
            pmids.join(",")
        );
        self.append_api_params(&mut url);

        debug!("Making batch EFetch API request");
        let response = self.get_checked(&url).await?;
        let xml_text = response.text().await?;

        let records = parse_records_from_xml(&xml_text)?;
        info!(
            requested = pmids.len(),
            parsed = records.len(),
            "Batch fetch completed"
        );
        Ok(records)
    }

    /// Search for articles and fetch their full records in one call
    pub async fn search_and_fetch(
        &self,
        query: &str,
        limit: usize,
        sort: Option<&SortOrder>,
    ) -> Result<Vec<ArticleRecord>> {
        let pmids = self.search_articles(query, limit, sort).await?;
        let pmid_refs: Vec<&str> = pmids.iter().map(String::as_str).collect();
        self.fetch_records(&pmid_refs).await
    }

    fn append_api_params(&self, url: &mut String) {
        for (key, value) in self.config.build_api_params() {
            url.push('&');
            url.push_str(&key);
            url.push('=');
            url.push_str(&urlencoding::encode(&value));
        }
    }

    async fn get_checked(&self, url: &str) -> Result<reqwest::Response> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
            return Err(PubMedError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        Ok(response)
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_records_empty_input_short_circuits() {
        let client = PubMedClient::new();
        let records = tokio_test::block_on(client.fetch_records(&[])).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_invalid_pmid_rejected_before_any_request() {
        let client = PubMedClient::new();
        let result = tokio_test::block_on(client.fetch_records(&["31978945", "abc"]));
        assert!(matches!(
            result,
            Err(PubMedError::InvalidPmid { pmid }) if pmid == "abc"
        ));
    }
}
