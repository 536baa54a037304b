//! Integration tests for search and batch fetch using mocked HTTP responses
//!
//! These tests verify the client plumbing without making real API calls.
//! They use wiremock to simulate NCBI ESearch and EFetch responses.

use pubmed_abstracts::{ClientConfig, PubMedClient, PubMedError, SortOrder};
use tracing_test::traced_test;
use wiremock::matchers::{method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ESEARCH_RESPONSE: &str = r#"{
    "esearchresult": {
        "count": "3",
        "idlist": ["31978945", "33515491", "25760099"]
    }
}"#;

const ESEARCH_ERROR_RESPONSE: &str = r#"{
    "esearchresult": {
        "idlist": [],
        "ERROR": "Invalid db name specified: pubmedx"
    }
}"#;

/// Multi-article XML response for batch fetch testing
const BATCH_EFETCH_RESPONSE: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
    <PubmedArticle>
        <MedlineCitation>
            <PMID Version="1">31978945</PMID>
            <Article>
                <Journal>
                    <Title>Nature</Title>
                    <JournalIssue>
                        <PubDate>
                            <Year>2020</Year>
                        </PubDate>
                    </JournalIssue>
                </Journal>
                <ArticleTitle>A pneumonia outbreak associated with a new coronavirus</ArticleTitle>
                <Abstract>
                    <AbstractText Label="BACKGROUND">A cluster of patients with pneumonia was identified.</AbstractText>
                    <AbstractText Label="RESULTS">The novel virus was isolated in 41 patients.</AbstractText>
                </Abstract>
                <AuthorList>
                    <Author>
                        <LastName>Wu</LastName>
                        <ForeName>Fan</ForeName>
                    </Author>
                    <Author>
                        <LastName>Zhao</LastName>
                        <ForeName>Su</ForeName>
                    </Author>
                </AuthorList>
            </Article>
        </MedlineCitation>
        <PubmedData>
            <ArticleIdList>
                <ArticleId IdType="pubmed">31978945</ArticleId>
                <ArticleId IdType="doi">10.1038/s41586-020-2008-3</ArticleId>
            </ArticleIdList>
        </PubmedData>
    </PubmedArticle>
    <PubmedArticle>
        <MedlineCitation>
            <PMID Version="1">33515491</PMID>
            <Article>
                <Journal>
                    <Title>Lancet Oncology</Title>
                    <JournalIssue>
                        <PubDate>
                            <MedlineDate>2020 Nov-Dec</MedlineDate>
                        </PubDate>
                    </JournalIssue>
                </Journal>
                <ArticleTitle>Cancer treatment advances in 2020</ArticleTitle>
                <Abstract>
                    <AbstractText>Recent advances in cancer treatment have shown promise.</AbstractText>
                </Abstract>
                <AuthorList>
                    <Author>
                        <LastName>Smith</LastName>
                        <ForeName>John</ForeName>
                    </Author>
                </AuthorList>
            </Article>
        </MedlineCitation>
        <PubmedData>
            <ArticleIdList>
                <ArticleId IdType="pubmed">33515491</ArticleId>
            </ArticleIdList>
        </PubmedData>
    </PubmedArticle>
    <PubmedArticle>
        <MedlineCitation>
            <PMID Version="1">25760099</PMID>
            <Article>
                <Journal><Title>Science</Title></Journal>
                <ArticleTitle>CRISPR-Cas9 gene editing technology</ArticleTitle>
            </Article>
        </MedlineCitation>
    </PubmedArticle>
</PubmedArticleSet>"#;

/// Helper to create a client pointing at a mock server
fn create_mock_client(mock_server: &MockServer) -> PubMedClient {
    let config = ClientConfig::new().with_base_url(mock_server.uri());
    PubMedClient::with_config(config)
}

async fn mount_esearch(mock_server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path_regex(r"/esearch\.fcgi.*"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "application/json"),
        )
        .mount(mock_server)
        .await;
}

async fn mount_efetch(mock_server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path_regex(r"/efetch\.fcgi.*"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "application/xml"),
        )
        .mount(mock_server)
        .await;
}

#[tokio::test]
#[traced_test]
async fn test_search_articles_returns_pmids_in_order() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, ESEARCH_RESPONSE).await;

    let client = create_mock_client(&mock_server);
    let pmids = client
        .search_articles("covid-19 vaccine efficacy", 3, Some(&SortOrder::Relevance))
        .await
        .expect("search should succeed");

    assert_eq!(pmids, vec!["31978945", "33515491", "25760099"]);
}

#[tokio::test]
async fn test_search_sends_sort_parameter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"/esearch\.fcgi.*"))
        .and(query_param("sort", "relevance"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ESEARCH_RESPONSE.to_string())
                .insert_header("content-type", "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    client
        .search_articles("crispr", 3, Some(&SortOrder::Relevance))
        .await
        .expect("search should succeed");
}

#[tokio::test]
async fn test_search_empty_query_short_circuits() {
    // No server mounted at all; an empty query must not hit the network
    let config = ClientConfig::new().with_base_url("http://127.0.0.1:1");
    let client = PubMedClient::with_config(config);

    let pmids = client.search_articles("   ", 5, None).await.unwrap();
    assert!(pmids.is_empty());
}

#[tokio::test]
async fn test_search_invalid_json_body_is_json_error() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, "<html>service unavailable</html>").await;

    let client = create_mock_client(&mock_server);
    let result = client.search_articles("crispr", 3, None).await;

    assert!(matches!(result, Err(PubMedError::JsonError(_))));
}

#[tokio::test]
async fn test_search_surfaces_ncbi_error_payload() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, ESEARCH_ERROR_RESPONSE).await;

    let client = create_mock_client(&mock_server);
    let result = client.search_articles("anything", 3, None).await;

    match result {
        Err(PubMedError::ApiError { status, message }) => {
            assert_eq!(status, 200);
            assert!(message.contains("Invalid db name"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
#[traced_test]
async fn test_batch_fetch_extracts_all_fields() {
    let mock_server = MockServer::start().await;
    mount_efetch(&mock_server, BATCH_EFETCH_RESPONSE).await;

    let client = create_mock_client(&mock_server);
    let records = client
        .fetch_records(&["31978945", "33515491", "25760099"])
        .await
        .expect("batch fetch should succeed");

    assert_eq!(records.len(), 3);

    let first = &records[0];
    assert_eq!(first.pmid, "31978945");
    assert_eq!(
        first.title,
        "A pneumonia outbreak associated with a new coronavirus"
    );
    assert_eq!(first.journal, "Nature");
    assert_eq!(first.year, "2020");
    assert_eq!(first.authors, vec!["Wu, Fan", "Zhao, Su"]);
    assert_eq!(first.doi, "10.1038/s41586-020-2008-3");
    assert_eq!(
        first.abstract_text,
        "BACKGROUND: A cluster of patients with pneumonia was identified.\nRESULTS: The novel virus was isolated in 41 patients."
    );
    assert!(first.results_snippet.starts_with("RESULTS: The novel virus"));

    // Second record exercises the Medline date fallback and empty DOI
    let second = &records[1];
    assert_eq!(second.year, "2020 Nov-Dec");
    assert_eq!(second.doi, "");

    // Third record has no abstract, authors, or identifiers
    let third = &records[2];
    assert_eq!(third.pmid, "25760099");
    assert!(third.authors.is_empty());
    assert_eq!(third.abstract_text, "");
    assert_eq!(third.results_snippet, "");
}

#[tokio::test]
async fn test_fetch_records_empty_input() {
    let config = ClientConfig::new().with_base_url("http://127.0.0.1:1");
    let client = PubMedClient::with_config(config);

    let records = client.fetch_records(&[]).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_fetch_records_rejects_bad_pmid() {
    let config = ClientConfig::new().with_base_url("http://127.0.0.1:1");
    let client = PubMedClient::with_config(config);

    let result = client.fetch_records(&["123", "not-a-pmid"]).await;
    match result {
        Err(PubMedError::InvalidPmid { pmid }) => assert_eq!(pmid, "not-a-pmid"),
        other => panic!("expected InvalidPmid, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_records_http_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"/efetch\.fcgi.*"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let result = client.fetch_records(&["31978945"]).await;

    match result {
        Err(PubMedError::ApiError { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_records_malformed_xml_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_efetch(&mock_server, "definitely not xml").await;

    let client = create_mock_client(&mock_server);
    let result = client.fetch_records(&["31978945"]).await;

    assert!(matches!(result, Err(PubMedError::XmlError(_))));
}

#[tokio::test]
#[traced_test]
async fn test_search_and_fetch_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, ESEARCH_RESPONSE).await;
    mount_efetch(&mock_server, BATCH_EFETCH_RESPONSE).await;

    let client = create_mock_client(&mock_server);
    let records = client
        .search_and_fetch("covid-19 vaccine efficacy", 3, Some(&SortOrder::Relevance))
        .await
        .expect("search and fetch should succeed");

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].pmid, "31978945");
    assert_eq!(records[2].title, "CRISPR-Cas9 gene editing technology");
}
