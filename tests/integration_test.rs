use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use serde_json::json;

use sec_api::api::download::FilingReference;
use sec_api::api::extractor::{ExtractOptions, FilingType};
use sec_api::api::full_text::FullTextQuery;
use sec_api::api::mapping::MappingDimension;
use sec_api::api::types::{QueryOptions, RequestOptions};
use sec_api::error::TransportError;
use sec_api::{ClientConfig, Credential, SecApiClient, SecApiError};

fn credential() -> Credential {
    Credential::new("test_key").unwrap()
}

fn client_for(server: &Server) -> SecApiClient {
    SecApiClient::new(ClientConfig::with_base_url(&server.url())).unwrap()
}

#[test]
fn test_client_config_defaults() {
    let client = SecApiClient::new(ClientConfig::default()).unwrap();
    assert_eq!(client.config().default_page_size, 50);
    assert!(client.config().use_auth_header);
}

#[tokio::test]
async fn test_query_search_header_mode() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("authorization", "test_key")
        .match_body(Matcher::Json(json!({
            "query": "formType:\"10-K\"",
            "from": 0,
            "size": 50,
            "sort": [{"filedAt": {"order": "desc"}}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"total": {"value": 1, "relation": "eq"}, "filings": [{"ticker": "TSLA"}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let value = client
        .search_by_form_type(&credential(), "10-K", &QueryOptions::default())
        .await
        .unwrap();

    assert_eq!(value["filings"][0]["ticker"], "TSLA");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_query_search_token_mode() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_query(Matcher::UrlEncoded("token".to_string(), "test_key".to_string()))
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::PartialJson(json!({"query": "cik:1318605"})))
        .with_status(200)
        .with_body(r#"{"filings": []}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let options = QueryOptions {
        use_auth_header: Some(false),
        ..Default::default()
    };
    let response = client
        .search_filings(&credential(), "cik:1318605", &options)
        .await
        .unwrap();

    assert!(response.filings.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_directors_search() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/directors-and-board-members")
        .match_body(Matcher::PartialJson(json!({"query": "ticker:AMZN", "size": 10})))
        .with_status(200)
        .with_body(r#"{"data": [{"ticker": "AMZN", "directors": []}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let options = QueryOptions {
        size: Some(10),
        ..Default::default()
    };
    let value = client
        .search_directors(&credential(), "ticker:AMZN", &options)
        .await
        .unwrap();

    assert_eq!(value["data"][0]["ticker"], "AMZN");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_remote_error_normalized() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/mapping/ticker/NOPE")
        .with_status(404)
        .with_body(r#"{"error":"not found"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let error = client
        .map(&credential(), MappingDimension::Ticker, "NOPE", &RequestOptions::default())
        .await
        .unwrap_err();

    match &error {
        SecApiError::Remote { status, .. } => assert_eq!(*status, 404),
        other => panic!("Expected Remote error, got {:?}", other),
    }
    assert_eq!(error.body_json(), Some(json!({"error": "not found"})));
}

#[tokio::test]
async fn test_rate_limit_not_special_cased() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(429)
        .with_body("Too Many Requests")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let error = client
        .search(&credential(), "*", &QueryOptions::default())
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(429));
    assert!(error.is_retryable());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transport_failure_surfaces() {
    let client = SecApiClient::new(ClientConfig::with_base_url("http://127.0.0.1:1")).unwrap();
    let error = client
        .search(&credential(), "*", &QueryOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, SecApiError::Transport(TransportError::Http(_))));
}

#[tokio::test]
async fn test_transport_failure_hides_token() {
    let client = SecApiClient::new(ClientConfig::with_base_url("http://127.0.0.1:1")).unwrap();
    let credential = Credential::new("super-secret-key").unwrap();
    let options = QueryOptions {
        use_auth_header: Some(false),
        ..Default::default()
    };

    let error = client.search(&credential, "*", &options).await.unwrap_err();

    assert!(matches!(error, SecApiError::Transport(_)));
    assert!(!error.to_string().contains("super-secret-key"), "{}", error);
    assert!(!format!("{:?}", error).contains("super-secret-key"));
}

#[tokio::test]
async fn test_pdf_transport_failure_hides_token() {
    let client = SecApiClient::new(ClientConfig::with_base_url("http://127.0.0.1:1")).unwrap();
    let credential = Credential::new("super-secret-key").unwrap();
    let reference = FilingReference::url(
        "https://www.sec.gov/Archives/edgar/data/1318605/000156459021004599/tsla-10k_20201231.htm",
    );

    let error = client.generate_pdf(&credential, &reference).await.unwrap_err();

    assert!(matches!(error, SecApiError::Transport(TransportError::Http(_))));
    assert!(!error.to_string().contains("super-secret-key"), "{}", error);
}

#[tokio::test]
async fn test_full_text_exact_phrase_keeps_filters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/full-text-search")
        .match_body(Matcher::Json(json!({
            "query": "\"substantial doubt\"",
            "formTypes": ["10-K"],
            "startDate": "2021-01-01",
            "page": "2"
        })))
        .with_status(200)
        .with_body(r#"{"total": {"value": 0}, "filings": []}"#)
        .create_async()
        .await;

    let filters = FullTextQuery {
        form_types: vec!["10-K".to_string()],
        start_date: chrono::NaiveDate::from_ymd_opt(2021, 1, 1),
        page: Some(2),
        ..Default::default()
    };
    let client = client_for(&server);
    client
        .search_exact_phrase(&credential(), "substantial doubt", &filters, &RequestOptions::default())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_full_text_any_of() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/full-text-search")
        .match_body(Matcher::Json(json!({"query": "\"lithium\" OR \"cobalt\""})))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .search_any_of(
            &credential(),
            &["lithium", "cobalt"],
            &FullTextQuery::default(),
            &RequestOptions::default(),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_extract_inferred_annual_report() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/extractor")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("url".to_string(), "https://x/tsla-10-k_2020.htm".to_string()),
            Matcher::UrlEncoded("item".to_string(), "1A".to_string()),
            Matcher::UrlEncoded("type".to_string(), "text".to_string()),
        ]))
        .match_header("authorization", "test_key")
        .with_status(200)
        .with_body("Item 1A. Risk Factors ...")
        .create_async()
        .await;

    let client = client_for(&server);
    let section = client
        .extract(&credential(), "https://x/tsla-10-k_2020.htm", "1A", &ExtractOptions::default())
        .await
        .unwrap();

    assert!(section.starts_with("Item 1A."));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_extract_forced_current_report() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/extractor")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("item".to_string(), "1-1".to_string()),
            Matcher::UrlEncoded("filingType".to_string(), "8-K".to_string()),
        ]))
        .with_status(200)
        .with_body("Item 1.01 Entry into a Material Definitive Agreement")
        .create_async()
        .await;

    let options = ExtractOptions {
        force_filing_type: Some("8-K".parse::<FilingType>().unwrap()),
        ..Default::default()
    };
    let client = client_for(&server);
    let section = client
        .extract(&credential(), "https://x/foo.htm", "1-1", &options)
        .await
        .unwrap();

    assert!(section.contains("Material Definitive Agreement"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_extract_unknown_type_never_sends() {
    let mut server = Server::new_async().await;
    let mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;

    let client = client_for(&server);
    let error = client
        .extract(&credential(), "https://x/foo.htm", "1A", &ExtractOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, SecApiError::UnknownFilingType { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_download_returns_raw_bytes() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/archive/1318605/000156459021004599/tsla-10k_20201231.htm")
        .match_header("authorization", "test_key")
        .with_status(200)
        .with_body("<html><body>10-K</body></html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let reference =
        FilingReference::parts("1318605", "0001564590-21-004599", "tsla-10k_20201231.htm");
    let bytes = client.download(&credential(), &reference).await.unwrap();

    assert_eq!(bytes, b"<html><body>10-K</body></html>".to_vec());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_pdf_uses_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/filing-reader")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("token".to_string(), "test_key".to_string()),
            Matcher::UrlEncoded(
                "url".to_string(),
                "https://www.sec.gov/Archives/edgar/data/1318605/000156459021004599/tsla-10k_20201231.htm"
                    .to_string(),
            ),
        ]))
        .with_status(200)
        .with_body(b"%PDF-1.7".to_vec())
        .create_async()
        .await;

    let client = client_for(&server);
    let reference = FilingReference::url(
        "https://www.sec.gov/Archives/edgar/data/1318605/000156459021004599/tsla-10k_20201231.htm",
    );
    let pdf = client.generate_pdf(&credential(), &reference).await.unwrap();

    assert!(pdf.starts_with(b"%PDF"));
    mock.assert_async().await;
}
