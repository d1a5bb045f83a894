use chrono::NaiveDate;
use futures::stream::{self, Stream};
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;

use super::credential::Credential;
use super::download::{build_download_request, build_pdf_request, FilingReference};
use super::extractor::{build_extract_request, validate, ExtractOptions};
use super::full_text::{any_of, build_full_text_request, exact_phrase, wildcard, FullTextQuery};
use super::mapping::{build_mapping_request, MappingDimension};
use super::normalize::{normalize_bytes, normalize_json, normalize_text, TransportOutcome};
use super::query::{build_search_request, cik_query, date_range_query, form_type_query, ticker_query};
use super::transport::{default_transport, HttpRequest, ReqwestTransport, Transport};
use super::types::{FilingsResponse, QueryOptions, RequestOptions};
use super::Endpoint;
use crate::config::{ClientConfig, QUERY_MAX_OFFSET};
use crate::error::Result;

/// Client for the request/response endpoints of the filings API.
///
/// Holds no credential and no per-call state; clones share the transport.
#[derive(Clone)]
pub struct SecApiClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl SecApiClient {
    /// Create a client with its own reqwest transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout, &config.user_agent)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Default configuration over the process-wide shared transport
    pub fn shared() -> Result<Self> {
        Ok(Self::with_transport(ClientConfig::default(), default_transport()?))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send(&self, endpoint: Endpoint, request: HttpRequest) -> TransportOutcome {
        debug!("{}: {} {}", endpoint, request.method, request.redacted_url());
        let outcome = self.transport.send(request).await;
        match &outcome {
            Ok(response) if response.status != 200 => {
                warn!("{} returned status {}", endpoint.display_name(), response.status)
            }
            Err(e) => warn!("{} transport failure: {}", endpoint.display_name(), e),
            _ => {}
        }
        outcome
    }

    /// Search filings with a query-syntax expression
    pub async fn search(
        &self,
        credential: &Credential,
        query: &str,
        options: &QueryOptions,
    ) -> Result<Value> {
        let request =
            build_search_request(&self.config, &self.config.query_url, credential, query, options)?;
        normalize_json(self.send(Endpoint::Query, request).await)
    }

    /// [`search`](Self::search) decoded into typed filings
    pub async fn search_filings(
        &self,
        credential: &Credential,
        query: &str,
        options: &QueryOptions,
    ) -> Result<FilingsResponse> {
        let request =
            build_search_request(&self.config, &self.config.query_url, credential, query, options)?;
        normalize_json(self.send(Endpoint::Query, request).await)
    }

    /// Search the directors & board members index
    pub async fn search_directors(
        &self,
        credential: &Credential,
        query: &str,
        options: &QueryOptions,
    ) -> Result<Value> {
        let request = build_search_request(
            &self.config,
            &self.config.directors_url,
            credential,
            query,
            options,
        )?;
        normalize_json(self.send(Endpoint::Directors, request).await)
    }

    pub async fn search_by_form_type(
        &self,
        credential: &Credential,
        form_type: &str,
        options: &QueryOptions,
    ) -> Result<Value> {
        self.search(credential, &form_type_query(form_type), options).await
    }

    pub async fn search_by_ticker(
        &self,
        credential: &Credential,
        ticker: &str,
        options: &QueryOptions,
    ) -> Result<Value> {
        self.search(credential, &ticker_query(ticker), options).await
    }

    pub async fn search_by_date_range(
        &self,
        credential: &Credential,
        start: NaiveDate,
        end: NaiveDate,
        options: &QueryOptions,
    ) -> Result<Value> {
        self.search(credential, &date_range_query(start, end), options).await
    }

    pub async fn search_by_cik(
        &self,
        credential: &Credential,
        cik: &str,
        options: &QueryOptions,
    ) -> Result<Value> {
        self.search(credential, &cik_query(cik), options).await
    }

    /// Page through query results, advancing `from` by each page's length.
    ///
    /// Ends after an empty or short page, at the service's offset ceiling,
    /// or after yielding the first error.
    pub fn search_pages<'a>(
        &'a self,
        credential: &'a Credential,
        query: &'a str,
        options: QueryOptions,
    ) -> impl Stream<Item = Result<FilingsResponse>> + 'a {
        let start = options.from.unwrap_or(0);
        stream::unfold(Some(start), move |from| {
            let options = options.clone();
            async move {
                let from = from?;
                if from >= QUERY_MAX_OFFSET {
                    return None;
                }
                let page_options = QueryOptions {
                    from: Some(from),
                    ..options
                };
                let size = page_options.size.unwrap_or(self.config.default_page_size);

                match self.search_filings(credential, query, &page_options).await {
                    Ok(page) => {
                        let fetched = page.filings.len() as u32;
                        if fetched == 0 {
                            return None;
                        }
                        let next = (fetched >= size).then_some(from + fetched);
                        Some((Ok(page), next))
                    }
                    Err(e) => Some((Err(e), None)),
                }
            }
        })
    }

    pub async fn full_text_search(
        &self,
        credential: &Credential,
        search: &FullTextQuery,
        options: &RequestOptions,
    ) -> Result<Value> {
        let request = build_full_text_request(&self.config, credential, search, options)?;
        normalize_json(self.send(Endpoint::FullTextSearch, request).await)
    }

    /// Full-text search for `"<phrase>"`, keeping every filter in `filters`
    pub async fn search_exact_phrase(
        &self,
        credential: &Credential,
        phrase: &str,
        filters: &FullTextQuery,
        options: &RequestOptions,
    ) -> Result<Value> {
        let search = filters.with_query(exact_phrase(phrase));
        self.full_text_search(credential, &search, options).await
    }

    /// Full-text search for `<term>*`
    pub async fn search_wildcard(
        &self,
        credential: &Credential,
        term: &str,
        filters: &FullTextQuery,
        options: &RequestOptions,
    ) -> Result<Value> {
        let search = filters.with_query(wildcard(term));
        self.full_text_search(credential, &search, options).await
    }

    /// Full-text search for any of the quoted terms
    pub async fn search_any_of<S: AsRef<str>>(
        &self,
        credential: &Credential,
        terms: &[S],
        filters: &FullTextQuery,
        options: &RequestOptions,
    ) -> Result<Value> {
        let search = filters.with_query(any_of(terms));
        self.full_text_search(credential, &search, options).await
    }

    /// Resolve companies by CIK, ticker, CUSIP, name, exchange, sector or industry
    pub async fn map(
        &self,
        credential: &Credential,
        dimension: MappingDimension,
        value: &str,
        options: &RequestOptions,
    ) -> Result<Value> {
        let request = build_mapping_request(&self.config, credential, dimension, value, options)?;
        normalize_json(self.send(Endpoint::Mapping, request).await)
    }

    /// Extract one section of a 10-K, 10-Q or 8-K.
    ///
    /// Classification and item checks fail before any request is sent.
    pub async fn extract(
        &self,
        credential: &Credential,
        url: &str,
        item: &str,
        options: &ExtractOptions,
    ) -> Result<String> {
        let extraction = validate(url, item, options)?;
        let request =
            build_extract_request(&self.config, credential, &extraction, options.use_auth_header)?;
        normalize_text(self.send(Endpoint::Extractor, request).await)
    }

    /// Raw content of a filing document
    pub async fn download(
        &self,
        credential: &Credential,
        reference: &FilingReference,
    ) -> Result<Vec<u8>> {
        let request = build_download_request(&self.config, credential, reference)?;
        normalize_bytes(self.send(Endpoint::Download, request).await)
    }

    /// A filing document rendered as PDF
    pub async fn generate_pdf(
        &self,
        credential: &Credential,
        reference: &FilingReference,
    ) -> Result<Vec<u8>> {
        let request = build_pdf_request(&self.config, credential, reference)?;
        normalize_bytes(self.send(Endpoint::PdfGenerator, request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::RawResponse;
    use crate::error::{SecApiError, TransportError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and answers with a canned response
    struct RecordingTransport {
        requests: Mutex<Vec<HttpRequest>>,
        status: u16,
        body: &'static str,
    }

    impl RecordingTransport {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                status,
                body,
            })
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(
            &self,
            request: HttpRequest,
        ) -> std::result::Result<RawResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            Ok(RawResponse {
                status: self.status,
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    fn credential() -> Credential {
        Credential::new("test_key").unwrap()
    }

    #[test]
    fn test_shared_client_uses_defaults() {
        let client = SecApiClient::shared().unwrap();
        assert_eq!(client.config(), &ClientConfig::default());
    }

    #[test]
    fn test_search_by_ticker_forwards_options() {
        let transport = RecordingTransport::new(200, r#"{"filings": []}"#);
        let client = SecApiClient::with_transport(ClientConfig::default(), transport.clone());
        let options = QueryOptions {
            from: Some(50),
            size: Some(20),
            ..Default::default()
        };

        tokio_test::block_on(client.search_by_ticker(&credential(), "TSLA", &options)).unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(body["query"], "ticker:TSLA");
        assert_eq!(body["from"], 50);
        assert_eq!(body["size"], 20);
    }

    #[test]
    fn test_extract_validation_never_sends() {
        let transport = RecordingTransport::new(200, "unused");
        let client = SecApiClient::with_transport(ClientConfig::default(), transport.clone());

        let result = tokio_test::block_on(client.extract(
            &credential(),
            "https://x/tsla-10-k_2020.htm",
            "1-1",
            &ExtractOptions::default(),
        ));

        assert!(matches!(result, Err(SecApiError::InvalidItem { .. })));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_oversized_page_never_sends() {
        let transport = RecordingTransport::new(200, "{}");
        let client = SecApiClient::with_transport(ClientConfig::default(), transport.clone());
        let options = QueryOptions {
            size: Some(200),
            ..Default::default()
        };

        let result = tokio_test::block_on(client.search(&credential(), "*", &options));

        assert!(matches!(result, Err(SecApiError::InvalidArgument(_))));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_remote_error_is_returned() {
        let transport = RecordingTransport::new(404, r#"{"error":"not found"}"#);
        let client = SecApiClient::with_transport(ClientConfig::default(), transport);

        let error = tokio_test::block_on(client.map(
            &credential(),
            MappingDimension::Cik,
            "0000000",
            &RequestOptions::default(),
        ))
        .unwrap_err();

        assert_eq!(error.status(), Some(404));
        assert_eq!(error.body_json(), Some(serde_json::json!({"error": "not found"})));
    }
}
