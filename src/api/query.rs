use chrono::NaiveDate;
use serde_json::{json, Value};
use url::Url;

use super::credential::Credential;
use super::transport::HttpRequest;
use super::types::QueryOptions;
use crate::config::ClientConfig;
use crate::error::{Result, SecApiError};

/// Build the `{query, from, size, sort}` body, filling gaps from `config`.
///
/// Rejects page sizes above `config.max_page_size`.
pub fn search_body(config: &ClientConfig, query: &str, options: &QueryOptions) -> Result<Value> {
    let size = options.size.unwrap_or(config.default_page_size);
    if size > config.max_page_size {
        return Err(SecApiError::InvalidArgument(format!(
            "page size {} exceeds the maximum of {}",
            size, config.max_page_size
        )));
    }
    let sort = options.sort.as_ref().unwrap_or(&config.default_sort);

    Ok(json!({
        "query": query,
        "from": options.from.unwrap_or(0),
        "size": size,
        "sort": sort,
    }))
}

/// POST request against a query-style endpoint
pub fn build_search_request(
    config: &ClientConfig,
    endpoint: &str,
    credential: &Credential,
    query: &str,
    options: &QueryOptions,
) -> Result<HttpRequest> {
    let body = search_body(config, query, options)?;
    let url = Url::parse(endpoint)?;
    Ok(HttpRequest::post(url, body)
        .authorize(credential, config.auth_header(options.use_auth_header)))
}

pub fn form_type_query(form_type: &str) -> String {
    format!("formType:\"{}\"", form_type)
}

pub fn ticker_query(ticker: &str) -> String {
    format!("ticker:{}", ticker)
}

pub fn date_range_query(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "filedAt:[{} TO {}]",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

pub fn cik_query(cik: &str) -> String {
    format!("cik:{}", cik)
}
