use chrono::NaiveDate;
use serde_json::{json, Map, Value};
use url::Url;

use super::credential::Credential;
use super::transport::HttpRequest;
use super::types::RequestOptions;
use crate::config::ClientConfig;
use crate::error::Result;

/// Full-text search parameters.
///
/// Optional filters that are `None` (or an empty `form_types`) never
/// appear in the request body. A start date without an end date, or the
/// reverse, is sent as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FullTextQuery {
    pub query: String,
    pub form_types: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub ciks: Option<Vec<String>>,
    pub page: Option<u32>,
}

impl FullTextQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Same filters, different query string
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self.clone()
        }
    }

    pub fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("query".to_string(), json!(self.query));

        if !self.form_types.is_empty() {
            body.insert("formTypes".to_string(), json!(self.form_types));
        }
        if let Some(start) = self.start_date {
            body.insert("startDate".to_string(), json!(format_date(start)));
        }
        if let Some(end) = self.end_date {
            body.insert("endDate".to_string(), json!(format_date(end)));
        }
        if let Some(ciks) = &self.ciks {
            body.insert("ciks".to_string(), json!(ciks));
        }
        if let Some(page) = self.page {
            body.insert("page".to_string(), json!(page.to_string()));
        }

        Value::Object(body)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn build_full_text_request(
    config: &ClientConfig,
    credential: &Credential,
    search: &FullTextQuery,
    options: &RequestOptions,
) -> Result<HttpRequest> {
    let url = Url::parse(&config.full_text_search_url)?;
    Ok(HttpRequest::post(url, search.body())
        .authorize(credential, config.auth_header(options.use_auth_header)))
}

/// `"<phrase>"`
pub fn exact_phrase(phrase: &str) -> String {
    format!("\"{}\"", phrase)
}

/// `<term>*`
pub fn wildcard(term: &str) -> String {
    format!("{}*", term)
}

/// `"a" OR "b" OR ...`
pub fn any_of<S: AsRef<str>>(terms: &[S]) -> String {
    terms
        .iter()
        .map(|term| exact_phrase(term.as_ref()))
        .collect::<Vec<_>>()
        .join(" OR ")
}
