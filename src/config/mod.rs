use serde::{Deserialize, Serialize};

use crate::api::types::SortField;
use crate::error::{Result, SecApiError};

const ENV_PREFIX: &str = "SEC_API";

pub const QUERY_API_URL: &str = "https://api.sec-api.io";
pub const DIRECTORS_API_URL: &str = "https://api.sec-api.io/directors-and-board-members";
pub const FULL_TEXT_SEARCH_URL: &str = "https://efts.sec-api.io";
pub const MAPPING_API_URL: &str = "https://api.sec-api.io/mapping";
pub const EXTRACTOR_API_URL: &str = "https://api.sec-api.io/extractor";
pub const ARCHIVE_URL: &str = "https://archive.sec-api.io";
pub const PDF_GENERATOR_URL: &str = "https://api.sec-api.io/filing-reader";
pub const STREAM_URL: &str = "wss://stream.sec-api.io";

/// Largest `from` offset the query endpoints accept
pub const QUERY_MAX_OFFSET: u32 = 10_000;

/// Defaults shared by every request builder.
///
/// Credentials are deliberately absent: they travel with each call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub query_url: String,
    pub directors_url: String,
    pub full_text_search_url: String,
    pub mapping_url: String,
    pub extractor_url: String,
    pub archive_url: String,
    pub pdf_generator_url: String,
    pub stream_url: String,
    /// Send the credential in the `Authorization` header rather than as `token`
    pub use_auth_header: bool,
    /// Page size used when a query does not name one
    pub default_page_size: u32,
    /// Largest page size the service returns
    pub max_page_size: u32,
    /// Sort applied when a query does not name one
    pub default_sort: Vec<SortField>,
    /// Request timeout in seconds
    pub timeout: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            query_url: QUERY_API_URL.to_string(),
            directors_url: DIRECTORS_API_URL.to_string(),
            full_text_search_url: FULL_TEXT_SEARCH_URL.to_string(),
            mapping_url: MAPPING_API_URL.to_string(),
            extractor_url: EXTRACTOR_API_URL.to_string(),
            archive_url: ARCHIVE_URL.to_string(),
            pdf_generator_url: PDF_GENERATOR_URL.to_string(),
            stream_url: STREAM_URL.to_string(),
            use_auth_header: true,
            default_page_size: 50,
            max_page_size: 50,
            default_sort: vec![SortField::desc("filedAt")],
            timeout: 30,
            user_agent: format!("sec-api-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Load defaults overlaid with `SEC_API_*` environment variables,
    /// e.g. `SEC_API_QUERY_URL` or `SEC_API_USE_AUTH_HEADER=false`.
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| SecApiError::Config(format!("Failed to read environment: {}", e)))?;

        settings
            .try_deserialize::<Self>()
            .map_err(|e| SecApiError::Config(format!("Failed to parse configuration: {}", e)))
    }

    /// Point every HTTP endpoint at one base URL, keeping each endpoint's path.
    ///
    /// Mostly useful for tests and proxies.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            query_url: base.to_string(),
            directors_url: format!("{}/directors-and-board-members", base),
            full_text_search_url: format!("{}/full-text-search", base),
            mapping_url: format!("{}/mapping", base),
            extractor_url: format!("{}/extractor", base),
            archive_url: format!("{}/archive", base),
            pdf_generator_url: format!("{}/filing-reader", base),
            ..Self::default()
        }
    }

    /// Resolve the auth placement for one call
    pub fn auth_header(&self, overridden: Option<bool>) -> bool {
        overridden.unwrap_or(self.use_auth_header)
    }
}
