use std::fmt;
use std::str::FromStr;
use url::Url;

use super::credential::Credential;
use super::transport::HttpRequest;
use super::types::RequestOptions;
use crate::config::ClientConfig;
use crate::error::{Result, SecApiError};

/// What the mapping endpoint resolves by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingDimension {
    Cik,
    Ticker,
    Cusip,
    Name,
    Exchange,
    Sector,
    Industry,
}

impl MappingDimension {
    pub const ALL: [MappingDimension; 7] = [
        Self::Cik,
        Self::Ticker,
        Self::Cusip,
        Self::Name,
        Self::Exchange,
        Self::Sector,
        Self::Industry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cik => "cik",
            Self::Ticker => "ticker",
            Self::Cusip => "cusip",
            Self::Name => "name",
            Self::Exchange => "exchange",
            Self::Sector => "sector",
            Self::Industry => "industry",
        }
    }
}

impl fmt::Display for MappingDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MappingDimension {
    type Err = SecApiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|dimension| dimension.as_str() == s.to_lowercase())
            .ok_or_else(|| SecApiError::InvalidArgument(format!("unknown mapping dimension '{}'", s)))
    }
}

/// GET `{mapping_url}/{dimension}/{value}`.
///
/// `value` is percent-encoded as a single path segment in both auth modes.
pub fn build_mapping_request(
    config: &ClientConfig,
    credential: &Credential,
    dimension: MappingDimension,
    value: &str,
    options: &RequestOptions,
) -> Result<HttpRequest> {
    let mut url = Url::parse(&config.mapping_url)?;
    url.path_segments_mut()
        .map_err(|_| {
            SecApiError::Config(format!("Mapping URL cannot take a path: {}", config.mapping_url))
        })?
        .pop_if_empty()
        .push(dimension.as_str())
        .push(value);

    Ok(HttpRequest::get(url).authorize(credential, config.auth_header(options.use_auth_header)))
}
