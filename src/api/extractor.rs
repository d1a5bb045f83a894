//! Section extraction: classify the filing, check the requested item
//! against that classification, then build the request. Every check runs
//! before anything touches the network.

use std::fmt;
use std::str::FromStr;
use url::Url;

use super::credential::Credential;
use super::transport::HttpRequest;
use crate::config::ClientConfig;
use crate::error::{Result, SecApiError};

const ANNUAL_REPORT_ITEMS: &[&str] = &[
    "1", "1A", "1B", "1C", "2", "3", "4", "5", "6", "7", "7A", "8", "9", "9A", "9B", "10", "11",
    "12", "13", "14", "15",
];

const QUARTERLY_REPORT_ITEMS: &[&str] = &[
    "part1item1",
    "part1item2",
    "part1item3",
    "part1item4",
    "part2item1",
    "part2item1a",
    "part2item2",
    "part2item3",
    "part2item4",
    "part2item5",
    "part2item6",
];

const CURRENT_REPORT_ITEMS: &[&str] = &[
    "1-1", "1-2", "1-3", "1-4", "1-5", "2-1", "2-2", "2-3", "2-4", "2-5", "2-6", "3-1", "3-2",
    "3-3", "4-1", "4-2", "5-1", "5-2", "5-3", "5-4", "5-5", "5-6", "5-7", "5-8", "6-1", "6-2",
    "6-3", "6-4", "6-5", "6-6", "6-10", "7-1", "8-1", "9-1", "signature",
];

/// Filing classification the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilingType {
    /// 10-K
    AnnualReport,
    /// 10-Q
    QuarterlyReport,
    /// 8-K
    CurrentReport,
}

impl FilingType {
    /// Inference order: first match wins
    const INFERENCE_ORDER: [FilingType; 3] =
        [Self::AnnualReport, Self::QuarterlyReport, Self::CurrentReport];

    pub fn label(&self) -> &'static str {
        match self {
            Self::AnnualReport => "10-K",
            Self::QuarterlyReport => "10-Q",
            Self::CurrentReport => "8-K",
        }
    }

    /// Legal section identifiers for this classification
    pub fn items(&self) -> &'static [&'static str] {
        match self {
            Self::AnnualReport => ANNUAL_REPORT_ITEMS,
            Self::QuarterlyReport => QUARTERLY_REPORT_ITEMS,
            Self::CurrentReport => CURRENT_REPORT_ITEMS,
        }
    }

    pub fn accepts_item(&self, item: &str) -> bool {
        self.items().contains(&item)
    }

    fn url_markers(&self) -> &'static [&'static str] {
        match self {
            Self::AnnualReport => &["10-k", "10k"],
            Self::QuarterlyReport => &["10-q", "10q"],
            Self::CurrentReport => &["8-k", "8k"],
        }
    }

    /// Classify a filing from markers in its URL (case-insensitive)
    pub fn infer(url: &str) -> Result<Self> {
        let lowered = url.to_lowercase();
        Self::INFERENCE_ORDER
            .iter()
            .copied()
            .find(|filing_type| {
                filing_type
                    .url_markers()
                    .iter()
                    .any(|marker| lowered.contains(marker))
            })
            .ok_or_else(|| SecApiError::UnknownFilingType {
                url: url.to_string(),
            })
    }
}

impl fmt::Display for FilingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exact, case-sensitive label match: `10-K`, `10-Q` or `8-K`
impl FromStr for FilingType {
    type Err = SecApiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::INFERENCE_ORDER
            .iter()
            .copied()
            .find(|filing_type| filing_type.label() == s)
            .ok_or_else(|| {
                SecApiError::InvalidArgument(format!(
                    "filing type must be one of 10-K, 10-Q, 8-K; got '{}'",
                    s
                ))
            })
    }
}

/// Rendering of an extracted section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReturnType {
    #[default]
    Text,
    Html,
}

impl ReturnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
        }
    }
}

impl FromStr for ReturnType {
    type Err = SecApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            other => Err(SecApiError::InvalidReturnType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub return_type: ReturnType,
    /// Skip URL inference and use this classification
    pub force_filing_type: Option<FilingType>,
    pub use_auth_header: Option<bool>,
}

/// An extraction request that passed every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedExtraction {
    pub url: String,
    pub item: String,
    pub filing_type: FilingType,
    pub return_type: ReturnType,
    pub forced: bool,
}

pub fn validate(url: &str, item: &str, options: &ExtractOptions) -> Result<ValidatedExtraction> {
    let (filing_type, forced) = match options.force_filing_type {
        Some(forced) => (forced, true),
        None => (FilingType::infer(url)?, false),
    };

    if !filing_type.accepts_item(item) {
        return Err(SecApiError::InvalidItem {
            item: item.to_string(),
            filing_type: filing_type.label().to_string(),
        });
    }

    Ok(ValidatedExtraction {
        url: url.to_string(),
        item: item.to_string(),
        filing_type,
        return_type: options.return_type,
        forced,
    })
}

/// GET `{extractor_url}?url=..&item=..&type=..`, plus `filingType` when forced
pub fn build_extract_request(
    config: &ClientConfig,
    credential: &Credential,
    extraction: &ValidatedExtraction,
    use_auth_header: Option<bool>,
) -> Result<HttpRequest> {
    let url = Url::parse(&config.extractor_url)?;
    let mut request = HttpRequest::get(url)
        .query("url", &extraction.url)
        .query("item", &extraction.item)
        .query("type", extraction.return_type.as_str());
    if extraction.forced {
        request = request.query("filingType", extraction.filing_type.label());
    }

    Ok(request.authorize(credential, config.auth_header(use_auth_header)))
}
