pub mod client;
pub mod credential;
pub mod deserializers;
pub mod download;
pub mod extractor;
pub mod full_text;
pub mod mapping;
pub mod normalize;
pub mod query;
pub mod transport;
pub mod types;

pub use client::SecApiClient;
pub use credential::Credential;

use std::fmt;

/// Endpoints of the filings API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Query API (filings search)
    Query,
    /// Directors & board members search
    Directors,
    /// Full-text search
    FullTextSearch,
    /// CIK / ticker / CUSIP mapping
    Mapping,
    /// Section extractor
    Extractor,
    /// Filing download archive
    Download,
    /// Filing-to-PDF renderer
    PdfGenerator,
    /// Real-time filing stream
    Stream,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Directors => "directors",
            Self::FullTextSearch => "full-text-search",
            Self::Mapping => "mapping",
            Self::Extractor => "extractor",
            Self::Download => "download",
            Self::PdfGenerator => "pdf-generator",
            Self::Stream => "stream",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Query => "Query API",
            Self::Directors => "Directors & Board Members API",
            Self::FullTextSearch => "Full-Text Search API",
            Self::Mapping => "Mapping API",
            Self::Extractor => "Extractor API",
            Self::Download => "Filing Download API",
            Self::PdfGenerator => "PDF Generator API",
            Self::Stream => "Stream API",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
