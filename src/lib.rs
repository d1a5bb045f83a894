//! Client for the SEC filings API: query and full-text search, company
//! mapping, section extraction, document downloads, PDF rendering and the
//! real-time filing stream.

pub mod api;
pub mod config;
pub mod error;
pub mod stream;

pub use api::{Credential, SecApiClient};
pub use config::ClientConfig;
pub use error::{Result, SecApiError};
pub use stream::StreamClient;
