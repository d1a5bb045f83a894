use thiserror::Error;

/// Failure raised by the transport layer itself (no response was obtained).
///
/// The library never inspects or rewrites these; they are handed to the
/// caller exactly as the underlying HTTP or WebSocket client produced them.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP transport failure: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WebSocket transport failure: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Raised by caller-supplied [`Transport`](crate::api::transport::Transport) implementations.
    #[error("{0}")]
    Custom(String),
}

#[derive(Debug, Error)]
pub enum SecApiError {
    #[error("API key missing. Pass a non-empty credential to every request.")]
    MissingCredential,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cannot determine filing type from URL: {url}")]
    UnknownFilingType { url: String },

    #[error("Invalid item '{item}' for filing type {filing_type}")]
    InvalidItem { item: String, filing_type: String },

    #[error("Invalid return type '{0}'. Expected 'text' or 'html'.")]
    InvalidReturnType(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("API error ({status}): {body}")]
    Remote { status: u16, body: String },

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to decode stream frame: {source}")]
    StreamDecode {
        frame: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SecApiError {
    /// Build a remote error from a status code and raw body bytes
    pub fn remote(status: u16, body: &[u8]) -> Self {
        Self::Remote {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// HTTP status of a remote error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Remote error body decoded as JSON, when it is JSON
    pub fn body_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::Remote { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// True for errors detected before any network call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential
                | Self::InvalidArgument(_)
                | Self::UnknownFilingType { .. }
                | Self::InvalidItem { .. }
                | Self::InvalidReturnType(_)
        )
    }

    /// Get user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingCredential => Some(
                "Get an API key at https://sec-api.io and pass it as a Credential.".to_string(),
            ),
            Self::UnknownFilingType { .. } => Some(
                "Set ExtractOptions::force_filing_type when the URL does not name the form."
                    .to_string(),
            ),
            Self::InvalidItem { filing_type, .. } => Some(format!(
                "See FilingType::items() for the sections valid in a {}.",
                filing_type
            )),
            Self::Transport(_) => Some("Check your internet connection and try again.".to_string()),
            Self::Remote { status: 401, .. } | Self::Remote { status: 403, .. } => {
                Some("Check that your API key is valid.".to_string())
            }
            Self::Remote { status: 429, .. } => {
                Some("You've made too many requests. Please wait a moment.".to_string())
            }
            _ => None,
        }
    }

    /// Check if the error is worth retrying.
    ///
    /// The library never retries on its own; this only classifies.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Remote { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SecApiError>;
