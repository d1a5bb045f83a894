//! The single response rule shared by every request-based operation:
//! status 200 is success, any other status is a remote error, and a
//! transport failure passes through untouched.

use serde::de::DeserializeOwned;

use super::transport::RawResponse;
use crate::error::{Result, SecApiError, TransportError};

pub type TransportOutcome = std::result::Result<RawResponse, TransportError>;

pub fn normalize(outcome: TransportOutcome) -> Result<RawResponse> {
    let response = outcome?;
    if response.status == 200 {
        Ok(response)
    } else {
        Err(SecApiError::remote(response.status, &response.body))
    }
}

/// Normalize, then decode the body as JSON
pub fn normalize_json<T: DeserializeOwned>(outcome: TransportOutcome) -> Result<T> {
    let response = normalize(outcome)?;
    Ok(serde_json::from_slice(&response.body)?)
}

/// Normalize, then return the body as text
pub fn normalize_text(outcome: TransportOutcome) -> Result<String> {
    let response = normalize(outcome)?;
    Ok(String::from_utf8_lossy(&response.body).into_owned())
}

/// Normalize, then return the raw body bytes
pub fn normalize_bytes(outcome: TransportOutcome) -> Result<Vec<u8>> {
    normalize(outcome).map(|response| response.body)
}
