use url::Url;

use super::credential::Credential;
use super::transport::HttpRequest;
use crate::config::ClientConfig;
use crate::error::{Result, SecApiError};

const EDGAR_DATA_PREFIX: &str = "https://www.sec.gov/Archives/edgar/data/";

/// Points at one document of one filing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilingReference {
    /// EDGAR URL or a path relative to the archive root
    Url(String),
    Parts {
        cik: String,
        accession_no: String,
        filename: String,
    },
}

impl FilingReference {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    pub fn parts(
        cik: impl Into<String>,
        accession_no: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self::Parts {
            cik: cik.into(),
            accession_no: accession_no.into(),
            filename: filename.into(),
        }
    }

    /// Path below the archive root, e.g. `1318605/000156459021004599/tsla-10k_20201231.htm`
    pub fn archive_path(&self) -> Result<String> {
        let path = match self {
            Self::Url(url) => url
                .strip_prefix(EDGAR_DATA_PREFIX)
                .unwrap_or(url)
                .trim_start_matches('/')
                .to_string(),
            Self::Parts {
                cik,
                accession_no,
                filename,
            } => format!("{}/{}/{}", cik, accession_no.replace('-', ""), filename),
        };

        if path.is_empty() {
            return Err(SecApiError::InvalidArgument(
                "filing reference resolves to an empty path".to_string(),
            ));
        }
        if path.contains("://") {
            return Err(SecApiError::InvalidArgument(format!(
                "'{}' is not an EDGAR archive URL",
                path
            )));
        }
        Ok(path)
    }

    /// Full EDGAR URL of the document
    pub fn edgar_url(&self) -> Result<String> {
        match self {
            Self::Url(url) if url.contains("://") => Ok(url.clone()),
            _ => Ok(format!("{}{}", EDGAR_DATA_PREFIX, self.archive_path()?)),
        }
    }
}

/// GET `{archive_url}/{path}` with header auth (the archive has no token mode)
pub fn build_download_request(
    config: &ClientConfig,
    credential: &Credential,
    reference: &FilingReference,
) -> Result<HttpRequest> {
    let base = config.archive_url.trim_end_matches('/');
    let url = Url::parse(&format!("{}/{}", base, reference.archive_path()?))?;
    Ok(HttpRequest::get(url).authorize(credential, true))
}

/// GET `{pdf_generator_url}?token=..&url=..`; always token auth
pub fn build_pdf_request(
    config: &ClientConfig,
    credential: &Credential,
    reference: &FilingReference,
) -> Result<HttpRequest> {
    let url = Url::parse(&config.pdf_generator_url)?;
    Ok(HttpRequest::get(url)
        .query("token", credential.expose())
        .query("url", &reference.edgar_url()?))
}
