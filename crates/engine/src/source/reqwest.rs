use std::time::Duration;

use async_trait::async_trait;
use folio_types::CatalogPage;
use url::Url;

use super::CatalogSource;
use crate::error::{CatalogError, Result};

pub const DEFAULT_CATALOG_URL: &str = "https://gutendex.com/books";

/// Fetches the catalog listing with a single HTTP GET.
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpCatalogSource {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Like [`HttpCatalogSource::new`] but every request is aborted after `timeout`.
    pub fn with_timeout(url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Transport {
                url: url.to_string(),
                source: Some(eyre::Report::new(e)),
            })?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<CatalogPage> {
        tracing::debug!("Executing HTTP request: method=GET, url={}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        decode_page(&body)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

impl HttpCatalogSource {
    fn transport_error(&self, error: reqwest::Error) -> CatalogError {
        CatalogError::Transport {
            url: self.url.to_string(),
            source: Some(eyre::Report::new(error)),
        }
    }
}

/// Decode a listing response body.
pub(crate) fn decode_page(body: &[u8]) -> Result<CatalogPage> {
    serde_json::from_slice(body).map_err(|e| CatalogError::MalformedPayload {
        message: format!("invalid catalog listing at line {} column {}", e.line(), e.column()),
        source: Some(eyre::Report::new(e)),
    })
}
