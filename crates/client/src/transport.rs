//! The transport seam.
//!
//! The core never performs retries and never inspects transport detail
//! beyond success or failure; retry policy belongs to whoever implements
//! or wraps [`Transport`]. A [`TransportError`] is always distinguishable
//! from a parsed remote rejection, so a policy layer can retry transport
//! failures safely without risking a duplicated financial transaction.

use async_trait::async_trait;
use url::Url;

use crate::error::TransportError;

/// Sends one rendered request document and returns the raw response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, endpoint: &Url, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;
}

/// HTTP transport backed by `reqwest`.
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Builds a transport from the client configuration (timeout and
    /// User-Agent).
    pub fn new(config: &crate::config::ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(HttpTransport { client })
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: &Url, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .post(endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/xml")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}
