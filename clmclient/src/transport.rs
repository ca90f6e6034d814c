//! HTTP transport boundary
//!
//! The client only needs one primitive from its transport: POST a body with a
//! fixed set of headers and an optional timeout, and get back a status code
//! and a text body. [`HttpTransport`] implements it on top of `reqwest`;
//! tests plug in their own [`Transport`].

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Headers sent with every SOAP request
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
    ("content-type", r#"text/xml; charset="utf-8""#),
    ("accept", "text/xml"),
    ("cache-control", "no-cache"),
    ("pragma", "no-cache"),
];

/// Raw HTTP answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Connection-level failure
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// The connection failed or the body could not be read
    #[error("Connection error: {0}")]
    Connection(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Connection(e.to_string())
        }
    }
}

/// Something able to POST a SOAP envelope
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        uri: &str,
        body: Vec<u8>,
        headers: &[(&str, &str)],
        timeout: Option<Duration>,
    ) -> Result<TransportResponse, TransportError>;
}

/// `reqwest` based transport
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a default `reqwest::Client`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with a custom `reqwest::Client`
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        uri: &str,
        body: Vec<u8>,
        headers: &[(&str, &str)],
        timeout: Option<Duration>,
    ) -> Result<TransportResponse, TransportError> {
        let mut request = self.client.post(uri).body(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}
