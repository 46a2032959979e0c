//! Transport abstraction and the default reqwest-backed implementation

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use hyper::ext::ReasonPhrase;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::config::ClientConfig;
use crate::{Result, SnailError};

/// Boxed error produced by a transport implementation
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to obtain a complete response from the network
#[derive(Error, Debug)]
pub enum TransportError {
    /// No response was received (DNS, refused connection, TLS, timeout)
    #[error("request failed: {0}")]
    Connect(#[source] BoxError),

    /// Headers arrived but the body could not be read
    #[error("failed to read response body: {0}")]
    Body(#[source] BoxError),
}

/// A fully-built outbound request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// A response with its body read into memory
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    /// Reason phrase sent by the server, when it differs from the canonical one
    pub reason: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Status line text as the server sent it, e.g. `"500 Internal Server Error"`
    pub fn status_text(&self) -> String {
        let reason = self
            .reason
            .as_deref()
            .filter(|reason| !reason.is_empty())
            .or_else(|| self.status.canonical_reason());

        match reason {
            Some(reason) => format!("{} {}", self.status.as_str(), reason),
            None => self.status.as_str().to_string(),
        }
    }
}

/// Executes one HTTP round trip.
///
/// Implementations must not retry; a failure is reported once to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportError>;
}

/// HTTP transport using reqwest with rustls
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport honoring the config's timeout and user agent
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut client_builder = Client::builder().user_agent(config.user_agent.clone());

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| SnailError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Connect(Box::new(e)))?;

        let status = response.status();
        // hyper only keeps the phrase when it is not the canonical one
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned());
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(Box::new(e)))?;

        Ok(TransportResponse {
            status,
            reason,
            headers,
            body: body.to_vec(),
        })
    }
}
