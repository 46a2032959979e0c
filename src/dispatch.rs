//! Request dispatch shared by every API operation
//!
//! The [`Dispatcher`] turns an [`Endpoint`], optional query pairs and an
//! optional serializable body into exactly one authenticated round trip and
//! hands back a [`Reply`]. Classification into success or failure happens on
//! the reply, so a non-success status is never hidden behind a decode error.

use std::sync::Arc;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::credential::ApiKey;
use crate::endpoints::Endpoint;
use crate::transport::{Transport, TransportRequest};
use crate::{Result, SnailError};

/// Content type declared on every request
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Executes authenticated requests against the SnailPay API
#[derive(Clone)]
pub struct Dispatcher {
    api_key: ApiKey,
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url.as_str())
            .field("transport", &"<transport>")
            .finish()
    }
}

impl Dispatcher {
    /// Create a dispatcher; `base_url` must end with `/`
    pub fn new(api_key: ApiKey, base_url: Url, transport: Arc<dyn Transport>) -> Self {
        Self {
            api_key,
            base_url,
            transport,
        }
    }

    /// Base URL endpoint paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the request, perform one round trip and read the whole body.
    ///
    /// `Authorization` and `Content-Type` are attached to every request,
    /// with or without a body.
    pub async fn dispatch<B>(
        &self,
        endpoint: &Endpoint,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Reply>
    where
        B: Serialize + ?Sized,
    {
        let mut url = self.base_url.join(endpoint.path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let body = body.map(serde_json::to_vec).transpose()?;

        debug!(
            method = %endpoint.method,
            path = url.path(),
            has_body = body.is_some(),
            "dispatching request"
        );

        let request = TransportRequest {
            method: endpoint.method.clone(),
            url,
            headers: self.headers()?,
            body,
        };

        let response = self.transport.execute(request).await?;

        debug!(
            status = response.status.as_u16(),
            bytes = response.body.len(),
            "received response"
        );

        Ok(Reply {
            status: response.status,
            status_text: response.status_text(),
            body: response.body,
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut auth = HeaderValue::from_str(self.api_key.as_str()).map_err(|_| {
            SnailError::config("API key contains characters not allowed in an HTTP header")
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Ok(headers)
    }
}

/// Outcome of a completed round trip
#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    status_text: String,
    body: Vec<u8>,
}

impl Reply {
    /// Numeric HTTP status
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Raw status line, e.g. `"400 Bad Request"`
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Raw response body
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Only `200 OK` counts as success
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Decode the body into `T`, whatever the status
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(SnailError::Decode)
    }

    /// The server's explanation for a failed call.
    ///
    /// A JSON string body is unwrapped; an empty body falls back to the
    /// status line.
    pub fn failure_message(&self) -> String {
        let text = String::from_utf8_lossy(&self.body);
        let text = text.trim();

        if text.is_empty() {
            return self.status_text.clone();
        }

        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(serde_json::Value::String(message)) => message,
            _ => text.to_string(),
        }
    }

    /// Classify, then decode: non-200 is a [`SnailError::RemoteFailure`]
    /// carrying [`failure_message`](Self::failure_message)
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_ok() {
            return Err(SnailError::remote_failure(
                self.status.as_u16(),
                self.failure_message(),
            ));
        }
        self.decode()
    }

    /// Classify without decoding: non-200 is a
    /// [`SnailError::RemoteFailure`] carrying the status line
    pub fn into_unit(self) -> Result<()> {
        if !self.is_ok() {
            return Err(SnailError::remote_failure(
                self.status.as_u16(),
                self.status_text,
            ));
        }
        Ok(())
    }
}
