use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Url};
use serde_json::Value;
use tracing::{debug, trace, warn};

use atlaslayer_core::{
    error::{DataApiError, DataApiResult, TransportError},
    transport::{Action, Transport, TransportBuilder},
};

use crate::config::HttpConfig;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Wraps a preconfigured client. The client must already carry the default headers.
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn builder(base_url: &str, api_key: &str) -> HttpTransportBuilder {
        HttpTransportBuilder::new(base_url, api_key)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, action: Action) -> Result<Url, TransportError> {
        endpoint(&self.base_url, action)
    }
}

fn endpoint(base_url: &Url, action: Action) -> Result<Url, TransportError> {
    base_url
        .join(action.path())
        .map_err(|e| TransportError::Endpoint(format!("{action} under {base_url}: {e}")))
}

/// Turns a status code and raw body into a payload or a status fault.
///
/// Successful empty bodies decode as `null`. Error bodies that are not JSON are kept
/// as text so the caller still sees what the server said.
fn decode_payload(status: u16, body: &[u8]) -> Result<Value, TransportError> {
    if (200..300).contains(&status) {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        return serde_json::from_slice(body).map_err(|e| TransportError::Decode(e.to_string()));
    }

    let payload = serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()));

    Err(TransportError::Status { status, payload })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, action: Action, body: Value) -> Result<Value, TransportError> {
        let url = self.endpoint(action)?;
        let body = serde_json::to_string(&body)?;

        trace!(url = %url, "Posting Data API request");

        let response = self.client
            .post(url)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(action = %action, error = %e, "Data API request did not complete");
                TransportError::Connection(e.to_string())
            })?;

        let status = response.status().as_u16();
        debug!(action = %action, status, "Data API responded");

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        decode_payload(status, &bytes)
    }
}

/// Builds an [`HttpTransport`] from validated settings.
///
/// Invalid settings passed to [`new`](Self::new) are reported by
/// [`build`](TransportBuilder::build).
pub struct HttpTransportBuilder {
    config: DataApiResult<HttpConfig>,
}

impl HttpTransportBuilder {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self { config: HttpConfig::new(base_url, api_key) }
    }

    /// Reads `CLUSTER_URL` and `CLUSTER_API_KEY` once from the process environment.
    pub fn from_env() -> DataApiResult<Self> {
        Ok(HttpConfig::from_env()?.into())
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        Self { config: self.config.map(|config| config.with_timeout(timeout)) }
    }
}

impl From<HttpConfig> for HttpTransportBuilder {
    fn from(config: HttpConfig) -> Self {
        Self { config: Ok(config) }
    }
}

/// Client settings derived from `config`: default headers and the optional timeout.
fn client_builder(config: &HttpConfig) -> DataApiResult<ClientBuilder> {
    let client = Client::builder().default_headers(config.default_headers()?);

    Ok(match config.timeout {
        Some(timeout) => client.timeout(timeout),
        None => client,
    })
}

#[async_trait]
impl TransportBuilder for HttpTransportBuilder {
    type Transport = HttpTransport;

    async fn build(self) -> DataApiResult<Self::Transport> {
        let config = self.config?;
        let client = client_builder(&config)?
            .build()
            .map_err(|e| DataApiError::Initialization(e.to_string()))?;

        Ok(HttpTransport::new(client, config.base_url))
    }
}
