//! Connection settings for the HTTP transport.

use std::{fmt, time::Duration};
use reqwest::{
    Url,
    header::{ACCESS_CONTROL_REQUEST_HEADERS, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};

use atlaslayer_core::error::{DataApiError, DataApiResult};

/// Environment variable holding the Data API base URL.
pub const URL_ENV: &str = "CLUSTER_URL";
/// Environment variable holding the Data API key.
pub const API_KEY_ENV: &str = "CLUSTER_API_KEY";

const API_KEY_HEADER: &str = "api-key";

/// Validated connection settings.
///
/// The base URL always ends with `/` so that action paths join beneath it rather than
/// replacing its last segment.
#[derive(Clone)]
pub struct HttpConfig {
    pub base_url: Url,
    pub api_key: String,
    pub timeout: Option<Duration>,
}

impl HttpConfig {
    /// Validates a base URL and API key.
    ///
    /// # Errors
    ///
    /// Returns [`DataApiError::Configuration`] if the URL does not parse, cannot carry a
    /// path, or the key is empty.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> DataApiResult<Self> {
        let api_key = api_key.into();

        if api_key.trim().is_empty() {
            return Err(DataApiError::Configuration("API key is empty".to_string()));
        }

        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            api_key,
            timeout: None,
        })
    }

    /// Reads `CLUSTER_URL` and `CLUSTER_API_KEY` from the process environment.
    pub fn from_env() -> DataApiResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> DataApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new(&require(&lookup, URL_ENV)?, require(&lookup, API_KEY_ENV)?)
    }

    /// Sets a per-request timeout enforced by the client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Headers sent with every request.
    ///
    /// # Errors
    ///
    /// Returns [`DataApiError::Configuration`] if the API key is not a valid header value.
    pub fn default_headers(&self) -> DataApiResult<HeaderMap> {
        let mut api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| DataApiError::Configuration(format!("Invalid API key: {e}")))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(ACCESS_CONTROL_REQUEST_HEADERS, HeaderValue::from_static("*"));

        Ok(headers)
    }
}

impl fmt::Debug for HttpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn require<F>(lookup: &F, name: &str) -> DataApiResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| DataApiError::Configuration(format!("{name} is not set")))
}

fn normalize_base_url(raw: &str) -> DataApiResult<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| DataApiError::Configuration(format!("Invalid base URL {raw:?}: {e}")))?;

    if url.cannot_be_a_base() {
        return Err(DataApiError::Configuration(format!("Base URL {raw:?} cannot carry a path")));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
