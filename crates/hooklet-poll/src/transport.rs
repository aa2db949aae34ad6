use async_trait::async_trait;

use crate::error::FetchError;

/// The network seam. A transport resolves a url to a response body; the
/// scheduler treats it as a black box that may take arbitrarily long.
/// There is no timeout here — a hung fetch stalls its chain.
#[async_trait(?Send)]
pub trait Transport {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed transport. Non-2xx statuses count as request failures.
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "http")]
#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
