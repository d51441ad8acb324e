use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::ApiConfig;

/// Trait for the word-serving API (enables testing via mocking)
///
/// The pipeline depends on this seam rather than on a concrete HTTP client,
/// so its sequencing behavior can be tested with `MockWordApi` (via
/// `mockall`) or a scripted fake without touching the network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WordApi: Send + Sync {
    /// Ask the base endpoint how many words exist
    ///
    /// # Errors
    /// Returns error on connection failure, non-2xx status, or a body
    /// missing the integer `count` field
    async fn fetch_count(&self) -> Result<usize, ApiError>;

    /// Fetch the word at `index`
    ///
    /// The returned text may be the paragraph sentinel; the API layer does
    /// not interpret it.
    ///
    /// # Errors
    /// Returns error on connection failure, non-2xx status, or a body
    /// missing the `word` field
    async fn fetch_word(&self, index: usize) -> Result<String, ApiError>;
}

/// Errors that can occur talking to the word API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection-level failure (refused, reset, timeout)
    #[error("request to {url} failed: {source}")]
    Network {
        /// Request URL
        url: String,
        /// Underlying error
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("unexpected status {status} from {url}")]
    Status {
        /// Request URL
        url: String,
        /// HTTP status code
        status: StatusCode,
    },

    /// Response body was not the expected JSON shape
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Request URL
        url: String,
        /// Underlying error
        source: reqwest::Error,
    },
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: usize,
}

#[derive(Debug, Deserialize)]
struct WordResponse {
    word: String,
}

/// HTTP implementation of [`WordApi`] backed by a shared `reqwest` client
pub struct HttpWordApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWordApi {
    /// Build a client from config, with the configured request timeout
    ///
    /// # Errors
    /// Returns error if the underlying client cannot be constructed
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn count_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    fn word_url(&self, index: usize) -> String {
        format!("{}/words/{index}", self.base_url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }
}

#[async_trait]
impl WordApi for HttpWordApi {
    async fn fetch_count(&self) -> Result<usize, ApiError> {
        let url = self.count_url();
        tracing::debug!(url = %url, "fetching word count");

        let body: CountResponse = self.get_json(url).await?;
        Ok(body.count)
    }

    async fn fetch_word(&self, index: usize) -> Result<String, ApiError> {
        let url = self.word_url(index);
        tracing::debug!(url = %url, index, "fetching word");

        let body: WordResponse = self.get_json(url).await?;
        Ok(body.word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_api(base_url: &str) -> HttpWordApi {
        HttpWordApi::new(&ApiConfig {
            base_url: base_url.to_owned(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_word_url_format() {
        let api = test_api("https://example.com");
        assert_eq!(api.word_url(0), "https://example.com/words/0");
        assert_eq!(api.word_url(42), "https://example.com/words/42");
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let api = test_api("https://example.com/");
        assert_eq!(api.count_url(), "https://example.com/");
        assert_eq!(api.word_url(3), "https://example.com/words/3");
    }

    #[test]
    fn test_count_response_decodes() {
        let body: CountResponse = serde_json::from_str(r#"{"count": 128}"#).unwrap();
        assert_eq!(body.count, 128);
    }

    #[test]
    fn test_count_response_rejects_missing_field() {
        let result = serde_json::from_str::<CountResponse>(r#"{"total": 128}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_word_response_decodes() {
        let body: WordResponse = serde_json::from_str(r#"{"word": "**Break**"}"#).unwrap();
        assert_eq!(body.word, "**Break**");
    }

    #[test]
    fn test_word_response_rejects_non_string() {
        let result = serde_json::from_str::<WordResponse>(r#"{"word": 7}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 on localhost is the discard port; nothing should be listening
        let api = test_api("http://127.0.0.1:9");
        let result = api.fetch_count().await;
        assert!(matches!(result, Err(ApiError::Network { .. })));
    }
}
