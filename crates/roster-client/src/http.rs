//! `reqwest`-backed [`RecordSource`]

use crate::config::ClientConfig;
use crate::error::{ConfigError, FetchError};
use crate::source::{RecordSource, SEARCH_PATH};
use async_trait::async_trait;
use roster_model::{SearchQuery, SearchResults};
use serde::de::DeserializeOwned;

/// HTTP client for the directory API
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    client: reqwest::Client,
    api_root: String,
}

impl HttpRecordSource {
    /// Build a client from configuration
    ///
    /// # Errors
    /// - `ConfigError::InvalidBaseUrl` if the base URL is not http/https
    /// - `ConfigError::Client` if reqwest cannot build the client
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    /// Use an existing reqwest client
    #[inline]
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            api_root: config.api_root(),
        }
    }

    /// API root every request path is appended to
    #[inline]
    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.api_root, path);
        tracing::debug!(%url, params = query.len(), "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, &e))
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value, FetchError> {
        self.get(path, &[]).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, FetchError> {
        self.get(SEARCH_PATH, &query.to_pairs()).await
    }
}
