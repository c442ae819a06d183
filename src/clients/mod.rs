use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::api::{
    AlertRecord, Envelope, GraphSummary, LogsResponse, MetricsSnapshot, SystemStatusReport,
};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid backend url {0:?}")]
    InvalidUrl(String),
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {path} is not valid JSON: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type FetchResult<T> = Result<Envelope<T>, FetchError>;

/// The detection backend's dashboard API, as seen by the refresh pipeline.
pub trait DashboardApi: Send + Sync + 'static {
    fn system_status(&self) -> impl Future<Output = FetchResult<SystemStatusReport>> + Send;
    fn alerts(&self) -> impl Future<Output = FetchResult<Vec<AlertRecord>>> + Send;
    fn metrics(&self) -> impl Future<Output = FetchResult<MetricsSnapshot>> + Send;
    fn graphs(&self) -> impl Future<Output = FetchResult<GraphSummary>> + Send;
    fn logs(&self, component: &str) -> impl Future<Output = FetchResult<LogsResponse>> + Send;
}

pub struct BackendClient {
    base: Url,
    http: Client,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let base =
            Url::parse(base_url).map_err(|_| FetchError::InvalidUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }

        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder.build().map_err(|source| FetchError::Transport {
            path: base_url.to_string(),
            source,
        })?;

        Ok(Self { base, http })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new(), so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Status codes are ignored: the backend reports failures in the body,
    /// so a 500 with `{"error": ...}` decodes like any other response.
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> FetchResult<T> {
        let url = self.url(segments);
        let path = url.path().to_string();

        let resp = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                path: path.clone(),
                source,
            })?;

        let body = resp.bytes().await.map_err(|source| FetchError::Transport {
            path: path.clone(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { path, source })
    }
}

impl DashboardApi for BackendClient {
    async fn system_status(&self) -> FetchResult<SystemStatusReport> {
        self.get_json(&["api", "system-status"]).await
    }

    async fn alerts(&self) -> FetchResult<Vec<AlertRecord>> {
        self.get_json(&["api", "alerts"]).await
    }

    async fn metrics(&self) -> FetchResult<MetricsSnapshot> {
        self.get_json(&["api", "metrics"]).await
    }

    async fn graphs(&self) -> FetchResult<GraphSummary> {
        self.get_json(&["api", "graphs"]).await
    }

    async fn logs(&self, component: &str) -> FetchResult<LogsResponse> {
        self.get_json(&["api", "logs", component]).await
    }
}
