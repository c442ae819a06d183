use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::{DashboardApi, FetchError, FetchResult};
use crate::models::api::{
    AlertRecord, GraphSummary, LogsResponse, MetricsSnapshot, SystemStatusReport,
};

#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    NotJson,
    NetworkDown,
}

/// In-memory backend keyed by endpoint name (`system-status`, `alerts`,
/// `metrics`, `graphs`, `logs`). Unset endpoints answer `NetworkDown`.
#[derive(Default)]
pub struct StubApi {
    replies: Mutex<HashMap<&'static str, Reply>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    log_requests: Mutex<Vec<String>>,
    total: AtomicUsize,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, endpoint: &'static str, reply: Reply) {
        self.replies.lock().unwrap().insert(endpoint, reply);
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls.lock().unwrap().get(endpoint).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn log_requests(&self) -> Vec<String> {
        self.log_requests.lock().unwrap().clone()
    }

    fn answer<T: DeserializeOwned>(&self, endpoint: &'static str) -> FetchResult<T> {
        *self.calls.lock().unwrap().entry(endpoint).or_insert(0) += 1;
        self.total.fetch_add(1, Ordering::SeqCst);

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get(endpoint)
            .cloned()
            .unwrap_or(Reply::NetworkDown);
        let path = format!("/api/{}", endpoint);

        match reply {
            Reply::Json(v) => {
                serde_json::from_value(v).map_err(|source| FetchError::Decode { path, source })
            }
            Reply::NotJson => Err(FetchError::Decode {
                path,
                source: serde_json::from_str::<Value>("<html>").unwrap_err(),
            }),
            Reply::NetworkDown => Err(FetchError::Transport {
                path,
                source: reqwest::Client::new()
                    .get("http://[::1")
                    .build()
                    .unwrap_err(),
            }),
        }
    }
}

impl DashboardApi for StubApi {
    async fn system_status(&self) -> FetchResult<SystemStatusReport> {
        self.answer("system-status")
    }

    async fn alerts(&self) -> FetchResult<Vec<AlertRecord>> {
        self.answer("alerts")
    }

    async fn metrics(&self) -> FetchResult<MetricsSnapshot> {
        self.answer("metrics")
    }

    async fn graphs(&self) -> FetchResult<GraphSummary> {
        self.answer("graphs")
    }

    async fn logs(&self, component: &str) -> FetchResult<LogsResponse> {
        self.log_requests.lock().unwrap().push(component.to_string());
        self.answer("logs")
    }
}
