use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// Response shapes served by the detection backend's dashboard API.
// Counts are `f64` because the backend may send `150.0` for `150`.

/// Every endpoint either answers with its payload or with `{"error": ...}`.
/// A set `error` field wins even if the rest of the object looks like a
/// payload; `null`, `false`, `0` and `""` count as unset.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Failure { error: String },
    Payload(T),
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Envelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Some(error) = value.get("error").and_then(error_message) {
            return Ok(Envelope::Failure { error });
        }
        T::deserialize(value)
            .map(Envelope::Payload)
            .map_err(D::Error::custom)
    }
}

fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl<T> Envelope<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Envelope::Failure { error } => Err(error),
            Envelope::Payload(p) => Ok(p),
        }
    }
}

// --- System status ---

pub type SystemStatusReport = BTreeMap<String, NamespaceEntry>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NamespaceEntry {
    Failed { error: String },
    Counts(PodCounts),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PodCounts {
    #[serde(default)]
    pub running: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub failed: f64,
}

// --- Alerts ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AlertRecord {
    #[serde(default)]
    pub spec: Option<AlertSpec>,
    #[serde(default)]
    pub metadata: Option<AlertMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AlertSpec {
    #[serde(default)]
    pub pod_name: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertMetadata {
    #[serde(default)]
    pub creation_timestamp: Option<String>,
}

// --- Metrics ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MetricsSnapshot {
    #[serde(default)]
    pub anomaly_score_avg: Option<f64>,
    #[serde(default)]
    pub alerts_today: Option<f64>,
    #[serde(default)]
    pub models_loaded: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub last_training: Option<String>,
}

// --- Graph summary ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GraphSummary {
    #[serde(default)]
    pub nodes: Option<f64>,
    #[serde(default)]
    pub edges: Option<f64>,
    #[serde(default)]
    pub windows: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

// --- Logs ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Option<String>,
}
