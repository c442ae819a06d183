use crate::helpers::{DisplayZone, non_empty, percent};
use crate::models::api::{
    AlertRecord, GraphSummary, MetricsSnapshot, NamespaceEntry, PodCounts, SystemStatusReport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Danger,
    Warning,
    Healthy,
}

impl Health {
    pub fn classify(counts: &PodCounts) -> Self {
        if counts.failed > 0.0 {
            Health::Danger
        } else if counts.running < counts.total {
            Health::Warning
        } else {
            Health::Healthy
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Health::Danger => "status-danger",
            Health::Warning => "status-warning",
            Health::Healthy => "status-healthy",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceView {
    pub name: String,
    /// `None` when the backend reported an error for this namespace.
    pub counts: Option<PodCounts>,
    pub status_class: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertView {
    pub pod_name: String,
    pub namespace: String,
    pub created: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsView {
    pub anomaly_score: String,
    pub alerts_today: String,
    pub models_loaded: usize,
    pub last_training: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphView {
    pub nodes: String,
    pub edges: String,
    pub windows: String,
    pub last_updated: String,
}

const MISSING_NUMBER: &str = "n/a";

/// Whole numbers print without a fraction (`150.0` shows as `150`).
fn count_or_missing(n: Option<f64>) -> String {
    n.map(|n| n.to_string())
        .unwrap_or_else(|| MISSING_NUMBER.to_string())
}

// --- View Builders ---

pub fn build_namespace_views(report: &SystemStatusReport) -> Vec<NamespaceView> {
    report
        .iter()
        .map(|(name, entry)| match entry {
            NamespaceEntry::Failed { .. } => NamespaceView {
                name: name.clone(),
                counts: None,
                status_class: Health::Danger.css_class().to_string(),
            },
            NamespaceEntry::Counts(counts) => NamespaceView {
                name: name.clone(),
                counts: Some(*counts),
                status_class: Health::classify(counts).css_class().to_string(),
            },
        })
        .collect()
}

pub fn build_alert_view(alert: &AlertRecord) -> AlertView {
    let spec = alert.spec.clone().unwrap_or_default();
    let created = alert
        .metadata
        .as_ref()
        .and_then(|m| non_empty(m.creation_timestamp.as_deref()));

    AlertView {
        pod_name: non_empty(spec.pod_name.as_deref())
            .unwrap_or("Unknown")
            .to_string(),
        namespace: non_empty(spec.namespace.as_deref())
            .unwrap_or("unknown")
            .to_string(),
        created: created.unwrap_or("Unknown time").to_string(),
        action: non_empty(spec.action.as_deref())
            .unwrap_or("Unknown")
            .to_string(),
    }
}

pub fn build_metrics_view(snapshot: &MetricsSnapshot, zone: DisplayZone) -> MetricsView {
    MetricsView {
        anomaly_score: snapshot
            .anomaly_score_avg
            .map(percent)
            .unwrap_or_else(|| MISSING_NUMBER.to_string()),
        alerts_today: count_or_missing(snapshot.alerts_today),
        models_loaded: snapshot.models_loaded.as_ref().map_or(0, Vec::len),
        last_training: zone.datetime(snapshot.last_training.as_deref()),
    }
}

pub fn build_graph_view(summary: &GraphSummary, zone: DisplayZone) -> GraphView {
    GraphView {
        nodes: count_or_missing(summary.nodes),
        edges: count_or_missing(summary.edges),
        windows: count_or_missing(summary.windows),
        last_updated: zone.datetime(summary.last_updated.as_deref()),
    }
}
