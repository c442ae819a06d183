use askama::Template;
use thiserror::Error;
use tracing::{debug, warn};

use super::regions::{RegionId, Regions};
use crate::clients::{DashboardApi, FetchError};
use crate::helpers::DisplayZone;
use crate::models::api::{AlertRecord, GraphSummary, MetricsSnapshot, SystemStatusReport};
use crate::models::views::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    SystemStatus,
    Alerts,
    Metrics,
    GraphSummary,
}

impl Widget {
    pub const ALL: [Widget; 4] = [
        Widget::SystemStatus,
        Widget::Alerts,
        Widget::Metrics,
        Widget::GraphSummary,
    ];

    /// Alerts only refresh on demand.
    pub const PERIODIC: [Widget; 3] = [
        Widget::SystemStatus,
        Widget::Metrics,
        Widget::GraphSummary,
    ];

    pub fn region(self) -> RegionId {
        match self {
            Widget::SystemStatus => RegionId::SystemStatus,
            Widget::Alerts => RegionId::AlertsList,
            Widget::Metrics => RegionId::Metrics,
            Widget::GraphSummary => RegionId::GraphData,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Widget::SystemStatus => "system status",
            Widget::Alerts => "alerts",
            Widget::Metrics => "metrics",
            Widget::GraphSummary => "graph data",
        }
    }

    pub fn error_markup(self) -> String {
        format!("<div class=\"text-danger\">Error loading {}</div>", self.label())
    }
}

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("backend reported an error: {0}")]
    Application(String),
    #[error("template error: {0}")]
    Render(#[from] askama::Error),
}

// --- Templates ---

#[derive(Template)]
#[template(path = "widgets/system_status.html")]
struct SystemStatusTemplate {
    namespaces: Vec<NamespaceView>,
}

#[derive(Template)]
#[template(path = "widgets/alerts.html")]
struct AlertsTemplate {
    alerts: Vec<AlertView>,
}

#[derive(Template)]
#[template(path = "widgets/metrics.html")]
struct MetricsTemplate {
    metrics: MetricsView,
}

#[derive(Template)]
#[template(path = "widgets/graph.html")]
struct GraphTemplate {
    graph: GraphView,
}

pub fn render_system_status(report: &SystemStatusReport) -> Result<String, askama::Error> {
    SystemStatusTemplate {
        namespaces: build_namespace_views(report),
    }
    .render()
}

pub fn render_alerts(records: &[AlertRecord]) -> Result<String, askama::Error> {
    AlertsTemplate {
        alerts: records.iter().map(build_alert_view).collect(),
    }
    .render()
}

pub fn render_metrics(snapshot: &MetricsSnapshot, zone: DisplayZone) -> Result<String, askama::Error> {
    MetricsTemplate {
        metrics: build_metrics_view(snapshot, zone),
    }
    .render()
}

pub fn render_graph(summary: &GraphSummary, zone: DisplayZone) -> Result<String, askama::Error> {
    GraphTemplate {
        graph: build_graph_view(summary, zone),
    }
    .render()
}

// --- Refresh ---

async fn fetch_and_render<A: DashboardApi>(
    widget: Widget,
    api: &A,
    zone: DisplayZone,
) -> Result<String, WidgetError> {
    let html = match widget {
        Widget::SystemStatus => {
            let report = api
                .system_status()
                .await?
                .into_result()
                .map_err(WidgetError::Application)?;
            render_system_status(&report)?
        }
        Widget::Alerts => {
            let records = api
                .alerts()
                .await?
                .into_result()
                .map_err(WidgetError::Application)?;
            render_alerts(&records)?
        }
        Widget::Metrics => {
            let snapshot = api
                .metrics()
                .await?
                .into_result()
                .map_err(WidgetError::Application)?;
            render_metrics(&snapshot, zone)?
        }
        Widget::GraphSummary => {
            let summary = api
                .graphs()
                .await?
                .into_result()
                .map_err(WidgetError::Application)?;
            render_graph(&summary, zone)?
        }
    };
    Ok(html)
}

/// Runs one fetch/decode/render cycle and replaces the widget's region.
/// Failures stay inside the widget: they render its error message and
/// are never returned. Returns the markup that was written.
pub async fn refresh<A: DashboardApi>(
    widget: Widget,
    api: &A,
    regions: &Regions,
    zone: DisplayZone,
) -> String {
    let html = match fetch_and_render(widget, api, zone).await {
        Ok(html) => {
            debug!(widget = widget.label(), "widget refreshed");
            html
        }
        Err(e) => {
            warn!(widget = widget.label(), error = %e, "widget refresh failed");
            widget.error_markup()
        }
    };
    regions.replace(widget.region(), html.clone()).await;
    html
}
