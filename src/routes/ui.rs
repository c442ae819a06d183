use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::dashboard::regions::RegionId;
use crate::AppState;

fn render_template(tmpl: &impl Template) -> Response {
    match tmpl.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

// --- Dashboard ---

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    title: String,
    system_status: String,
    alerts: String,
    metrics: String,
    graph_data: String,
    logs: String,
    last_updated: String,
    log_components: Vec<String>,
}

pub async fn handle_dashboard(State(state): State<AppState>) -> Response {
    let regions = state.controller.regions();

    let tmpl = DashboardTemplate {
        title: "Zero-Day Detection Dashboard".to_string(),
        system_status: regions.get(RegionId::SystemStatus).await,
        alerts: regions.get(RegionId::AlertsList).await,
        metrics: regions.get(RegionId::Metrics).await,
        graph_data: regions.get(RegionId::GraphData).await,
        logs: regions.get(RegionId::LogsDisplay).await,
        last_updated: regions.get(RegionId::LastUpdated).await,
        log_components: state.config.log_components.clone(),
    };

    render_template(&tmpl)
}

// --- Regions ---

pub async fn handle_region(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    match RegionId::from_name(&name) {
        Some(id) => Html(state.controller.regions().get(id).await).into_response(),
        None => (StatusCode::NOT_FOUND, "Region not found").into_response(),
    }
}

// --- Actions ---

pub async fn handle_refresh_alerts(State(state): State<AppState>) -> Html<String> {
    Html(state.controller.refresh_alerts().await)
}

#[derive(Deserialize)]
pub struct LogQuery {
    #[serde(default)]
    pub component: String,
}

pub async fn handle_logs(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Html<String> {
    Html(state.controller.load_logs(&query.component).await)
}
