use askama::Template;
use tracing::warn;

use super::regions::{RegionId, Regions};
use crate::clients::{DashboardApi, FetchResult};
use crate::models::api::LogsResponse;

pub const LOADING: &str = "Loading logs...";
pub const NO_LOGS: &str = "No logs available";
pub const LOAD_FAILED: &str = "Error loading logs";

/// Log output is shown as text, never as markup.
#[derive(Template)]
#[template(source = "{{ text }}", ext = "html")]
struct TextTemplate<'a> {
    text: &'a str,
}

pub fn text_markup(text: &str) -> String {
    TextTemplate { text }
        .render()
        .unwrap_or_else(|_| LOAD_FAILED.to_string())
}

/// Maps a logs response to the text the viewer displays.
pub fn log_text(component: &str, result: FetchResult<LogsResponse>) -> String {
    match result {
        Ok(envelope) => match envelope.into_result() {
            Ok(resp) => resp
                .logs
                .filter(|logs| !logs.is_empty())
                .unwrap_or_else(|| NO_LOGS.to_string()),
            Err(message) => format!("Error: {}", message),
        },
        Err(e) => {
            warn!(component, error = %e, "loading logs failed");
            LOAD_FAILED.to_string()
        }
    }
}

/// Shows the loading placeholder, fetches logs for `component` and
/// replaces the logs region with the result. Returns the final markup.
pub async fn load_logs<A: DashboardApi>(api: &A, regions: &Regions, component: &str) -> String {
    regions
        .replace(RegionId::LogsDisplay, text_markup(LOADING))
        .await;

    let text = log_text(component, api.logs(component).await);
    let html = text_markup(&text);
    regions.replace(RegionId::LogsDisplay, html.clone()).await;
    html
}
