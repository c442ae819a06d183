use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{self, Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use crate::dashboard::regions::RegionUpdate;
use crate::AppState;

fn region_event(update: &RegionUpdate) -> Event {
    let data = serde_json::to_string(update).unwrap_or_default();
    Event::default().event("region").data(data)
}

/// SSE endpoint that streams region replacements to the browser.
/// Sends the current contents of every region first, then each write.
pub async fn handle_region_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let regions = state.controller.regions();

    // Subscribe before the snapshot so no write falls between the two.
    let updates = BroadcastStream::new(regions.subscribe()).filter_map(|msg| async move {
        match msg {
            Ok(update) => Some(Ok::<_, Infallible>(region_event(&update))),
            Err(BroadcastStreamRecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "region event subscriber lagged");
                None
            }
        }
    });
    let initial = regions.snapshot().await;
    let initial = stream::iter(initial).map(|update| Ok::<_, Infallible>(region_event(&update)));

    Sse::new(initial.chain(updates).take_until(state.shutdown.clone().cancelled_owned()))
        .keep_alive(KeepAlive::default().interval(Duration::from_secs(15)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::regions::RegionId;

    #[test]
    fn test_region_event_payload_is_json() {
        let update = RegionUpdate {
            region: RegionId::AlertsList.as_str(),
            html: "<div class=\"text-muted\">No active alerts</div>".to_string(),
        };
        let data = serde_json::to_string(&update).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(parsed["region"], "alerts-list");
        assert_eq!(parsed["html"], update.html);
    }
}
