pub mod logs;
pub mod regions;
pub mod widgets;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::clients::DashboardApi;
use crate::helpers::DisplayZone;

use regions::{RegionId, Regions};
use widgets::Widget;

struct RefreshTimer {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Drives the dashboard: one refresh of every widget on start, then a
/// periodic refresh of everything except alerts until stopped.
///
/// Refreshes are fire-and-forget tasks. Overlapping requests for the same
/// widget are not sequenced, so a slow response can overwrite a newer one.
pub struct DashboardController<A: DashboardApi> {
    api: Arc<A>,
    regions: Arc<Regions>,
    period: Duration,
    zone: DisplayZone,
    timer: Mutex<Option<RefreshTimer>>,
}

impl<A: DashboardApi> DashboardController<A> {
    pub fn new(api: Arc<A>, regions: Arc<Regions>, period: Duration, zone: DisplayZone) -> Self {
        Self {
            api,
            regions,
            period,
            zone,
            timer: Mutex::new(None),
        }
    }

    pub fn regions(&self) -> &Arc<Regions> {
        &self.regions
    }

    pub async fn is_running(&self) -> bool {
        self.timer.lock().await.is_some()
    }

    /// No-op if the timer is already armed.
    pub async fn start(&self) {
        let mut timer = self.timer.lock().await;
        if timer.is_some() {
            return;
        }

        for widget in Widget::ALL {
            dispatch(&self.api, &self.regions, widget, self.zone);
        }
        touch_last_updated(&self.regions, self.zone).await;

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_timer(
            self.api.clone(),
            self.regions.clone(),
            self.period,
            self.zone,
            cancel.clone(),
        ));
        *timer = Some(RefreshTimer { cancel, handle });

        info!(period_secs = self.period.as_secs(), "dashboard refresh started");
    }

    /// Disarms the timer and waits for it to exit. Requests already in
    /// flight still complete and write their regions.
    pub async fn stop(&self) {
        let Some(timer) = self.timer.lock().await.take() else {
            return;
        };

        timer.cancel.cancel();
        if let Err(e) = timer.handle.await {
            warn!(error = %e, "refresh timer task failed");
        }
        info!("dashboard refresh stopped");
    }

    pub async fn refresh_alerts(&self) -> String {
        widgets::refresh(Widget::Alerts, self.api.as_ref(), &self.regions, self.zone).await
    }

    pub async fn load_logs(&self, component: &str) -> String {
        logs::load_logs(self.api.as_ref(), &self.regions, component).await
    }
}

fn dispatch<A: DashboardApi>(api: &Arc<A>, regions: &Arc<Regions>, widget: Widget, zone: DisplayZone) {
    let api = api.clone();
    let regions = regions.clone();
    tokio::spawn(async move {
        widgets::refresh(widget, api.as_ref(), &regions, zone).await;
    });
}

async fn touch_last_updated(regions: &Regions, zone: DisplayZone) {
    let text = format!("Last updated: {}", zone.time_of_day(Utc::now()));
    regions.replace(RegionId::LastUpdated, text).await;
}

async fn run_timer<A: DashboardApi>(
    api: Arc<A>,
    regions: Arc<Regions>,
    period: Duration,
    zone: DisplayZone,
    cancel: CancellationToken,
) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            _ = interval.tick() => {
                for widget in Widget::PERIODIC {
                    dispatch(&api, &regions, widget, zone);
                }
                touch_last_updated(&regions, zone).await;
            }
        }
    }
}
