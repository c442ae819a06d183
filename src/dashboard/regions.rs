use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::{RwLock, broadcast};

const UPDATE_BUFFER: usize = 64;

/// Named page regions the dashboard writes markup into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionId {
    SystemStatus,
    AlertsList,
    Metrics,
    GraphData,
    LogsDisplay,
    LastUpdated,
}

impl RegionId {
    pub const ALL: [RegionId; 6] = [
        RegionId::SystemStatus,
        RegionId::AlertsList,
        RegionId::Metrics,
        RegionId::GraphData,
        RegionId::LogsDisplay,
        RegionId::LastUpdated,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RegionId::SystemStatus => "system-status",
            RegionId::AlertsList => "alerts-list",
            RegionId::Metrics => "metrics",
            RegionId::GraphData => "graph-data",
            RegionId::LogsDisplay => "logs-display",
            RegionId::LastUpdated => "last-updated",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == name)
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionUpdate {
    pub region: &'static str,
    pub html: String,
}

/// Current markup of every region. Each write replaces a region wholesale
/// and is broadcast to subscribers.
pub struct Regions {
    contents: RwLock<HashMap<RegionId, String>>,
    updates: broadcast::Sender<RegionUpdate>,
}

impl Regions {
    pub fn new() -> Self {
        let (updates, _) = broadcast::channel(UPDATE_BUFFER);
        Self {
            contents: RwLock::new(HashMap::new()),
            updates,
        }
    }

    pub async fn replace(&self, id: RegionId, html: String) {
        let mut contents = self.contents.write().await;
        contents.insert(id, html.clone());
        // No subscribers is fine; the stored copy is what new pages render.
        let _ = self.updates.send(RegionUpdate {
            region: id.as_str(),
            html,
        });
    }

    pub async fn get(&self, id: RegionId) -> String {
        self.contents
            .read()
            .await
            .get(&id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn snapshot(&self) -> Vec<RegionUpdate> {
        let contents = self.contents.read().await;
        RegionId::ALL
            .into_iter()
            .filter_map(|id| {
                contents.get(&id).map(|html| RegionUpdate {
                    region: id.as_str(),
                    html: html.clone(),
                })
            })
            .collect()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RegionUpdate> {
        self.updates.subscribe()
    }
}

impl Default for Regions {
    fn default() -> Self {
        Self::new()
    }
}
