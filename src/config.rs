use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::helpers::DisplayZone;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend_url: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub display_timezone: DisplayZone,
    #[serde(default = "default_log_components")]
    pub log_components: Vec<String>,
}

fn default_listen_port() -> u16 {
    5050
}

fn default_refresh_interval_secs() -> u64 {
    30
}

fn default_log_components() -> Vec<String> {
    vec![
        "graph-builder".to_string(),
        "inference".to_string(),
        "containment".to_string(),
    ]
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| format!("reading config {}: {}", path.display(), e))?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut cfg: Config =
            serde_yaml::from_str(data).map_err(|e| format!("parsing config: {}", e))?;

        cfg.backend_url = cfg.backend_url.trim_end_matches('/').to_string();

        if cfg.backend_url.is_empty() {
            return Err("backend_url must be configured".into());
        }
        if cfg.refresh_interval_secs == 0 {
            return Err("refresh_interval_secs must be greater than zero".into());
        }

        Ok(cfg)
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.listen_port)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_applies_defaults() {
        let cfg = Config::parse("backend_url: http://ui.ml.svc:5000/\n").unwrap();

        assert_eq!(cfg.backend_url, "http://ui.ml.svc:5000");
        assert_eq!(cfg.listen_addr(), "0.0.0.0:5050");
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(30));
        assert_eq!(cfg.request_timeout(), None);
        assert_eq!(cfg.display_timezone, DisplayZone::Local);
        assert_eq!(
            cfg.log_components,
            vec!["graph-builder", "inference", "containment"]
        );
    }

    #[test]
    fn test_parse_reads_overrides() {
        let cfg = Config::parse(
            "backend_url: http://localhost:5000\n\
             listen_port: 8081\n\
             refresh_interval_secs: 5\n\
             request_timeout_secs: 2\n\
             display_timezone: utc\n\
             log_components: [inference]\n",
        )
        .unwrap();

        assert_eq!(cfg.listen_port, 8081);
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(5));
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(2)));
        assert_eq!(cfg.display_timezone, DisplayZone::Utc);
        assert_eq!(cfg.log_components, vec!["inference"]);
    }

    #[test]
    fn test_parse_requires_backend_url() {
        let err = Config::parse("listen_port: 8081\n").unwrap_err();
        assert!(err.to_string().contains("backend_url"));
    }

    #[test]
    fn test_parse_rejects_zero_interval() {
        let err =
            Config::parse("backend_url: http://localhost:5000\nrefresh_interval_secs: 0\n")
                .unwrap_err();
        assert!(err.to_string().contains("refresh_interval_secs"));
    }
}
