use crate::domain::refresh::DEFAULT_INTERVAL_SECS;
use crate::domain::visualization::Visualization;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct PinotConfig {
    pub pinot: PinotSettings,
}

/// Broker connectivity. Fixed at process start; none of this is exposed as
/// a runtime parameter.
#[derive(Debug, Deserialize, Clone)]
pub struct PinotSettings {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl PinotSettings {
    pub fn broker_url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.scheme,
            self.host.trim_end_matches('/'),
            self.port,
            self.path
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_interval")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_visualization")]
    pub default_visualization: Visualization,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_cache_ttl() -> u64 {
    5
}

fn default_visualization() -> Visualization {
    Visualization::InventoryByCategory
}

pub fn load_pinot_config() -> anyhow::Result<PinotConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/pinot"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
