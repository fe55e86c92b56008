use crate::domain::metric::{CatalogueError, GroupMember, Metric, MetricCatalogue, MetricGroup};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("backend.base_url must start with http:// or https://, got '{0}'")]
    BaseUrl(String),
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub backend: BackendSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    /// Empty `metrics` and `groups` select the standard Enviro+ catalogue.
    #[serde(default)]
    pub metrics: Vec<MetricConfig>,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    /// Reading description (e.g. "humid") to icon path
    #[serde(default)]
    pub icons: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingSettings {
    #[serde(default = "default_readings_secs")]
    pub readings_secs: u64,
    #[serde(default = "default_sun_secs")]
    pub sun_secs: u64,
    #[serde(default = "default_details_dismiss_secs")]
    pub details_dismiss_secs: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            readings_secs: default_readings_secs(),
            sun_secs: default_sun_secs(),
            details_dismiss_secs: default_details_dismiss_secs(),
        }
    }
}

impl PollingSettings {
    pub fn readings_every(&self) -> Duration {
        Duration::from_secs(self.readings_secs)
    }

    pub fn sun_every(&self) -> Duration {
        Duration::from_secs(self.sun_secs)
    }

    pub fn details_dismiss_after(&self) -> Duration {
        Duration::from_secs(self.details_dismiss_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricConfig {
    pub id: String,
    pub title: String,
    pub color: String,
    #[serde(default = "default_true")]
    pub default_enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GroupConfig {
    pub id: String,
    pub title: String,
    #[serde(default = "default_true")]
    pub default_enabled: bool,
    pub members: Vec<GroupMemberConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GroupMemberConfig {
    pub metric: String,
    pub color: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_readings_secs() -> u64 {
    5
}

fn default_sun_secs() -> u64 {
    3600
}

fn default_details_dismiss_secs() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

/// Load `config/dashboard` (or the file named by `DASHBOARD_CONFIG`), then
/// apply `DASHBOARD__SECTION__KEY` environment overrides.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let path = std::env::var("DASHBOARD_CONFIG").unwrap_or_else(|_| "config/dashboard".into());
    let settings = config::Config::builder()
        .add_source(config::File::with_name(&path))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    let dashboard: DashboardConfig = settings.try_deserialize()?;
    dashboard.validate()?;
    Ok(dashboard)
}

impl DashboardConfig {
    /// Parse and validate config from a TOML string (e.g. for tests).
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()?;

        let dashboard: DashboardConfig = settings.try_deserialize()?;
        dashboard.validate()?;
        Ok(dashboard)
    }

    pub fn catalogue(&self) -> Result<MetricCatalogue, CatalogueError> {
        if self.metrics.is_empty() && self.groups.is_empty() {
            return Ok(MetricCatalogue::standard());
        }

        let metrics = self
            .metrics
            .iter()
            .map(|m| Metric {
                id: m.id.clone(),
                title: m.title.clone(),
                color: m.color.clone(),
                default_enabled: m.default_enabled,
            })
            .collect();
        let groups = self
            .groups
            .iter()
            .map(|g| MetricGroup {
                id: g.id.clone(),
                title: g.title.clone(),
                default_enabled: g.default_enabled,
                members: g
                    .members
                    .iter()
                    .map(|member| GroupMember {
                        metric: member.metric.clone(),
                        color: member.color.clone(),
                    })
                    .collect(),
            })
            .collect();

        MetricCatalogue::new(metrics, groups)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.backend.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::BaseUrl(url.clone()));
        }

        for (name, secs) in [
            ("backend.timeout_secs", self.backend.timeout_secs),
            ("polling.readings_secs", self.polling.readings_secs),
            ("polling.sun_secs", self.polling.sun_secs),
            ("polling.details_dismiss_secs", self.polling.details_dismiss_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::ZeroDuration(name));
            }
        }

        self.catalogue()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [backend]
            base_url = "http://enviro.local:4444"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.polling.readings_every(), Duration::from_secs(5));
        assert_eq!(config.polling.sun_every(), Duration::from_secs(3600));
        assert_eq!(config.polling.details_dismiss_after(), Duration::from_secs(5));
        assert_eq!(config.catalogue().unwrap(), MetricCatalogue::standard());
    }

    #[test]
    fn test_custom_catalogue() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [backend]
            base_url = "https://sensors.example.org"

            [polling]
            readings_secs = 10

            [[metrics]]
            id = "temperature"
            title = "Temperature (°C)"
            color = "red"

            [[metrics]]
            id = "pm1"
            title = "PM1"
            color = "red"
            default_enabled = false

            [[metrics]]
            id = "pm10"
            title = "PM10"
            color = "red"
            default_enabled = false

            [[groups]]
            id = "particles"
            title = "Particles (Combined)"
            members = [
                { metric = "pm10", color = "blue" },
                { metric = "pm1", color = "red" },
            ]

            [icons]
            humid = "/static/img/humid.png"
            "#,
        )
        .unwrap();

        assert_eq!(config.polling.readings_secs, 10);
        assert_eq!(config.icons.get("humid").unwrap(), "/static/img/humid.png");

        let catalogue = config.catalogue().unwrap();
        assert_eq!(catalogue.metrics().len(), 3);
        let group = &catalogue.groups()[0];
        assert_eq!(group.members[0].metric, "pm10");
        assert_eq!(group.members[0].color, "blue");
        assert!(catalogue.default_enabled().contains("particles"));
        assert!(!catalogue.default_enabled().contains("pm1"));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let bad_url = DashboardConfig::from_toml_str(
            r#"
            [backend]
            base_url = "enviro.local"
            "#,
        );
        assert!(bad_url.is_err());

        let zero_poll = DashboardConfig::from_toml_str(
            r#"
            [backend]
            base_url = "http://enviro.local"

            [polling]
            sun_secs = 0
            "#,
        );
        assert!(zero_poll.unwrap_err().to_string().contains("polling.sun_secs"));

        let lonely_group = DashboardConfig::from_toml_str(
            r#"
            [backend]
            base_url = "http://enviro.local"

            [[metrics]]
            id = "pm1"
            title = "PM1"
            color = "red"

            [[groups]]
            id = "particles"
            title = "Particles"
            members = [{ metric = "pm1", color = "red" }]
            "#,
        );
        assert!(lonely_group.unwrap_err().to_string().contains("expected 2 or 3"));
    }
}
