use crate::application::prediction_flow::ResponseOrdering;
use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub service: ServiceSettings,
    #[serde(default)]
    pub flow: FlowSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub predict_path: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FlowSettings {
    #[serde(default)]
    pub response_ordering: ResponseOrdering,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    /// Whether the page has a chart surface at all
    pub show_chart: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { show_chart: true }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl ServiceSettings {
    /// Absolute URL of the prediction endpoint
    pub fn predict_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.predict_path.trim_start_matches('/')
        )
    }
}

fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("service.base_url", "http://127.0.0.1:8080")?
        .set_default("service.predict_path", "/predict")?)
}

/// Defaults, then `config/client.*` if present, then `LOADCAST__*` env vars
pub fn load_client_config() -> anyhow::Result<ClientConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/client").required(false))
        .add_source(config::Environment::with_prefix("LOADCAST").separator("__"))
        .build()
        .context("Failed to read client configuration")?;

    settings
        .try_deserialize()
        .context("Invalid client configuration")
}

#[cfg(test)]
fn parse_client_config(toml: &str) -> anyhow::Result<ClientConfig> {
    let settings = builder()?
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;
    Ok(settings.try_deserialize()?)
}
