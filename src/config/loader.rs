use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::error::{Context, Result};
use crate::market::CurrencyTable;

use super::{validator, ChartConfig, Config, ProviderConfig};

/// Read `path`, overlay it on [`Config::builtin`], and validate the result.
pub fn load_config(path: &Path) -> Result<Config> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config JSON at {}", path.display()))?;

    let config = parse_config(&json)
        .with_context(|| format!("failed to parse config JSON at {}", path.display()))?;

    validator::validate_config(&config)?;

    Ok(config)
}

pub fn parse_config(json: &str) -> serde_json::Result<Config> {
    let raw: RawConfig = serde_json::from_str(json)?;
    Ok(raw.into_config())
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    provider: RawProviderConfig,
    #[serde(default)]
    chart: RawChartConfig,
    #[serde(default)]
    workers: Option<usize>,
    #[serde(default)]
    currencies: HashMap<String, String>,
}

impl RawConfig {
    fn into_config(self) -> Config {
        let builtin = Config::builtin();
        Config {
            provider: self.provider.into_provider_config(builtin.provider),
            chart: self.chart.into_chart_config(builtin.chart),
            workers: self.workers.unwrap_or(builtin.workers),
            currencies: CurrencyTable::with_overrides(self.currencies),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawProviderConfig {
    #[serde(default)]
    chart_url: Option<String>,
    #[serde(default)]
    exchange_url: Option<String>,
    #[serde(default)]
    headers: Option<HashMap<String, String>>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl RawProviderConfig {
    fn into_provider_config(self, fallback: ProviderConfig) -> ProviderConfig {
        ProviderConfig {
            chart_url_template: self.chart_url.unwrap_or(fallback.chart_url_template),
            exchange_url_template: self.exchange_url.unwrap_or(fallback.exchange_url_template),
            headers: self.headers.unwrap_or(fallback.headers),
            timeout_secs: self.timeout_secs.unwrap_or(fallback.timeout_secs),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawChartConfig {
    #[serde(default)]
    window: Option<usize>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
}

impl RawChartConfig {
    fn into_chart_config(self, fallback: ChartConfig) -> ChartConfig {
        ChartConfig {
            window: self.window.unwrap_or(fallback.window),
            width: self.width.unwrap_or(fallback.width),
            height: self.height.unwrap_or(fallback.height),
        }
    }
}
