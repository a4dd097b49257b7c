use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::fetch::CHART_CONCURRENCY_LIMIT;
use crate::market::CurrencyTable;

pub mod loader;
pub mod validator;

pub use loader::load_config;

pub const DEFAULT_CHART_URL_TEMPLATE: &str =
    "https://query1.finance.yahoo.com/v8/finance/chart/{symbol}?range=1mo&interval=1d";
pub const DEFAULT_EXCHANGE_URL_TEMPLATE: &str =
    "https://query1.finance.yahoo.com/v8/finance/chart/USD{currency}=X?range=1d&interval=1d";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Number of most-recent daily closes kept for the chart.
pub const DEFAULT_CHART_WINDOW: usize = 21;
pub const DEFAULT_CHART_WIDTH: f64 = 100.0;
pub const DEFAULT_CHART_HEIGHT: f64 = 50.0;

/// Where and how the quote provider is reached.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Per-instrument chart endpoint; must contain `{symbol}`.
    pub chart_url_template: String,
    /// USD cross-rate endpoint; must contain `{currency}`.
    pub exchange_url_template: String,
    pub headers: HashMap<String, String>,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            chart_url_template: DEFAULT_CHART_URL_TEMPLATE.to_string(),
            exchange_url_template: DEFAULT_EXCHANGE_URL_TEMPLATE.to_string(),
            headers: HashMap::from([(
                "User-Agent".to_string(),
                DEFAULT_USER_AGENT.to_string(),
            )]),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChartConfig {
    pub window: usize,
    pub width: f64,
    pub height: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_CHART_WINDOW,
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub chart: ChartConfig,
    pub workers: usize,
    pub currencies: CurrencyTable,
}

impl Config {
    pub fn builtin() -> Self {
        Self {
            provider: ProviderConfig::default(),
            chart: ChartConfig::default(),
            workers: CHART_CONCURRENCY_LIMIT,
            currencies: CurrencyTable::builtin(),
        }
    }

    /// Load a JSON config file; absent fields keep their builtin values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_config(path.as_ref())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builtin()
    }
}
