use crate::error::{AppError, Result};

use super::{ChartConfig, Config, ProviderConfig};

/// Validate a config and surface every issue at once.
pub fn validate_config(config: &Config) -> Result<()> {
    let mut issues = Vec::new();

    validate_provider(&config.provider, &mut issues);
    validate_chart(&config.chart, &mut issues);

    if config.workers == 0 {
        issues.push("workers must be at least 1".to_string());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "config invalid:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_provider(provider: &ProviderConfig, issues: &mut Vec<String>) {
    if !provider.chart_url_template.contains("{symbol}") {
        issues.push("provider.chart_url must contain the `{symbol}` placeholder".to_string());
    }
    if !provider.exchange_url_template.contains("{currency}") {
        issues.push(
            "provider.exchange_url must contain the `{currency}` placeholder".to_string(),
        );
    }
    if provider.timeout_secs == 0 {
        issues.push("provider.timeout_secs must be greater than zero".to_string());
    }
    for key in provider.headers.keys() {
        if key.trim().is_empty() {
            issues.push("provider.headers contains an empty header name".to_string());
        }
    }
}

fn validate_chart(chart: &ChartConfig, issues: &mut Vec<String>) {
    if chart.window == 0 {
        issues.push("chart.window must be at least 1".to_string());
    }
    if !(chart.width.is_finite() && chart.width > 0.0) {
        issues.push(format!("chart.width must be positive, found {}", chart.width));
    }
    if !(chart.height.is_finite() && chart.height > 0.0) {
        issues.push(format!("chart.height must be positive, found {}", chart.height));
    }
}
