//! Wire types for the provider's chart endpoint.
//!
//! The same envelope serves both instrument charts and `USD{code}=X`
//! currency pairs.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartResponse {
    #[serde(default)]
    pub chart: ChartEnvelope,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ProviderError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub regular_market_price: f64,
    #[serde(default)]
    pub chart_previous_close: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteSeries>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteSeries {
    /// Missing trading days arrive as `null`.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

/// Flattened quote for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteResponse {
    pub currency: String,
    pub symbol: String,
    pub latest_price: f64,
    pub previous_close: f64,
    /// Oldest first; zeros mark days without a close.
    pub price_series: Vec<f64>,
}

impl ChartResponse {
    pub fn results(&self) -> &[ChartResult] {
        self.chart.result.as_deref().unwrap_or_default()
    }

    pub fn first_result(&self) -> Option<&ChartResult> {
        self.results().first()
    }

    /// Provider-reported error text, if the payload carries one.
    pub fn error_description(&self) -> Option<&str> {
        self.chart
            .error
            .as_ref()
            .map(|error| error.description.as_str())
            .filter(|description| !description.is_empty())
    }

    /// `None` when the payload is well-formed but has no result entries.
    pub fn into_quote(self) -> Option<QuoteResponse> {
        let result = self.chart.result?.into_iter().next()?;
        let price_series = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|series| {
                series
                    .close
                    .into_iter()
                    .map(|close| close.unwrap_or(0.0))
                    .collect()
            })
            .unwrap_or_default();

        Some(QuoteResponse {
            currency: result.meta.currency,
            symbol: result.meta.symbol,
            latest_price: result.meta.regular_market_price,
            previous_close: result.meta.chart_previous_close,
            price_series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_provider_payload_with_gaps() {
        let sample = r#"{
            "chart": {
                "result": [{
                    "meta": {
                        "currency": "USD",
                        "symbol": "AAPL",
                        "regularMarketPrice": 189.5,
                        "chartPreviousClose": 185.0,
                        "exchangeName": "NMS"
                    },
                    "timestamp": [1, 2, 3],
                    "indicators": {
                        "quote": [{ "close": [186.0, null, 189.5], "open": [1, 2, 3] }],
                        "adjclose": [{ "adjclose": [186.0, null, 189.5] }]
                    }
                }],
                "error": null
            }
        }"#;

        let response: ChartResponse = serde_json::from_str(sample).unwrap();
        let quote = response.into_quote().expect("quote present");

        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.currency, "USD");
        assert!((quote.latest_price - 189.5).abs() < 1e-9);
        assert!((quote.previous_close - 185.0).abs() < 1e-9);
        assert_eq!(quote.price_series, vec![186.0, 0.0, 189.5]);
    }

    #[test]
    fn null_result_is_empty_not_an_error() {
        let sample = r#"{
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        }"#;

        let response: ChartResponse = serde_json::from_str(sample).unwrap();
        assert!(response.results().is_empty());
        assert_eq!(
            response.error_description(),
            Some("No data found, symbol may be delisted")
        );
        assert!(response.into_quote().is_none());
    }

    #[test]
    fn missing_quote_series_yields_empty_prices() {
        let sample = r#"{"chart":{"result":[{"meta":{"currency":"EUR","symbol":"X","regularMarketPrice":1.0,"chartPreviousClose":1.0},"indicators":{"quote":[]}}]}}"#;
        let response: ChartResponse = serde_json::from_str(sample).unwrap();
        let quote = response.into_quote().unwrap();
        assert!(quote.price_series.is_empty());
    }
}
