use serde::Serialize;

use crate::error::{AppError, Result};

use super::ChartPoint;

/// One instrument to fetch, optionally displayed in another currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentRequest {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_currency: Option<String>,
}

impl InstrumentRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            preferred_currency: None,
        }
    }

    pub fn with_currency(symbol: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            preferred_currency: Some(currency.into()),
        }
    }

    /// Parse `SYMBOL` or `SYMBOL:CURRENCY`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (symbol, currency) = match raw.split_once(':') {
            Some((symbol, currency)) => (symbol.trim(), Some(currency.trim())),
            None => (raw, None),
        };

        if symbol.is_empty() {
            return Err(AppError::message(format!(
                "instrument `{raw}` is missing a symbol"
            )));
        }

        match currency {
            Some(code) if code.is_empty() => Err(AppError::message(format!(
                "instrument `{raw}` has an empty currency"
            ))),
            Some(code) => Ok(Self::with_currency(symbol, code.to_uppercase())),
            None => Ok(Self::new(symbol)),
        }
    }

    pub fn preferred_currency(&self) -> Option<&str> {
        self.preferred_currency
            .as_deref()
            .filter(|code| !code.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary {
    pub request: InstrumentRequest,
    pub price: f64,
    pub currency_symbol: String,
    pub percent_change: f64,
    pub chart_points: Vec<ChartPoint>,
}

pub type Markets = Vec<MarketSummary>;

/// Summaries plus the batch-level status.
///
/// `error` is `None`, [`AppError::NoContent`], or [`AppError::PartialContent`].
#[derive(Debug)]
pub struct BatchResult {
    pub summaries: Markets,
    pub error: Option<AppError>,
}

impl BatchResult {
    pub fn complete(summaries: Markets) -> Self {
        Self {
            summaries,
            error: None,
        }
    }

    pub fn partial(summaries: Markets, failed: usize) -> Self {
        Self {
            summaries,
            error: Some(AppError::PartialContent { failed }),
        }
    }

    pub fn no_content(cause: Option<String>) -> Self {
        Self {
            summaries: Vec::new(),
            error: Some(AppError::NoContent { cause }),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_partial(&self) -> bool {
        self.error.as_ref().is_some_and(AppError::is_partial_content)
    }

    pub fn is_empty(&self) -> bool {
        self.error.as_ref().is_some_and(AppError::is_no_content)
    }

    /// Number of instruments that failed, when the batch is partial.
    pub fn failed(&self) -> usize {
        match self.error {
            Some(AppError::PartialContent { failed }) => failed,
            _ => 0,
        }
    }

    pub fn into_parts(self) -> (Markets, Option<AppError>) {
        (self.summaries, self.error)
    }
}
