use std::sync::Arc;

use futures::future::{self, FutureExt};
use log::{debug, warn};
use reqwest::header::HeaderMap;

use crate::config::{ChartConfig, Config, ProviderConfig};
use crate::error::{AppError, Result};
use crate::fetch::{
    build_headers, decode_json_task, fetch_usd_rate, prepare_request, ChartResponse,
    FetchResult, HttpTransport, PreparedRequest, QuoteResponse, Transport, WorkerPool,
};

use super::{
    svg_polyline_points, BatchResult, CurrencyTable, FailureObserver, InstrumentRequest,
    LogObserver, MarketSummary,
};

const BASE_CURRENCY: &str = "USD";

/// Fetches a batch of instruments concurrently and turns each into a [`MarketSummary`].
pub struct MarketAggregator {
    transport: Arc<dyn Transport>,
    observer: Arc<dyn FailureObserver>,
    provider: ProviderConfig,
    chart: ChartConfig,
    currencies: CurrencyTable,
    headers: HeaderMap,
    workers: usize,
}

impl MarketAggregator {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        let headers = build_headers(&config.provider.headers)?;
        Ok(Self {
            transport,
            observer: Arc::new(LogObserver),
            provider: config.provider,
            chart: config.chart,
            currencies: config.currencies,
            headers,
            workers: config.workers,
        })
    }

    /// Aggregator backed by a real HTTP client.
    pub fn from_config(config: Config) -> Result<Self> {
        let transport = HttpTransport::from_config(&config.provider)?;
        Self::new(config, Arc::new(transport))
    }

    pub fn with_observer(mut self, observer: Arc<dyn FailureObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub async fn aggregate(&self, requests: &[InstrumentRequest]) -> BatchResult {
        let pool = match WorkerPool::new(self.workers) {
            Ok(pool) => pool,
            Err(err) => return BatchResult::no_content(Some(err.to_string())),
        };

        let prepared: Vec<FetchResult<PreparedRequest>> = requests
            .iter()
            .map(|request| {
                prepare_request(
                    &self.provider.chart_url_template,
                    &[("symbol", request.symbol.as_str())],
                    &self.headers,
                )
            })
            .collect();

        let decode = decode_json_task::<ChartResponse>(Arc::clone(&self.transport));
        let outcomes = match pool
            .run(prepared, move |prepared| match prepared {
                Ok(request) => decode(request),
                Err(err) => future::ready(Err(err)).boxed(),
            })
            .await
        {
            Ok(outcomes) => outcomes,
            Err(err) => return BatchResult::no_content(Some(err.to_string())),
        };

        let mut summaries = Vec::with_capacity(outcomes.len());
        let mut failed = 0;

        for (request, outcome) in requests.iter().zip(outcomes) {
            let summary = match outcome.result {
                Ok(response) => self.summarize(request, response).await,
                Err(err) => Err(err),
            };

            match summary {
                Ok(summary) => summaries.push(summary),
                Err(err) => {
                    failed += 1;
                    self.observer.record_failure(&request.symbol, &err);
                }
            }
        }

        if summaries.is_empty() {
            return BatchResult::no_content(None);
        }

        if failed > 0 {
            warn!(
                "Fetched {} of {} market(s); {} failed",
                summaries.len(),
                requests.len(),
                failed
            );
            return BatchResult::partial(summaries, failed);
        }

        BatchResult::complete(summaries)
    }

    async fn summarize(
        &self,
        request: &InstrumentRequest,
        response: ChartResponse,
    ) -> Result<MarketSummary> {
        if let Some(description) = response.error_description() {
            debug!("Provider reported for {}: {}", request.symbol, description);
        }

        let quote = response.into_quote().ok_or_else(|| AppError::EmptyResult {
            symbol: request.symbol.clone(),
        })?;

        let QuoteResponse {
            currency: native_currency,
            latest_price,
            previous_close,
            price_series,
            ..
        } = quote;

        let prices = recent_window(&price_series, self.chart.window);
        if prices.len() < price_series.len() {
            debug!(
                "Truncated {} closes for {} to the latest {}",
                price_series.len(),
                request.symbol,
                prices.len()
            );
        }
        let mut previous = previous_price(prices, previous_close);
        let chart_points = svg_polyline_points(
            self.chart.width,
            self.chart.height,
            &without_placeholders(prices),
        );

        let mut price = latest_price;
        let mut currency_symbol = self.currencies.symbol_or_code(&native_currency);

        // Only USD-quoted instruments are converted.
        if let Some(preferred) = request.preferred_currency() {
            if preferred != native_currency && native_currency == BASE_CURRENCY {
                let rate = fetch_usd_rate(
                    self.transport.as_ref(),
                    &self.provider.exchange_url_template,
                    &self.headers,
                    preferred,
                )
                .await?;

                debug!(
                    "Converting {} from {} to {} at {}",
                    request.symbol, native_currency, preferred, rate
                );
                price *= rate;
                previous *= rate;
                currency_symbol = self.currencies.symbol_or_code(preferred);
            }
        }

        Ok(MarketSummary {
            request: request.clone(),
            price,
            currency_symbol,
            percent_change: percent_change(price, previous),
            chart_points,
        })
    }
}

/// `(current - previous) / previous * 100`, or `0.0` when `previous` is zero.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous.abs() < f64::EPSILON {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

fn recent_window(prices: &[f64], window: usize) -> &[f64] {
    if prices.len() > window {
        &prices[prices.len() - window..]
    } else {
        prices
    }
}

/// Second-to-last close, unless it is a zero placeholder.
fn previous_price(prices: &[f64], fallback: f64) -> f64 {
    match prices.len().checked_sub(2).map(|index| prices[index]) {
        Some(close) if close != 0.0 => close,
        _ => fallback,
    }
}

fn without_placeholders(prices: &[f64]) -> Vec<f64> {
    prices.iter().copied().filter(|&price| price != 0.0).collect()
}
