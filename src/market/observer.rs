use log::error;

use crate::error::AppError;

/// Receives per-instrument failures the aggregator skips over.
pub trait FailureObserver: Send + Sync {
    fn record_failure(&self, symbol: &str, cause: &AppError);
}

/// Default observer: one `error!` line per failed instrument.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl FailureObserver for LogObserver {
    fn record_failure(&self, symbol: &str, cause: &AppError) {
        error!("Failed to fetch market data for {}: {}", symbol, cause);
    }
}
