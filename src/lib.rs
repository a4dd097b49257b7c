pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod market;

pub use error::{AppError, Result};
pub use market::{BatchResult, InstrumentRequest, MarketAggregator, MarketSummary};
