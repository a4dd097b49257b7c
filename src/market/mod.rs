pub mod aggregator;
pub mod chart;
pub mod currency;
pub mod observer;
pub mod summary;

pub use aggregator::{percent_change, MarketAggregator};
pub use chart::{svg_polyline_points, ChartPoint};
pub use currency::CurrencyTable;
pub use observer::{FailureObserver, LogObserver};
pub use summary::{BatchResult, InstrumentRequest, MarketSummary, Markets};
