use crate::error::Result;

pub mod decode;
pub mod exchange;
pub mod pool;
pub mod request;
pub mod schema;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use decode::{decode_json, decode_json_task};
pub use exchange::fetch_usd_rate;
pub use pool::{TaskOutcome, WorkerPool};
pub use request::{build_headers, prepare_request, PreparedRequest};
pub use schema::{ChartResponse, QuoteResponse};
pub use transport::{HttpTransport, Transport, TransportResponse};

/// Default concurrency guard applied when issuing chart requests.
pub const CHART_CONCURRENCY_LIMIT: usize = 5;

pub type FetchResult<T> = Result<T>;
