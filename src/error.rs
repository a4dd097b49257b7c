use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("unexpected status code {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("response for {symbol} contains no data")]
    EmptyResult { symbol: String },
    #[error("failed to fetch USD/{currency} exchange rate: {source}")]
    Conversion {
        currency: String,
        #[source]
        source: Box<AppError>,
    },
    #[error("no data available{}", format_cause(.cause))]
    NoContent { cause: Option<String> },
    #[error("partial data available: could not fetch data for {failed} market(s)")]
    PartialContent { failed: usize },
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }

    pub fn is_no_content(&self) -> bool {
        matches!(self, AppError::NoContent { .. })
    }

    pub fn is_partial_content(&self) -> bool {
        matches!(self, AppError::PartialContent { .. })
    }
}

fn format_cause(cause: &Option<String>) -> String {
    cause
        .as_deref()
        .map(|cause| format!(": {cause}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_render_their_headline() {
        let empty = AppError::NoContent { cause: None };
        assert_eq!(empty.to_string(), "no data available");
        assert!(empty.is_no_content());

        let wrapped = AppError::NoContent {
            cause: Some("pool failed".to_string()),
        };
        assert_eq!(wrapped.to_string(), "no data available: pool failed");

        let partial = AppError::PartialContent { failed: 2 };
        assert!(partial.is_partial_content());
        assert!(partial.to_string().contains("2 market(s)"));
    }
}
