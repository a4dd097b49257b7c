use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AppError;

use super::{FetchResult, PreparedRequest, Transport, TransportResponse};

enum Scripted {
    Respond { status: u16, body: String },
    Fail(String),
}

/// In-memory transport keyed by URL. Unknown URLs answer 404.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: HashMap<String, (Scripted, Option<Duration>)>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes.insert(
            url.to_string(),
            (
                Scripted::Respond {
                    status,
                    body: body.into(),
                },
                None,
            ),
        );
        self
    }

    pub fn fail(mut self, url: &str, reason: &str) -> Self {
        self.routes
            .insert(url.to_string(), (Scripted::Fail(reason.to_string()), None));
        self
    }

    pub fn delay(mut self, url: &str, delay: Duration) -> Self {
        if let Some(route) = self.routes.get_mut(url) {
            route.1 = Some(delay);
        }
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, request: &PreparedRequest) -> FetchResult<TransportResponse> {
        self.calls.lock().unwrap().push(request.url.clone());
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        let route = self.routes.get(&request.url);
        if let Some((_, Some(delay))) = route {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match route {
            Some((Scripted::Respond { status, body }, _)) => Ok(TransportResponse {
                status: *status,
                body: body.clone(),
            }),
            Some((Scripted::Fail(reason), _)) => Err(AppError::Transport {
                url: request.url.clone(),
                reason: reason.clone(),
            }),
            None => Ok(TransportResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

/// Provider chart payload with a single result.
pub fn chart_body(currency: &str, symbol: &str, price: f64, previous: f64, closes: &[f64]) -> String {
    serde_json::json!({
        "chart": {
            "result": [{
                "meta": {
                    "currency": currency,
                    "symbol": symbol,
                    "regularMarketPrice": price,
                    "chartPreviousClose": previous,
                },
                "indicators": { "quote": [{ "close": closes }] }
            }],
            "error": null
        }
    })
    .to_string()
}

pub fn empty_chart_body() -> String {
    r#"{"chart":{"result":[],"error":null}}"#.to_string()
}
