use reqwest::header::HeaderMap;

use crate::error::AppError;

use super::{decode_json, prepare_request, ChartResponse, FetchResult, Transport};

/// Fetch how many units of `currency` one US dollar buys.
///
/// Single sequential request; every failure is reported as
/// [`AppError::Conversion`].
pub async fn fetch_usd_rate(
    transport: &dyn Transport,
    url_template: &str,
    headers: &HeaderMap,
    currency: &str,
) -> FetchResult<f64> {
    request_usd_rate(transport, url_template, headers, currency)
        .await
        .map_err(|source| AppError::Conversion {
            currency: currency.to_string(),
            source: Box::new(source),
        })
}

async fn request_usd_rate(
    transport: &dyn Transport,
    url_template: &str,
    headers: &HeaderMap,
    currency: &str,
) -> FetchResult<f64> {
    let request = prepare_request(url_template, &[("currency", currency)], headers)?;
    let response: ChartResponse = decode_json(transport, &request).await?;

    let Some(result) = response.first_result() else {
        return Err(AppError::EmptyResult {
            symbol: format!("USD{currency}=X"),
        });
    };

    let rate = result.meta.regular_market_price;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(AppError::message(format!(
            "provider returned unusable rate {rate} for USD{currency}"
        )));
    }

    Ok(rate)
}
