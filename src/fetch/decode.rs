use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde::de::DeserializeOwned;

use crate::error::AppError;

use super::{FetchResult, PreparedRequest, Transport};

/// Execute `request` once and decode a 2xx body as `T`.
pub async fn decode_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: &PreparedRequest,
) -> FetchResult<T> {
    let response = transport.get(request).await?;

    if !response.is_success() {
        return Err(AppError::Status {
            url: request.url.clone(),
            status: response.status,
        });
    }

    serde_json::from_str(&response.body).map_err(|source| AppError::Decode {
        url: request.url.clone(),
        source,
    })
}

/// Wrap [`decode_json`] as a pool task sharing one transport.
pub fn decode_json_task<T>(
    transport: Arc<dyn Transport>,
) -> impl Fn(PreparedRequest) -> BoxFuture<'static, FetchResult<T>> + Send + Sync + 'static
where
    T: DeserializeOwned + Send + 'static,
{
    move |request: PreparedRequest| {
        let transport = Arc::clone(&transport);
        async move { decode_json::<T>(transport.as_ref(), &request).await }.boxed()
    }
}
