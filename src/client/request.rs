//! Single request helpers shared by every fetch operation.

use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

use crate::api::types::ApiEnvelope;
use crate::api::{ApiError, Transport, redact};

use super::SchemaError;

/// GETs `url` and returns the body, classifying non-success statuses.
pub(super) async fn get_text(transport: &dyn Transport, url: &Url) -> Result<String, SchemaError> {
    let response = transport.get(url).await?;
    if !response.is_success() {
        let error = ApiError::from_response(&response);
        warn!(
            status = response.status,
            kind = %error.kind(),
            retryable = error.is_retryable(),
            url = %redact(url),
            "Steam API request failed"
        );
        return Err(error.into());
    }
    Ok(response.body)
}

/// GETs `url` and decodes the `result` member of the JSON envelope.
pub(super) async fn get_result<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &Url,
) -> Result<T, SchemaError> {
    let body = get_text(transport, url).await?;
    serde_json::from_str::<ApiEnvelope<T>>(&body)
        .map(|envelope| envelope.result)
        .map_err(|source| SchemaError::decode(redact(url), source))
}
