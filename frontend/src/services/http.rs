use common::repository::RepositoryError;
use gloo_net::http::Response;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

pub(crate) fn network_error(err: gloo_net::Error) -> RepositoryError {
    RepositoryError::Network(err.to_string())
}

pub(crate) fn js_error(err: JsValue) -> RepositoryError {
    RepositoryError::InvalidPayload(format!("{err:?}"))
}

/// Turns a non-2xx response into `RepositoryError::Backend` carrying the body
/// the backend sent.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, RepositoryError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::debug!("{} answered {status}: {body}", response.url());
    Err(RepositoryError::Backend { status, body })
}

pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, RepositoryError> {
    response
        .json::<T>()
        .await
        .map_err(|err| RepositoryError::InvalidPayload(err.to_string()))
}

/// Reads an identifier the backend returns either as a JSON string or as plain text.
pub(crate) fn parse_identifier(body: &str) -> String {
    serde_json::from_str::<String>(body).unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_accepts_json_string_or_plain_text() {
        assert_eq!(parse_identifier("\"5f1c\""), "5f1c");
        assert_eq!(parse_identifier("5f1c\n"), "5f1c");
    }
}
