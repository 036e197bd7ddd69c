//! Shared HTTP plumbing for the remote adapters.

use std::time::Duration;

use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use gymtrack_core::backend::{BackendError, BackendResult};

/// Transport-level timeout for every remote call; the sync layer configures
/// no timeout of its own.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_BODY_CHARS: usize = 512;

pub(crate) fn build_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| Client::new())
}

pub(crate) fn transport(err: reqwest::Error) -> BackendError {
    BackendError::transport(err.to_string())
}

fn log_response(status: reqwest::StatusCode, body: &str) {
    if status.is_success() {
        debug!("API response status: {status}");
        return;
    }
    let mut preview: String = body.chars().take(MAX_LOG_BODY_CHARS).collect();
    if body.chars().count() > MAX_LOG_BODY_CHARS {
        preview.push_str("...");
    }
    debug!("API response error ({status}): {preview}");
}

/// Error bodies across the backends use several shapes; take the first
/// message-like field that parses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    let parsed: ApiErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.msg)
        .or(parsed.error_description)
        .or(parsed.error)
}

pub(crate) async fn api_failure(response: Response) -> BackendError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log_response(status, &body);
    let message = error_message(&body).unwrap_or_else(|| format!("request failed: {body}"));
    BackendError::api(status.as_u16(), message)
}

pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(api_failure(response).await);
    }
    let body = response.text().await.map_err(transport)?;
    log_response(status, &body);
    serde_json::from_str(&body)
        .map_err(|e| BackendError::encoding(format!("failed to parse response: {e}")))
}

pub(crate) async fn expect_success(response: Response) -> BackendResult<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(api_failure(response).await)
    }
}
