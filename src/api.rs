//! Client for the remote inference endpoint.
//!
//! One multipart POST per invocation; no retry, timeout, or cancellation.
//! The raw status/body mapping lives in [`interpret_response`] so the
//! contract can be tested without a network.

use serde::Deserialize;
use std::sync::OnceLock;

pub const API_BASE_ENV: &str = "MEDREPORT_API_URL";
const DEFAULT_API_BASE: &str = "http://localhost:8000";

const CONNECT_ERROR_MESSAGE: &str =
    "Failed to connect to the backend API or an internal error occurred.";

/// Base URL of the inference service, overridable via `MEDREPORT_API_URL`.
pub fn api_base_url() -> String {
    std::env::var(API_BASE_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Shared client, built once and reused across submissions.
fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    report: Option<String>,
    error: Option<String>,
}

/// Uploads the image bytes as multipart field `file` to `{base}/predict` and
/// returns the generated report text, or a human-readable failure message.
pub async fn request_report(
    base_url: String,
    file_name: String,
    bytes: Vec<u8>,
) -> Result<String, String> {
    let url = format!("{}/predict", base_url.trim_end_matches('/'));
    log::info!("Submitting {file_name} to {url}");

    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = http_client()
        .post(&url)
        .multipart(form)
        .send()
        .await
        .map_err(|err| {
            log::error!("Request to {url} failed: {err}");
            CONNECT_ERROR_MESSAGE.to_string()
        })?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(|err| {
        log::error!("Failed to read response body from {url}: {err}");
        CONNECT_ERROR_MESSAGE.to_string()
    })?;

    interpret_response(status, &body)
}

/// Maps an HTTP status and body to the report outcome:
/// non-2xx is a transport failure carrying status and body, a 2xx body with
/// an `error` field is a server-signaled (semantic) failure, and a 2xx body
/// with a `report` field is a success. A 2xx body that is not the expected
/// JSON gets the same generic treatment as a connection failure.
pub fn interpret_response(status: u16, body: &str) -> Result<String, String> {
    if !(200..300).contains(&status) {
        return Err(format!("HTTP {status}: {body}"));
    }

    let parsed: PredictResponse = serde_json::from_str(body).map_err(|err| {
        log::error!("Unparseable 2xx response body: {err}");
        CONNECT_ERROR_MESSAGE.to_string()
    })?;

    if let Some(error) = parsed.error.filter(|error| !error.is_empty()) {
        return Err(error);
    }

    Ok(parsed.report.unwrap_or_default())
}
