//! OCR backend client: one multipart POST, one text field back.
//!
//! Timeouts live here; retry/backoff deliberately does not exist anywhere.

use std::time::{Duration, Instant};

use reqwest::blocking::multipart::{Form, Part};

use crate::{DispatchError, DispatchResult};

/// Cap on how much of an error body is carried into the error message.
const ERROR_BODY_CAP: usize = 800;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct OcrClient {
    url: String,
    http: reqwest::blocking::Client,
}

impl OcrClient {
    /// Build a client for the given upload endpoint.
    pub fn new(url: impl Into<String>) -> DispatchResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { url: url.into(), http })
    }

    /// POST the PNG as multipart form data and return the recognized text.
    pub fn recognize(&self, png_bytes: Vec<u8>) -> DispatchResult<String> {
        let part = Part::bytes(png_bytes)
            .file_name("capture.png")
            .mime_str("image/png")?;
        let form = Form::new().part("file", part);

        let start = Instant::now();
        let response = self
            .http
            .post(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send();
        let elapsed = start.elapsed().as_secs_f64();

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                log::info!("OCR API returned: error ({elapsed:.3}s)");
                return Err(e.into());
            }
        };

        let status = response.status();
        log::info!("OCR API returned: {} ({elapsed:.3}s)", status.as_u16());

        if !status.is_success() {
            let body: String = response
                .text()
                .unwrap_or_default()
                .chars()
                .take(ERROR_BODY_CAP)
                .collect();
            return Err(DispatchError::Backend { status: status.as_u16(), body });
        }

        let value: serde_json::Value = response.json()?;
        extract_text(&value).ok_or(DispatchError::MissingField)
    }
}

/// Pull the `ocr_result` string out of a backend response.
fn extract_text(value: &serde_json::Value) -> Option<String> {
    value.get("ocr_result")?.as_str().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_the_result_field() {
        let value = json!({ "ocr_result": "hello world", "elapsed": 0.2 });
        assert_eq!(extract_text(&value).as_deref(), Some("hello world"));
    }

    #[test]
    fn missing_or_non_string_field_is_rejected() {
        assert_eq!(extract_text(&json!({})), None);
        assert_eq!(extract_text(&json!({ "result": "x" })), None);
        assert_eq!(extract_text(&json!({ "ocr_result": 42 })), None);
    }

    #[test]
    fn empty_result_is_still_a_result() {
        assert_eq!(extract_text(&json!({ "ocr_result": "" })).as_deref(), Some(""));
    }
}
