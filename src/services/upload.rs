//! HTTP hand-off of an encoded report to the collection endpoint.
//!
//! One POST per finalize. The body is the JSON payload serialized by hand
//! and sent as `text/plain;charset=utf-8`: the hosted collection script
//! parses the JSON from the raw body, and the plain content type keeps it
//! from triggering a pre-flight negotiation.

use crate::domain::models::{EncodedReport, UploadPayload, UploadReceipt, UploadResponse};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str =
    "https://script.google.com/macros/s/AKfycbwa8FJi0wRnGAZqevfpJEe4E4OqMgt8U6yzLjhQa2nco8zlBB_Dip9FIIp5tlJkwfWD/exec";

pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

const UNKNOWN_SERVER_ERROR: &str = "Ocurrió un error desconocido en el servidor.";

#[derive(thiserror::Error, Debug)]
pub enum UploadError {
    #[error("no se pudo preparar la solicitud de subida")]
    Payload(#[from] serde_json::Error),
    /// The request never completed, or the reply was not parseable.
    #[error("No se pudo conectar con el servidor. Revise su conexión a internet.")]
    Network(#[source] reqwest::Error),
    /// The endpoint answered but reported a failure.
    #[error("{}", .0.as_deref().unwrap_or(UNKNOWN_SERVER_ERROR))]
    Server(Option<String>),
}

pub fn payload_for(report: &EncodedReport) -> UploadPayload {
    UploadPayload {
        file: BASE64.encode(&report.bytes),
        file_name: report.file_name.clone(),
        mime_type: XLSX_MIME.to_string(),
    }
}

pub fn upload_report(endpoint: &str, report: &EncodedReport) -> Result<UploadReceipt, UploadError> {
    let body = serde_json::to_string(&payload_for(report))?;
    let client = reqwest::blocking::Client::builder()
        .timeout(UPLOAD_TIMEOUT)
        .build()
        .map_err(UploadError::Network)?;
    let resp = client
        .post(endpoint)
        .header(CONTENT_TYPE, "text/plain;charset=utf-8")
        .body(body)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(UploadError::Network)?;
    let parsed: UploadResponse = resp.json().map_err(UploadError::Network)?;
    if parsed.status == "success" {
        Ok(UploadReceipt {
            file_name: report.file_name.clone(),
            message: parsed
                .message
                .unwrap_or_else(|| "Reporte subido exitosamente.".to_string()),
        })
    } else {
        Err(UploadError::Server(parsed.message))
    }
}
