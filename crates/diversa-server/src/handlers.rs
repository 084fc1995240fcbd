//! Request handlers.

use std::io::Write;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::Serialize;
use tracing::{error, info, warn};

use diversa_agent::{render_text_report, AgentError, Analyst};
use diversa_core::CoreError;
use diversa_extract::ExtractError;

use crate::ui::INDEX_HTML;

/// Application state.
pub struct AppState {
    /// The portfolio analyst
    pub analyst: Arc<Analyst>,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Upload page handler.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Successful analysis response.
#[derive(Serialize)]
pub struct AnalyzeResponse {
    /// The full analysis.
    pub analysis: diversa_agent::Analysis,
    /// The rendered plain-text report, for client-side download.
    pub report: String,
}

/// Analyze an uploaded PDF statement.
///
/// Accepts one multipart `file` part, writes it to a temporary path for the
/// duration of the analysis, and returns the analysis plus the rendered
/// text report. The temporary file is removed when the handler returns.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    // Pull the file part out of the form
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("file") {
                    let file_name = field.file_name().map(ToString::to_string);
                    match field.bytes().await {
                        Ok(bytes) => {
                            upload = Some((file_name, bytes.to_vec()));
                            break;
                        }
                        Err(e) => {
                            return (
                                StatusCode::BAD_REQUEST,
                                Json(serde_json::json!({
                                    "error": format!("Failed to read upload: {e}")
                                })),
                            );
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({
                        "error": format!("Invalid multipart request: {e}")
                    })),
                );
            }
        }
    }

    let Some((file_name, bytes)) = upload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Missing 'file' part" })),
        );
    };

    if bytes.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Uploaded file is empty" })),
        );
    }

    if !bytes.starts_with(b"%PDF") {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Uploaded file is not a PDF" })),
        );
    }

    info!(
        file = file_name.as_deref().unwrap_or("upload.pdf"),
        size = bytes.len(),
        "received statement upload"
    );

    // Hold the upload in a temp file for the analysis; removed on drop.
    let temp = match write_temp_pdf(&bytes) {
        Ok(temp) => temp,
        Err(e) => {
            error!("failed to stage upload: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to stage upload" })),
            );
        }
    };

    match state.analyst.analyze(temp.path()).await {
        Ok(mut analysis) => {
            // Report the uploaded name, not the temp path
            if let Some(name) = file_name {
                analysis.statement.source = Some(name);
            }
            let report = render_text_report(&analysis);
            let response = AnalyzeResponse { analysis, report };
            (StatusCode::OK, Json(serde_json::to_value(response).unwrap()))
        }
        Err(e) => {
            warn!("analysis failed: {e}");
            let (status, message) = error_status(&e);
            (status, Json(serde_json::json!({ "error": message })))
        }
    }
}

fn write_temp_pdf(bytes: &[u8]) -> std::io::Result<tempfile::NamedTempFile> {
    let mut temp = tempfile::Builder::new()
        .prefix("diversa-upload-")
        .suffix(".pdf")
        .tempfile()?;
    temp.write_all(bytes)?;
    temp.flush()?;
    Ok(temp)
}

/// Maps an analysis failure to a status code and a user-facing message.
fn error_status(err: &AgentError) -> (StatusCode, String) {
    match err {
        // Bad document content
        AgentError::Extract(ExtractError::NoHoldings { .. })
        | AgentError::Core(CoreError::ZeroTotalValue | CoreError::EmptyStatement) => {
            (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        // Unreadable upload
        AgentError::Extract(
            ExtractError::Pdf { .. } | ExtractError::DocumentNotFound { .. },
        ) => (StatusCode::BAD_REQUEST, err.to_string()),
        // Upstream model failure
        _ if err.is_upstream() => (StatusCode::BAD_GATEWAY, err.to_string()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}
