//! HTTP request handlers for the minutes service.
//!
//! Implements extraction, document generation and health check endpoints
//! using axum.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use minutes_domain::traits::{DocumentRenderer, LlmProvider};
use minutes_domain::MeetingRecord;
use minutes_extractor::{Extractor, ExtractorError, RecordSource};
use minutes_render::{tagged_document_name, MarkdownRenderer};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info};
use uuid::Uuid;

/// Shared application state
pub struct AppState<L: LlmProvider> {
    /// Two-pass extractor
    pub extractor: Arc<Extractor<L>>,
    /// Renderer for generated documents
    pub renderer: Arc<MarkdownRenderer>,
    /// Directory generated documents are written to
    pub output_dir: PathBuf,
}

impl<L: LlmProvider> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
            renderer: Arc::clone(&self.renderer),
            output_dir: self.output_dir.clone(),
        }
    }
}

/// Body of `/extract` and `/generate`
#[derive(Debug, Deserialize)]
pub struct MeetingTextRequest {
    /// Free-text meeting description
    #[serde(default)]
    pub text: String,
}

/// Extraction response
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// Always true on success
    pub success: bool,
    /// Extracted record
    pub data: MeetingRecord,
    /// Text the record was drawn from (input or model output)
    pub raw_text: String,
    /// Which pass produced the record
    pub source: RecordSource,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Human-readable status message
    pub message: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Input text rejected by the extractor
    Extraction(ExtractorError),
    /// Document could not be written or read back
    Render(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Extraction(ExtractorError::EmptyText) => {
                (StatusCode::BAD_REQUEST, "请提供会议文本内容".to_string())
            }
            AppError::Extraction(e @ ExtractorError::TextTooLong(..)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Extraction(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Render(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("文档生成失败: {}", msg),
            ),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<ExtractorError> for AppError {
    fn from(e: ExtractorError) -> Self {
        AppError::Extraction(e)
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// POST /extract - Extract a meeting record from free text
async fn extract_meeting<L>(
    State(state): State<AppState<L>>,
    Json(request): Json<MeetingTextRequest>,
) -> Result<Json<ExtractResponse>, AppError>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    let report = state.extractor.extract(&request.text).await?;

    Ok(Json(ExtractResponse {
        success: true,
        data: report.record,
        raw_text: report.raw_text,
        source: report.source,
    }))
}

/// POST /generate - Extract, render and return the minutes document
async fn generate_document<L>(
    State(state): State<AppState<L>>,
    Json(request): Json<MeetingTextRequest>,
) -> Result<Response, AppError>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    let report = state.extractor.generate(&request.text).await?;
    let source = report.source;
    let record = report.record;

    let tag = Uuid::now_v7().simple().to_string();
    let filename = tagged_document_name(unix_timestamp(), &tag, state.renderer.extension());
    let destination = state.output_dir.join(&filename);

    let renderer = Arc::clone(&state.renderer);
    let path = tokio::task::spawn_blocking(move || renderer.render(&record, &destination))
        .await
        .map_err(|e| AppError::Render(e.to_string()))?
        .map_err(|e| {
            error!("Document generation failed: {}", e);
            AppError::Render(e.to_string())
        })?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::Render(format!("{}: {}", path.display(), e)))?;

    info!("Generated {} ({:?})", path.display(), source);

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        message: "服务运行正常".to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<L>(state: AppState<L>) -> AxumRouter
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    AxumRouter::new()
        .route("/extract", post(extract_meeting::<L>))
        .route("/generate", post(generate_document::<L>))
        .route("/health", get(health_check))
        .with_state(state)
}
