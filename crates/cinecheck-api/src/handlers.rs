//! API Handlers
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use cinecheck_core::{
    ConfidenceGrade, ExtractionError, PipelineError, Report, RequestContext, StatusCounts,
    Verdict, ENGINE_VERSION,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub sentence: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub summary: String,
    pub results: Vec<Verdict>,
    pub request_id: Uuid,
    pub overall_confidence: f64,
    pub grade: ConfidenceGrade,
    pub counts: StatusCounts,
    pub generated_at: DateTime<Utc>,
}

impl From<Report> for VerifyResponse {
    fn from(report: Report) -> Self {
        Self {
            summary: report.summary,
            results: report.verdicts,
            request_id: report.request_id,
            overall_confidence: report.overall_confidence,
            grade: report.grade,
            counts: report.counts,
            generated_at: report.generated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// HTTP status for a request that produced no report.
pub fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::Extraction(ExtractionError::EmptyInput)
        | PipelineError::Extraction(ExtractionError::NoFactualStatements) => StatusCode::BAD_REQUEST,
        PipelineError::Extraction(ExtractionError::Unavailable(_)) | PipelineError::Cancelled => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn verify(
    State(state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            state.metrics.observe_request("rejected", started.elapsed());
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    // Dropping the handler future (client gone) cancels the pipeline
    let cancel = CancellationToken::new();
    let ctx = RequestContext::with_cancel(cancel.clone());
    let _cancel_on_drop = cancel.drop_guard();

    match state.orchestrator.run_in(&request.sentence, &ctx).await {
        Ok(report) => {
            state.metrics.observe_report(&report);
            state.metrics.observe_request("ok", started.elapsed());
            info!(
                request_id = %report.request_id,
                claims = report.verdicts.len(),
                overall_confidence = report.overall_confidence,
                "verification complete"
            );
            (StatusCode::OK, Json(VerifyResponse::from(report))).into_response()
        }
        Err(err) => {
            let status = status_for(&err);
            let outcome = if status.is_client_error() { "invalid" } else { "failed" };
            state.metrics.observe_request(outcome, started.elapsed());
            warn!(request_id = %ctx.request_id, error = %err, status = status.as_u16(), "verification failed");
            error_response(status, err.to_string())
        }
    }
}

pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let Some(generator) = state.generator.clone() else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "text generation is not configured");
    };
    let request = match payload {
        Ok(Json(request)) if !request.prompt.trim().is_empty() => request,
        Ok(_) => return error_response(StatusCode::BAD_REQUEST, "prompt must not be empty"),
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    match generator.generate(&request.prompt).await {
        Ok(text) => (StatusCode::OK, Json(json!({ "text": text }))).into_response(),
        Err(err) => {
            warn!(error = %err, "generation failed");
            error_response(StatusCode::BAD_GATEWAY, err.to_string())
        }
    }
}

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "version": ENGINE_VERSION })))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}
