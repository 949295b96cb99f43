//! Extraction handler.
//!
//! Validation runs before anything is launched. The engine is spawned
//! before the response is returned so a launch failure can still be
//! reported with a status code; after that, the status line and headers
//! go out first and the body follows the engine's stdout.

use std::collections::HashMap;

use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use vex_core::{BoundingBox, ExtractionRequest, ValidationError};

use crate::ApiState;

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const TEXT_PLAIN: &str = "text/plain";

/// Body of the 500 sent when the engine cannot be started.
pub const LAUNCH_FAILED: &str = "Failed to launch extraction process";

fn text_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}

fn validation_error(err: ValidationError) -> Response {
    text_response(StatusCode::BAD_REQUEST, err.to_string())
}

/// Any path, any method: `?north=..&south=..&east=..&west=..`
pub async fn extract(
    State(state): State<ApiState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Response {
    // An undecodable query carries no usable coordinates.
    let params = query.map(|Query(params)| params).unwrap_or_default();

    let bbox = match BoundingBox::from_query(&params) {
        Ok(bbox) => bbox,
        Err(e) => return validation_error(e),
    };

    let request = ExtractionRequest::new(bbox);

    let process = match state.extractor.spawn(&request) {
        Ok(process) => process,
        Err(e) => {
            warn!(error = %e, "extraction process launch failed");
            return text_response(StatusCode::INTERNAL_SERVER_ERROR, LAUNCH_FAILED.to_string());
        }
    };

    debug!(pid = ?process.id(), file = request.filename(), "streaming extract");

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, OCTET_STREAM.to_string()),
            (header::CONTENT_DISPOSITION, request.content_disposition()),
        ],
        Body::from_stream(process.stream()),
    )
        .into_response()
}
