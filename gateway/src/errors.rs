// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lingo_types::error::LingoError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Rejected before any service call; never logged as an outcome.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// The backing service could not be reached.
    #[error("Service unavailable: {0}")]
    Transport(String),
    /// The call reached the service but processing failed.
    #[error("Processing failed: {0}")]
    Processing(String),
}

impl From<LingoError> for GatewayError {
    fn from(error: LingoError) -> Self {
        match error {
            LingoError::ValidationError { error } => GatewayError::InvalidRequest(error),
            LingoError::ClientIoError { error } => GatewayError::Transport(error),
            other => GatewayError::Processing(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Transport(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
