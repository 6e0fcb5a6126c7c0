//! Route handlers for the reporting endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::{error, warn};

use crate::error::{Error, PlatformError};
use crate::port::inbound::report::{OpportunityQuery, OpportunityReport};

/// Shared handler state.
pub type AppState = Arc<dyn OpportunityQuery>;

/// `GET /api/opportunities`: run detection and return the report.
///
/// A not-available report is returned with `501 Not Implemented` so callers
/// can tell it apart from an empty result.
pub async fn opportunities(State(query): State<AppState>) -> Response {
    match query.get_opportunities().await {
        Ok(report @ OpportunityReport::Ready { .. }) => {
            (StatusCode::OK, Json(report)).into_response()
        }
        Ok(report @ OpportunityReport::NotAvailable { .. }) => {
            (StatusCode::NOT_IMPLEMENTED, Json(report)).into_response()
        }
        Err(err) => ApiError(err).into_response(),
    }
}

/// `GET /health`.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// A pipeline failure rendered as a JSON error body.
pub struct ApiError(pub Error);

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::Platform(err) => match err {
                PlatformError::AuthenticationFailure { .. } => StatusCode::UNAUTHORIZED,
                PlatformError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                PlatformError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                PlatformError::NetworkFailure { .. } => StatusCode::BAD_GATEWAY,
                PlatformError::NotImplemented { .. } => StatusCode::NOT_IMPLEMENTED,
            },
            Error::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, %status, "Opportunity request failed");
        } else {
            warn!(error = %self.0, %status, "Opportunity request rejected upstream");
        }
        let body = Json(json!({
            "status": "error",
            "error": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
