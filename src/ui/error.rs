//! UI endpoint errors with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::backend::BackendError;
use crate::core_state::CoreError;

/// Route the browser navigates to when a gate refuses.
pub const LOGIN_ROUTE: &str = "/admin";

/// Structured error response body for the UI page scripts.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
    /// Where the page should navigate, when the error implies navigation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// UI-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Administrator role required")]
    AdminOnly,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Triage service unavailable")]
    ServiceUnavailable(String),
    #[error("Upstream failure: {0}")]
    Upstream(String),
}

impl IntoResponse for UiError {
    fn into_response(self) -> Response {
        let (status, code, message, redirect) = match &self {
            UiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "Faça login para acessar a área administrativa.".to_string(),
                Some(LOGIN_ROUTE),
            ),
            UiError::AdminOnly => (
                StatusCode::FORBIDDEN,
                "ADMIN_REQUIRED",
                "Apenas administradores podem acessar esta área.".to_string(),
                Some(LOGIN_ROUTE),
            ),
            UiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                detail.clone(),
                None,
            ),
            UiError::ServiceUnavailable(detail) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                detail.clone(),
                None,
            ),
            UiError::Upstream(detail) => {
                tracing::error!(detail = %detail, "Upstream failure surfaced to UI");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM",
                    detail.clone(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
            redirect,
        };
        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for UiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoActiveSession => UiError::Unauthorized,
            CoreError::NotAdmin => UiError::AdminOnly,
        }
    }
}

impl From<BackendError> for UiError {
    fn from(err: BackendError) -> Self {
        if err.is_service_unavailable() {
            UiError::ServiceUnavailable(err.detail().unwrap_or_else(|| err.to_string()))
        } else {
            UiError::Upstream(err.to_string())
        }
    }
}
