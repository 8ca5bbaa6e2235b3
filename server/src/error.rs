//! Request-level error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Every handler failure funnels into [`ApiError`] before it reaches a
//! client. Validation and authentication errors surface their message
//! directly; authorization failures are a bare rejection (route-level
//! failures redirect in the guard instead, before any handler runs);
//! storage failures are caught here at the outermost boundary, logged
//! server-side, and rendered as a generic try-again message so backend
//! details never leak into page content.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::stores::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Field-level input failure, recoverable in place by the user.
    #[error("{0}")]
    Validation(String),
    /// Bad credentials. One message for every cause.
    #[error("Invalid credentials")]
    Authentication,
    /// Ownership or access failure on a mutation.
    #[error("You do not have permission to modify this post")]
    Authorization,
    #[error("Not found")]
    NotFound,
    /// Collaborator I/O failure; detail is logged, never rendered.
    #[error("Something went wrong. Please try again later.")]
    Storage(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Authentication => StatusCode::UNAUTHORIZED,
            Self::Authorization => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Storage(detail) = &self {
            tracing::error!(detail, "storage failure");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            other => Self::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
