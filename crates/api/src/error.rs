//! Error responses.
//!
//! Engine errors are folded into [`AppError`] for their status class and
//! keep their own error code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use budgetry_core::budget::BudgetError;
use budgetry_core::reconciliation::ReconciliationError;
use budgetry_core::taxonomy::TaxonomyError;
use budgetry_core::template::TemplateError;
use budgetry_core::workflow::ApprovalError;
use budgetry_shared::AppError;

/// An error rendered as `{ "error": CODE, "message": ... }`.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    code: &'static str,
}

impl ApiError {
    /// Creates an error from a status code, an error code and a message.
    pub fn new(status: u16, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            error: AppError::from_status(status, message),
            code,
        }
    }

    /// HTTP status of the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Error code of the response.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code, error = %self.error, "Request failed");
        } else {
            warn!(code = self.code, error = %self.error, "Request rejected");
        }

        (
            status,
            Json(json!({
                "error": self.code,
                "message": self.error.message(),
            })),
        )
            .into_response()
    }
}

macro_rules! from_engine_error {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for ApiError {
                fn from(e: $ty) -> Self {
                    Self::new(e.status_code(), e.error_code(), e.to_string())
                }
            }
        )+
    };
}

from_engine_error!(
    BudgetError,
    ApprovalError,
    ReconciliationError,
    TemplateError,
    TaxonomyError,
);
