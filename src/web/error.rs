//! Mapping of [`Error`] onto HTTP responses.

use super::Outcome;
use crate::core::record::RecordKind;
use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Shown when someone else's review is opened for editing.
pub const EDIT_REVIEW_FORBIDDEN: &str = "You are not allowed to edit this review.";

/// Message for a refused delete of `kind`.
#[must_use]
pub const fn forbidden_message(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Order => "You are not allowed to delete this purchase request.",
        RecordKind::Offer => "You are not allowed to delete this offer.",
        RecordKind::Appointment => "You are not allowed to cancel this appointment.",
        RecordKind::Review => "You are not allowed to delete this review.",
        RecordKind::Vehicle => "You are not allowed to modify this car.",
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, mut body) = match self {
            Self::Validation(errors) => {
                tracing::warn!("Validation error: {}", errors);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({ "error": "Please correct the errors below.", "fields": errors }),
                )
            }
            Self::NotFound { kind, id } => {
                tracing::warn!("Not found: {} {}", kind, id);
                (
                    StatusCode::NOT_FOUND,
                    json!({ "error": format!("No {kind} matches the given query.") }),
                )
            }
            Self::Forbidden { kind, id } => {
                tracing::warn!("Forbidden: {} {}", kind, id);
                return Outcome::Forbidden(forbidden_message(kind)).into_response();
            }
            other => {
                tracing::error!("Internal error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        body["status"] = json!(status.as_u16());
        (status, Json(body)).into_response()
    }
}
