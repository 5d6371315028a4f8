//! HTTP routes for the dealership site.
//!
//! Handlers are thin: they pull the requester and parameters out of the request, call
//! into [`crate::core`], and answer with an [`Outcome`]. Pages are JSON view-models for
//! whatever renders them; successful mutations answer with a `303 See Other` carrying a
//! one-off status message.

pub mod activity;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod submissions;

use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

/// Header carrying the one-off status message on redirects.
pub const FLASH_HEADER: &str = "x-flash-message";

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Record store connection
    pub db: DatabaseConnection,
}

/// What a handler produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A view-model to render
    Page(Value),
    /// Send the browser elsewhere, optionally with a status message
    Redirect {
        /// Target path
        to: String,
        /// Message shown once on the target page
        message: Option<&'static str>,
    },
    /// The requester may not touch the record
    Forbidden(&'static str),
}

impl Outcome {
    /// Redirect to `/my-activity` with a status message.
    #[must_use]
    pub fn back_to_activity(message: &'static str) -> Self {
        Self::Redirect {
            to: activity::ACTIVITY_PATH.to_string(),
            message: Some(message),
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Self::Page(view) => Json(view).into_response(),
            Self::Redirect { to, message } => {
                let body = Json(json!({ "redirect": &to, "message": message }));
                let mut response = (StatusCode::SEE_OTHER, body).into_response();
                if let Ok(location) = HeaderValue::from_str(&to) {
                    response.headers_mut().insert(header::LOCATION, location);
                }
                if let Some(message) = message {
                    response
                        .headers_mut()
                        .insert(FLASH_HEADER, HeaderValue::from_static(message));
                }
                response
            }
            Self::Forbidden(message) => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": message, "status": StatusCode::FORBIDDEN.as_u16() })),
            )
                .into_response(),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(catalog::home))
        .route("/cars", get(catalog::car_list))
        .route("/cars/{id}", get(catalog::car_detail))
        .route(
            "/cars/{id}/buy",
            get(submissions::buy_car_form).post(submissions::buy_car),
        )
        .route(
            "/cars/{id}/offer",
            get(submissions::make_offer_form).post(submissions::make_offer),
        )
        .route(
            "/reviews",
            get(submissions::reviews_page).post(submissions::post_review),
        )
        .route(
            "/appointments",
            get(submissions::appointment_page).post(submissions::book_appointment),
        )
        .route(activity::ACTIVITY_PATH, get(activity::my_activity))
        .route(
            "/my-activity/order/{id}/delete",
            get(activity::confirm_delete_order).post(activity::delete_order),
        )
        .route(
            "/my-activity/offer/{id}/delete",
            get(activity::confirm_delete_offer).post(activity::delete_offer),
        )
        .route(
            "/my-activity/appointment/{id}/delete",
            get(activity::confirm_delete_appointment).post(activity::delete_appointment),
        )
        .route(
            "/my-activity/review/{id}/delete",
            get(activity::confirm_delete_review).post(activity::delete_review),
        )
        .route(
            "/my-activity/review/{id}/edit",
            get(activity::edit_review_form).post(activity::edit_review),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
