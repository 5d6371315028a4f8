//! Purchase requests, offers, test-drive bookings and the review board.
//!
//! Everything except reading the review board requires a signed-in requester; the
//! submission is then owned by that requester.

use super::{
    AppState, Outcome,
    auth::{CurrentUser, RequireUser},
};
use crate::{
    core::{appointment, offer, order, review, vehicle::get_vehicle},
    errors::Result,
    forms::{AppointmentForm, OfferForm, OrderForm, ReviewForm},
};
use axum::{
    Form,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;

/// Query string of the booking page.
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentParams {
    /// Vehicle id to preselect
    pub car: Option<String>,
}

fn car_path(car_id: &str) -> String {
    format!("/cars/{car_id}")
}

/// `GET /cars/{id}/buy`
pub async fn buy_car_form(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<String>,
) -> Result<Outcome> {
    let car = get_vehicle(&state.db, &id).await?;
    Ok(Outcome::Page(json!({ "car": car, "form": OrderForm::default() })))
}

/// `POST /cars/{id}/buy`
pub async fn buy_car(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Form(form): Form<OrderForm>,
) -> Result<Outcome> {
    let order = order::create_order(&state.db, &id, &form, Some(&user)).await?;
    Ok(Outcome::Redirect {
        to: car_path(&order.car_id),
        message: None,
    })
}

/// `GET /cars/{id}/offer`
pub async fn make_offer_form(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<String>,
) -> Result<Outcome> {
    let car = get_vehicle(&state.db, &id).await?;
    Ok(Outcome::Page(json!({ "car": car, "form": OfferForm::default() })))
}

/// `POST /cars/{id}/offer`
pub async fn make_offer(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Form(form): Form<OfferForm>,
) -> Result<Outcome> {
    let offer = offer::create_offer(&state.db, &id, &form, Some(&user)).await?;
    Ok(Outcome::Redirect {
        to: car_path(&offer.car_id),
        message: None,
    })
}

async fn booking_page(
    state: &AppState,
    params: &AppointmentParams,
    submitted: bool,
) -> Result<Outcome> {
    let initial = appointment::initial_car_interest(&state.db, params.car.as_deref()).await?;
    let car_interest = appointment::load_car_interest_field(&state.db).await?;
    Ok(Outcome::Page(json!({
        "form": AppointmentForm::with_initial_car(initial),
        "car_interest": car_interest,
        "submitted": submitted,
    })))
}

/// `GET /appointments` - booking form, optionally preselecting `?car=<id>`.
pub async fn appointment_page(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Query(params): Query<AppointmentParams>,
) -> Result<Outcome> {
    booking_page(&state, &params, false).await
}

/// `POST /appointments` - books a test drive and hands back a fresh form.
pub async fn book_appointment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(params): Query<AppointmentParams>,
    Form(form): Form<AppointmentForm>,
) -> Result<Outcome> {
    appointment::create_appointment(&state.db, &form, Some(&user)).await?;
    booking_page(&state, &params, true).await
}

/// `GET /reviews` - public review board.
pub async fn reviews_page(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<review::ReviewQuery>,
) -> Result<Outcome> {
    let page = review::list_reviews(&state.db, &query).await?;
    let latest = review::latest_reviews(&state.db).await?;
    Ok(Outcome::Page(json!({
        "form": ReviewForm::default(),
        "can_post": user.is_some(),
        "reviews": latest,
        "has_next": page.has_next(),
        "has_previous": page.has_previous(),
        "page": page,
    })))
}

/// `POST /reviews` - anonymous visitors are sent to log in first.
pub async fn post_review(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Form(form): Form<ReviewForm>,
) -> Result<Outcome> {
    review::create_review(&state.db, &form, Some(&user)).await?;
    Ok(Outcome::Redirect {
        to: "/reviews".to_string(),
        message: None,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::core::activity::list_activity;
    use crate::entities::{OfferStatus, OrderStatus};
    use crate::errors::Result;
    use crate::test_utils::create_test_review;
    use crate::web::test_support::{get, json_body, location, post_form, send, test_app};
    use axum::http::StatusCode;
    use rust_decimal::Decimal;

    const ORDER_FORM: &str =
        "full_name=Ada+Lovelace&email=ada%40example.com&phone=555-0100&message=Hi&status=confirmed";

    #[tokio::test]
    async fn test_buy_requires_login() -> Result<()> {
        let (app, _db, civic) = test_app().await?;
        let uri = format!("/cars/{}/buy", civic.id);

        let response = send(&app, get(&uri, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/login?next={uri}"));

        let response = send(&app, post_form(&uri, None, ORDER_FORM)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/login?next="));
        Ok(())
    }

    #[tokio::test]
    async fn test_buy_ignores_client_status() -> Result<()> {
        let (app, db, civic) = test_app().await?;
        let uri = format!("/cars/{}/buy", civic.id);

        let response = send(&app, post_form(&uri, Some("alice"), ORDER_FORM)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/cars/{}", civic.id));

        let activity = list_activity(&db, "alice").await?;
        assert_eq!(activity.orders.len(), 1);
        assert_eq!(activity.orders[0].0.status, OrderStatus::Pending);
        assert_eq!(activity.orders[0].0.user_id.as_deref(), Some("alice"));
        Ok(())
    }

    #[tokio::test]
    async fn test_buy_invalid_form_is_rejected() -> Result<()> {
        let (app, db, civic) = test_app().await?;
        let uri = format!("/cars/{}/buy", civic.id);

        let response = send(
            &app,
            post_form(&uri, Some("alice"), "full_name=&email=not-an-email&phone=1"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert!(body["fields"]["full_name"].is_array());
        assert!(body["fields"]["email"].is_array());
        assert!(list_activity(&db, "alice").await?.orders.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_offer_for_unknown_car_is_not_found() -> Result<()> {
        let (app, _db, _civic) = test_app().await?;
        let response = send(
            &app,
            post_form("/cars/0123456789abcdef01234567/offer", Some("alice"), "amount=100"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_make_offer() -> Result<()> {
        let (app, db, civic) = test_app().await?;
        let uri = format!("/cars/{}/offer", civic.id);

        let response = send(&app, get(&uri, Some("alice"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["car"]["id"], civic.id.as_str());

        let response = send(
            &app,
            post_form(&uri, Some("alice"), "amount=19500.50&message=Cash+buyer&status=accepted"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let activity = list_activity(&db, "alice").await?;
        assert_eq!(activity.offers.len(), 1);
        assert_eq!(activity.offers[0].0.status, OfferStatus::Pending);
        assert_eq!(activity.offers[0].0.amount, Decimal::new(1_950_050, 2));
        Ok(())
    }

    #[tokio::test]
    async fn test_appointment_page_preselects_car() -> Result<()> {
        let (app, _db, civic) = test_app().await?;

        let uri = format!("/appointments?car={}", civic.id);
        let response = send(&app, get(&uri, Some("alice"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["form"]["car_interest"], "Honda Civic (2020)");
        assert_eq!(body["submitted"], false);
        assert_eq!(body["car_interest"]["disabled"], false);

        let body = json_body(send(&app, get("/appointments?car=bogus", Some("alice"))).await).await;
        assert_eq!(body["form"]["car_interest"], "");
        Ok(())
    }

    #[tokio::test]
    async fn test_book_appointment() -> Result<()> {
        let (app, db, _civic) = test_app().await?;
        let form = "full_name=Linus&email=linus%40example.com&phone=555-0199\
                    &car_interest=Honda+Civic+%282020%29&preferred_date=2026-11-02\
                    &preferred_time=afternoon";

        let response = send(&app, post_form("/appointments", Some("alice"), form)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["submitted"], true);
        assert_eq!(body["form"]["car_interest"], "");

        let activity = list_activity(&db, "alice").await?;
        assert_eq!(activity.appointments.len(), 1);
        assert_eq!(activity.appointments[0].car_interest, "Honda Civic (2020)");
        Ok(())
    }

    #[tokio::test]
    async fn test_reviews_page_is_public_and_paginated() -> Result<()> {
        let (app, db, _civic) = test_app().await?;
        for rating in [5, 4, 3, 2, 1, 5, 4] {
            create_test_review(&db, None, rating).await?;
        }

        let response = send(&app, get("/reviews?page=9", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["page"]["page"], 2);
        assert_eq!(body["page"]["num_pages"], 2);
        assert_eq!(body["page"]["reviews"].as_array().unwrap().len(), 1);
        assert_eq!(body["has_next"], false);
        assert_eq!(body["has_previous"], true);
        assert_eq!(body["reviews"].as_array().unwrap().len(), 4);
        assert_eq!(body["can_post"], false);

        let body = json_body(send(&app, get("/reviews?rating=4plus", Some("grace"))).await).await;
        assert_eq!(body["page"]["total"], 4);
        assert_eq!(body["can_post"], true);
        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_review_post_redirects_to_login() -> Result<()> {
        let (app, db, _civic) = test_app().await?;
        let form = "full_name=Grace&email=grace%40example.com&rating=5&comment=Great";

        let response = send(&app, post_form("/reviews", None, form)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login?next=/reviews");

        let response = send(&app, post_form("/reviews", Some("grace"), form)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/reviews");
        assert_eq!(list_activity(&db, "grace").await?.reviews.len(), 1);
        Ok(())
    }
}
