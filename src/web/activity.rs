//! The requester's dashboard: listing, delete confirmation and review edits.
//!
//! Every route here needs a signed-in requester. A `GET` on a delete route renders the
//! confirmation step after the same ownership check the `POST` performs.

use super::{
    AppState, Outcome,
    auth::RequireUser,
    error::EDIT_REVIEW_FORBIDDEN,
};
use crate::{
    core::{activity::list_activity, appointment, offer, order, record::RecordKind, review},
    errors::{Error, Result},
    forms::ReviewForm,
};
use axum::{
    Form,
    extract::{Path, State},
};
use serde_json::{Value, json};

/// Dashboard route; also the cancel target of every confirmation page.
pub const ACTIVITY_PATH: &str = "/my-activity";

fn confirm_page(kind: RecordKind, object: Value) -> Outcome {
    Outcome::Page(json!({
        "object": object,
        "type": kind.label(),
        "cancel_url": ACTIVITY_PATH,
    }))
}

/// `GET /my-activity`
pub async fn my_activity(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Outcome> {
    let activity = list_activity(&state.db, &user).await?;
    Ok(Outcome::Page(json!(activity)))
}

/// `GET /my-activity/order/{id}/delete`
pub async fn confirm_delete_order(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Outcome> {
    let order = order::get_order_for_update(&state.db, &id, &user).await?;
    Ok(confirm_page(RecordKind::Order, json!(order)))
}

/// `POST /my-activity/order/{id}/delete`
pub async fn delete_order(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Outcome> {
    order::delete_order(&state.db, &id, &user).await?;
    Ok(Outcome::back_to_activity(
        "Your purchase request has been removed.",
    ))
}

/// `GET /my-activity/offer/{id}/delete`
pub async fn confirm_delete_offer(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Outcome> {
    let offer = offer::get_offer_for_update(&state.db, &id, &user).await?;
    Ok(confirm_page(RecordKind::Offer, json!(offer)))
}

/// `POST /my-activity/offer/{id}/delete`
pub async fn delete_offer(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Outcome> {
    offer::delete_offer(&state.db, &id, &user).await?;
    Ok(Outcome::back_to_activity("Your offer has been removed."))
}

/// `GET /my-activity/appointment/{id}/delete`
pub async fn confirm_delete_appointment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Outcome> {
    let appointment = appointment::get_appointment_for_update(&state.db, &id, &user).await?;
    Ok(confirm_page(RecordKind::Appointment, json!(appointment)))
}

/// `POST /my-activity/appointment/{id}/delete`
pub async fn delete_appointment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Outcome> {
    appointment::delete_appointment(&state.db, &id, &user).await?;
    Ok(Outcome::back_to_activity(
        "Your test-drive appointment has been cancelled.",
    ))
}

/// `GET /my-activity/review/{id}/delete`
pub async fn confirm_delete_review(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Outcome> {
    let review = review::get_review_for_update(&state.db, &id, &user).await?;
    Ok(confirm_page(RecordKind::Review, json!(review)))
}

/// `POST /my-activity/review/{id}/delete`
pub async fn delete_review(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Outcome> {
    review::delete_review(&state.db, &id, &user).await?;
    Ok(Outcome::back_to_activity("Your review has been deleted."))
}

/// Refusals on the edit routes speak of editing, not deleting.
fn edit_refusal(error: Error) -> Result<Outcome> {
    match error {
        Error::Forbidden { kind, id } => {
            tracing::warn!("Forbidden: edit of {} {}", kind, id);
            Ok(Outcome::Forbidden(EDIT_REVIEW_FORBIDDEN))
        }
        other => Err(other),
    }
}

/// `GET /my-activity/review/{id}/edit`
pub async fn edit_review_form(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Outcome> {
    match review::get_review_for_update(&state.db, &id, &user).await {
        Ok(review) => Ok(Outcome::Page(json!({
            "form": ReviewForm::from(&review),
            "review": review,
        }))),
        Err(error) => edit_refusal(error),
    }
}

/// `POST /my-activity/review/{id}/edit`
pub async fn edit_review(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Form(form): Form<ReviewForm>,
) -> Result<Outcome> {
    match review::update_review(&state.db, &id, &form, &user).await {
        Ok(_) => Ok(Outcome::back_to_activity("Your review has been updated.")),
        Err(error) => edit_refusal(error),
    }
}
