//! Offer operations.

use crate::{
    core::{
        record::{RecordId, RecordKind, ensure_can_mutate},
        vehicle::get_vehicle,
    },
    entities::{Offer, OfferStatus, offer},
    errors::{Error, Result},
    forms::OfferForm,
};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

/// Makes an offer on the vehicle `car_id`.
///
/// # Errors
/// Returns [`Error::NotFound`] for an unknown vehicle and [`Error::Validation`] when the
/// amount is not a positive decimal.
#[instrument(skip(db, form))]
pub async fn create_offer(
    db: &DatabaseConnection,
    car_id: &str,
    form: &OfferForm,
    requester: Option<&str>,
) -> Result<offer::Model> {
    let vehicle = get_vehicle(db, car_id).await?;
    let data = form.clean()?;

    let offer = offer::ActiveModel {
        id: Set(RecordId::generate().into_string()),
        car_id: Set(vehicle.id.clone()),
        user_id: Set(requester.map(str::to_string)),
        amount: Set(data.amount),
        message: Set(data.message),
        status: Set(OfferStatus::Pending),
        created_at: Set(chrono::Utc::now()),
    };

    let result = offer.insert(db).await?;
    info!(
        "Offer {} of {} on '{}' submitted by {:?}",
        result.id,
        result.amount,
        vehicle.label(),
        requester
    );
    Ok(result)
}

/// Loads an offer the requester is allowed to change.
///
/// # Errors
/// [`Error::NotFound`] for malformed or unknown ids, [`Error::Forbidden`] when the offer
/// belongs to someone else.
pub async fn get_offer_for_update(
    db: &DatabaseConnection,
    raw_id: &str,
    requester: &str,
) -> Result<offer::Model> {
    let id = RecordId::parse(RecordKind::Offer, raw_id)?;
    let offer = Offer::find_by_id(id.into_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            kind: RecordKind::Offer,
            id: raw_id.to_string(),
        })?;
    ensure_can_mutate(RecordKind::Offer, &offer.id, offer.user_id.as_deref(), requester)?;
    Ok(offer)
}

/// Withdraws an offer.
///
/// # Errors
/// Same as [`get_offer_for_update`].
#[instrument(skip(db))]
pub async fn delete_offer(db: &DatabaseConnection, raw_id: &str, requester: &str) -> Result<()> {
    let offer = get_offer_for_update(db, raw_id, requester).await?;
    Offer::delete_by_id(offer.id.clone()).exec(db).await?;
    info!("Offer {} removed by {}", offer.id, requester);
    Ok(())
}
