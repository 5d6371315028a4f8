//! Purchase request operations.
//!
//! Requests are created from a validated form against an existing vehicle and can later
//! be withdrawn by the identity that submitted them. Unowned requests may be withdrawn
//! by anyone.

use crate::{
    core::{
        record::{RecordId, RecordKind, ensure_can_mutate},
        vehicle::get_vehicle,
    },
    entities::{Order, OrderStatus, order},
    errors::{Error, Result},
    forms::OrderForm,
};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

/// Submits a purchase request for the vehicle `car_id`.
///
/// # Errors
/// Returns [`Error::NotFound`] for an unknown vehicle and [`Error::Validation`] when the
/// form is invalid; nothing is stored in either case.
#[instrument(skip(db, form))]
pub async fn create_order(
    db: &DatabaseConnection,
    car_id: &str,
    form: &OrderForm,
    requester: Option<&str>,
) -> Result<order::Model> {
    let vehicle = get_vehicle(db, car_id).await?;
    let data = form.clean()?;

    let order = order::ActiveModel {
        id: Set(RecordId::generate().into_string()),
        car_id: Set(vehicle.id.clone()),
        user_id: Set(requester.map(str::to_string)),
        full_name: Set(data.full_name),
        email: Set(data.email),
        phone: Set(data.phone),
        message: Set(data.message),
        status: Set(OrderStatus::Pending),
        created_at: Set(chrono::Utc::now()),
    };

    let result = order.insert(db).await?;
    info!(
        "Purchase request {} for '{}' submitted by {:?}",
        result.id,
        vehicle.label(),
        requester
    );
    Ok(result)
}

/// Loads a purchase request the requester is allowed to change.
///
/// # Errors
/// [`Error::NotFound`] for malformed or unknown ids, [`Error::Forbidden`] when the request
/// belongs to someone else.
pub async fn get_order_for_update(
    db: &DatabaseConnection,
    raw_id: &str,
    requester: &str,
) -> Result<order::Model> {
    let id = RecordId::parse(RecordKind::Order, raw_id)?;
    let order = Order::find_by_id(id.into_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            kind: RecordKind::Order,
            id: raw_id.to_string(),
        })?;
    ensure_can_mutate(RecordKind::Order, &order.id, order.user_id.as_deref(), requester)?;
    Ok(order)
}

/// Withdraws a purchase request.
///
/// # Errors
/// Same as [`get_order_for_update`]; the record is untouched on failure.
#[instrument(skip(db))]
pub async fn delete_order(db: &DatabaseConnection, raw_id: &str, requester: &str) -> Result<()> {
    let order = get_order_for_update(db, raw_id, requester).await?;
    Order::delete_by_id(order.id.clone()).exec(db).await?;
    info!("Purchase request {} removed by {}", order.id, requester);
    Ok(())
}
