//! Vehicle catalog store operations.
//!
//! Vehicles are dealership-managed: they are created by catalog seeding and removed by
//! staff tooling. Removing a vehicle also removes every purchase request and offer made
//! on it.

use crate::{
    core::record::{RecordId, RecordKind},
    entities::{Offer, Order, Vehicle, offer, order, vehicle},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Number of other vehicles suggested on a detail page.
pub const OTHER_VEHICLES_LIMIT: u64 = 6;

/// Fields for a new catalog entry, taken as-is from the catalog feed.
#[derive(Debug, Clone, Default)]
pub struct NewVehicle {
    /// Manufacturer
    pub make: String,
    /// Model name
    pub model: String,
    /// Model year, raw
    pub year: String,
    /// Asking price, raw
    pub price: String,
    /// Description text
    pub description: String,
    /// Image reference
    pub image_url: String,
}

/// Retrieves the whole catalog in insertion order.
pub async fn get_all_vehicles(db: &DatabaseConnection) -> Result<Vec<vehicle::Model>> {
    let vehicles = Vehicle::find()
        .order_by_asc(vehicle::Column::CreatedAt)
        .order_by_asc(vehicle::Column::Id)
        .all(db)
        .await?;
    debug!("Fetched {} vehicles.", vehicles.len());
    Ok(vehicles)
}

/// Looks up a vehicle by a caller-supplied identifier.
///
/// # Errors
/// Returns [`Error::NotFound`] when the id is malformed or unknown.
#[instrument(skip(db))]
pub async fn get_vehicle(db: &DatabaseConnection, raw_id: &str) -> Result<vehicle::Model> {
    let id = RecordId::parse(RecordKind::Vehicle, raw_id)?;
    Vehicle::find_by_id(id.into_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            kind: RecordKind::Vehicle,
            id: raw_id.to_string(),
        })
}

/// Up to [`OTHER_VEHICLES_LIMIT`] vehicles other than `exclude_id`, for the detail page.
pub async fn get_other_vehicles(
    db: &DatabaseConnection,
    exclude_id: &str,
) -> Result<Vec<vehicle::Model>> {
    Vehicle::find()
        .filter(vehicle::Column::Id.ne(exclude_id))
        .order_by_asc(vehicle::Column::CreatedAt)
        .limit(OTHER_VEHICLES_LIMIT)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a vehicle by make, model and year, used to keep catalog seeding idempotent.
pub async fn find_vehicle_by_label(
    db: &DatabaseConnection,
    make: &str,
    model: &str,
    year: &str,
) -> Result<Option<vehicle::Model>> {
    Vehicle::find()
        .filter(vehicle::Column::Make.eq(make))
        .filter(vehicle::Column::Model.eq(model))
        .filter(vehicle::Column::Year.eq(year))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Adds a vehicle to the catalog.
///
/// Year and price are stored untouched; only make and model must be present.
///
/// # Errors
/// Returns [`Error::Config`] when make or model is blank, or a database error.
#[instrument(skip(db))]
pub async fn create_vehicle(db: &DatabaseConnection, new: NewVehicle) -> Result<vehicle::Model> {
    if new.make.trim().is_empty() || new.model.trim().is_empty() {
        return Err(Error::Config {
            message: "Vehicle make and model cannot be empty".to_string(),
        });
    }

    let vehicle = vehicle::ActiveModel {
        id: Set(RecordId::generate().into_string()),
        make: Set(new.make.trim().to_string()),
        model: Set(new.model.trim().to_string()),
        year: Set(new.year),
        price: Set(new.price),
        description: Set(new.description),
        image_url: Set(new.image_url),
        created_at: Set(chrono::Utc::now()),
    };

    let result = vehicle.insert(db).await?;
    info!("Added vehicle '{}' ({})", result.label(), result.id);
    Ok(result)
}

/// Removes a vehicle together with its purchase requests and offers.
///
/// Returns the number of dependent records removed.
///
/// # Errors
/// Returns [`Error::NotFound`] when the id is malformed or unknown.
#[instrument(skip(db))]
pub async fn delete_vehicle(db: &DatabaseConnection, raw_id: &str) -> Result<u64> {
    let id = RecordId::parse(RecordKind::Vehicle, raw_id)?;

    let txn = db.begin().await?;

    let exists = Vehicle::find_by_id(id.as_str()).one(&txn).await?.is_some();
    if !exists {
        return Err(Error::NotFound {
            kind: RecordKind::Vehicle,
            id: raw_id.to_string(),
        });
    }

    let orders = Order::delete_many()
        .filter(order::Column::CarId.eq(id.as_str()))
        .exec(&txn)
        .await?;
    let offers = Offer::delete_many()
        .filter(offer::Column::CarId.eq(id.as_str()))
        .exec(&txn)
        .await?;
    Vehicle::delete_by_id(id.as_str()).exec(&txn).await?;

    txn.commit().await?;

    let removed = orders.rows_affected + offers.rows_affected;
    info!(
        "Removed vehicle {} with {} purchase requests and {} offers",
        id, orders.rows_affected, offers.rows_affected
    );
    Ok(removed)
}

/// Number of vehicles in the catalog.
pub async fn count_vehicles(db: &DatabaseConnection) -> Result<u64> {
    Vehicle::find().count(db).await.map_err(Into::into)
}
