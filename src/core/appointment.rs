//! Test-drive appointment operations.

use crate::{
    core::{
        record::{RecordId, RecordKind, ensure_can_mutate},
        vehicle::get_all_vehicles,
    },
    entities::{Appointment, AppointmentStatus, Vehicle, appointment},
    errors::{Error, Result},
    forms::{AppointmentForm, CarInterestField, car_interest_field},
};
use sea_orm::{PaginatorTrait, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Builds the car-interest field from the current catalog.
pub async fn load_car_interest_field(db: &DatabaseConnection) -> Result<CarInterestField> {
    let vehicles = get_all_vehicles(db).await?;
    Ok(car_interest_field(&vehicles))
}

/// Label to preselect when the booking page is opened from a vehicle (`?car=<id>`).
///
/// Malformed or unknown ids are ignored.
pub async fn initial_car_interest(
    db: &DatabaseConnection,
    car_id: Option<&str>,
) -> Result<Option<String>> {
    let Some(raw) = car_id.filter(|raw| !raw.trim().is_empty()) else {
        return Ok(None);
    };
    let Ok(id) = RecordId::parse(RecordKind::Vehicle, raw) else {
        return Ok(None);
    };
    let vehicle = Vehicle::find_by_id(id.into_string()).one(db).await?;
    if vehicle.is_none() {
        debug!("Ignoring preselection of unknown vehicle {}", raw);
    }
    Ok(vehicle.map(|v| v.label()))
}

/// Books a test drive.
///
/// # Errors
/// Returns [`Error::Validation`] when the form is invalid, including any booking made
/// while the catalog is empty.
#[instrument(skip(db, form))]
pub async fn create_appointment(
    db: &DatabaseConnection,
    form: &AppointmentForm,
    requester: Option<&str>,
) -> Result<appointment::Model> {
    let field = load_car_interest_field(db).await?;
    let data = form.clean(&field)?;

    let appointment = appointment::ActiveModel {
        id: Set(RecordId::generate().into_string()),
        user_id: Set(requester.map(str::to_string)),
        full_name: Set(data.full_name),
        email: Set(data.email),
        phone: Set(data.phone),
        car_interest: Set(data.car_interest),
        preferred_date: Set(data.preferred_date),
        preferred_time: Set(data.preferred_time),
        message: Set(data.message),
        status: Set(AppointmentStatus::Pending),
        created_at: Set(chrono::Utc::now()),
    };

    let result = appointment.insert(db).await?;
    info!(
        "Test drive {} of '{}' booked for {} by {:?}",
        result.id, result.car_interest, result.preferred_date, requester
    );
    Ok(result)
}

/// Loads an appointment the requester is allowed to change.
///
/// # Errors
/// [`Error::NotFound`] for malformed or unknown ids, [`Error::Forbidden`] when the booking
/// belongs to someone else.
pub async fn get_appointment_for_update(
    db: &DatabaseConnection,
    raw_id: &str,
    requester: &str,
) -> Result<appointment::Model> {
    let id = RecordId::parse(RecordKind::Appointment, raw_id)?;
    let appointment = Appointment::find_by_id(id.into_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            kind: RecordKind::Appointment,
            id: raw_id.to_string(),
        })?;
    ensure_can_mutate(
        RecordKind::Appointment,
        &appointment.id,
        appointment.user_id.as_deref(),
        requester,
    )?;
    Ok(appointment)
}

/// Cancels (deletes) a booking.
///
/// # Errors
/// Same as [`get_appointment_for_update`].
#[instrument(skip(db))]
pub async fn delete_appointment(
    db: &DatabaseConnection,
    raw_id: &str,
    requester: &str,
) -> Result<()> {
    let appointment = get_appointment_for_update(db, raw_id, requester).await?;
    Appointment::delete_by_id(appointment.id.clone()).exec(db).await?;
    info!("Test drive {} cancelled by {}", appointment.id, requester);
    Ok(())
}

/// Number of stored appointments.
pub async fn count_appointments(db: &DatabaseConnection) -> Result<u64> {
    Appointment::find().count(db).await.map_err(Into::into)
}
