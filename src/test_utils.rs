//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{offer, order, review, vehicle},
    entities,
    errors::Result,
    forms::{AppointmentForm, OfferForm, OrderForm, ReviewForm},
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Adds a catalog vehicle with the given raw year and price.
pub async fn create_test_vehicle(
    db: &DatabaseConnection,
    make: &str,
    model: &str,
    year: &str,
    price: &str,
) -> Result<entities::vehicle::Model> {
    vehicle::create_vehicle(
        db,
        vehicle::NewVehicle {
            make: make.to_string(),
            model: model.to_string(),
            year: year.to_string(),
            price: price.to_string(),
            description: "Test vehicle".to_string(),
            image_url: "/static/test.jpg".to_string(),
        },
    )
    .await
}

/// Sets up a database holding one Honda Civic (2020) priced 21000.
/// Returns (db, vehicle) for common test scenarios.
pub async fn setup_with_vehicle() -> Result<(DatabaseConnection, entities::vehicle::Model)> {
    let db = setup_test_db().await?;
    let vehicle = create_test_vehicle(&db, "Honda", "Civic", "2020", "21000").await?;
    Ok((db, vehicle))
}

/// A valid purchase request form.
#[must_use]
pub fn test_order_form() -> OrderForm {
    OrderForm {
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "555-0100".to_string(),
        message: "Is it still available?".to_string(),
    }
}

/// A valid appointment form for the vehicle labelled `car_interest`.
///
/// # Defaults
/// * `preferred_date`: 2026-11-02
/// * `preferred_time`: morning
#[must_use]
pub fn test_appointment_form(car_interest: &str) -> AppointmentForm {
    AppointmentForm {
        full_name: "Linus".to_string(),
        email: "linus@example.com".to_string(),
        phone: "555-0199".to_string(),
        car_interest: car_interest.to_string(),
        preferred_date: "2026-11-02".to_string(),
        preferred_time: "morning".to_string(),
        message: String::new(),
    }
}

/// Submits a purchase request for `car_id` owned by `user_id`.
pub async fn create_test_order(
    db: &DatabaseConnection,
    car_id: &str,
    user_id: Option<&str>,
) -> Result<entities::order::Model> {
    order::create_order(db, car_id, &test_order_form(), user_id).await
}

/// Submits an offer of `amount` for `car_id` owned by `user_id`.
pub async fn create_test_offer(
    db: &DatabaseConnection,
    car_id: &str,
    user_id: Option<&str>,
    amount: &str,
) -> Result<entities::offer::Model> {
    let form = OfferForm {
        amount: amount.to_string(),
        message: String::new(),
    };
    offer::create_offer(db, car_id, &form, user_id).await
}

/// Posts a review with the given rating owned by `user_id`.
pub async fn create_test_review(
    db: &DatabaseConnection,
    user_id: Option<&str>,
    rating: i32,
) -> Result<entities::review::Model> {
    let form = ReviewForm {
        full_name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
        rating: rating.to_string(),
        comment: "Helpful staff".to_string(),
    };
    review::create_review(db, &form, user_id).await
}
