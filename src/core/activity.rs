//! Per-identity activity dashboard and identity removal.
//!
//! The dashboard gathers everything one identity has submitted. Removing an identity
//! keeps its records but clears the owner, after which they behave like anonymous
//! submissions.

use crate::{
    core::{appointment::count_appointments, review::count_reviews, vehicle::count_vehicles},
    entities::{
        Appointment, Offer, Order, Review, Vehicle, appointment, offer, order, review, vehicle,
    },
    errors::Result,
};
use sea_orm::{QueryOrder, sea_query::Expr, prelude::*};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Everything one identity has submitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivitySummary {
    /// Purchase requests with their vehicle, newest first
    pub orders: Vec<(order::Model, Option<vehicle::Model>)>,
    /// Offers with their vehicle, newest first
    pub offers: Vec<(offer::Model, Option<vehicle::Model>)>,
    /// Appointments, latest preferred date first
    pub appointments: Vec<appointment::Model>,
    /// Reviews, newest first
    pub reviews: Vec<review::Model>,
}

/// Site-wide totals shown on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SiteTotals {
    /// Vehicles in the catalog
    pub total_cars: u64,
    /// Reviews posted
    pub total_reviews: u64,
    /// Test drives booked
    pub total_appointments: u64,
}

/// Collects the records owned by `requester`.
#[instrument(skip(db))]
pub async fn list_activity(db: &DatabaseConnection, requester: &str) -> Result<ActivitySummary> {
    let orders = Order::find()
        .filter(order::Column::UserId.eq(requester))
        .order_by_desc(order::Column::CreatedAt)
        .find_also_related(Vehicle)
        .all(db)
        .await?;
    let offers = Offer::find()
        .filter(offer::Column::UserId.eq(requester))
        .order_by_desc(offer::Column::CreatedAt)
        .find_also_related(Vehicle)
        .all(db)
        .await?;
    let appointments = Appointment::find()
        .filter(appointment::Column::UserId.eq(requester))
        .order_by_desc(appointment::Column::PreferredDate)
        .all(db)
        .await?;
    let reviews = Review::find()
        .filter(review::Column::UserId.eq(requester))
        .order_by_desc(review::Column::CreatedAt)
        .all(db)
        .await?;

    debug!(
        "Activity for {}: {} orders, {} offers, {} appointments, {} reviews",
        requester,
        orders.len(),
        offers.len(),
        appointments.len(),
        reviews.len()
    );
    Ok(ActivitySummary {
        orders,
        offers,
        appointments,
        reviews,
    })
}

/// Clears `user_id` on every record owned by a removed identity.
///
/// Returns the number of records detached.
#[instrument(skip(db))]
pub async fn detach_identity(db: &DatabaseConnection, user_id: &str) -> Result<u64> {
    let unowned = || Expr::value(Option::<String>::None);

    let orders = Order::update_many()
        .col_expr(order::Column::UserId, unowned())
        .filter(order::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    let offers = Offer::update_many()
        .col_expr(offer::Column::UserId, unowned())
        .filter(offer::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    let appointments = Appointment::update_many()
        .col_expr(appointment::Column::UserId, unowned())
        .filter(appointment::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    let reviews = Review::update_many()
        .col_expr(review::Column::UserId, unowned())
        .filter(review::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    let detached = orders.rows_affected
        + offers.rows_affected
        + appointments.rows_affected
        + reviews.rows_affected;
    info!("Detached {} records from removed user {}", detached, user_id);
    Ok(detached)
}

/// Counts shown on the home page.
pub async fn site_totals(db: &DatabaseConnection) -> Result<SiteTotals> {
    Ok(SiteTotals {
        total_cars: count_vehicles(db).await?,
        total_reviews: count_reviews(db).await?,
        total_appointments: count_appointments(db).await?,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::review::delete_review;
    use crate::entities::{AppointmentStatus, OfferStatus, OrderStatus};
    use crate::test_utils::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_list_activity_only_returns_own_records() -> Result<()> {
        let (db, vehicle) = setup_with_vehicle().await?;
        create_test_order(&db, &vehicle.id, Some("alice")).await?;
        create_test_order(&db, &vehicle.id, Some("bob")).await?;
        create_test_order(&db, &vehicle.id, None).await?;
        create_test_offer(&db, &vehicle.id, Some("alice"), "18000").await?;
        create_test_review(&db, Some("bob"), 4).await?;

        let activity = list_activity(&db, "alice").await?;
        assert_eq!(activity.orders.len(), 1);
        assert_eq!(activity.offers.len(), 1);
        assert!(activity.appointments.is_empty());
        assert!(activity.reviews.is_empty());

        let (order, order_vehicle) = &activity.orders[0];
        assert_eq!(order.user_id.as_deref(), Some("alice"));
        assert_eq!(order_vehicle.as_ref().unwrap().id, vehicle.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_activity_ordering() -> Result<()> {
        let (db, vehicle) = setup_with_vehicle().await?;
        for _ in 0..3 {
            create_test_order(&db, &vehicle.id, Some("alice")).await?;
            create_test_review(&db, Some("alice"), 5).await?;
        }
        for date in ["2026-11-05", "2026-12-24", "2026-11-20"] {
            let mut form = test_appointment_form(&vehicle.label());
            form.preferred_date = date.to_string();
            crate::core::appointment::create_appointment(&db, &form, Some("alice")).await?;
        }

        let activity = list_activity(&db, "alice").await?;
        assert!(
            activity
                .orders
                .windows(2)
                .all(|w| w[0].0.created_at >= w[1].0.created_at)
        );
        assert!(
            activity
                .reviews
                .windows(2)
                .all(|w| w[0].created_at >= w[1].created_at)
        );
        let dates: Vec<NaiveDate> = activity
            .appointments
            .iter()
            .map(|a| a.preferred_date)
            .collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2026, 12, 24).unwrap(),
                NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
                NaiveDate::from_ymd_opt(2026, 11, 5).unwrap(),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_created_records_round_trip_through_activity() -> Result<()> {
        let (db, vehicle) = setup_with_vehicle().await?;
        let order = create_test_order(&db, &vehicle.id, Some("alice")).await?;
        let offer = create_test_offer(&db, &vehicle.id, Some("alice"), "20500").await?;
        let appointment = crate::core::appointment::create_appointment(
            &db,
            &test_appointment_form(&vehicle.label()),
            Some("alice"),
        )
        .await?;
        let review = create_test_review(&db, Some("alice"), 5).await?;

        let activity = list_activity(&db, "alice").await?;
        assert_eq!(activity.orders[0].0, order);
        assert_eq!(activity.orders[0].0.status, OrderStatus::Pending);
        assert_eq!(activity.offers[0].0, offer);
        assert_eq!(activity.offers[0].0.status, OfferStatus::Pending);
        assert_eq!(activity.appointments[0], appointment);
        assert_eq!(activity.appointments[0].status, AppointmentStatus::Pending);
        assert_eq!(activity.reviews[0], review);
        Ok(())
    }

    #[tokio::test]
    async fn test_detach_identity_keeps_records_as_unowned() -> Result<()> {
        let (db, vehicle) = setup_with_vehicle().await?;
        create_test_order(&db, &vehicle.id, Some("alice")).await?;
        create_test_offer(&db, &vehicle.id, Some("alice"), "19000").await?;
        let review = create_test_review(&db, Some("alice"), 3).await?;
        create_test_review(&db, Some("bob"), 3).await?;

        let detached = detach_identity(&db, "alice").await?;
        assert_eq!(detached, 3);

        let activity = list_activity(&db, "alice").await?;
        assert!(activity.orders.is_empty());
        assert!(activity.offers.is_empty());
        assert!(activity.reviews.is_empty());

        // Unowned now, so anyone may delete it.
        delete_review(&db, &review.id, "carol").await?;
        assert_eq!(list_activity(&db, "bob").await?.reviews.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_site_totals() -> Result<()> {
        let (db, vehicle) = setup_with_vehicle().await?;
        create_test_review(&db, None, 5).await?;
        crate::core::appointment::create_appointment(
            &db,
            &test_appointment_form(&vehicle.label()),
            Some("alice"),
        )
        .await?;

        let totals = site_totals(&db).await?;
        assert_eq!(
            totals,
            SiteTotals {
                total_cars: 1,
                total_reviews: 1,
                total_appointments: 1,
            }
        );
        Ok(())
    }
}
