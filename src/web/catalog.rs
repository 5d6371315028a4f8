//! Public catalog pages.

use super::{AppState, Outcome};
use crate::{
    core::{
        activity::site_totals,
        catalog::{CatalogQuery, list_vehicles},
        vehicle::{get_all_vehicles, get_other_vehicles, get_vehicle},
    },
    errors::Result,
};
use axum::extract::{Path, Query, State};
use serde_json::json;

/// `GET /` - site totals.
pub async fn home(State(state): State<AppState>) -> Result<Outcome> {
    let totals = site_totals(&state.db).await?;
    Ok(Outcome::Page(json!(totals)))
}

/// `GET /cars` - filtered, sorted catalog.
pub async fn car_list(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Outcome> {
    let all_vehicles = get_all_vehicles(&state.db).await?;
    let cars = list_vehicles(&all_vehicles, &query);
    let count = cars.len();
    Ok(Outcome::Page(json!({ "cars": cars, "count": count })))
}

/// `GET /cars/{id}` - one vehicle plus a few others to browse.
pub async fn car_detail(State(state): State<AppState>, Path(id): Path<String>) -> Result<Outcome> {
    let car = get_vehicle(&state.db, &id).await?;
    let other_cars = get_other_vehicles(&state.db, &car.id).await?;
    Ok(Outcome::Page(json!({ "car": car, "other_cars": other_cars })))
}
