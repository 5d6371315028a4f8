//! Catalog filter and sort engine.
//!
//! Takes the full vehicle list and the listing query parameters and produces a new,
//! ordered view. Nothing here touches the database; the function is pure and the input
//! slice is never modified.
//!
//! Stored prices and years are interpreted permissively: thousands separators and a
//! leading `$` are stripped, and values that still do not parse fall back to zero for
//! sorting. A malformed query parameter disables that one filter instead of failing.

use crate::entities::vehicle;
use serde::Deserialize;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Raw query parameters accepted by the catalog listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against make or model
    pub search: Option<String>,
    /// Lower price bound, parsed permissively
    pub min_price: Option<String>,
    /// Upper price bound, parsed permissively
    pub max_price: Option<String>,
    /// Exact model year
    pub year: Option<String>,
    /// One of `price_asc`, `price_desc`, `year_new`, `year_old`
    pub sort: Option<String>,
}

/// Ordering applied to the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Cheapest first
    PriceAsc,
    /// Most expensive first
    PriceDesc,
    /// Newest model year first
    YearNew,
    /// Oldest model year first
    YearOld,
    /// Newest model year first, cheaper first within a year
    #[default]
    Default,
}

impl SortKey {
    /// Maps the `sort` parameter; anything unrecognised uses the default order.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("price_asc") => Self::PriceAsc,
            Some("price_desc") => Self::PriceDesc,
            Some("year_new") => Self::YearNew,
            Some("year_old") => Self::YearOld,
            _ => Self::Default,
        }
    }
}

/// Parses a price such as `"28900"`, `"28,900"` or `"$28,900.00"`.
///
/// Returns `None` for empty or unparsable input, including `NaN` and infinities.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let cleaned: String = unsigned.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Sort key for price: the parsed price, or `0.0` when the stored value is malformed.
#[must_use]
pub fn price_key(vehicle: &vehicle::Model) -> f64 {
    parse_price(&vehicle.price).unwrap_or(0.0)
}

/// Sort key for year: the parsed year, or `0` when the stored value is malformed.
#[must_use]
pub fn year_key(vehicle: &vehicle::Model) -> i64 {
    vehicle.year.trim().parse().unwrap_or(0)
}

fn non_empty(raw: Option<&String>) -> Option<&str> {
    raw.map(|value| value.trim()).filter(|value| !value.is_empty())
}

fn price_bound(name: &str, raw: Option<&String>) -> Option<f64> {
    let raw = non_empty(raw)?;
    let bound = parse_price(raw);
    if bound.is_none() {
        warn!("Ignoring unparsable {} filter {:?}", name, raw);
    }
    bound
}

/// Filters and orders `all_vehicles` according to `query`.
///
/// Ties are kept in their original relative order.
#[must_use]
pub fn list_vehicles(all_vehicles: &[vehicle::Model], query: &CatalogQuery) -> Vec<vehicle::Model> {
    let search = non_empty(query.search.as_ref()).map(str::to_lowercase);
    let min_price = price_bound("min_price", query.min_price.as_ref());
    let max_price = price_bound("max_price", query.max_price.as_ref());
    let year = non_empty(query.year.as_ref()).and_then(|raw| {
        let parsed = raw.parse::<i64>().ok();
        if parsed.is_none() {
            warn!("Ignoring unparsable year filter {:?}", raw);
        }
        parsed
    });

    let mut vehicles: Vec<vehicle::Model> = all_vehicles
        .iter()
        .filter(|v| {
            search.as_deref().is_none_or(|needle| {
                v.make.to_lowercase().contains(needle) || v.model.to_lowercase().contains(needle)
            })
        })
        .filter(|v| {
            min_price.is_none_or(|min| parse_price(&v.price).is_some_and(|price| price >= min))
        })
        .filter(|v| {
            max_price.is_none_or(|max| parse_price(&v.price).is_some_and(|price| price <= max))
        })
        .filter(|v| year.is_none_or(|wanted| year_key(v) == wanted))
        .cloned()
        .collect();

    let order: fn(&vehicle::Model, &vehicle::Model) -> Ordering =
        match SortKey::from_param(query.sort.as_deref()) {
            SortKey::PriceAsc => |a, b| price_key(a).total_cmp(&price_key(b)),
            SortKey::PriceDesc => |a, b| price_key(b).total_cmp(&price_key(a)),
            SortKey::YearNew => |a, b| year_key(b).cmp(&year_key(a)),
            SortKey::YearOld => |a, b| year_key(a).cmp(&year_key(b)),
            SortKey::Default => |a, b| {
                year_key(b)
                    .cmp(&year_key(a))
                    .then_with(|| price_key(a).total_cmp(&price_key(b)))
            },
        };
    vehicles.sort_by(order);

    debug!(
        "Catalog query matched {} of {} vehicles.",
        vehicles.len(),
        all_vehicles.len()
    );
    vehicles
}
