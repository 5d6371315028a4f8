//! Catalog seed loading from config.toml
//!
//! The dealership's vehicles are listed in a TOML file and inserted on start-up. Year and
//! price may be written as numbers or as strings such as `"$28,900"`; either way they are
//! stored as text and interpreted permissively when the catalog is listed.

use crate::core::vehicle::{NewVehicle, create_vehicle, find_vehicle_by_label};
use crate::errors::{Error, Result};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Path used when `CATALOG_PATH` is not set.
pub const DEFAULT_CATALOG_PATH: &str = "config.toml";

/// Configuration structure representing the catalog file
#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    /// Vehicles to seed
    #[serde(default)]
    pub vehicles: Vec<VehicleConfig>,
}

/// A single catalog entry
#[derive(Debug, Deserialize, Clone)]
pub struct VehicleConfig {
    /// Manufacturer
    pub make: String,
    /// Model name
    pub model: String,
    /// Model year, number or string
    pub year: toml::Value,
    /// Asking price, number or string
    pub price: toml::Value,
    /// Description text
    #[serde(default)]
    pub description: String,
    /// Image reference
    #[serde(default)]
    pub image_url: String,
}

fn raw_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl VehicleConfig {
    fn to_new_vehicle(&self) -> NewVehicle {
        NewVehicle {
            make: self.make.clone(),
            model: self.model.clone(),
            year: raw_text(&self.year),
            price: raw_text(&self.price),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Loads the catalog from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load catalog from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog file {}: {e}", path_ref.display()),
    })
}

/// Loads the catalog named by `CATALOG_PATH`, or an empty catalog when the file is absent.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_catalog() -> Result<CatalogConfig> {
    let path = std::env::var("CATALOG_PATH").unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string());
    if !Path::new(&path).exists() {
        info!("No catalog file at {}; starting with the stored catalog.", path);
        return Ok(CatalogConfig::default());
    }
    load_catalog(path)
}

/// Inserts catalog entries that are not stored yet.
///
/// Entries are matched by make, model and year. Returns the number of vehicles added.
pub async fn seed_catalog(db: &DatabaseConnection, catalog: &CatalogConfig) -> Result<usize> {
    info!(
        "Starting to seed catalog. Found {} vehicles in configuration.",
        catalog.vehicles.len()
    );
    let mut added = 0;
    for entry in &catalog.vehicles {
        let new = entry.to_new_vehicle();
        if find_vehicle_by_label(db, &new.make, &new.model, &new.year)
            .await?
            .is_some()
        {
            warn!(
                "Vehicle '{} {} ({})' already exists. Skipping.",
                new.make, new.model, new.year
            );
            continue;
        }
        create_vehicle(db, new).await?;
        added += 1;
    }
    info!("Finished seeding catalog: {} vehicles added.", added);
    Ok(added)
}
