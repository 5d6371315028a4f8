//! Vehicle entity - Represents a car listed in the dealership catalog.
//!
//! Vehicles are managed by the dealership (seeded from the catalog file) and have no
//! end-user edit path. `year` and `price` are kept exactly as they arrived from the
//! catalog feed; numeric interpretation happens through the permissive parsers in
//! [`crate::core::catalog`], which tolerate malformed values.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vehicle database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    /// 24-character hex identifier assigned at insert time
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Manufacturer (e.g., "Honda")
    pub make: String,
    /// Model name (e.g., "Civic")
    pub model: String,
    /// Model year as stored (e.g., "2020")
    pub year: String,
    /// Asking price as stored (e.g., "28900.00" or "$28,900")
    pub price: String,
    /// Free-text description shown on the detail page
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Image reference (URL or static path)
    pub image_url: String,
    /// When the vehicle was added to the catalog
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Human-readable label, also used as the appointment car-interest value.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.year)
    }
}

/// Defines relationships between Vehicle and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One vehicle has many purchase requests
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// One vehicle has many offers
    #[sea_orm(has_many = "super::offer::Entity")]
    Offers,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::offer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
