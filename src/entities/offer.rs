//! Offer entity - A price offer made on a catalog vehicle.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Offer workflow status, stored as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    /// Awaiting dealership review
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Accepted by the dealership
    #[sea_orm(string_value = "accepted")]
    Accepted,
    /// Declined by the dealership
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Offer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offers")]
pub struct Model {
    /// 24-character hex identifier assigned at insert time
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Vehicle the offer is made on
    pub car_id: String,
    /// Submitting identity, None once detached or for anonymous submissions
    pub user_id: Option<String>,
    /// Offered amount in dollars
    pub amount: Decimal,
    /// Optional note from the buyer
    #[sea_orm(column_type = "Text")]
    pub message: String,
    /// Workflow status, always `pending` at creation
    pub status: OfferStatus,
    /// When the offer was submitted
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Offer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each offer belongs to one vehicle
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::CarId",
        to = "super::vehicle::Column::Id",
        on_delete = "Cascade"
    )]
    Vehicle,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
