//! Order entity - A purchase request submitted for a catalog vehicle.
//!
//! Orders belong to one vehicle (deleted along with it) and optionally to the identity
//! that submitted them. The status is set to `pending` at creation and is never
//! transitioned by any user-facing operation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase request workflow status, stored as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Awaiting dealership review
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Accepted by the dealership
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Declined by the dealership
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// 24-character hex identifier assigned at insert time
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Vehicle the purchase request is for
    pub car_id: String,
    /// Submitting identity, None once detached or for anonymous submissions
    pub user_id: Option<String>,
    /// Contact name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Optional note from the buyer
    #[sea_orm(column_type = "Text")]
    pub message: String,
    /// Workflow status, always `pending` at creation
    pub status: OrderStatus,
    /// When the request was submitted
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one vehicle
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
