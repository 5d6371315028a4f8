//! Appointment entity - A test-drive booking.
//!
//! The vehicle of interest is captured as a denormalized label (`"{make} {model} ({year})"`)
//! chosen at submission time, not as a foreign key, so appointments survive catalog changes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Preferred time-of-day slot for a test drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum PreferredTime {
    /// Morning slot
    #[sea_orm(string_value = "morning")]
    Morning,
    /// Afternoon slot
    #[sea_orm(string_value = "afternoon")]
    Afternoon,
    /// Evening slot
    #[sea_orm(string_value = "evening")]
    Evening,
}

impl PreferredTime {
    /// Parses the submitted form value; only the exact lowercase names are accepted.
    #[must_use]
    pub fn from_form_value(raw: &str) -> Option<Self> {
        match raw {
            "morning" => Some(Self::Morning),
            "afternoon" => Some(Self::Afternoon),
            "evening" => Some(Self::Evening),
            _ => None,
        }
    }
}

/// Appointment workflow status, stored as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Awaiting dealership confirmation
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Confirmed by the dealership
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Cancelled
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Appointment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    /// 24-character hex identifier assigned at insert time
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Submitting identity, None once detached or for anonymous submissions
    pub user_id: Option<String>,
    /// Contact name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Label of the vehicle to test drive
    pub car_interest: String,
    /// Requested day
    pub preferred_date: Date,
    /// Requested time of day
    pub preferred_time: PreferredTime,
    /// Optional note
    #[sea_orm(column_type = "Text")]
    pub message: String,
    /// Workflow status, always `pending` at creation
    pub status: AppointmentStatus,
    /// When the booking was submitted
    pub created_at: DateTimeUtc,
}

/// Appointments are not related to other tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
