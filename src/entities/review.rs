//! Review entity - A customer review of the dealership, rated 1 to 5.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    /// 24-character hex identifier assigned at insert time
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Submitting identity, None once detached
    pub user_id: Option<String>,
    /// Reviewer name
    pub full_name: String,
    /// Reviewer email
    pub email: String,
    /// Star rating between 1 and 5
    pub rating: i32,
    /// Review text
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    /// When the review was posted
    pub created_at: DateTimeUtc,
}

/// Reviews are not related to other tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
