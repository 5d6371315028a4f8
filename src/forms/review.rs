//! Review form, used both for new reviews and for editing an existing one.

use super::{FormErrors, MAX_NAME_LEN, REQUIRED, required_email, required_text};
use crate::entities::review;
use serde::{Deserialize, Serialize};

/// Lowest accepted star rating.
pub const MIN_RATING: i32 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: i32 = 5;

/// Review fields as submitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewForm {
    /// Reviewer name
    pub full_name: String,
    /// Reviewer email
    pub email: String,
    /// Star rating, `"1"` to `"5"`
    pub rating: String,
    /// Review text
    pub comment: String,
}

/// Validated review fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewData {
    /// Reviewer name
    pub full_name: String,
    /// Reviewer email
    pub email: String,
    /// Star rating between 1 and 5
    pub rating: i32,
    /// Review text
    pub comment: String,
}

impl From<&review::Model> for ReviewForm {
    /// Prefills the edit form from a stored review.
    fn from(review: &review::Model) -> Self {
        Self {
            full_name: review.full_name.clone(),
            email: review.email.clone(),
            rating: review.rating.to_string(),
            comment: review.comment.clone(),
        }
    }
}

fn clean_rating(errors: &mut FormErrors, raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add("rating", REQUIRED);
        return None;
    }
    match raw.parse::<i32>() {
        Ok(rating) if (MIN_RATING..=MAX_RATING).contains(&rating) => Some(rating),
        _ => {
            errors.add(
                "rating",
                format!("Select a valid choice. {raw} is not one of the available choices."),
            );
            None
        }
    }
}

impl ReviewForm {
    /// Validates the submission.
    ///
    /// # Errors
    /// Returns every field-level problem found.
    pub fn clean(&self) -> Result<ReviewData, FormErrors> {
        let mut errors = FormErrors::default();
        let full_name = required_text(&mut errors, "full_name", &self.full_name, Some(MAX_NAME_LEN));
        let email = required_email(&mut errors, "email", &self.email);
        let rating = clean_rating(&mut errors, &self.rating);
        let comment = required_text(&mut errors, "comment", &self.comment, None);

        match (full_name, email, rating, comment) {
            (Some(full_name), Some(email), Some(rating), Some(comment)) if errors.is_empty() => {
                Ok(ReviewData {
                    full_name,
                    email,
                    rating,
                    comment,
                })
            }
            _ => Err(errors),
        }
    }
}
