//! Purchase request form.

use super::{FormErrors, MAX_NAME_LEN, MAX_PHONE_LEN, optional_text, required_email, required_text};
use serde::{Deserialize, Serialize};

/// Purchase request fields as submitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OrderForm {
    /// Contact name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Optional note
    pub message: String,
}

/// Validated purchase request fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderData {
    /// Contact name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Optional note, possibly empty
    pub message: String,
}

impl OrderForm {
    /// Validates the submission.
    ///
    /// # Errors
    /// Returns every field-level problem found.
    pub fn clean(&self) -> Result<OrderData, FormErrors> {
        let mut errors = FormErrors::default();
        let full_name = required_text(&mut errors, "full_name", &self.full_name, Some(MAX_NAME_LEN));
        let email = required_email(&mut errors, "email", &self.email);
        let phone = required_text(&mut errors, "phone", &self.phone, Some(MAX_PHONE_LEN));

        match (full_name, email, phone) {
            (Some(full_name), Some(email), Some(phone)) if errors.is_empty() => Ok(OrderData {
                full_name,
                email,
                phone,
                message: optional_text(&self.message),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_clean_valid_order() {
        let form = OrderForm {
            full_name: " Ada Lovelace ".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            message: String::new(),
        };
        let data = form.clean().unwrap();
        assert_eq!(data.full_name, "Ada Lovelace");
        assert_eq!(data.message, "");
    }

    #[test]
    fn test_clean_reports_each_missing_field() {
        let errors = OrderForm::default().clean().unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["email", "full_name", "phone"]
        );
    }

    #[test]
    fn test_phone_length_limit() {
        let form = OrderForm {
            full_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "5".repeat(31),
            message: String::new(),
        };
        let errors = form.clean().unwrap_err();
        assert!(errors.get("phone").is_some());
    }
}
