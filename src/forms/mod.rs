//! Form validation layer.
//!
//! Each submission kind has a raw form struct deserialized straight from the request
//! (every field a string, missing fields empty) and a `clean` step that either returns
//! typed, trimmed data or a set of field-level errors. Cleaning never touches the
//! database; anything it needs from the store (the appointment car list) is passed in.

pub mod appointment;
pub mod offer;
pub mod order;
pub mod review;

pub use appointment::{AppointmentData, AppointmentForm, CarInterestField, car_interest_field};
pub use offer::{OfferData, OfferForm};
pub use order::{OrderData, OrderForm};
pub use review::{ReviewData, ReviewForm};

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use validator::ValidateEmail;

/// Maximum length of a contact name.
pub const MAX_NAME_LEN: usize = 100;
/// Maximum length of a phone number.
pub const MAX_PHONE_LEN: usize = 30;

pub(crate) const REQUIRED: &str = "This field is required.";

/// Field name to error messages, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    /// Records an error against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// True when no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the fields that failed.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Trims `raw` and checks presence and length. Records errors and returns `None` on failure.
pub(crate) fn required_text(
    errors: &mut FormErrors,
    field: &str,
    raw: &str,
    max_len: Option<usize>,
) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    if let Some(max) = max_len {
        let len = value.chars().count();
        if len > max {
            errors.add(
                field,
                format!("Ensure this value has at most {max} characters (it has {len})."),
            );
            return None;
        }
    }
    Some(value.to_string())
}

/// Trims an optional free-text field; blank is allowed.
pub(crate) fn optional_text(raw: &str) -> String {
    raw.trim().to_string()
}

/// Trims `raw` and checks it is a well-formed email address.
pub(crate) fn required_email(errors: &mut FormErrors, field: &str, raw: &str) -> Option<String> {
    let value = required_text(errors, field, raw, Some(254))?;
    if value.validate_email() {
        Some(value)
    } else {
        errors.add(field, "Enter a valid email address.");
        None
    }
}
