//! Test-drive appointment form.
//!
//! The car-interest field is a choice list built from the catalog when the form is
//! constructed. With an empty catalog the field is disabled and offers only a placeholder,
//! so any submitted value is ignored and the booking cannot be made.

use super::{
    FormErrors, MAX_NAME_LEN, MAX_PHONE_LEN, REQUIRED, optional_text, required_email,
    required_text,
};
use crate::core::catalog::year_key;
use crate::entities::{PreferredTime, vehicle};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum length of the car-interest label.
pub const MAX_CAR_INTEREST_LEN: usize = 150;
/// Label of the placeholder choice shown when no vehicles exist.
pub const NO_CARS_LABEL: &str = "No cars available";

/// One entry of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    /// Submitted value
    pub value: String,
    /// Displayed text
    pub label: String,
}

/// The car-interest select field as offered to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarInterestField {
    /// Available choices, in display order
    pub choices: Vec<Choice>,
    /// True when the catalog is empty and the field cannot be used
    pub disabled: bool,
}

impl CarInterestField {
    /// True when `value` is one of the selectable vehicle labels.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        !self.disabled && self.choices.iter().any(|choice| choice.value == value)
    }
}

/// Builds the car-interest choices from the current catalog.
///
/// Vehicles are offered by make, model and year, each labelled `"{make} {model} ({year})"`.
#[must_use]
pub fn car_interest_field(vehicles: &[vehicle::Model]) -> CarInterestField {
    let mut sorted: Vec<&vehicle::Model> = vehicles.iter().collect();
    sorted.sort_by(|a, b| {
        a.make
            .cmp(&b.make)
            .then_with(|| a.model.cmp(&b.model))
            .then_with(|| year_key(a).cmp(&year_key(b)))
    });

    let choices: Vec<Choice> = sorted
        .into_iter()
        .map(|v| {
            let label = v.label();
            Choice {
                value: label.clone(),
                label,
            }
        })
        .collect();

    if choices.is_empty() {
        return CarInterestField {
            choices: vec![Choice {
                value: String::new(),
                label: NO_CARS_LABEL.to_string(),
            }],
            disabled: true,
        };
    }

    CarInterestField {
        choices,
        disabled: false,
    }
}

/// Appointment fields as submitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppointmentForm {
    /// Contact name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Label of the chosen vehicle
    pub car_interest: String,
    /// Requested day, `YYYY-MM-DD`
    pub preferred_date: String,
    /// `morning`, `afternoon` or `evening`
    pub preferred_time: String,
    /// Optional note
    pub message: String,
}

/// Validated appointment fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentData {
    /// Contact name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Label of the chosen vehicle
    pub car_interest: String,
    /// Requested day
    pub preferred_date: NaiveDate,
    /// Requested time of day
    pub preferred_time: PreferredTime,
    /// Optional note, possibly empty
    pub message: String,
}

fn clean_car_interest(errors: &mut FormErrors, field: &CarInterestField, raw: &str) -> Option<String> {
    if field.disabled {
        // Nothing to choose from; whatever the client sent is dropped.
        errors.add("car_interest", REQUIRED);
        return None;
    }
    let value = required_text(errors, "car_interest", raw, Some(MAX_CAR_INTEREST_LEN))?;
    if field.accepts(&value) {
        Some(value)
    } else {
        errors.add(
            "car_interest",
            format!("Select a valid choice. {value} is not one of the available choices."),
        );
        None
    }
}

fn clean_date(errors: &mut FormErrors, raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add("preferred_date", REQUIRED);
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| errors.add("preferred_date", "Enter a valid date."))
        .ok()
}

fn clean_time(errors: &mut FormErrors, raw: &str) -> Option<PreferredTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add("preferred_time", REQUIRED);
        return None;
    }
    let parsed = PreferredTime::from_form_value(raw);
    if parsed.is_none() {
        errors.add(
            "preferred_time",
            format!("Select a valid choice. {raw} is not one of the available choices."),
        );
    }
    parsed
}

impl AppointmentForm {
    /// A blank form, optionally preselecting a vehicle label.
    #[must_use]
    pub fn with_initial_car(car_interest: Option<String>) -> Self {
        Self {
            car_interest: car_interest.unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Validates the submission against the choices built for this request.
    ///
    /// # Errors
    /// Returns every field-level problem found.
    pub fn clean(&self, car_interest: &CarInterestField) -> Result<AppointmentData, FormErrors> {
        let mut errors = FormErrors::default();
        let full_name = required_text(&mut errors, "full_name", &self.full_name, Some(MAX_NAME_LEN));
        let email = required_email(&mut errors, "email", &self.email);
        let phone = required_text(&mut errors, "phone", &self.phone, Some(MAX_PHONE_LEN));
        let car = clean_car_interest(&mut errors, car_interest, &self.car_interest);
        let preferred_date = clean_date(&mut errors, &self.preferred_date);
        let preferred_time = clean_time(&mut errors, &self.preferred_time);

        match (full_name, email, phone, car, preferred_date, preferred_time) {
            (
                Some(full_name),
                Some(email),
                Some(phone),
                Some(car_interest),
                Some(preferred_date),
                Some(preferred_time),
            ) if errors.is_empty() => Ok(AppointmentData {
                full_name,
                email,
                phone,
                car_interest,
                preferred_date,
                preferred_time,
                message: optional_text(&self.message),
            }),
            _ => Err(errors),
        }
    }
}
