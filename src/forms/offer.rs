//! Offer form. The amount must be a positive decimal with at most 2 decimal places and
//! 10 digits in total.

use super::{FormErrors, REQUIRED, optional_text};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const MAX_DIGITS: u32 = 10;
const DECIMAL_PLACES: u32 = 2;

/// Offer fields as submitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OfferForm {
    /// Offered amount, e.g. `"24500.00"`
    pub amount: String,
    /// Optional note
    pub message: String,
}

/// Validated offer fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferData {
    /// Offered amount
    pub amount: Decimal,
    /// Optional note, possibly empty
    pub message: String,
}

fn clean_amount(errors: &mut FormErrors, raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add("amount", REQUIRED);
        return None;
    }
    let Ok(amount) = Decimal::from_str(raw) else {
        errors.add("amount", "Enter a number.");
        return None;
    };
    if amount <= Decimal::ZERO {
        errors.add("amount", "Ensure this value is greater than 0.");
        return None;
    }
    if amount.scale() > DECIMAL_PLACES {
        errors.add(
            "amount",
            format!("Ensure that there are no more than {DECIMAL_PLACES} decimal places."),
        );
        return None;
    }
    let whole_digits_limit = Decimal::from(10_i64.pow(MAX_DIGITS - DECIMAL_PLACES));
    if amount.trunc() >= whole_digits_limit {
        errors.add(
            "amount",
            format!("Ensure that there are no more than {MAX_DIGITS} digits in total."),
        );
        return None;
    }
    Some(amount)
}

impl OfferForm {
    /// Validates the submission.
    ///
    /// # Errors
    /// Returns every field-level problem found.
    pub fn clean(&self) -> Result<OfferData, FormErrors> {
        let mut errors = FormErrors::default();
        match clean_amount(&mut errors, &self.amount) {
            Some(amount) => Ok(OfferData {
                amount,
                message: optional_text(&self.message),
            }),
            None => Err(errors),
        }
    }
}
