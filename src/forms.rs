//! Input checks and status messages shared by the data-entry forms.
//!
//! Every form keeps its fields as the raw text the user typed. On submit the
//! form runs these checks to build its wire payload, so nothing invalid is
//! ever sent.

use chrono::{Local, NaiveDate, NaiveTime};

use crate::catalog;
use crate::error::{Error, Result};

/// Whether a status message reports success or failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// The inline message shown above a form after submitting it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    /// Message for a failed submission
    pub fn from_error(err: &Error, base_url: &str) -> Self {
        match err {
            Error::Http(_) => Self::error(err.user_message(base_url)),
            _ => Self::error(format!("Error: {}", err.user_message(base_url))),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == StatusKind::Success
    }
}

/// Trimmed value of a required field
pub fn required(label: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation(format!("{} is required", label)));
    }
    Ok(value.to_string())
}

/// Trimmed value of an optional field
pub fn optional(value: &str) -> String {
    value.trim().to_string()
}

/// A required numeric field
pub fn number(label: &str, value: &str) -> Result<f64> {
    let raw = required(label, value)?;
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(Error::validation(format!("{} must be a number", label))),
    }
}

/// Smallest quantity a stock movement may carry
pub const MIN_QUANTITY: f64 = 0.01;

/// A required quantity of at least [`MIN_QUANTITY`]
pub fn quantity(label: &str, value: &str) -> Result<f64> {
    let n = number(label, value)?;
    if n < MIN_QUANTITY {
        return Err(Error::validation(format!(
            "{} must be greater than zero",
            label
        )));
    }
    Ok(n)
}

/// A required `YYYY-MM-DD` date
pub fn date(label: &str, value: &str) -> Result<String> {
    let raw = required(label, value)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| Error::validation(format!("{} must be a date (YYYY-MM-DD)", label)))?;
    Ok(raw)
}

/// A required `HH:MM` time
pub fn time(label: &str, value: &str) -> Result<String> {
    let raw = required(label, value)?;
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .map_err(|_| Error::validation(format!("{} must be a time (HH:MM)", label)))?;
    Ok(raw)
}

/// A required raw material from the catalog
pub fn raw_material(label: &str, value: &str) -> Result<String> {
    let raw = required(label, value)?;
    if catalog::material(&raw).is_none() {
        return Err(Error::validation(format!("Unknown material: {}", raw)));
    }
    Ok(raw)
}

/// A required finished product from the catalog
pub fn product(label: &str, value: &str) -> Result<String> {
    let raw = required(label, value)?;
    if !catalog::is_product(&raw) {
        return Err(Error::validation(format!("Unknown product: {}", raw)));
    }
    Ok(raw)
}

/// Today's local date as `YYYY-MM-DD`
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// The local time as `HH:MM`
pub fn now_hm() -> String {
    Local::now().format("%H:%M").to_string()
}
