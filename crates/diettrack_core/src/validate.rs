//! Validators for raw console input.
//!
//! # Responsibility
//! - Parse one raw user-supplied string into a typed value.
//! - Signal invalid input without any I/O; retry loops belong to callers.
//!
//! # Invariants
//! - Accepted dates match `M/D/YYYY` or `MM/DD/YYYY` and exist on the calendar.
//! - Accepted numbers are finite.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// `chrono` format used to parse entry dates.
pub const DATE_FORMAT: &str = "%m/%d/%Y";
/// Lowest accepted activity level.
pub const ACTIVITY_LEVEL_MIN: u8 = 1;
/// Highest accepted activity level.
pub const ACTIVITY_LEVEL_MAX: u8 = 5;
/// Highest accepted age in years.
pub const AGE_MAX: u32 = 120;

static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("valid date shape regex"));

/// Raw console input that failed validation.
///
/// Callers recover by re-prompting; this error never reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValidationError {
    /// Not `MM/DD/YYYY`, or not a real calendar day.
    InvalidDate(String),
    /// Not an integer within `1..=5`.
    InvalidActivityLevel(String),
    /// Not a finite number greater than zero.
    NotPositiveNumber(String),
    /// Not an integer within `1..=120`.
    InvalidAge(String),
}

impl InputValidationError {
    /// Returns the raw input that was rejected.
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidDate(input)
            | Self::InvalidActivityLevel(input)
            | Self::NotPositiveNumber(input)
            | Self::InvalidAge(input) => input,
        }
    }
}

impl Display for InputValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(_) => write!(
                f,
                "Invalid date format. Please enter the date in the format mm/dd/yyyy."
            ),
            Self::InvalidActivityLevel(_) => write!(
                f,
                "Invalid input. Please enter a number between {ACTIVITY_LEVEL_MIN} and {ACTIVITY_LEVEL_MAX}."
            ),
            Self::NotPositiveNumber(_) => {
                write!(f, "Invalid input. Please enter a number greater than 0.")
            }
            Self::InvalidAge(_) => {
                write!(f, "Invalid input. Please enter an age between 1 and {AGE_MAX}.")
            }
        }
    }
}

impl Error for InputValidationError {}

/// Parses a `MM/DD/YYYY` date, rejecting days that do not exist.
///
/// Leading zeros are optional (`1/5/2024` is accepted), the year must have
/// four digits.
pub fn validate_date(input: &str) -> Result<NaiveDate, InputValidationError> {
    let trimmed = input.trim();
    if !DATE_SHAPE_RE.is_match(trimmed) {
        return Err(InputValidationError::InvalidDate(input.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| InputValidationError::InvalidDate(input.to_string()))
}

/// Parses an integer activity level within `1..=5`.
pub fn validate_activity_level(input: &str) -> Result<u8, InputValidationError> {
    let reject = || InputValidationError::InvalidActivityLevel(input.to_string());
    let value: i64 = input.trim().parse().map_err(|_| reject())?;
    let level = u8::try_from(value).map_err(|_| reject())?;
    if is_valid_activity_level(level) {
        Ok(level)
    } else {
        Err(reject())
    }
}

/// Parses a finite number strictly greater than zero.
pub fn validate_positive_number(input: &str) -> Result<f64, InputValidationError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| InputValidationError::NotPositiveNumber(input.to_string()))?;
    if is_positive_finite(value) {
        Ok(value)
    } else {
        Err(InputValidationError::NotPositiveNumber(input.to_string()))
    }
}

/// Parses an integer age within `1..=120`.
pub fn validate_age(input: &str) -> Result<u32, InputValidationError> {
    let age: u32 = input
        .trim()
        .parse()
        .map_err(|_| InputValidationError::InvalidAge(input.to_string()))?;
    if is_valid_age(age) {
        Ok(age)
    } else {
        Err(InputValidationError::InvalidAge(input.to_string()))
    }
}

pub(crate) fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

pub(crate) fn is_valid_activity_level(level: u8) -> bool {
    (ACTIVITY_LEVEL_MIN..=ACTIVITY_LEVEL_MAX).contains(&level)
}

pub(crate) fn is_valid_age(age: u32) -> bool {
    age > 0 && age <= AGE_MAX
}
