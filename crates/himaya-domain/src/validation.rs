use chrono::NaiveDate;
use thiserror::Error;

/// Validation failures surfaced at the service boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date (expected zero-padded YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Unknown wilaya code: {0}")]
    UnknownWilaya(String),
}

/// Check that a date string is a real calendar date in zero-padded
/// `YYYY-MM-DD` form.
///
/// The zero-padding matters: the key-value store's region scan relies on
/// date strings sorting correctly as text, which only holds for the padded
/// form. chrono accepts `2024-1-5`, so the parsed date is formatted back
/// and compared against the input.
pub fn validate_date(date: &str) -> Result<(), ValidationError> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;
    if parsed.format("%Y-%m-%d").to_string() != date {
        return Err(ValidationError::InvalidDate(date.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_padded_iso_dates() {
        assert_eq!(validate_date("2024-01-15"), Ok(()));
        assert_eq!(validate_date("2024-12-31"), Ok(()));
    }

    #[test]
    fn rejects_unpadded_forms() {
        assert!(validate_date("2024-1-15").is_err());
        assert!(validate_date("2024-01-5").is_err());
    }

    #[test]
    fn rejects_non_dates() {
        assert!(validate_date("").is_err());
        assert!(validate_date("2024-02-30").is_err());
        assert!(validate_date("15/01/2024").is_err());
    }
}
