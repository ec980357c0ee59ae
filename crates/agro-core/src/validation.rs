//! # Validation Module
//!
//! Form input validation for AgroFarm Manager.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (UI)                                                    │
//! │  ├── Basic format checks (empty, numeric parse)                        │
//! │  └── Immediate user feedback, form stays open                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command (Rust)                                               │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: rule validation, before any SQL runs                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── CHECK constraints (category, quality rating)                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use agro_core::validation::{validate_name, validate_area};
//!
//! // Validate form inputs before the insert
//! let name = validate_name("North 40").unwrap();
//! validate_area(12.5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN, QUALITY_RATING_RANGE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an entity name (field or crop).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 100 characters
///
/// ## Returns
/// The trimmed name, ready for the insert.
///
/// ## Example
/// ```rust
/// use agro_core::validation::validate_name;
///
/// assert_eq!(validate_name("  North 40 ").unwrap(), "North 40");
/// assert!(validate_name("").is_err());
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates an optional free-form text input (description, notes, unit).
///
/// ## Rules
/// - Absent or blank input collapses to `None`
/// - Otherwise at most `MAX_DESCRIPTION_LEN` characters
///
/// ## Returns
/// The trimmed text, or `None` when nothing was entered.
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
) -> ValidationResult<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };

    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    if value.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(Some(value.to_string()))
}

/// Validates a required free-form label such as the plan's season/year.
///
/// ## Rules
/// - Must not be empty after trimming ("2024-2025", "2024", ...)
pub fn validate_season_year(value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "season_year".to_string(),
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a field or plan area in hectares.
///
/// ## Rules
/// - Must be a finite number (the form's float parse already failed on text)
/// - Must be strictly positive
///
/// ## Example
/// ```rust
/// use agro_core::validation::validate_area;
///
/// assert!(validate_area(12.5).is_ok());
/// assert!(validate_area(0.0).is_err());
/// assert!(validate_area(-3.0).is_err());
/// ```
pub fn validate_area(area: f64) -> ValidationResult<()> {
    if !area.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "area".to_string(),
            reason: "must be a number".to_string(),
        });
    }

    if area <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "area".to_string(),
        });
    }

    Ok(())
}

/// Validates a non-negative quantity-like number (yield, purchased quantity).
///
/// ## Rules
/// - Must be a finite number
/// - Zero is allowed (a failed harvest is still a record)
pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number".to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a monetary amount in kopiykas.
///
/// ## Rules
/// - Must be non-negative (zero allowed: donated seed still gets a record)
pub fn validate_amount_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a harvest period in months.
///
/// ## Rules
/// - Must be positive (a crop cannot be harvested the month it is sown
///   counts as 1)
pub fn validate_harvest_period(months: i64) -> ValidationResult<()> {
    if months <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "harvest_period_months".to_string(),
        });
    }

    Ok(())
}

/// Validates a harvest quality rating.
///
/// ## Rules
/// - Must be between 1 and 5 inclusive (mirrors the CHECK constraint)
///
/// ## Example
/// ```rust
/// use agro_core::validation::validate_quality_rating;
///
/// assert!(validate_quality_rating(3).is_ok());
/// assert!(validate_quality_rating(0).is_err());
/// assert!(validate_quality_rating(6).is_err());
/// ```
pub fn validate_quality_rating(rating: i64) -> ValidationResult<()> {
    let (min, max) = QUALITY_RATING_RANGE;
    if rating < min || rating > max {
        return Err(ValidationError::OutOfRange {
            field: "quality_rating".to_string(),
            min,
            max,
        });
    }

    Ok(())
}

/// Validates a moisture content percentage.
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
pub fn validate_moisture(pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "moisture_content".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must not be empty
/// - Must parse as a UUID
///
/// ## Example
/// ```rust
/// use agro_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("North 40").unwrap(), "North 40");
        assert_eq!(validate_name("  South slope  ").unwrap(), "South slope");

        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_optional_text() {
        assert_eq!(validate_optional_text("unit", None).unwrap(), None);
        assert_eq!(validate_optional_text("unit", Some("  ")).unwrap(), None);
        assert_eq!(
            validate_optional_text("unit", Some(" l ")).unwrap(),
            Some("l".to_string())
        );
        assert!(validate_optional_text("description", Some(&"x".repeat(2000))).is_err());
    }

    #[test]
    fn test_validate_area() {
        assert!(validate_area(12.5).is_ok());
        assert!(validate_area(0.01).is_ok());

        assert!(validate_area(0.0).is_err());
        assert!(validate_area(-3.0).is_err());
        assert!(validate_area(f64::NAN).is_err());
        assert!(validate_area(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("actual_yield", 0.0).is_ok());
        assert!(validate_non_negative("actual_yield", 4.2).is_ok());
        assert!(validate_non_negative("actual_yield", -0.1).is_err());
        assert!(validate_non_negative("quantity", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_amount_cents() {
        assert!(validate_amount_cents(0).is_ok());
        assert!(validate_amount_cents(5650).is_ok());
        assert!(validate_amount_cents(-1).is_err());
    }

    #[test]
    fn test_validate_quality_rating() {
        for rating in 1..=5 {
            assert!(validate_quality_rating(rating).is_ok());
        }
        assert!(validate_quality_rating(0).is_err());
        assert!(validate_quality_rating(6).is_err());
        assert!(validate_quality_rating(-1).is_err());
    }

    #[test]
    fn test_validate_moisture() {
        assert!(validate_moisture(0.0).is_ok());
        assert!(validate_moisture(14.5).is_ok());
        assert!(validate_moisture(100.0).is_ok());
        assert!(validate_moisture(-0.1).is_err());
        assert!(validate_moisture(100.1).is_err());
    }

    #[test]
    fn test_validate_harvest_period() {
        assert!(validate_harvest_period(9).is_ok());
        assert!(validate_harvest_period(0).is_err());
        assert!(validate_harvest_period(-2).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_season_year() {
        assert_eq!(validate_season_year(" 2024-2025 ").unwrap(), "2024-2025");
        assert!(validate_season_year("").is_err());
    }
}
