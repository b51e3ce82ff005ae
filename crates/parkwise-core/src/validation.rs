//! # Validation Module
//!
//! Input validation utilities for Parkwise.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Kiosk input reader                                           │
//! │  ├── Re-prompts on empty/garbage lines                                 │
//! │  └── Immediate attendant feedback                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Parking service                                              │
//! │  └── THIS MODULE: plate rules (input is untrusted)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── CHECK constraint on spot_type                                     │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_REG_NUMBER_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a vehicle registration number.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_REG_NUMBER_LEN`] characters
/// - Only alphanumeric characters, hyphens, and spaces
///
/// ## Returns
/// The trimmed plate on success.
///
/// ## Example
/// ```rust
/// use parkwise_core::validation::validate_reg_number;
///
/// assert_eq!(validate_reg_number(" AB-123-CD ").unwrap(), "AB-123-CD");
/// assert!(validate_reg_number("").is_err());
/// assert!(validate_reg_number("AB#123").is_err());
/// ```
pub fn validate_reg_number(reg: &str) -> ValidationResult<String> {
    let reg = reg.trim();

    if reg.is_empty() {
        return Err(ValidationError::Required {
            field: "vehicle_reg_number".to_string(),
        });
    }

    if reg.len() > MAX_REG_NUMBER_LEN {
        return Err(ValidationError::TooLong {
            field: "vehicle_reg_number".to_string(),
            max: MAX_REG_NUMBER_LEN,
        });
    }

    if !reg
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "vehicle_reg_number".to_string(),
            reason: "must contain only letters, numbers, hyphens, and spaces".to_string(),
        });
    }

    Ok(reg.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
