//! # Error Types
//!
//! Domain-specific error types for parkwise-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  parkwise-core errors (this file)                                      │
//! │  ├── FareError        - Rejected fare computations                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  parkwise-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Kiosk errors (in app)                                                 │
//! │  └── ServiceError     - What the shell loop sees and logs              │
//! │                                                                         │
//! │  Flow: ValidationError / FareError → ServiceError → shell message      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (times, fields, reasons)
//! 3. Errors are enum variants, never String
//! 4. A rejected fare never silently defaults to a price

use chrono::{DateTime, Utc};
use thiserror::Error;

// =============================================================================
// Fare Error
// =============================================================================

/// Rejected fare computations.
///
/// The fare calculator validates its input before any arithmetic runs; a
/// ticket that fails here never receives a price.
#[derive(Debug, Error, PartialEq)]
pub enum FareError {
    /// The ticket has no exit time yet.
    ///
    /// ## When This Occurs
    /// - Fare requested for a vehicle still inside the lot
    /// - Caller forgot to stamp `out_time` before pricing
    #[error("Ticket has no exit time; fare is only computed at exit")]
    MissingExitTime,

    /// The exit time precedes the entry time.
    ///
    /// ## When This Occurs
    /// - Corrupted ticket row
    /// - Clock skew between the recorded entry and the exit stamp
    #[error("Exit time {out_time} precedes entry time {in_time}")]
    ExitBeforeEntry {
        in_time: DateTime<Utc>,
        out_time: DateTime<Utc>,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when kiosk input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., characters a plate can't contain).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for fare computations.
pub type FareResult<T> = Result<T, FareError>;

// =============================================================================
// Unit Tests
// =============================================================================
