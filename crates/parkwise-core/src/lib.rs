//! # parkwise-core: Pure Business Logic for Parkwise
//!
//! This crate is the **heart** of Parkwise. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Parkwise Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Kiosk Shell (stdin/stdout)                   │   │
//! │  │    Menu ──► Entry Prompt ──► Exit Prompt ──► Fare Display      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Parking Service                              │   │
//! │  │    process_incoming_vehicle, process_exiting_vehicle           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ parkwise-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   fare    │  │   error   │  │ validation│  │   │
//! │  │   │  Ticket   │  │ Schedule  │  │ FareError │  │   rules   │  │   │
//! │  │   │   Spot    │  │ calculate │  │ Validation│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CONSOLE • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    parkwise-db (Database Layer)                 │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ParkingSpot, SpotType, Ticket)
//! - [`fare`] - Fare calculation (grace window, rates, loyalty discount)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **Unrounded Fares**: Prices carry full fractional precision; display rounds
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use parkwise_core::fare::{calculate_fare, FareSchedule};
//! use parkwise_core::types::{ParkingSpot, SpotType, Ticket};
//!
//! let spot = ParkingSpot::new(1, SpotType::Car, false);
//! let in_time = Utc::now() - Duration::hours(1);
//! let mut ticket = Ticket::new("AB-123-CD", spot, in_time);
//! ticket.out_time = Some(in_time + Duration::hours(1));
//!
//! // One hour in a car spot at the default rate
//! calculate_fare(&mut ticket, false, &FareSchedule::default()).unwrap();
//! assert_eq!(ticket.price, 1.5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fare;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use parkwise_core::Ticket` instead of
// `use parkwise_core::types::Ticket`

pub use error::{FareError, ValidationError};
pub use fare::{calculate_fare, FareSchedule};
pub use types::{ParkingSpot, SpotType, Ticket};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Visits shorter than this many hours are free.
///
/// ## Business Reason
/// The first half hour is a courtesy window for pick-ups and drop-offs.
/// This is a flat threshold, not a discount: a 29-minute stay costs nothing,
/// a 30-minute stay is billed in full from hour zero.
pub const GRACE_PERIOD_HOURS: f64 = 0.5;

/// Multiplier applied to the fare of recurring vehicles (5% off).
///
/// ## Business Reason
/// Loyalty reward for vehicles with prior visit history. Applied after the
/// grace window and rate lookup, never before.
pub const LOYALTY_DISCOUNT_FACTOR: f64 = 0.95;

/// Maximum accepted length for a vehicle registration number.
///
/// ## Business Reason
/// Longest real-world plate formats stay well under this; anything longer is
/// almost certainly a typo or garbage input at the kiosk.
pub const MAX_REG_NUMBER_LEN: usize = 20;
