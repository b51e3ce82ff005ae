//! # Fare Module
//!
//! Duration-based fare calculation with free-grace and loyalty rules.
//!
//! ## How a Fare Is Computed
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Fare Pipeline                                      │
//! │                                                                         │
//! │  Ticket { in_time, out_time, spot }                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Validate ── out_time missing?        → FareError::MissingExitTime  │
//! │       │         out_time < in_time?      → FareError::ExitBeforeEntry  │
//! │       ▼                                                                 │
//! │  2. duration_hours = elapsed_ms / 3,600,000.0   (exact f64 division)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Grace ───── duration < 0.5 h?        → duration = 0 (free visit)   │
//! │       │         duration == 0.5 h?       → billed in full (NOT free)   │
//! │       ▼                                                                 │
//! │  4. price = duration × rate(spot.spot_type)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. Loyalty ─── recurring vehicle?       → price ×= 0.95               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ticket.price (unrounded; display formats to 2 decimals)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why f64 And Not Integer Cents?
//! Fares are defined as exact fractional-hour arithmetic: one hour in a car
//! spot with the loyalty discount is exactly 1.425. No rounding happens
//! inside this module; the kiosk rounds for presentation only.

use serde::{Deserialize, Serialize};

use crate::error::{FareError, FareResult};
use crate::types::{SpotType, Ticket};
use crate::{GRACE_PERIOD_HOURS, LOYALTY_DISCOUNT_FACTOR};

// =============================================================================
// Fare Schedule
// =============================================================================

/// Per-hour rates by spot type.
///
/// Rates are configuration, not constants: the kiosk loads overrides from the
/// environment and passes the schedule down. [`FareSchedule::default`] carries
/// the standard lot pricing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareSchedule {
    /// Hourly rate for car spots.
    pub car_rate_per_hour: f64,

    /// Hourly rate for bike spots.
    pub bike_rate_per_hour: f64,
}

impl FareSchedule {
    /// Returns the hourly rate for a spot type.
    #[inline]
    pub fn rate_for(&self, spot_type: SpotType) -> f64 {
        match spot_type {
            SpotType::Car => self.car_rate_per_hour,
            SpotType::Bike => self.bike_rate_per_hour,
        }
    }
}

impl Default for FareSchedule {
    fn default() -> Self {
        FareSchedule {
            car_rate_per_hour: 1.5,
            bike_rate_per_hour: 1.0,
        }
    }
}

// =============================================================================
// Fare Calculation
// =============================================================================

/// Computes the fare for a closed ticket and stores it in `ticket.price`.
///
/// ## Rules
/// 1. Rejects tickets with no `out_time`, or `out_time` before `in_time`.
/// 2. Duration is elapsed milliseconds divided by 3,600,000.0.
/// 3. Visits shorter than [`GRACE_PERIOD_HOURS`] are free. The boundary is
///    strict: exactly half an hour is billed.
/// 4. Base price is duration times the schedule rate for the spot type.
/// 5. `apply_discount` multiplies by [`LOYALTY_DISCOUNT_FACTOR`], after the
///    grace rule and rate lookup, never before.
///
/// ## Arguments
/// * `ticket` - The ticket to price; `out_time` must already be set
/// * `apply_discount` - Loyalty eligibility, decided by the caller from the
///   vehicle's ticket history
/// * `schedule` - The lot's hourly rates
///
/// ## Example
/// ```rust
/// use chrono::{Duration, Utc};
/// use parkwise_core::fare::{calculate_fare, FareSchedule};
/// use parkwise_core::types::{ParkingSpot, SpotType, Ticket};
///
/// let spot = ParkingSpot::new(1, SpotType::Car, false);
/// let in_time = Utc::now() - Duration::minutes(90);
/// let mut ticket = Ticket::new("AB-123-CD", spot, in_time);
/// ticket.out_time = Some(in_time + Duration::minutes(90));
///
/// calculate_fare(&mut ticket, false, &FareSchedule::default()).unwrap();
/// assert_eq!(ticket.price, 1.5 * 1.5); // 1.5 hours at the car rate
/// ```
pub fn calculate_fare(
    ticket: &mut Ticket,
    apply_discount: bool,
    schedule: &FareSchedule,
) -> FareResult<()> {
    let out_time = ticket.out_time.ok_or(FareError::MissingExitTime)?;

    if out_time < ticket.in_time {
        return Err(FareError::ExitBeforeEntry {
            in_time: ticket.in_time,
            out_time,
        });
    }

    let elapsed_ms = (out_time - ticket.in_time).num_milliseconds();
    let mut duration_hours = elapsed_ms as f64 / 3_600_000.0;

    // Courtesy window: short visits are entirely free.
    if duration_hours < GRACE_PERIOD_HOURS {
        duration_hours = 0.0;
    }

    let mut price = duration_hours * schedule.rate_for(ticket.spot.spot_type);

    if apply_discount {
        price *= LOYALTY_DISCOUNT_FACTOR;
    }

    ticket.price = price;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
