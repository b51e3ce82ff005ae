//! # Domain Types
//!
//! Core domain types used throughout Parkwise.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ParkingSpot    │   │     Ticket      │   │    SpotType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  Car            │       │
//! │  │  spot_type      │   │  reg number     │   │  Bike           │       │
//! │  │  available      │   │  spot (copy)    │   └─────────────────┘       │
//! │  └─────────────────┘   │  in_time        │                             │
//! │                        │  out_time?      │                             │
//! │                        │  price          │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Implicit State Machine
//! A vehicle visit has no stored status tag; its state is derived:
//! ```text
//! NO_TICKET ──entry──► OPEN (out_time = None, spot.available = false)
//!                        │
//!                      exit
//!                        ▼
//!                     CLOSED (out_time = Some, price set, spot freed)
//! ```
//! The parking service is responsible for keeping the ticket and the spot
//! consistent on every transition.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Spot Type
// =============================================================================

/// The vehicle category a physical spot accepts.
///
/// Stored in the database as `"CAR"` / `"BIKE"`. The set is closed: an
/// unrecognized value never becomes a `SpotType`, it fails at the boundary
/// that tried to produce one (menu selection or row decoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum SpotType {
    /// Standard car spot.
    Car,
    /// Two-wheeler spot.
    Bike,
}

impl SpotType {
    /// Maps a kiosk menu selection to a spot type.
    ///
    /// ## Selection Menu
    /// ```text
    /// Please select vehicle type:
    ///   1 - CAR
    ///   2 - BIKE
    /// ```
    ///
    /// ## Returns
    /// `None` for anything outside the menu. Callers treat that as a refusal
    /// (entry denied), never as a panic or a default.
    pub fn from_selection(selection: i32) -> Option<Self> {
        match selection {
            1 => Some(SpotType::Car),
            2 => Some(SpotType::Bike),
            _ => None,
        }
    }
}

impl fmt::Display for SpotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotType::Car => write!(f, "CAR"),
            SpotType::Bike => write!(f, "BIKE"),
        }
    }
}

impl FromStr for SpotType {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAR" => Ok(SpotType::Car),
            "BIKE" => Ok(SpotType::Bike),
            other => Err(crate::error::ValidationError::InvalidFormat {
                field: "spot_type".to_string(),
                reason: format!("unknown parking type '{other}'"),
            }),
        }
    }
}

// =============================================================================
// Parking Spot
// =============================================================================

/// A single physical parking space.
///
/// ## Lifecycle
/// Spots are created once by seed data and never change type. The only
/// mutation the system performs is toggling `available` as vehicles come
/// and go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ParkingSpot {
    /// Spot number painted on the ground. Positive, unique.
    pub id: i64,

    /// Vehicle category this spot accepts. Fixed for the spot's lifetime.
    pub spot_type: SpotType,

    /// Whether the spot is currently free.
    pub available: bool,
}

impl ParkingSpot {
    /// Creates a new parking spot.
    pub fn new(id: i64, spot_type: SpotType, available: bool) -> Self {
        ParkingSpot {
            id,
            spot_type,
            available,
        }
    }
}

// =============================================================================
// Ticket
// =============================================================================

/// The record of one parking visit for one vehicle, from entry to exit.
///
/// ## Open vs Closed
/// - `out_time == None`: the vehicle is still inside, the ticket is open.
/// - `out_time == Some(_)`: the visit ended; `price` carries the computed
///   fare (it stays `0.0` until then).
///
/// The embedded [`ParkingSpot`] is a copy taken at entry time, after the spot
/// was marked unavailable; the repository row remains the source of truth for
/// the spot's live state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Assigned by the database when the ticket is first saved.
    /// `0` for a ticket that has not been persisted yet.
    pub id: i64,

    /// Registration number of the vehicle this visit belongs to.
    pub vehicle_reg_number: String,

    /// The spot occupied during this visit (copy taken at entry).
    pub spot: ParkingSpot,

    /// When the vehicle entered. Always set.
    pub in_time: DateTime<Utc>,

    /// When the vehicle left. `None` while the visit is in progress.
    /// Must never precede `in_time`.
    pub out_time: Option<DateTime<Utc>>,

    /// Fare owed for the visit. Computed only after `out_time` is set;
    /// carries full fractional precision, display layers round.
    pub price: f64,
}

impl Ticket {
    /// Creates a fresh, unpersisted ticket for a vehicle entering the lot.
    pub fn new(vehicle_reg_number: impl Into<String>, spot: ParkingSpot, in_time: DateTime<Utc>) -> Self {
        Ticket {
            id: 0,
            vehicle_reg_number: vehicle_reg_number.into(),
            spot,
            in_time,
            out_time: None,
            price: 0.0,
        }
    }

    /// Whether the vehicle is still inside.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.out_time.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_spot_type_from_selection() {
        assert_eq!(SpotType::from_selection(1), Some(SpotType::Car));
        assert_eq!(SpotType::from_selection(2), Some(SpotType::Bike));
        assert_eq!(SpotType::from_selection(3), None);
        assert_eq!(SpotType::from_selection(0), None);
        assert_eq!(SpotType::from_selection(-1), None);
    }

    #[test]
    fn test_spot_type_round_trips_through_text() {
        assert_eq!("CAR".parse::<SpotType>().unwrap(), SpotType::Car);
        assert_eq!("bike".parse::<SpotType>().unwrap(), SpotType::Bike);
        assert_eq!(SpotType::Car.to_string(), "CAR");
        assert!("TRUCK".parse::<SpotType>().is_err());
    }

    #[test]
    fn test_ticket_round_trips_through_json() {
        let spot = ParkingSpot::new(2, SpotType::Bike, false);
        let in_time: DateTime<Utc> = "2026-08-25T10:00:00Z".parse().unwrap();
        let mut ticket = Ticket::new("AB-123-CD", spot, in_time);
        ticket.id = 7;
        ticket.out_time = Some(in_time + Duration::hours(1));
        ticket.price = 1.0;

        let json = serde_json::to_string(&ticket).unwrap();
        // spot_type uses the same uppercase wire form as the database
        assert!(json.contains("\"BIKE\""));

        let back: Ticket = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ticket);
    }

    #[test]
    fn test_new_ticket_is_open_and_unpriced() {
        let spot = ParkingSpot::new(1, SpotType::Car, false);
        let ticket = Ticket::new("AB-123-CD", spot, Utc::now());

        assert_eq!(ticket.id, 0);
        assert!(ticket.is_open());
        assert_eq!(ticket.price, 0.0);
        assert_eq!(ticket.spot.id, 1);
    }

    #[test]
    fn test_closed_ticket_is_not_open() {
        let spot = ParkingSpot::new(4, SpotType::Bike, false);
        let in_time = Utc::now() - Duration::hours(1);
        let mut ticket = Ticket::new("AB-123-CD", spot, in_time);
        ticket.out_time = Some(Utc::now());

        assert!(!ticket.is_open());
    }
}
