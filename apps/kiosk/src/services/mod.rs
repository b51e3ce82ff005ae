//! # Services Module
//!
//! The kiosk's orchestration layer and the storage seams it runs on.
//!
//! ## Storage Seams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Why Traits Between Service and DB                    │
//! │                                                                         │
//! │  ParkingService<S: SpotStore, T: TicketStore>                          │
//! │       │                                                                 │
//! │       ├── production: SpotRepository / TicketRepository (sqlx)         │
//! │       │                                                                 │
//! │       └── tests: in-memory stubs with scripted responses               │
//! │                                                                         │
//! │  The service logic (ordering of writes, discount predicate, refusal    │
//! │  rules) is exercised without a database; the repositories are          │
//! │  exercised against real SQLite in their own tests.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use parkwise_core::{FareError, ParkingSpot, SpotType, Ticket, ValidationError};
use parkwise_db::{DbError, DbResult, SpotRepository, TicketRepository};
use thiserror::Error;

pub mod parking;

pub use parking::{EntryOutcome, ExitOutcome, ParkingService};

// =============================================================================
// Service Error
// =============================================================================

/// Failures the parking service can surface to the shell.
///
/// Normal outcomes (lot full, no open ticket) are NOT errors; they are
/// variants of [`EntryOutcome`] / [`ExitOutcome`]. This split lets the shell
/// distinguish "nothing to do" from "infrastructure broke" instead of
/// funnelling both through one channel.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Validation error (untrusted kiosk input).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Fare computation rejected the ticket.
    #[error("Fare error: {0}")]
    Fare(#[from] FareError),

    /// A repository call failed.
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),

    /// The availability write for a spot matched no row.
    ///
    /// Means the lot layout changed underneath us; the operation aborts
    /// rather than issuing a ticket against a spot that may not exist.
    #[error("Parking spot {id} could not be persisted")]
    SpotUpdateFailed { id: i64 },
}

// =============================================================================
// Storage Traits
// =============================================================================

/// Spot persistence as seen by the parking service.
pub trait SpotStore {
    /// Next free spot of the given type, lowest number first.
    fn find_next_available(
        &self,
        spot_type: SpotType,
    ) -> impl std::future::Future<Output = DbResult<Option<ParkingSpot>>> + Send;

    /// Writes the spot's availability. `false` means no row matched.
    fn update(
        &self,
        spot: &ParkingSpot,
    ) -> impl std::future::Future<Output = DbResult<bool>> + Send;
}

/// Ticket persistence as seen by the parking service.
pub trait TicketStore {
    /// Persists a new ticket; returns the assigned id.
    fn save(&self, ticket: &Ticket) -> impl std::future::Future<Output = DbResult<i64>> + Send;

    /// Writes out_time and price. `false` means no row matched and the
    /// ticket must be treated as not committed.
    fn update(&self, ticket: &Ticket) -> impl std::future::Future<Output = DbResult<bool>> + Send;

    /// The open ticket for a plate, if the vehicle is inside.
    fn find_open(
        &self,
        vehicle_reg_number: &str,
    ) -> impl std::future::Future<Output = DbResult<Option<Ticket>>> + Send;

    /// Total tickets ever issued to a plate, open ones included.
    fn count_for_vehicle(
        &self,
        vehicle_reg_number: &str,
    ) -> impl std::future::Future<Output = DbResult<i64>> + Send;
}

// =============================================================================
// Production Implementations
// =============================================================================

impl SpotStore for SpotRepository {
    async fn find_next_available(&self, spot_type: SpotType) -> DbResult<Option<ParkingSpot>> {
        SpotRepository::find_next_available(self, spot_type).await
    }

    async fn update(&self, spot: &ParkingSpot) -> DbResult<bool> {
        SpotRepository::update(self, spot).await
    }
}

impl TicketStore for TicketRepository {
    async fn save(&self, ticket: &Ticket) -> DbResult<i64> {
        TicketRepository::save(self, ticket).await
    }

    async fn update(&self, ticket: &Ticket) -> DbResult<bool> {
        TicketRepository::update(self, ticket).await
    }

    async fn find_open(&self, vehicle_reg_number: &str) -> DbResult<Option<Ticket>> {
        TicketRepository::find_open(self, vehicle_reg_number).await
    }

    async fn count_for_vehicle(&self, vehicle_reg_number: &str) -> DbResult<i64> {
        TicketRepository::count_for_vehicle(self, vehicle_reg_number).await
    }
}
