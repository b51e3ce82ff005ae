//! # Spot Repository
//!
//! Database operations for parking spots.
//!
//! ## Key Operations
//! - Next-available lookup per vehicle type (lowest spot number first)
//! - Availability writes (the only mutation spots ever receive)
//!
//! ## Allocation Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                How Spot Allocation Works                                │
//! │                                                                         │
//! │  Vehicle requests: CAR                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ parking_spot                            │                           │
//! │  │                                         │                           │
//! │  │  1 | CAR  | available=0                 │                           │
//! │  │  2 | CAR  | available=1  ← LOWEST FREE  │                           │
//! │  │  3 | CAR  | available=1                 │                           │
//! │  │  4 | BIKE | available=1                 │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Result: spot 2 (ORDER BY id LIMIT 1)                                  │
//! │                                                                         │
//! │  Vehicles fill the lot front-to-back; spot numbers are stable.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use parkwise_core::{ParkingSpot, SpotType};

/// Repository for parking spot database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = SpotRepository::new(pool);
///
/// // Pick the next free car spot
/// let spot = repo.find_next_available(SpotType::Car).await?;
///
/// // Mark it occupied
/// repo.update(&spot).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SpotRepository {
    pool: SqlitePool,
}

impl SpotRepository {
    /// Creates a new SpotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SpotRepository { pool }
    }

    /// Finds the next available spot of the given type.
    ///
    /// ## Returns
    /// * `Ok(Some(ParkingSpot))` - A free spot, lowest id first
    /// * `Ok(None)` - The lot is full for this vehicle type
    pub async fn find_next_available(&self, spot_type: SpotType) -> DbResult<Option<ParkingSpot>> {
        debug!(%spot_type, "Looking for next available spot");

        let spot = sqlx::query_as::<_, ParkingSpot>(
            r#"
            SELECT id, spot_type, available
            FROM parking_spot
            WHERE spot_type = ?1 AND available = 1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(spot_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(spot)
    }

    /// Gets a spot by its number.
    ///
    /// ## Returns
    /// * `Ok(Some(ParkingSpot))` - Spot found
    /// * `Ok(None)` - No spot with that number
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<ParkingSpot>> {
        let spot = sqlx::query_as::<_, ParkingSpot>(
            r#"
            SELECT id, spot_type, available
            FROM parking_spot
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(spot)
    }

    /// Writes a spot's availability flag.
    ///
    /// The spot's type is fixed at creation and deliberately not part of
    /// this statement.
    ///
    /// ## Returns
    /// * `Ok(true)` - The row was updated
    /// * `Ok(false)` - No spot with that id exists
    pub async fn update(&self, spot: &ParkingSpot) -> DbResult<bool> {
        debug!(id = spot.id, available = spot.available, "Updating spot availability");

        let result = sqlx::query(
            r#"
            UPDATE parking_spot
            SET available = ?2
            WHERE id = ?1
            "#,
        )
        .bind(spot.id)
        .bind(spot.available)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts free spots of a type (for diagnostics and the seed tool).
    pub async fn count_available(&self, spot_type: SpotType) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM parking_spot WHERE spot_type = ?1 AND available = 1",
        )
        .bind(spot_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
