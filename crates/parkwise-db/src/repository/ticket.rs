//! # Ticket Repository
//!
//! Database operations for parking tickets.
//!
//! ## Ticket Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ticket Lifecycle                                  │
//! │                                                                         │
//! │  1. ENTRY                                                              │
//! │     └── save() → row with in_time, out_time NULL, price 0              │
//! │                  (id assigned by SQLite, returned to the caller)       │
//! │                                                                         │
//! │  2. WHILE PARKED                                                       │
//! │     └── find_open() finds the ticket by plate (out_time IS NULL)       │
//! │                                                                         │
//! │  3. EXIT                                                               │
//! │     └── update() → writes out_time and price in one statement          │
//! │                                                                         │
//! │  Tickets are never deleted by the kiosk; history drives the            │
//! │  recurring-vehicle discount (count_for_vehicle).                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use parkwise_core::{ParkingSpot, SpotType, Ticket};

/// Flat row shape for `ticket JOIN parking_spot`.
///
/// `Ticket` embeds its spot as a nested struct, which FromRow can't map
/// directly; queries select into this row and convert.
#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: i64,
    vehicle_reg_number: String,
    in_time: DateTime<Utc>,
    out_time: Option<DateTime<Utc>>,
    price: f64,
    spot_id: i64,
    spot_type: SpotType,
    available: bool,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: row.id,
            vehicle_reg_number: row.vehicle_reg_number,
            spot: ParkingSpot::new(row.spot_id, row.spot_type, row.available),
            in_time: row.in_time,
            out_time: row.out_time,
            price: row.price,
        }
    }
}

/// Repository for ticket database operations.
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: SqlitePool,
}

impl TicketRepository {
    /// Creates a new TicketRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TicketRepository { pool }
    }

    /// Saves a new ticket and returns the id SQLite assigned.
    ///
    /// The embedded spot is stored by reference (`spot_id`); the
    /// parking_spot row remains the source of truth for its state.
    pub async fn save(&self, ticket: &Ticket) -> DbResult<i64> {
        debug!(
            reg = %ticket.vehicle_reg_number,
            spot = ticket.spot.id,
            "Saving ticket"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO ticket (spot_id, vehicle_reg_number, in_time, out_time, price)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(ticket.spot.id)
        .bind(&ticket.vehicle_reg_number)
        .bind(ticket.in_time)
        .bind(ticket.out_time)
        .bind(ticket.price)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Writes a ticket's exit time and price.
    ///
    /// ## Returns
    /// * `Ok(true)` - The row was updated
    /// * `Ok(false)` - No ticket with that id exists; callers must treat the
    ///   ticket as not committed
    pub async fn update(&self, ticket: &Ticket) -> DbResult<bool> {
        debug!(id = ticket.id, "Updating ticket");

        let result = sqlx::query(
            r#"
            UPDATE ticket
            SET out_time = ?2, price = ?3
            WHERE id = ?1
            "#,
        )
        .bind(ticket.id)
        .bind(ticket.out_time)
        .bind(ticket.price)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Finds the open ticket for a vehicle, joined with its spot.
    ///
    /// At most one ticket per vehicle should be open at a time; if history
    /// ever contains more, the newest entry wins.
    ///
    /// ## Returns
    /// * `Ok(Some(Ticket))` - The vehicle is currently inside
    /// * `Ok(None)` - No open visit for this plate
    pub async fn find_open(&self, vehicle_reg_number: &str) -> DbResult<Option<Ticket>> {
        debug!(reg = %vehicle_reg_number, "Looking up open ticket");

        let row = sqlx::query_as::<_, TicketRow>(
            r#"
            SELECT
                t.id,
                t.vehicle_reg_number,
                t.in_time,
                t.out_time,
                t.price,
                s.id AS spot_id,
                s.spot_type,
                s.available
            FROM ticket t
            INNER JOIN parking_spot s ON s.id = t.spot_id
            WHERE t.vehicle_reg_number = ?1 AND t.out_time IS NULL
            ORDER BY t.in_time DESC
            LIMIT 1
            "#,
        )
        .bind(vehicle_reg_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Ticket::from))
    }

    /// Counts every ticket ever issued to a vehicle, open ones included.
    ///
    /// This is the source of truth for the recurring-vehicle predicate:
    /// a live query against history, never in-memory state.
    pub async fn count_for_vehicle(&self, vehicle_reg_number: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM ticket WHERE vehicle_reg_number = ?1")
                .bind(vehicle_reg_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Duration;

    const REG: &str = "AB-123-CD";

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn occupied_spot(id: i64, spot_type: SpotType) -> ParkingSpot {
        ParkingSpot::new(id, spot_type, false)
    }

    #[tokio::test]
    async fn test_save_assigns_an_id() {
        let db = test_db().await;
        let repo = db.tickets();

        let ticket = Ticket::new(REG, occupied_spot(1, SpotType::Car), Utc::now());
        let id = repo.save(&ticket).await.unwrap();
        assert!(id > 0);

        let second = repo.save(&ticket).await.unwrap();
        assert!(second > id);
    }

    #[tokio::test]
    async fn test_find_open_returns_the_joined_spot() {
        let db = test_db().await;
        let repo = db.tickets();

        // Occupy spot 4 so the joined row reflects the live spot state.
        let mut spot = db.spots().get_by_id(4).await.unwrap().unwrap();
        spot.available = false;
        db.spots().update(&spot).await.unwrap();

        let in_time = Utc::now() - Duration::minutes(10);
        let mut ticket = Ticket::new(REG, spot, in_time);
        ticket.id = repo.save(&ticket).await.unwrap();

        let found = repo.find_open(REG).await.unwrap().unwrap();
        assert_eq!(found.id, ticket.id);
        assert_eq!(found.spot.id, 4);
        assert_eq!(found.spot.spot_type, SpotType::Bike);
        assert!(!found.spot.available);
        assert!(found.is_open());
        assert_eq!(found.price, 0.0);
    }

    #[tokio::test]
    async fn test_find_open_ignores_closed_tickets_and_other_plates() {
        let db = test_db().await;
        let repo = db.tickets();

        let spot = occupied_spot(1, SpotType::Car);
        let in_time = Utc::now() - Duration::hours(2);

        let mut closed = Ticket::new(REG, spot, in_time);
        closed.id = repo.save(&closed).await.unwrap();
        closed.out_time = Some(in_time + Duration::hours(1));
        closed.price = 1.5;
        assert!(repo.update(&closed).await.unwrap());

        assert!(repo.find_open(REG).await.unwrap().is_none());
        assert!(repo.find_open("ZZ-999-ZZ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_writes_out_time_and_price() {
        let db = test_db().await;
        let repo = db.tickets();

        let in_time = Utc::now() - Duration::hours(1);
        let mut ticket = Ticket::new(REG, occupied_spot(2, SpotType::Car), in_time);
        ticket.id = repo.save(&ticket).await.unwrap();

        ticket.out_time = Some(Utc::now());
        ticket.price = 1.5;
        assert!(repo.update(&ticket).await.unwrap());

        // The visit is closed now
        assert!(repo.find_open(REG).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_ticket_reports_no_rows() {
        let db = test_db().await;
        let repo = db.tickets();

        let mut ghost = Ticket::new(REG, occupied_spot(1, SpotType::Car), Utc::now());
        ghost.id = 424242;
        ghost.out_time = Some(Utc::now());

        assert!(!repo.update(&ghost).await.unwrap());
    }

    #[tokio::test]
    async fn test_count_for_vehicle_includes_open_and_closed() {
        let db = test_db().await;
        let repo = db.tickets();

        assert_eq!(repo.count_for_vehicle(REG).await.unwrap(), 0);

        let spot = occupied_spot(1, SpotType::Car);
        let in_time = Utc::now() - Duration::days(1);

        let mut old = Ticket::new(REG, spot, in_time);
        old.id = repo.save(&old).await.unwrap();
        old.out_time = Some(in_time + Duration::hours(1));
        old.price = 1.5;
        repo.update(&old).await.unwrap();

        let fresh = Ticket::new(REG, spot, Utc::now());
        repo.save(&fresh).await.unwrap();

        assert_eq!(repo.count_for_vehicle(REG).await.unwrap(), 2);
        assert_eq!(repo.count_for_vehicle("ZZ-999-ZZ").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_saving_against_unknown_spot_is_rejected() {
        let db = test_db().await;
        let repo = db.tickets();

        let ticket = Ticket::new(REG, occupied_spot(999, SpotType::Car), Utc::now());
        let err = repo.save(&ticket).await.unwrap_err();
        assert!(matches!(err, crate::error::DbError::ForeignKeyViolation { .. }));
    }
}
