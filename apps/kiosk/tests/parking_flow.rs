//! End-to-end parking flows over a real (in-memory) SQLite database.
//!
//! These tests exercise the full stack: service orchestration, repositories,
//! migrations, and seeded lot data. Entry timestamps are backdated with raw
//! SQL so an exit can be priced without sleeping through a billing hour.

use chrono::{Duration, Utc};

use parkwise_core::SpotType;
use parkwise_db::{Database, DbConfig};
use parkwise_kiosk::{EntryOutcome, ExitOutcome, ParkingService};

const REG: &str = "AB-123-CD";

async fn test_database() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

fn service(db: &Database) -> ParkingService<parkwise_db::SpotRepository, parkwise_db::TicketRepository> {
    ParkingService::new(db.spots(), db.tickets(), Default::default())
}

/// Rewinds the saved in_time so the vehicle looks like it parked earlier.
async fn backdate_entry(db: &Database, ticket_id: i64, parked_for: Duration) {
    let in_time = (Utc::now() - parked_for).to_rfc3339();
    sqlx::query("UPDATE ticket SET in_time = ?1 WHERE id = ?2")
        .bind(in_time)
        .bind(ticket_id)
        .execute(db.pool())
        .await
        .unwrap();
}

#[tokio::test]
async fn parking_a_car_saves_a_ticket_and_occupies_the_spot() {
    let db = test_database().await;

    let outcome = service(&db).process_incoming_vehicle(1, REG).await.unwrap();

    let ticket = match outcome {
        EntryOutcome::Parked { ticket, .. } => ticket,
        other => panic!("expected Parked, got {other:?}"),
    };

    // Lowest car spot is seeded as spot 1
    assert_eq!(ticket.spot.id, 1);
    assert_eq!(ticket.spot.spot_type, SpotType::Car);
    assert!(ticket.id > 0);

    let stored = db.tickets().find_open(REG).await.unwrap().unwrap();
    assert_eq!(stored.id, ticket.id);
    assert!(stored.is_open());
    assert_eq!(stored.price, 0.0);

    let spot = db.spots().get_by_id(1).await.unwrap().unwrap();
    assert!(!spot.available, "spot 1 must be marked taken");

    // The next car gets the next spot up
    let next = db
        .spots()
        .find_next_available(SpotType::Car)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(next.id, 2);
}

#[tokio::test]
async fn exiting_after_an_hour_charges_the_car_rate_and_frees_the_spot() {
    let db = test_database().await;
    let service = service(&db);

    let outcome = service.process_incoming_vehicle(1, REG).await.unwrap();
    let EntryOutcome::Parked { ticket, .. } = outcome else {
        panic!("entry failed");
    };
    backdate_entry(&db, ticket.id, Duration::hours(1)).await;

    let outcome = service.process_exiting_vehicle(REG).await.unwrap();

    let closed = match outcome {
        ExitOutcome::Released { ticket } => ticket,
        other => panic!("expected Released, got {other:?}"),
    };
    assert!((closed.price - 1.5).abs() < 1e-6, "1h at the car rate");
    assert!(closed.out_time.is_some());

    let spot = db.spots().get_by_id(1).await.unwrap().unwrap();
    assert!(spot.available, "spot released on exit");

    assert!(
        db.tickets().find_open(REG).await.unwrap().is_none(),
        "no open ticket remains"
    );
}

#[tokio::test]
async fn recurring_vehicle_gets_the_loyalty_discount_on_exit() {
    let db = test_database().await;
    let service = service(&db);

    // First visit: park, backdate, exit
    let EntryOutcome::Parked { ticket, .. } =
        service.process_incoming_vehicle(1, REG).await.unwrap()
    else {
        panic!("first entry failed");
    };
    backdate_entry(&db, ticket.id, Duration::hours(2)).await;
    service.process_exiting_vehicle(REG).await.unwrap();

    // Second visit is greeted as recurring
    let EntryOutcome::Parked {
        ticket,
        recurring_visitor,
    } = service.process_incoming_vehicle(1, REG).await.unwrap()
    else {
        panic!("second entry failed");
    };
    assert!(recurring_visitor);

    backdate_entry(&db, ticket.id, Duration::hours(1)).await;
    let outcome = service.process_exiting_vehicle(REG).await.unwrap();

    let ExitOutcome::Released { ticket } = outcome else {
        panic!("second exit failed");
    };
    assert!(
        (ticket.price - 1.425).abs() < 1e-6,
        "1h at the car rate with 5% off, got {}",
        ticket.price
    );
}

#[tokio::test]
async fn short_stay_is_free() {
    let db = test_database().await;
    let service = service(&db);

    let EntryOutcome::Parked { ticket, .. } =
        service.process_incoming_vehicle(2, REG).await.unwrap()
    else {
        panic!("entry failed");
    };
    assert_eq!(ticket.spot.spot_type, SpotType::Bike);

    backdate_entry(&db, ticket.id, Duration::minutes(20)).await;
    let outcome = service.process_exiting_vehicle(REG).await.unwrap();

    let ExitOutcome::Released { ticket } = outcome else {
        panic!("exit failed");
    };
    assert_eq!(ticket.price, 0.0);
}

#[tokio::test]
async fn lot_full_refuses_entry_without_touching_storage() {
    let db = test_database().await;
    let service = service(&db);

    // Seeded lot has two bike spots; fill them
    for plate in ["BIKE-1", "BIKE-2"] {
        let outcome = service.process_incoming_vehicle(2, plate).await.unwrap();
        assert!(matches!(outcome, EntryOutcome::Parked { .. }));
    }

    let outcome = service.process_incoming_vehicle(2, "BIKE-3").await.unwrap();
    assert_eq!(outcome, EntryOutcome::NoSpotAvailable);

    assert!(db.tickets().find_open("BIKE-3").await.unwrap().is_none());
    assert_eq!(db.spots().count_available(SpotType::Bike).await.unwrap(), 0);

    // Car capacity is unaffected
    assert_eq!(db.spots().count_available(SpotType::Car).await.unwrap(), 3);
}

#[tokio::test]
async fn exit_without_entry_is_a_quiet_noop() {
    let db = test_database().await;

    let outcome = service(&db).process_exiting_vehicle("GHOST-1").await.unwrap();
    assert_eq!(outcome, ExitOutcome::NoOpenTicket);
}
