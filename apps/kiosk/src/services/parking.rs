//! # Parking Service
//!
//! Orchestrates vehicle entry and exit: spot allocation, ticket lifecycle,
//! fare calculation, and loyalty eligibility.
//!
//! ## Entry Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  process_incoming_vehicle(selection, reg)                               │
//! │                                                                         │
//! │  validate reg ──err──► ServiceError::Validation                        │
//! │       │                                                                 │
//! │  selection → SpotType? ──no──► EntryOutcome::NoSpotAvailable           │
//! │       │                                                                 │
//! │  find_next_available ──none──► EntryOutcome::NoSpotAvailable           │
//! │       │                        (no side effects at all)                 │
//! │       ▼                                                                 │
//! │  mark spot unavailable + persist   ◄── BEFORE the ticket is built,     │
//! │       │                                so a re-read of the spot         │
//! │       ▼                                already shows it taken           │
//! │  save ticket (in_time = now, out_time = None)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  count history → recurring? ──► EntryOutcome::Parked { recurring }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  process_exiting_vehicle(reg)                                           │
//! │                                                                         │
//! │  find_open ──none──► ExitOutcome::NoOpenTicket (quiet no-op)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  out_time = now; discount = history count > 1; calculate_fare          │
//! │       │                                                                 │
//! │  ticket update accepted? ──no──► ExitOutcome::UpdateRejected           │
//! │       │                          (spot STAYS occupied; in-memory        │
//! │       ▼                           mutation is not committed)            │
//! │  free the spot + persist ──► ExitOutcome::Released { ticket }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exit is atomic from the attendant's point of view: either the ticket
//! update and the spot release both happen, or neither does. Entry has a
//! known gap: a ticket-save failure does not roll back the spot write (the
//! error is surfaced and logged; the seed tool or a manual fix reconciles).

use chrono::Utc;
use tracing::{debug, info, warn};

use parkwise_core::fare::{calculate_fare, FareSchedule};
use parkwise_core::validation::validate_reg_number;
use parkwise_core::{SpotType, Ticket};

use super::{ServiceError, SpotStore, TicketStore};

// =============================================================================
// Outcomes
// =============================================================================

/// Result of an entry attempt that reached a decision.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    /// A spot was assigned and the ticket saved.
    Parked {
        /// The persisted ticket (id assigned, spot embedded).
        ticket: Ticket,
        /// The vehicle has prior visit history; the shell greets it and
        /// announces the discount it will receive at the NEXT exit.
        recurring_visitor: bool,
    },

    /// Entry refused: no free spot of the requested type, or the selection
    /// was outside the known vehicle types. Nothing was persisted.
    NoSpotAvailable,
}

/// Result of an exit attempt that reached a decision.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitOutcome {
    /// Ticket closed, fare computed, spot freed.
    Released {
        /// The closed ticket with out_time and price set.
        ticket: Ticket,
    },

    /// The vehicle has no open ticket; nothing to do.
    NoOpenTicket,

    /// The repository did not accept the ticket update. The spot stays
    /// occupied and repository state remains authoritative.
    UpdateRejected,
}

// =============================================================================
// Parking Service
// =============================================================================

/// Entry/exit orchestration over pluggable spot and ticket stores.
///
/// One operation runs to completion before the next is considered; the
/// service assumes each store call is individually atomic but does not
/// coordinate cross-call transactions.
#[derive(Debug, Clone)]
pub struct ParkingService<S, T> {
    spots: S,
    tickets: T,
    fares: FareSchedule,
}

impl<S: SpotStore, T: TicketStore> ParkingService<S, T> {
    /// Creates a parking service over the given stores and fare schedule.
    pub fn new(spots: S, tickets: T, fares: FareSchedule) -> Self {
        ParkingService {
            spots,
            tickets,
            fares,
        }
    }

    /// Handles a vehicle arriving at the gate.
    ///
    /// ## Arguments
    /// * `selection` - Raw vehicle-type menu choice (1 CAR, 2 BIKE); treated
    ///   as untrusted, anything else refuses entry
    /// * `vehicle_reg_number` - Plate of the arriving vehicle
    pub async fn process_incoming_vehicle(
        &self,
        selection: i32,
        vehicle_reg_number: &str,
    ) -> Result<EntryOutcome, ServiceError> {
        let reg = validate_reg_number(vehicle_reg_number)?;

        let Some(spot_type) = SpotType::from_selection(selection) else {
            debug!(selection, "Unknown vehicle type selection, refusing entry");
            return Ok(EntryOutcome::NoSpotAvailable);
        };

        let Some(mut spot) = self.spots.find_next_available(spot_type).await? else {
            info!(%spot_type, "Lot full for requested type, refusing entry");
            return Ok(EntryOutcome::NoSpotAvailable);
        };

        // Take the spot first; the ticket embeds the already-updated state.
        spot.available = false;
        if !self.spots.update(&spot).await? {
            warn!(spot = spot.id, "Spot vanished during allocation");
            return Err(ServiceError::SpotUpdateFailed { id: spot.id });
        }

        let mut ticket = Ticket::new(reg.clone(), spot, Utc::now());
        ticket.id = self.tickets.save(&ticket).await?;

        // The just-saved ticket counts as one; anything above means history.
        let recurring_visitor = self.tickets.count_for_vehicle(&reg).await? > 1;

        info!(
            reg = %reg,
            spot = spot.id,
            ticket = ticket.id,
            recurring_visitor,
            "Vehicle parked"
        );

        Ok(EntryOutcome::Parked {
            ticket,
            recurring_visitor,
        })
    }

    /// Handles a vehicle leaving the lot.
    pub async fn process_exiting_vehicle(
        &self,
        vehicle_reg_number: &str,
    ) -> Result<ExitOutcome, ServiceError> {
        let reg = validate_reg_number(vehicle_reg_number)?;

        let Some(mut ticket) = self.tickets.find_open(&reg).await? else {
            debug!(reg = %reg, "No open ticket, nothing to do");
            return Ok(ExitOutcome::NoOpenTicket);
        };

        ticket.out_time = Some(Utc::now());

        // Second-or-later visit: the open ticket counts as one, so history
        // exists exactly when the count exceeds it.
        let apply_discount = self.tickets.count_for_vehicle(&reg).await? > 1;

        calculate_fare(&mut ticket, apply_discount, &self.fares)?;

        if !self.tickets.update(&ticket).await? {
            warn!(ticket = ticket.id, "Ticket update rejected, keeping spot occupied");
            return Ok(ExitOutcome::UpdateRejected);
        }

        let mut spot = ticket.spot;
        spot.available = true;
        if !self.spots.update(&spot).await? {
            warn!(spot = spot.id, "Spot release matched no row");
            return Err(ServiceError::SpotUpdateFailed { id: spot.id });
        }

        info!(
            reg = %reg,
            ticket = ticket.id,
            price = ticket.price,
            apply_discount,
            "Vehicle exited"
        );

        Ok(ExitOutcome::Released { ticket })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use parkwise_core::ParkingSpot;
    use parkwise_db::{DbError, DbResult};
    use std::sync::Mutex;

    const REG: &str = "AB-123-CD";

    /// Scripted spot store: hands out `next`, records every update.
    #[derive(Default)]
    struct StubSpots {
        next: Option<ParkingSpot>,
        update_accepted: bool,
        updates: Mutex<Vec<ParkingSpot>>,
    }

    impl StubSpots {
        fn with_free_spot(spot: ParkingSpot) -> Self {
            StubSpots {
                next: Some(spot),
                update_accepted: true,
                updates: Mutex::new(Vec::new()),
            }
        }

        fn full() -> Self {
            StubSpots {
                next: None,
                update_accepted: true,
                updates: Mutex::new(Vec::new()),
            }
        }

        fn recorded_updates(&self) -> Vec<ParkingSpot> {
            self.updates.lock().unwrap().clone()
        }
    }

    impl SpotStore for &StubSpots {
        async fn find_next_available(&self, _spot_type: SpotType) -> DbResult<Option<ParkingSpot>> {
            Ok(self.next)
        }

        async fn update(&self, spot: &ParkingSpot) -> DbResult<bool> {
            self.updates.lock().unwrap().push(*spot);
            Ok(self.update_accepted)
        }
    }

    /// Scripted ticket store: serves `open`, records saves and updates.
    #[derive(Default)]
    struct StubTickets {
        open: Option<Ticket>,
        count: i64,
        update_accepted: bool,
        fail_lookup: bool,
        saved: Mutex<Vec<Ticket>>,
        updates: Mutex<Vec<Ticket>>,
    }

    impl StubTickets {
        fn empty_history() -> Self {
            StubTickets {
                update_accepted: true,
                count: 1, // the ticket being saved will be the only one
                ..Default::default()
            }
        }

        fn with_open_ticket(ticket: Ticket, count: i64) -> Self {
            StubTickets {
                open: Some(ticket),
                count,
                update_accepted: true,
                ..Default::default()
            }
        }

        fn saved_tickets(&self) -> Vec<Ticket> {
            self.saved.lock().unwrap().clone()
        }

        fn updated_tickets(&self) -> Vec<Ticket> {
            self.updates.lock().unwrap().clone()
        }
    }

    impl TicketStore for &StubTickets {
        async fn save(&self, ticket: &Ticket) -> DbResult<i64> {
            self.saved.lock().unwrap().push(ticket.clone());
            Ok(42)
        }

        async fn update(&self, ticket: &Ticket) -> DbResult<bool> {
            self.updates.lock().unwrap().push(ticket.clone());
            Ok(self.update_accepted)
        }

        async fn find_open(&self, _reg: &str) -> DbResult<Option<Ticket>> {
            if self.fail_lookup {
                return Err(DbError::Internal("connection reset".to_string()));
            }
            Ok(self.open.clone())
        }

        async fn count_for_vehicle(&self, _reg: &str) -> DbResult<i64> {
            Ok(self.count)
        }
    }

    fn service<'a>(
        spots: &'a StubSpots,
        tickets: &'a StubTickets,
    ) -> ParkingService<&'a StubSpots, &'a StubTickets> {
        ParkingService::new(spots, tickets, FareSchedule::default())
    }

    fn open_ticket_parked_for(parked: Duration) -> Ticket {
        let spot = ParkingSpot::new(1, SpotType::Car, false);
        Ticket {
            id: 7,
            ..Ticket::new(REG, spot, Utc::now() - parked)
        }
    }

    // -------------------------------------------------------------------------
    // Entry
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn incoming_vehicle_takes_a_spot_and_saves_a_ticket() {
        let spots = StubSpots::with_free_spot(ParkingSpot::new(1, SpotType::Car, true));
        let tickets = StubTickets::empty_history();

        let outcome = service(&spots, &tickets)
            .process_incoming_vehicle(1, REG)
            .await
            .unwrap();

        // The spot write happened, and it happened before the ticket save
        let updates = spots.recorded_updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].id, 1);
        assert!(!updates[0].available);

        let saved = tickets.saved_tickets();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].vehicle_reg_number, REG);
        assert_eq!(saved[0].spot, updates[0], "ticket embeds the updated spot");
        assert!(saved[0].is_open());
        assert_eq!(saved[0].price, 0.0);

        match outcome {
            EntryOutcome::Parked {
                ticket,
                recurring_visitor,
            } => {
                assert_eq!(ticket.id, 42, "service adopts the assigned id");
                assert!(!recurring_visitor);
            }
            other => panic!("expected Parked, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn incoming_bike_is_matched_to_a_bike_spot() {
        let spots = StubSpots::with_free_spot(ParkingSpot::new(4, SpotType::Bike, true));
        let tickets = StubTickets::empty_history();

        let outcome = service(&spots, &tickets)
            .process_incoming_vehicle(2, REG)
            .await
            .unwrap();

        match outcome {
            EntryOutcome::Parked { ticket, .. } => {
                assert_eq!(ticket.spot.spot_type, SpotType::Bike);
                assert_eq!(ticket.spot.id, 4);
            }
            other => panic!("expected Parked, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn incoming_vehicle_with_full_lot_is_refused_without_side_effects() {
        let spots = StubSpots::full();
        let tickets = StubTickets::empty_history();

        let outcome = service(&spots, &tickets)
            .process_incoming_vehicle(1, REG)
            .await
            .unwrap();

        assert_eq!(outcome, EntryOutcome::NoSpotAvailable);
        assert!(spots.recorded_updates().is_empty());
        assert!(tickets.saved_tickets().is_empty());
    }

    #[tokio::test]
    async fn incoming_vehicle_with_unknown_selection_is_refused() {
        let spots = StubSpots::with_free_spot(ParkingSpot::new(1, SpotType::Car, true));
        let tickets = StubTickets::empty_history();

        let outcome = service(&spots, &tickets)
            .process_incoming_vehicle(3, REG)
            .await
            .unwrap();

        assert_eq!(outcome, EntryOutcome::NoSpotAvailable);
        assert!(spots.recorded_updates().is_empty());
        assert!(tickets.saved_tickets().is_empty());
    }

    #[tokio::test]
    async fn incoming_vehicle_with_blank_plate_is_a_validation_error() {
        let spots = StubSpots::with_free_spot(ParkingSpot::new(1, SpotType::Car, true));
        let tickets = StubTickets::empty_history();

        let err = service(&spots, &tickets)
            .process_incoming_vehicle(1, "   ")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(spots.recorded_updates().is_empty());
    }

    #[tokio::test]
    async fn incoming_recurring_vehicle_is_flagged() {
        let spots = StubSpots::with_free_spot(ParkingSpot::new(1, SpotType::Car, true));
        let mut tickets = StubTickets::empty_history();
        tickets.count = 2; // the new ticket plus one from history

        let outcome = service(&spots, &tickets)
            .process_incoming_vehicle(1, REG)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            EntryOutcome::Parked {
                recurring_visitor: true,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn incoming_vehicle_aborts_when_spot_write_matches_no_row() {
        let mut spots = StubSpots::with_free_spot(ParkingSpot::new(1, SpotType::Car, true));
        spots.update_accepted = false;
        let tickets = StubTickets::empty_history();

        let err = service(&spots, &tickets)
            .process_incoming_vehicle(1, REG)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::SpotUpdateFailed { id: 1 }));
        assert!(tickets.saved_tickets().is_empty(), "no ticket without a spot");
    }

    // -------------------------------------------------------------------------
    // Exit
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn exiting_vehicle_frees_spot_and_prices_with_discount() {
        let spots = StubSpots::with_free_spot(ParkingSpot::new(1, SpotType::Car, true));
        // Second visit: open ticket plus one historical = count 2
        let tickets = StubTickets::with_open_ticket(open_ticket_parked_for(Duration::hours(1)), 2);

        let outcome = service(&spots, &tickets)
            .process_exiting_vehicle(REG)
            .await
            .unwrap();

        let updated = tickets.updated_tickets();
        assert_eq!(updated.len(), 1);
        assert!(updated[0].out_time.is_some());
        assert!((updated[0].price - 1.425).abs() < 1e-9, "1h car with 5% off");

        let releases = spots.recorded_updates();
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].id, 1);
        assert!(releases[0].available, "spot freed after the ticket committed");

        match outcome {
            ExitOutcome::Released { ticket } => {
                assert!((ticket.price - 1.425).abs() < 1e-9);
                assert!(!ticket.is_open());
            }
            other => panic!("expected Released, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn exiting_first_time_vehicle_pays_full_fare() {
        let spots = StubSpots::with_free_spot(ParkingSpot::new(1, SpotType::Car, true));
        let tickets = StubTickets::with_open_ticket(open_ticket_parked_for(Duration::hours(1)), 1);

        service(&spots, &tickets)
            .process_exiting_vehicle(REG)
            .await
            .unwrap();

        let updated = tickets.updated_tickets();
        assert!((updated[0].price - 1.5).abs() < 1e-9, "no discount on first visit");
    }

    #[tokio::test]
    async fn exiting_within_grace_window_is_free() {
        let spots = StubSpots::with_free_spot(ParkingSpot::new(1, SpotType::Car, true));
        // 20 minutes, recurring vehicle: still free, discount cannot resurrect a price
        let tickets =
            StubTickets::with_open_ticket(open_ticket_parked_for(Duration::minutes(20)), 5);

        let outcome = service(&spots, &tickets)
            .process_exiting_vehicle(REG)
            .await
            .unwrap();

        match outcome {
            ExitOutcome::Released { ticket } => assert_eq!(ticket.price, 0.0),
            other => panic!("expected Released, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn exiting_vehicle_without_open_ticket_is_a_noop() {
        let spots = StubSpots::full();
        let tickets = StubTickets {
            update_accepted: true,
            ..Default::default()
        };

        let outcome = service(&spots, &tickets)
            .process_exiting_vehicle(REG)
            .await
            .unwrap();

        assert_eq!(outcome, ExitOutcome::NoOpenTicket);
        assert!(tickets.updated_tickets().is_empty());
        assert!(spots.recorded_updates().is_empty());
    }

    #[tokio::test]
    async fn rejected_ticket_update_keeps_the_spot_occupied() {
        let spots = StubSpots::with_free_spot(ParkingSpot::new(1, SpotType::Car, true));
        let mut tickets =
            StubTickets::with_open_ticket(open_ticket_parked_for(Duration::hours(1)), 1);
        tickets.update_accepted = false;

        let outcome = service(&spots, &tickets)
            .process_exiting_vehicle(REG)
            .await
            .unwrap();

        assert_eq!(outcome, ExitOutcome::UpdateRejected);
        assert_eq!(tickets.updated_tickets().len(), 1, "the update was attempted");
        assert!(
            spots.recorded_updates().is_empty(),
            "spot must not be released when the ticket did not commit"
        );
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_service_error() {
        let spots = StubSpots::full();
        let tickets = StubTickets {
            fail_lookup: true,
            ..Default::default()
        };

        let err = service(&spots, &tickets)
            .process_exiting_vehicle(REG)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Storage(_)));
    }
}
