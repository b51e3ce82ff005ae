//! # Parkwise Kiosk Binary
//!
//! Interactive attendant console. Wires configuration, the SQLite pool, and
//! the parking service together, then loops on a three-entry menu until the
//! attendant shuts the lane down.
//!
//! Service errors are logged and absorbed here; a failed operation never
//! kills the shell, the attendant just gets the prompt back.

use std::io::BufRead;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use parkwise_db::{Database, DbConfig};
use parkwise_kiosk::input::InputReader;
use parkwise_kiosk::{EntryOutcome, ExitOutcome, KioskConfig, ParkingService, ServiceError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("parkwise_kiosk=info,parkwise_db=info")),
        )
        .init();

    let config = KioskConfig::load()?;
    info!(db = %config.database_path.display(), "Starting Parkwise kiosk");

    let db = Database::new(DbConfig::new(&config.database_path)).await?;

    let service = ParkingService::new(db.spots(), db.tickets(), config.fare_schedule());
    let mut input = InputReader::stdin();

    println!("Welcome to Parkwise!");

    loop {
        print_menu();
        match input.read_selection()? {
            1 => handle_entry(&service, &mut input).await?,
            2 => handle_exit(&service, &mut input).await?,
            3 => {
                println!("Shutting down. Goodbye.");
                break;
            }
            _ => println!("Unsupported option. Please enter a number between 1 and 3."),
        }
    }

    db.close().await;
    Ok(())
}

fn print_menu() {
    println!();
    println!("Please select an option:");
    println!("  1 - Vehicle entering the lot");
    println!("  2 - Vehicle exiting the lot");
    println!("  3 - Shutdown");
}

/// Drives one entry interaction: vehicle type, plate, then the service call.
async fn handle_entry<S, T>(
    service: &ParkingService<S, T>,
    input: &mut InputReader<impl BufRead>,
) -> std::io::Result<()>
where
    S: parkwise_kiosk::SpotStore,
    T: parkwise_kiosk::TicketStore,
{
    println!("Please select vehicle type:");
    println!("  1 - CAR");
    println!("  2 - BIKE");
    let selection = input.read_selection()?;

    println!("Please type the vehicle registration number and press enter:");
    let reg = match input.read_vehicle_reg_number()? {
        Ok(reg) => reg,
        Err(err) => {
            println!("Invalid registration number: {err}");
            return Ok(());
        }
    };

    match service.process_incoming_vehicle(selection, &reg).await {
        Ok(EntryOutcome::Parked {
            ticket,
            recurring_visitor,
        }) => {
            if recurring_visitor {
                println!(
                    "Welcome back! As a recurring user of our parking lot, \
                     you'll benefit from a 5% discount."
                );
            }
            println!(
                "Generated ticket and saved it. Please park your vehicle in spot number {}.",
                ticket.spot.id
            );
            println!(
                "Recorded in-time for vehicle number {} is {}.",
                ticket.vehicle_reg_number,
                ticket.in_time.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        Ok(EntryOutcome::NoSpotAvailable) => {
            println!("Sorry, no parking spot is available for that vehicle type.");
        }
        Err(err) => report_service_error("entry", err),
    }

    Ok(())
}

/// Drives one exit interaction: plate, then the service call.
async fn handle_exit<S, T>(
    service: &ParkingService<S, T>,
    input: &mut InputReader<impl BufRead>,
) -> std::io::Result<()>
where
    S: parkwise_kiosk::SpotStore,
    T: parkwise_kiosk::TicketStore,
{
    println!("Please type the vehicle registration number and press enter:");
    let reg = match input.read_vehicle_reg_number()? {
        Ok(reg) => reg,
        Err(err) => {
            println!("Invalid registration number: {err}");
            return Ok(());
        }
    };

    match service.process_exiting_vehicle(&reg).await {
        Ok(ExitOutcome::Released { ticket }) => {
            let out_time = ticket
                .out_time
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_default();
            println!("Please pay the parking fare: {:.2}", ticket.price);
            println!(
                "Recorded out-time for vehicle number {} is {}.",
                ticket.vehicle_reg_number, out_time
            );
        }
        Ok(ExitOutcome::NoOpenTicket) => {
            println!("No open ticket found for that registration number.");
        }
        Ok(ExitOutcome::UpdateRejected) => {
            println!("Unable to update ticket information. Error occurred.");
        }
        Err(err) => report_service_error("exit", err),
    }

    Ok(())
}

fn report_service_error(operation: &str, err: ServiceError) {
    error!(operation, %err, "Operation failed");
    println!("Unable to process the request right now. Please try again.");
}
