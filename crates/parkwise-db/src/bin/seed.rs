//! # Lot Provisioning Tool
//!
//! Provisions or resets the parking lot for development and testing.
//!
//! ## Usage
//! ```bash
//! # Reset to the default layout (3 car spots, 2 bike spots)
//! cargo run -p parkwise-db --bin seed
//!
//! # Provision a custom lot
//! cargo run -p parkwise-db --bin seed -- --cars 10 --bikes 4
//!
//! # Specify database path
//! cargo run -p parkwise-db --bin seed -- --db ./data/parkwise.db
//! ```
//!
//! ## What It Does
//! 1. Deletes all tickets (history included)
//! 2. Recreates the requested spots, numbered 1..cars for CAR and
//!    cars+1..cars+bikes for BIKE, all available
//! 3. Prints a summary of the provisioned lot
//!
//! Destructive by design: this is a development tool, not a production
//! maintenance command.

use std::env;
use std::process;

use parkwise_core::SpotType;
use parkwise_db::{Database, DbConfig};

/// Default layout mirrors the embedded seed migration.
const DEFAULT_CARS: i64 = 3;
const DEFAULT_BIKES: i64 = 2;

struct SeedArgs {
    db_path: String,
    cars: i64,
    bikes: i64,
}

fn parse_args() -> Result<SeedArgs, String> {
    let mut args = SeedArgs {
        db_path: "./parkwise.db".to_string(),
        cars: DEFAULT_CARS,
        bikes: DEFAULT_BIKES,
    };

    let mut iter = env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };

        match flag.as_str() {
            "--db" => args.db_path = value("--db")?,
            "--cars" => {
                args.cars = value("--cars")?
                    .parse()
                    .map_err(|_| "--cars expects a non-negative integer".to_string())?
            }
            "--bikes" => {
                args.bikes = value("--bikes")?
                    .parse()
                    .map_err(|_| "--bikes expects a non-negative integer".to_string())?
            }
            other => return Err(format!("unknown flag: {other}")),
        }
    }

    if args.cars < 0 || args.bikes < 0 {
        return Err("spot counts must be non-negative".to_string());
    }
    if args.cars + args.bikes == 0 {
        return Err("the lot needs at least one spot".to_string());
    }

    Ok(args)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("seed: {msg}");
            eprintln!("usage: seed [--db PATH] [--cars N] [--bikes N]");
            process::exit(2);
        }
    };

    if let Err(err) = run(&args).await {
        eprintln!("seed: {err}");
        process::exit(1);
    }
}

async fn run(args: &SeedArgs) -> Result<(), parkwise_db::DbError> {
    let db = Database::new(DbConfig::new(&args.db_path)).await?;
    let pool = db.pool();

    // Tickets reference spots; clear them first.
    sqlx::query("DELETE FROM ticket").execute(pool).await?;
    sqlx::query("DELETE FROM parking_spot").execute(pool).await?;

    for id in 1..=args.cars {
        sqlx::query("INSERT INTO parking_spot (id, spot_type, available) VALUES (?1, 'CAR', 1)")
            .bind(id)
            .execute(pool)
            .await?;
    }
    for id in (args.cars + 1)..=(args.cars + args.bikes) {
        sqlx::query("INSERT INTO parking_spot (id, spot_type, available) VALUES (?1, 'BIKE', 1)")
            .bind(id)
            .execute(pool)
            .await?;
    }

    let spots = db.spots();
    println!("Lot provisioned at {}", args.db_path);
    println!(
        "  CAR  spots: {} (1..{})",
        spots.count_available(SpotType::Car).await?,
        args.cars
    );
    println!(
        "  BIKE spots: {} ({}..{})",
        spots.count_available(SpotType::Bike).await?,
        args.cars + 1,
        args.cars + args.bikes
    );

    db.close().await;
    Ok(())
}
