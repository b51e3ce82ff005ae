//! # parkwise-db: Database Layer for Parkwise
//!
//! This crate provides database access for the Parkwise system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Parkwise Data Flow                               │
//! │                                                                         │
//! │  Parking Service (process_incoming_vehicle / process_exiting_vehicle)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     parkwise-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (spot.rs,    │    │  (embedded)  │  │   │
//! │  │   │               │    │   ticket.rs)  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SpotRepo      │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │ TicketRepo    │    │ 002_seed.sql │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                      ./parkwise.db                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (spot, ticket)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use parkwise_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/parkwise.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let free = db.spots().find_next_available(SpotType::Car).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::spot::SpotRepository;
pub use repository::ticket::TicketRepository;
