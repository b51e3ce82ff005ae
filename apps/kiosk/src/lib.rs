//! # Parkwise Kiosk
//!
//! Library half of the kiosk application. The binary in `main.rs` wires the
//! interactive shell; everything testable lives here:
//!
//! - [`config`] - Environment-based configuration
//! - [`input`] - Menu and plate reading over any `BufRead`
//! - [`services`] - The parking allocation/exit service and its storage seams

pub mod config;
pub mod input;
pub mod services;

pub use config::{ConfigError, KioskConfig};
pub use services::parking::{EntryOutcome, ExitOutcome, ParkingService};
pub use services::{ServiceError, SpotStore, TicketStore};
