//! # Repository Module
//!
//! Database repository implementations for Parkwise.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Parking Service                                                       │
//! │       │                                                                 │
//! │       │  db.spots().find_next_available(SpotType::Car)                 │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  SpotRepository                                                        │
//! │  ├── find_next_available(&self, spot_type)                             │
//! │  ├── update(&self, spot)                                               │
//! │  └── get_by_id(&self, id)                                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test (stub the repository behind a trait)                   │
//! │  • SQL is isolated in one place                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SpotRepository`](spot::SpotRepository) - Spot availability queries and updates
//! - [`TicketRepository`](ticket::TicketRepository) - Ticket lifecycle persistence

pub mod spot;
pub mod ticket;
