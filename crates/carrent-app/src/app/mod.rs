//! Application Layer
//!
//! Orchestrates between the CLI and the domain/store layers.
//!
//! - `rental_service`: the rental desk context and its use cases
//! - `session`: who is logged in
//! - `query_service`: read-only views for display

pub mod query_service;
pub mod rental_service;
pub mod session;

pub use query_service::{
    fleet_rows, format_due_date, held_rows, renter_summaries, DueStatus, FleetRow, RenterSummary,
};
pub use rental_service::RentalDesk;
pub use session::{RenterRef, Session};
