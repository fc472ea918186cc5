//! Rental domain: renter models, the per-renter ledger and the penalty policy

pub mod clock;
pub mod model;
pub mod repository;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use model::*;
pub use repository::VehicleInventory;
