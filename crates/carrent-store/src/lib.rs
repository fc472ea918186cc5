//! In-memory stores for the fleet and its renters

pub mod directory;
pub mod vehicles;

pub use directory::{Administrator, Directory, RenterField};
pub use vehicles::{VehicleField, VehicleRegistry};
