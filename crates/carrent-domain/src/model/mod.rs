//! Domain model types

pub mod class_policy;
pub mod renter;

pub use class_policy::{ClassPolicy, Rate};
pub use renter::{Renter, Reputation};
