//! Error types for carrent

use std::fmt;

use thiserror::Error;

use crate::types::{RenterClass, RenterId, VehicleId};

/// The record a failed lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// A vehicle in the registry
    Vehicle(VehicleId),
    /// A vehicle in one renter's held collection
    HeldVehicle(VehicleId),
    /// A client or staff record
    Renter(RenterClass, RenterId),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Vehicle(id) => write!(f, "Vehicle {}", id),
            Subject::HeldVehicle(id) => write!(f, "Vehicle {} in your rentals", id),
            Subject::Renter(class, id) => write!(f, "{} {}", class, id),
        }
    }
}

/// Business-rule violations reported by the rental core.
///
/// None of these are fatal; the menu layer prints them and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RentalError {
    #[error("{0} not found")]
    NotFound(Subject),

    #[error("Vehicle {0} is currently rented out")]
    AlreadyRented(VehicleId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Username already exists: {0}")]
    DuplicateName(String),

    #[error("Cannot remove: {class} has outstanding dues ({dues})")]
    HasOutstandingDues { class: RenterClass, dues: i64 },

    #[error("Cannot remove: {class} has {count} rented vehicle(s)")]
    HasActiveRentals { class: RenterClass, count: usize },

    #[error("Cannot remove: vehicle {0} is currently rented")]
    VehicleBusy(VehicleId),

    #[error("Condition must be between 0 and 100, got {0}")]
    InvalidCondition(i64),

    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    #[error("Authentication failed: invalid credentials")]
    InvalidCredentials,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Rental(#[from] RentalError),

    #[error("Seed data error: {0}")]
    Seed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
