//! Client and staff accounts

use serde::Serialize;
use std::fmt;

use carrent_types::{RentalError, RenterClass, RenterId};

use crate::service::Ledger;

/// Standing of a renter. Clients earn whole points, staff a fractional rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reputation {
    Points(i64),
    Rating(f64),
}

impl Reputation {
    /// Starting reputation for a new account
    pub fn initial(class: RenterClass) -> Self {
        match class {
            RenterClass::Client => Reputation::Points(100),
            RenterClass::Staff => Reputation::Rating(1.0),
        }
    }

    /// Build a reputation of the right shape for `class` from a raw value.
    ///
    /// Client points must be a whole number; any rating must be finite.
    pub fn for_class(class: RenterClass, value: f64) -> Result<Self, RentalError> {
        if !value.is_finite() {
            return Err(RentalError::InvalidRating(value.to_string()));
        }
        match class {
            RenterClass::Client => {
                let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
                if value.fract() != 0.0 || !in_range {
                    return Err(RentalError::InvalidRating(format!(
                        "{} (client points must be a whole number)",
                        value
                    )));
                }
                Ok(Reputation::Points(value as i64))
            }
            RenterClass::Staff => Ok(Reputation::Rating(value)),
        }
    }

    pub fn deduct(&mut self, delta: i64) {
        match self {
            Reputation::Points(points) => *points = points.saturating_sub(delta),
            Reputation::Rating(rating) => *rating -= delta as f64,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Reputation::Points(points) => *points as f64,
            Reputation::Rating(rating) => *rating,
        }
    }
}

impl fmt::Display for Reputation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reputation::Points(points) => write!(f, "{}", points),
            Reputation::Rating(rating) => write!(f, "{:.2}", rating),
        }
    }
}

/// A client or staff account together with its rental ledger
#[derive(Debug, Clone, Serialize)]
pub struct Renter {
    pub id: RenterId,
    pub name: String,
    #[serde(skip)]
    password: String,
    #[serde(flatten)]
    ledger: Ledger,
}

impl Renter {
    pub fn new(class: RenterClass, id: RenterId, name: String, password: String) -> Self {
        Self {
            id,
            name,
            password,
            ledger: Ledger::new(class),
        }
    }

    pub fn class(&self) -> RenterClass {
        self.ledger.class()
    }

    /// Plain equality check against the stored credential
    pub fn check_password(&self, password: &str) -> bool {
        self.password == password
    }

    pub fn set_password(&mut self, password: String) {
        self.password = password;
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }
}
