//! Shared record types for the fleet and its renters

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential vehicle identifier, unique within one registry
pub type VehicleId = u32;

/// Sequential renter identifier, unique within one renter class
pub type RenterId = u32;

/// Seconds since the Unix epoch
pub type Timestamp = i64;

/// Production length of one rental-period unit (one day)
pub const DEFAULT_RENTAL_PERIOD_SECS: i64 = 86_400;

/// Number of rental-period units a new rental runs for
pub const RENTAL_TERM_UNITS: i64 = 7;

/// Condition score given to vehicles when none is specified
pub const DEFAULT_CONDITION: u8 = 100;

/// Highest allowed condition score
pub const MAX_CONDITION: u8 = 100;

/// Kind of renting account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenterClass {
    Client,
    Staff,
}

impl RenterClass {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            RenterClass::Client => "Client",
            RenterClass::Staff => "Staff",
        }
    }
}

impl fmt::Display for RenterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Length of one rental-period unit.
///
/// Used for both the default rental term and for counting overdue units, so
/// there is exactly one place that decides how long a "day" is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalPeriod {
    secs: i64,
}

impl RentalPeriod {
    /// Create a period of `secs` seconds. Returns None unless `secs` is positive.
    pub fn from_secs(secs: i64) -> Option<Self> {
        (secs > 0).then_some(Self { secs })
    }

    pub fn secs(&self) -> i64 {
        self.secs
    }

    /// Seconds covered by a full rental term. None if that does not fit in an i64.
    pub fn term_secs(&self) -> Option<i64> {
        self.secs.checked_mul(RENTAL_TERM_UNITS)
    }
}

impl Default for RentalPeriod {
    fn default() -> Self {
        Self {
            secs: DEFAULT_RENTAL_PERIOD_SECS,
        }
    }
}

fn default_condition() -> u8 {
    DEFAULT_CONDITION
}

/// Everything needed to register a vehicle, minus its identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub brand: String,
    pub model: String,
    pub daily_rate: i64,
    pub market_price: i64,
    pub seats: u32,
    pub color: String,
    #[serde(default = "default_condition")]
    pub condition: u8,
}

impl VehicleSpec {
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        daily_rate: i64,
        market_price: i64,
        seats: u32,
        color: impl Into<String>,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            daily_rate,
            market_price,
            seats,
            color: color.into(),
            condition: DEFAULT_CONDITION,
        }
    }

    pub fn with_condition(mut self, condition: u8) -> Self {
        self.condition = condition.min(MAX_CONDITION);
        self
    }
}

/// A vehicle record.
///
/// The rental flag and due timestamp only change together, through
/// [`Vehicle::mark_rented`] and [`Vehicle::clear_rental`], so a vehicle that is
/// not rented never carries a due timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub brand: String,
    pub model: String,
    pub daily_rate: i64,
    pub market_price: i64,
    pub seats: u32,
    pub color: String,
    /// 0-100, informational only
    pub condition: u8,
    rented: bool,
    #[serde(default)]
    due_at: Option<Timestamp>,
}

impl Vehicle {
    pub fn from_spec(id: VehicleId, spec: VehicleSpec) -> Self {
        Self {
            id,
            brand: spec.brand,
            model: spec.model,
            daily_rate: spec.daily_rate,
            market_price: spec.market_price,
            seats: spec.seats,
            color: spec.color,
            condition: spec.condition.min(MAX_CONDITION),
            rented: false,
            due_at: None,
        }
    }

    pub fn is_rented(&self) -> bool {
        self.rented
    }

    pub fn due_at(&self) -> Option<Timestamp> {
        self.due_at
    }

    /// "Brand Model"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    pub fn mark_rented(&mut self, due_at: Timestamp) {
        self.rented = true;
        self.due_at = Some(due_at);
    }

    pub fn clear_rental(&mut self) {
        self.rented = false;
        self.due_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corolla() -> Vehicle {
        Vehicle::from_spec(1, VehicleSpec::new("Toyota", "Corolla", 1000, 2_000_000, 5, "White"))
    }

    #[test]
    fn test_new_vehicle_is_available() {
        let vehicle = corolla();
        assert!(!vehicle.is_rented());
        assert_eq!(vehicle.due_at(), None);
        assert_eq!(vehicle.condition, DEFAULT_CONDITION);
    }

    #[test]
    fn test_clear_rental_drops_due_date() {
        let mut vehicle = corolla();
        vehicle.mark_rented(1_000);
        assert!(vehicle.is_rented());
        assert_eq!(vehicle.due_at(), Some(1_000));

        vehicle.clear_rental();
        assert!(!vehicle.is_rented());
        assert_eq!(vehicle.due_at(), None);
    }

    #[test]
    fn test_condition_is_capped() {
        let spec = VehicleSpec::new("Audi", "A8", 5000, 10_000_000, 5, "Black").with_condition(150);
        assert_eq!(spec.condition, MAX_CONDITION);
    }

    #[test]
    fn test_rental_period_rejects_non_positive() {
        assert!(RentalPeriod::from_secs(0).is_none());
        assert!(RentalPeriod::from_secs(-5).is_none());
        assert_eq!(RentalPeriod::from_secs(30).and_then(|p| p.term_secs()), Some(210));
    }

    #[test]
    fn test_huge_period_has_no_term() {
        let period = RentalPeriod::from_secs(i64::MAX / 2).unwrap();
        assert_eq!(period.term_secs(), None);
    }

    #[test]
    fn test_default_period_is_one_day() {
        assert_eq!(RentalPeriod::default().secs(), DEFAULT_RENTAL_PERIOD_SECS);
    }
}
