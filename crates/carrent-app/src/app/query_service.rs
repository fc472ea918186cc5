//! Query Service - read-only views for display
//!
//! Flattens registry and directory records into rows the CLI can print as a
//! table or serialize as JSON.

use chrono::{Local, TimeZone};
use serde::Serialize;

use carrent_domain::Renter;
use carrent_store::{Directory, VehicleRegistry};
use carrent_types::{RenterClass, RenterId, Timestamp, Vehicle, VehicleId};

/// Where a vehicle stands relative to its due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "due_at", rename_all = "snake_case")]
pub enum DueStatus {
    NotRented,
    Due(Timestamp),
    Overdue(Timestamp),
}

impl DueStatus {
    pub fn of(due_at: Option<Timestamp>, now: Timestamp) -> Self {
        match due_at {
            None => DueStatus::NotRented,
            Some(due) if now > due => DueStatus::Overdue(due),
            Some(due) => DueStatus::Due(due),
        }
    }

    /// "Not rented", "Overdue" or the due date as d/m/yyyy in local time
    pub fn label(&self) -> String {
        match self {
            DueStatus::NotRented => "Not rented".to_string(),
            DueStatus::Overdue(_) => "Overdue".to_string(),
            DueStatus::Due(due) => format_due_date(*due),
        }
    }
}

/// d/m/yyyy in local time
pub fn format_due_date(timestamp: Timestamp) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(date) => date.format("%-d/%-m/%Y").to_string(),
        None => timestamp.to_string(),
    }
}

/// One line of the fleet listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetRow {
    pub id: VehicleId,
    pub brand: String,
    pub model: String,
    pub daily_rate: i64,
    pub market_price: i64,
    pub seats: u32,
    pub color: String,
    pub available: bool,
    pub condition: u8,
    pub due: DueStatus,
}

impl FleetRow {
    pub fn from_vehicle(vehicle: &Vehicle, now: Timestamp) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            daily_rate: vehicle.daily_rate,
            market_price: vehicle.market_price,
            seats: vehicle.seats,
            color: vehicle.color.clone(),
            available: !vehicle.is_rented(),
            condition: vehicle.condition,
            due: DueStatus::of(vehicle.due_at(), now),
        }
    }
}

/// Every vehicle in the registry, in registration order
pub fn fleet_rows(registry: &VehicleRegistry, now: Timestamp) -> Vec<FleetRow> {
    registry
        .all()
        .iter()
        .map(|v| FleetRow::from_vehicle(v, now))
        .collect()
}

/// Vehicles one renter holds, with due dates from their own snapshots
pub fn held_rows(renter: &Renter, now: Timestamp) -> Vec<FleetRow> {
    renter
        .ledger()
        .held_vehicles()
        .iter()
        .map(|v| FleetRow::from_vehicle(v, now))
        .collect()
}

/// Administrator's view of one renter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenterSummary {
    pub id: RenterId,
    pub class: RenterClass,
    pub name: String,
    pub dues: i64,
    pub reputation: String,
    pub rented_vehicles: Vec<String>,
}

impl RenterSummary {
    pub fn from_renter(renter: &Renter) -> Self {
        Self {
            id: renter.id,
            class: renter.class(),
            name: renter.name.clone(),
            dues: renter.ledger().balance(),
            reputation: renter.ledger().reputation().to_string(),
            rented_vehicles: renter
                .ledger()
                .held_vehicles()
                .iter()
                .map(|v| v.display_name())
                .collect(),
        }
    }
}

/// Every renter of `class` in creation order
pub fn renter_summaries(directory: &Directory, class: RenterClass) -> Vec<RenterSummary> {
    directory
        .renters(class)
        .iter()
        .map(RenterSummary::from_renter)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use carrent_types::VehicleSpec;

    #[test]
    fn test_due_status() {
        assert_eq!(DueStatus::of(None, 100), DueStatus::NotRented);
        assert_eq!(DueStatus::of(Some(200), 100), DueStatus::Due(200));
        assert_eq!(DueStatus::of(Some(200), 200), DueStatus::Due(200));
        assert_eq!(DueStatus::of(Some(200), 201), DueStatus::Overdue(200));
        assert_eq!(DueStatus::NotRented.label(), "Not rented");
        assert_eq!(DueStatus::Overdue(5).label(), "Overdue");
    }

    #[test]
    fn test_due_date_format_shape() {
        let label = format_due_date(1_700_000_000);
        let parts: Vec<_> = label.split('/').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2].len(), 4);
    }

    #[test]
    fn test_fleet_rows_follow_registry_order() {
        let mut registry = VehicleRegistry::new();
        registry
            .add(VehicleSpec::new("Toyota", "Vitz", 1200, 1_500_000, 5, "Red"))
            .unwrap();
        registry
            .add(VehicleSpec::new("Audi", "A8", 5000, 10_000_000, 5, "Black"))
            .unwrap();
        registry.mark_rented(2, 1_000).unwrap();

        let rows = fleet_rows(&registry, 500);

        assert_eq!(rows.len(), 2);
        assert!(rows[0].available);
        assert_eq!(rows[0].due, DueStatus::NotRented);
        assert!(!rows[1].available);
        assert_eq!(rows[1].due, DueStatus::Due(1_000));
    }

    #[test]
    fn test_renter_summary_serializes_without_password() {
        let mut directory = Directory::new();
        directory
            .add_renter(RenterClass::Staff, "himan", "secret")
            .unwrap();

        let summaries = renter_summaries(&directory, RenterClass::Staff);
        assert_eq!(summaries[0].reputation, "1.00");

        let json = serde_json::to_string(&directory.renters(RenterClass::Staff)[0]).unwrap();
        assert!(json.contains("himan"));
        assert!(!json.contains("secret"));
    }
}
