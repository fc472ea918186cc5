//! Vehicle registry: the canonical record of every vehicle in the fleet

use tracing::{debug, info};

use carrent_domain::VehicleInventory;
use carrent_types::{
    RentalError, Subject, Timestamp, Vehicle, VehicleId, VehicleSpec, MAX_CONDITION,
};

/// One editable vehicle attribute and its new value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleField {
    Brand(String),
    Model(String),
    DailyRate(i64),
    MarketPrice(i64),
    Seats(i64),
    Color(String),
    Condition(i64),
}

/// Owns the fleet. Vehicles are kept in the order they were added.
#[derive(Debug, Default)]
pub struct VehicleRegistry {
    vehicles: Vec<Vehicle>,
    last_id: VehicleId,
}

impl VehicleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, available vehicle under the next sequential ID.
    ///
    /// Daily rate and market price must not be negative.
    pub fn add(&mut self, spec: VehicleSpec) -> Result<&Vehicle, RentalError> {
        non_negative(spec.daily_rate)?;
        non_negative(spec.market_price)?;

        self.last_id += 1;
        let vehicle = Vehicle::from_spec(self.last_id, spec);
        info!(vehicle = vehicle.id, name = %vehicle.display_name(), "vehicle added");
        self.vehicles.push(vehicle);
        Ok(&self.vehicles[self.vehicles.len() - 1])
    }

    /// Get a vehicle by ID
    pub fn find(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    fn find_mut(&mut self, id: VehicleId) -> Result<&mut Vehicle, RentalError> {
        self.vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(RentalError::NotFound(Subject::Vehicle(id)))
    }

    /// Flag a vehicle as rented until `due_at`
    pub fn mark_rented(&mut self, id: VehicleId, due_at: Timestamp) -> Result<(), RentalError> {
        let vehicle = self.find_mut(id)?;
        if vehicle.is_rented() {
            return Err(RentalError::AlreadyRented(id));
        }
        vehicle.mark_rented(due_at);
        Ok(())
    }

    /// Clear the rental flag and due date. Returns false for an unknown ID.
    pub fn mark_returned(&mut self, id: VehicleId) -> bool {
        match self.find_mut(id) {
            Ok(vehicle) => {
                vehicle.clear_rental();
                true
            }
            Err(_) => false,
        }
    }

    /// Delete a vehicle that is not rented out
    pub fn remove(&mut self, id: VehicleId) -> Result<Vehicle, RentalError> {
        let position = self
            .vehicles
            .iter()
            .position(|v| v.id == id)
            .ok_or(RentalError::NotFound(Subject::Vehicle(id)))?;
        if self.vehicles[position].is_rented() {
            return Err(RentalError::VehicleBusy(id));
        }
        let removed = self.vehicles.remove(position);
        info!(vehicle = id, "vehicle removed");
        Ok(removed)
    }

    /// Change one attribute of a vehicle record.
    ///
    /// Only the canonical record changes; snapshots held by renters keep the
    /// values they were rented with.
    pub fn update(&mut self, id: VehicleId, field: VehicleField) -> Result<&Vehicle, RentalError> {
        let vehicle = self.find_mut(id)?;
        match field {
            VehicleField::Brand(brand) => vehicle.brand = brand,
            VehicleField::Model(model) => vehicle.model = model,
            VehicleField::DailyRate(rate) => vehicle.daily_rate = non_negative(rate)?,
            VehicleField::MarketPrice(price) => vehicle.market_price = non_negative(price)?,
            VehicleField::Seats(seats) => {
                vehicle.seats =
                    u32::try_from(seats).map_err(|_| RentalError::InvalidAmount(seats))?
            }
            VehicleField::Color(color) => vehicle.color = color,
            VehicleField::Condition(condition) => {
                if !(0..=i64::from(MAX_CONDITION)).contains(&condition) {
                    return Err(RentalError::InvalidCondition(condition));
                }
                vehicle.condition = condition as u8;
            }
        }
        debug!(vehicle = id, "vehicle updated");
        Ok(vehicle)
    }

    /// All vehicles in registration order
    pub fn all(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Vehicles not currently rented
    pub fn available(&self) -> Vec<&Vehicle> {
        self.vehicles.iter().filter(|v| !v.is_rented()).collect()
    }

    /// Get total vehicle count
    pub fn count(&self) -> usize {
        self.vehicles.len()
    }
}

fn non_negative(value: i64) -> Result<i64, RentalError> {
    if value < 0 {
        Err(RentalError::InvalidAmount(value))
    } else {
        Ok(value)
    }
}

impl VehicleInventory for VehicleRegistry {
    fn find(&self, id: VehicleId) -> Option<&Vehicle> {
        VehicleRegistry::find(self, id)
    }

    fn mark_rented(&mut self, id: VehicleId, due_at: Timestamp) -> Result<(), RentalError> {
        VehicleRegistry::mark_rented(self, id, due_at)
    }

    fn mark_returned(&mut self, id: VehicleId) -> bool {
        VehicleRegistry::mark_returned(self, id)
    }
}
