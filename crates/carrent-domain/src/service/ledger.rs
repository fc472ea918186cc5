//! Per-renter rental ledger
//!
//! A ledger holds the vehicles one renter currently has out, their running
//! dues and their reputation. Held vehicles are snapshots taken at rental
//! time; later edits to the registry record do not reach them.

use serde::Serialize;
use tracing::{debug, info, warn};

use carrent_types::{
    RentalError, RentalPeriod, RenterClass, Subject, Timestamp, Vehicle, VehicleId,
};

use crate::model::{ClassPolicy, Reputation};
use crate::repository::VehicleInventory;
use crate::service::penalty::{compute_penalty, Penalty};

/// Result of a successful rental
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RentReceipt {
    /// Snapshot stored in the ledger
    pub vehicle: Vehicle,
    /// Amount added to dues
    pub charge: i64,
    pub due_at: Timestamp,
    /// Dues after the charge
    pub balance: i64,
}

/// Result of a successful return
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnReceipt {
    pub vehicle: Vehicle,
    /// Zero when returned on time
    pub penalty: Penalty,
    /// Dues after any late fee
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ledger {
    class: RenterClass,
    held: Vec<Vehicle>,
    dues: i64,
    reputation: Reputation,
}

impl Ledger {
    pub fn new(class: RenterClass) -> Self {
        Self {
            class,
            held: Vec::new(),
            dues: 0,
            reputation: Reputation::initial(class),
        }
    }

    pub fn class(&self) -> RenterClass {
        self.class
    }

    pub fn balance(&self) -> i64 {
        self.dues
    }

    pub fn reputation(&self) -> Reputation {
        self.reputation
    }

    /// Held vehicles in the order they were rented
    pub fn held_vehicles(&self) -> &[Vehicle] {
        &self.held
    }

    pub fn holds(&self, vehicle_id: VehicleId) -> bool {
        self.held.iter().any(|v| v.id == vehicle_id)
    }

    fn policy(&self) -> ClassPolicy {
        ClassPolicy::for_class(self.class)
    }

    /// Rent a vehicle from `inventory` for one rental term starting at `now`
    pub fn rent<I: VehicleInventory + ?Sized>(
        &mut self,
        vehicle_id: VehicleId,
        inventory: &mut I,
        period: RentalPeriod,
        now: Timestamp,
    ) -> Result<RentReceipt, RentalError> {
        let vehicle = inventory
            .find(vehicle_id)
            .ok_or(RentalError::NotFound(Subject::Vehicle(vehicle_id)))?;
        if vehicle.is_rented() {
            return Err(RentalError::AlreadyRented(vehicle_id));
        }

        let mut snapshot = vehicle.clone();
        let charge = self
            .policy()
            .rent_factor
            .apply(snapshot.daily_rate)
            .ok_or(RentalError::InvalidAmount(snapshot.daily_rate))?;
        let due_at = period
            .term_secs()
            .and_then(|term| now.checked_add(term))
            .ok_or(RentalError::InvalidAmount(period.secs()))?;
        let dues = self
            .dues
            .checked_add(charge)
            .ok_or(RentalError::InvalidAmount(charge))?;

        inventory.mark_rented(vehicle_id, due_at)?;
        snapshot.mark_rented(due_at);

        self.dues = dues;
        self.held.push(snapshot.clone());

        info!(
            class = %self.class,
            vehicle = vehicle_id,
            charge,
            due_at,
            "vehicle rented"
        );

        Ok(RentReceipt {
            vehicle: snapshot,
            charge,
            due_at,
            balance: self.dues,
        })
    }

    /// Return a held vehicle, charging a late fee if it is past due
    pub fn return_vehicle<I: VehicleInventory + ?Sized>(
        &mut self,
        vehicle_id: VehicleId,
        inventory: &mut I,
        period: RentalPeriod,
        now: Timestamp,
    ) -> Result<ReturnReceipt, RentalError> {
        let position = self
            .held
            .iter()
            .position(|v| v.id == vehicle_id)
            .ok_or(RentalError::NotFound(Subject::HeldVehicle(vehicle_id)))?;

        let held = &self.held[position];
        let overdue_secs = held
            .due_at()
            .map(|due| now.saturating_sub(due))
            .unwrap_or(0);
        let penalty = compute_penalty(overdue_secs, held.daily_rate, self.class, period)?;
        let dues = self
            .dues
            .checked_add(penalty.fee)
            .ok_or(RentalError::InvalidAmount(penalty.fee))?;

        if !inventory.mark_returned(vehicle_id) {
            warn!(vehicle = vehicle_id, "returned vehicle is missing from the registry");
        }
        let snapshot = self.held.remove(position);
        self.dues = dues;

        if !penalty.is_zero() {
            self.reputation.deduct(penalty.reputation_delta);
            debug!(
                vehicle = vehicle_id,
                overdue_secs,
                fee = penalty.fee,
                reputation_delta = penalty.reputation_delta,
                "late return"
            );
        }

        info!(class = %self.class, vehicle = vehicle_id, fee = penalty.fee, "vehicle returned");

        Ok(ReturnReceipt {
            vehicle: snapshot,
            penalty,
            balance: self.dues,
        })
    }

    /// Pay off part or all of the outstanding dues. Returns the remaining balance.
    pub fn pay_dues(&mut self, amount: i64) -> Result<i64, RentalError> {
        if amount <= 0 || amount > self.dues {
            return Err(RentalError::InvalidAmount(amount));
        }
        self.dues -= amount;
        debug!(amount, remaining = self.dues, "dues paid");
        Ok(self.dues)
    }

    /// Hand over a vehicle without charging rent, due back at `due_at`.
    ///
    /// Used when bootstrapping renters who already hold vehicles.
    pub fn assign<I: VehicleInventory + ?Sized>(
        &mut self,
        vehicle_id: VehicleId,
        inventory: &mut I,
        due_at: Timestamp,
    ) -> Result<&Vehicle, RentalError> {
        let mut snapshot = inventory
            .find(vehicle_id)
            .ok_or(RentalError::NotFound(Subject::Vehicle(vehicle_id)))?
            .clone();
        inventory.mark_rented(vehicle_id, due_at)?;
        snapshot.mark_rented(due_at);
        self.held.push(snapshot);
        Ok(&self.held[self.held.len() - 1])
    }

    /// Overwrite the outstanding dues. Negative balances are rejected.
    pub fn set_balance(&mut self, dues: i64) -> Result<(), RentalError> {
        if dues < 0 {
            return Err(RentalError::InvalidAmount(dues));
        }
        self.dues = dues;
        Ok(())
    }

    pub fn set_reputation(&mut self, reputation: Reputation) {
        self.reputation = reputation;
    }
}
