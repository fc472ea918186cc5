//! Trait definitions for the stores the rental domain works against

use carrent_types::{RentalError, Timestamp, Vehicle, VehicleId};

/// The fleet as seen by a renter's ledger
pub trait VehicleInventory {
    /// Find a vehicle by ID
    fn find(&self, id: VehicleId) -> Option<&Vehicle>;

    /// Flag a vehicle as rented until `due_at`
    ///
    /// Fails with `NotFound` for an unknown ID and `AlreadyRented` when the
    /// vehicle is already out.
    fn mark_rented(&mut self, id: VehicleId, due_at: Timestamp) -> Result<(), RentalError>;

    /// Clear the rental flag and due date. Returns false if the ID is unknown.
    fn mark_returned(&mut self, id: VehicleId) -> bool;
}
