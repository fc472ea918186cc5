//! Rental Desk - the context object for one run
//!
//! Owns the vehicle registry, the renter directory, the administrator account,
//! the clock and the configured rental period. Every use case the menus offer
//! goes through here:
//! 1. Log in (renter or administrator)
//! 2. Rent / return / pay dues against a renter's ledger
//! 3. Administrator edits of vehicles and renters

use tracing::{debug, warn};

use carrent_domain::service::{RentReceipt, ReturnReceipt};
use carrent_domain::{Clock, Renter, SystemClock};
use carrent_store::{Administrator, Directory, RenterField, VehicleField, VehicleRegistry};
use carrent_types::{
    RentalError, RentalPeriod, RenterClass, Subject, Timestamp, Vehicle, VehicleId, VehicleSpec,
};

use super::session::{RenterRef, Session};

pub struct RentalDesk<C: Clock = SystemClock> {
    registry: VehicleRegistry,
    directory: Directory,
    admin: Administrator,
    clock: C,
    period: RentalPeriod,
}

impl RentalDesk<SystemClock> {
    /// Empty desk on the wall clock
    pub fn with_system_clock(period: RentalPeriod) -> Self {
        Self::new(SystemClock, period)
    }
}

impl<C: Clock> RentalDesk<C> {
    pub fn new(clock: C, period: RentalPeriod) -> Self {
        Self {
            registry: VehicleRegistry::new(),
            directory: Directory::new(),
            admin: Administrator::default(),
            clock,
            period,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn period(&self) -> RentalPeriod {
        self.period
    }

    pub fn registry(&self) -> &VehicleRegistry {
        &self.registry
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn admin_name(&self) -> &str {
        self.admin.name()
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    /// Log a renter in by exact name and password
    pub fn login(
        &self,
        class: RenterClass,
        name: &str,
        password: &str,
    ) -> Result<Session, RentalError> {
        match self.directory.authenticate(name, password, class) {
            Some(renter) => {
                debug!(class = %class, id = renter.id, "renter logged in");
                Ok(Session::Renter(RenterRef::new(class, renter.id)))
            }
            None => {
                warn!(class = %class, name, "failed login");
                Err(RentalError::InvalidCredentials)
            }
        }
    }

    /// Log the administrator in with the bootstrap credentials
    pub fn login_admin(&self, name: &str, password: &str) -> Result<Session, RentalError> {
        if self.admin.authenticate(name, password) {
            debug!("administrator logged in");
            Ok(Session::Admin)
        } else {
            warn!(name, "failed administrator login");
            Err(RentalError::InvalidCredentials)
        }
    }

    /// Self-registration of a client
    pub fn register(
        &mut self,
        name: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<RenterRef, RentalError> {
        let renter = self.directory.register(name, password, confirm_password)?;
        Ok(RenterRef::new(renter.class(), renter.id))
    }

    // ------------------------------------------------------------------
    // Renter use cases
    // ------------------------------------------------------------------

    pub fn renter(&self, who: RenterRef) -> Result<&Renter, RentalError> {
        self.directory
            .get(who.class, who.id)
            .ok_or(RentalError::NotFound(Subject::Renter(who.class, who.id)))
    }

    pub fn rent(&mut self, who: RenterRef, vehicle_id: VehicleId) -> Result<RentReceipt, RentalError> {
        let now = self.clock.now();
        let renter = self.directory.get_mut(who.class, who.id)?;
        renter
            .ledger_mut()
            .rent(vehicle_id, &mut self.registry, self.period, now)
    }

    pub fn return_vehicle(
        &mut self,
        who: RenterRef,
        vehicle_id: VehicleId,
    ) -> Result<ReturnReceipt, RentalError> {
        let now = self.clock.now();
        let renter = self.directory.get_mut(who.class, who.id)?;
        renter
            .ledger_mut()
            .return_vehicle(vehicle_id, &mut self.registry, self.period, now)
    }

    /// Returns the remaining balance
    pub fn pay_dues(&mut self, who: RenterRef, amount: i64) -> Result<i64, RentalError> {
        self.directory
            .get_mut(who.class, who.id)?
            .ledger_mut()
            .pay_dues(amount)
    }

    /// Hand a vehicle to a renter without charge (bootstrap only)
    pub fn assign(
        &mut self,
        who: RenterRef,
        vehicle_id: VehicleId,
        due_at: Timestamp,
    ) -> Result<(), RentalError> {
        let renter = self.directory.get_mut(who.class, who.id)?;
        renter
            .ledger_mut()
            .assign(vehicle_id, &mut self.registry, due_at)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Administrator use cases
    // ------------------------------------------------------------------

    pub fn add_vehicle(&mut self, spec: VehicleSpec) -> Result<Vehicle, RentalError> {
        self.registry.add(spec).cloned()
    }

    pub fn update_vehicle(
        &mut self,
        vehicle_id: VehicleId,
        field: VehicleField,
    ) -> Result<Vehicle, RentalError> {
        self.registry.update(vehicle_id, field).cloned()
    }

    pub fn remove_vehicle(&mut self, vehicle_id: VehicleId) -> Result<Vehicle, RentalError> {
        self.registry.remove(vehicle_id)
    }

    pub fn add_renter(
        &mut self,
        class: RenterClass,
        name: &str,
        password: &str,
    ) -> Result<RenterRef, RentalError> {
        let renter = self.directory.add_renter(class, name, password)?;
        Ok(RenterRef::new(class, renter.id))
    }

    pub fn update_renter(&mut self, who: RenterRef, field: RenterField) -> Result<(), RentalError> {
        self.directory.update_renter(who.class, who.id, field)?;
        Ok(())
    }

    pub fn remove_renter(&mut self, who: RenterRef) -> Result<Renter, RentalError> {
        self.directory.remove_renter(who.class, who.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carrent_domain::{ManualClock, Reputation};

    const DAY: i64 = 86_400;
    const START: Timestamp = 1_700_000_000;

    fn desk() -> RentalDesk<ManualClock> {
        let mut desk = RentalDesk::new(ManualClock::new(START), RentalPeriod::default());
        desk.add_vehicle(VehicleSpec::new("Toyota", "Corolla", 1000, 2_000_000, 5, "White"))
            .unwrap();
        desk.add_vehicle(VehicleSpec::new("Honda", "Civic", 1500, 2_500_000, 5, "Black"))
            .unwrap();
        desk.add_renter(RenterClass::Client, "ali", "asd").unwrap();
        desk.add_renter(RenterClass::Staff, "dev", "123").unwrap();
        desk
    }

    fn ali() -> RenterRef {
        RenterRef::new(RenterClass::Client, 1)
    }

    fn dev() -> RenterRef {
        RenterRef::new(RenterClass::Staff, 1)
    }

    #[test]
    fn test_login() {
        let desk = desk();
        assert_eq!(
            desk.login(RenterClass::Client, "ali", "asd"),
            Ok(Session::Renter(ali()))
        );
        assert_eq!(
            desk.login(RenterClass::Client, "ali", "nope"),
            Err(RentalError::InvalidCredentials)
        );
        assert_eq!(desk.login_admin("admin", "admin"), Ok(Session::Admin));
        assert_eq!(
            desk.login_admin("ali", "asd"),
            Err(RentalError::InvalidCredentials)
        );
    }

    #[test]
    fn test_rent_uses_clock_and_period() {
        let mut desk = desk();
        let receipt = desk.rent(ali(), 1).unwrap();
        assert_eq!(receipt.due_at, START + 7 * DAY);
        assert_eq!(desk.registry().find(1).unwrap().due_at(), Some(START + 7 * DAY));
    }

    #[test]
    fn test_late_return_through_desk() {
        let mut desk = desk();
        desk.rent(ali(), 1).unwrap();
        desk.clock().advance(17 * DAY);

        let receipt = desk.return_vehicle(ali(), 1).unwrap();

        assert_eq!(receipt.penalty.fee, 2000);
        let renter = desk.renter(ali()).unwrap();
        assert_eq!(renter.ledger().balance(), 3000);
        assert_eq!(renter.ledger().reputation(), Reputation::Points(80));
        assert!(!desk.registry().find(1).unwrap().is_rented());
    }

    #[test]
    fn test_staff_discount_through_desk() {
        let mut desk = desk();
        assert_eq!(desk.rent(dev(), 1).unwrap().charge, 850);
        assert_eq!(desk.rent(ali(), 1).unwrap_err(), RentalError::AlreadyRented(1));
        assert_eq!(desk.renter(ali()).unwrap().ledger().balance(), 0);
    }

    #[test]
    fn test_remove_renter_with_rentals_fails_regardless_of_dues() {
        let mut desk = desk();
        desk.rent(ali(), 2).unwrap();

        assert_eq!(
            desk.remove_renter(ali()).unwrap_err(),
            RentalError::HasActiveRentals {
                class: RenterClass::Client,
                count: 1
            }
        );

        desk.pay_dues(ali(), 1500).unwrap();
        assert!(matches!(
            desk.remove_renter(ali()),
            Err(RentalError::HasActiveRentals { .. })
        ));

        desk.return_vehicle(ali(), 2).unwrap();
        assert_eq!(desk.remove_renter(ali()).unwrap().name, "ali");
    }

    #[test]
    fn test_remove_rented_vehicle() {
        let mut desk = desk();
        desk.rent(dev(), 2).unwrap();
        assert_eq!(desk.remove_vehicle(2).unwrap_err(), RentalError::VehicleBusy(2));
        assert_eq!(desk.remove_vehicle(1).unwrap().id, 1);
    }

    #[test]
    fn test_operations_on_unknown_renter() {
        let mut desk = desk();
        let ghost = RenterRef::new(RenterClass::Client, 42);
        assert_eq!(
            desk.rent(ghost, 1).unwrap_err(),
            RentalError::NotFound(Subject::Renter(RenterClass::Client, 42))
        );
        assert!(!desk.registry().find(1).unwrap().is_rented());
    }

    #[test]
    fn test_register_then_login() {
        let mut desk = desk();
        let who = desk.register("zara", "pw", "pw").unwrap();
        assert_eq!(who, RenterRef::new(RenterClass::Client, 2));
        assert_eq!(
            desk.login(RenterClass::Client, "zara", "pw"),
            Ok(Session::Renter(who))
        );
    }

    #[test]
    fn test_huge_daily_rate_is_rejected_on_rent() {
        let mut desk = desk();
        desk.update_vehicle(1, VehicleField::DailyRate(i64::MAX / 10))
            .unwrap();

        assert_eq!(
            desk.rent(dev(), 1).unwrap_err(),
            RentalError::InvalidAmount(i64::MAX / 10)
        );
        assert!(!desk.registry().find(1).unwrap().is_rented());
        assert_eq!(desk.renter(dev()).unwrap().ledger().balance(), 0);
    }

    #[test]
    fn test_rent_on_maximum_dues_is_rejected() {
        let mut desk = desk();
        desk.update_renter(ali(), RenterField::Dues(i64::MAX)).unwrap();

        assert_eq!(desk.rent(ali(), 1).unwrap_err(), RentalError::InvalidAmount(1000));
        assert_eq!(desk.renter(ali()).unwrap().ledger().balance(), i64::MAX);
        assert!(desk.renter(ali()).unwrap().ledger().held_vehicles().is_empty());
    }

    #[test]
    fn test_huge_rental_period_is_rejected_on_rent() {
        let period = RentalPeriod::from_secs(i64::MAX / 2).unwrap();
        let mut desk = RentalDesk::new(ManualClock::new(START), period);
        desk.add_vehicle(VehicleSpec::new("Toyota", "Corolla", 1000, 2_000_000, 5, "White"))
            .unwrap();
        let who = desk.add_renter(RenterClass::Client, "ali", "asd").unwrap();

        assert_eq!(
            desk.rent(who, 1).unwrap_err(),
            RentalError::InvalidAmount(i64::MAX / 2)
        );
        assert!(!desk.registry().find(1).unwrap().is_rented());
    }

    #[test]
    fn test_add_vehicle_rejects_negative_rate() {
        let mut desk = desk();
        assert_eq!(
            desk.add_vehicle(VehicleSpec::new("Kia", "Picanto", -1000, 900_000, 4, "Red"))
                .unwrap_err(),
            RentalError::InvalidAmount(-1000)
        );
        assert_eq!(desk.registry().count(), 2);
    }

    #[test]
    fn test_update_vehicle_does_not_touch_snapshot() {
        let mut desk = desk();
        desk.rent(ali(), 1).unwrap();
        desk.update_vehicle(1, VehicleField::Brand("Lexus".into())).unwrap();

        let held = &desk.renter(ali()).unwrap().ledger().held_vehicles()[0];
        assert_eq!(held.brand, "Toyota");
        assert_eq!(desk.registry().find(1).unwrap().brand, "Lexus");
    }
}
