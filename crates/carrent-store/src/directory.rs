//! Renter directory and the administrator account

use tracing::info;

use carrent_domain::{Renter, Reputation};
use carrent_types::{RentalError, RenterClass, RenterId, Subject};

/// Bootstrap administrator login
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

/// The single privileged account. Not listed in the directory.
#[derive(Debug, Clone)]
pub struct Administrator {
    name: String,
    password: String,
}

impl Default for Administrator {
    fn default() -> Self {
        Self {
            name: ADMIN_USERNAME.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        }
    }
}

impl Administrator {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn authenticate(&self, name: &str, password: &str) -> bool {
        self.name == name && self.password == password
    }
}

/// One editable renter attribute and its new value
#[derive(Debug, Clone, PartialEq)]
pub enum RenterField {
    Name(String),
    Password(String),
    Dues(i64),
    Reputation(f64),
}

/// Holds every client and staff record
#[derive(Debug, Default)]
pub struct Directory {
    clients: Vec<Renter>,
    staff: Vec<Renter>,
    last_client_id: RenterId,
    last_staff_id: RenterId,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    fn list(&self, class: RenterClass) -> &Vec<Renter> {
        match class {
            RenterClass::Client => &self.clients,
            RenterClass::Staff => &self.staff,
        }
    }

    fn list_mut(&mut self, class: RenterClass) -> &mut Vec<Renter> {
        match class {
            RenterClass::Client => &mut self.clients,
            RenterClass::Staff => &mut self.staff,
        }
    }

    fn next_id(&mut self, class: RenterClass) -> RenterId {
        let last = match class {
            RenterClass::Client => &mut self.last_client_id,
            RenterClass::Staff => &mut self.last_staff_id,
        };
        *last += 1;
        *last
    }

    /// Whether any renter other than `except` already uses `name`
    fn name_taken(&self, name: &str, except: Option<(RenterClass, RenterId)>) -> bool {
        self.clients
            .iter()
            .chain(self.staff.iter())
            .any(|r| r.name == name && except != Some((r.class(), r.id)))
    }

    /// Self-registration of a new client
    pub fn register(
        &mut self,
        name: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<&Renter, RentalError> {
        if password != confirm_password {
            return Err(RentalError::PasswordMismatch);
        }
        self.add_renter(RenterClass::Client, name, password)
    }

    /// Create a renter of any class with zero dues and default reputation
    pub fn add_renter(
        &mut self,
        class: RenterClass,
        name: &str,
        password: &str,
    ) -> Result<&Renter, RentalError> {
        if self.name_taken(name, None) {
            return Err(RentalError::DuplicateName(name.to_string()));
        }
        let id = self.next_id(class);
        let renter = Renter::new(class, id, name.to_string(), password.to_string());
        info!(class = %class, id, name, "renter added");

        let list = self.list_mut(class);
        list.push(renter);
        Ok(&list[list.len() - 1])
    }

    /// Find the renter of `class` with exactly this name and password
    pub fn authenticate(&self, name: &str, password: &str, class: RenterClass) -> Option<&Renter> {
        self.list(class)
            .iter()
            .find(|r| r.name == name && r.check_password(password))
    }

    pub fn get(&self, class: RenterClass, id: RenterId) -> Option<&Renter> {
        self.list(class).iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, class: RenterClass, id: RenterId) -> Result<&mut Renter, RentalError> {
        self.list_mut(class)
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RentalError::NotFound(Subject::Renter(class, id)))
    }

    /// Renters of one class in creation order
    pub fn renters(&self, class: RenterClass) -> &[Renter] {
        self.list(class)
    }

    /// Delete a renter who holds no vehicles and owes nothing
    pub fn remove_renter(&mut self, class: RenterClass, id: RenterId) -> Result<Renter, RentalError> {
        let list = self.list_mut(class);
        let position = list
            .iter()
            .position(|r| r.id == id)
            .ok_or(RentalError::NotFound(Subject::Renter(class, id)))?;

        let ledger = list[position].ledger();
        if !ledger.held_vehicles().is_empty() {
            return Err(RentalError::HasActiveRentals {
                class,
                count: ledger.held_vehicles().len(),
            });
        }
        if ledger.balance() > 0 {
            return Err(RentalError::HasOutstandingDues {
                class,
                dues: ledger.balance(),
            });
        }

        let removed = list.remove(position);
        info!(class = %class, id, "renter removed");
        Ok(removed)
    }

    /// Change one attribute of a renter record
    pub fn update_renter(
        &mut self,
        class: RenterClass,
        id: RenterId,
        field: RenterField,
    ) -> Result<&Renter, RentalError> {
        if self.get(class, id).is_none() {
            return Err(RentalError::NotFound(Subject::Renter(class, id)));
        }
        if let RenterField::Name(ref name) = field {
            if self.name_taken(name, Some((class, id))) {
                return Err(RentalError::DuplicateName(name.clone()));
            }
        }

        let renter = self.get_mut(class, id)?;
        match field {
            RenterField::Name(name) => renter.name = name,
            RenterField::Password(password) => renter.set_password(password),
            RenterField::Dues(dues) => renter.ledger_mut().set_balance(dues)?,
            RenterField::Reputation(value) => {
                let reputation = Reputation::for_class(class, value)?;
                renter.ledger_mut().set_reputation(reputation)
            }
        }
        Ok(renter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Directory {
        let mut directory = Directory::new();
        directory.register("ali", "asd", "asd").unwrap();
        directory.register("ahmed", "123", "123").unwrap();
        directory.add_renter(RenterClass::Staff, "dev", "123").unwrap();
        directory
    }

    #[test]
    fn test_register_assigns_sequential_ids_per_class() {
        let directory = directory();
        assert_eq!(directory.renters(RenterClass::Client)[0].id, 1);
        assert_eq!(directory.renters(RenterClass::Client)[1].id, 2);
        assert_eq!(directory.renters(RenterClass::Staff)[0].id, 1);
    }

    #[test]
    fn test_register_new_client_defaults() {
        let directory = directory();
        let ali = &directory.renters(RenterClass::Client)[0];
        assert_eq!(ali.class(), RenterClass::Client);
        assert_eq!(ali.ledger().balance(), 0);
        assert_eq!(ali.ledger().reputation(), Reputation::Points(100));
        assert!(ali.ledger().held_vehicles().is_empty());
    }

    #[test]
    fn test_register_duplicate_name() {
        let mut directory = directory();
        let err = directory.register("ali", "x", "x").unwrap_err();
        assert_eq!(err, RentalError::DuplicateName("ali".into()));
        assert_eq!(directory.renters(RenterClass::Client).len(), 2);
    }

    #[test]
    fn test_duplicate_name_is_case_sensitive() {
        let mut directory = directory();
        assert!(directory.register("Ali", "x", "x").is_ok());
    }

    #[test]
    fn test_register_password_mismatch_creates_nothing() {
        let mut directory = directory();
        let err = directory.register("newbie", "a", "b").unwrap_err();
        assert_eq!(err, RentalError::PasswordMismatch);
        assert_eq!(directory.renters(RenterClass::Client).len(), 2);
        // mismatch wins even over a taken name
        assert_eq!(
            directory.register("ali", "a", "b").unwrap_err(),
            RentalError::PasswordMismatch
        );
    }

    #[test]
    fn test_authenticate_by_class() {
        let directory = directory();
        assert_eq!(
            directory.authenticate("ali", "asd", RenterClass::Client).map(|r| r.id),
            Some(1)
        );
        assert!(directory.authenticate("ali", "wrong", RenterClass::Client).is_none());
        assert!(directory.authenticate("ali", "asd", RenterClass::Staff).is_none());
        assert!(directory.authenticate("dev", "123", RenterClass::Staff).is_some());
    }

    #[test]
    fn test_remove_renter_rules() {
        let mut directory = directory();
        directory
            .update_renter(RenterClass::Client, 1, RenterField::Dues(10))
            .unwrap();

        assert_eq!(
            directory.remove_renter(RenterClass::Client, 1).unwrap_err(),
            RentalError::HasOutstandingDues {
                class: RenterClass::Client,
                dues: 10
            }
        );
        assert_eq!(
            directory.remove_renter(RenterClass::Client, 9).unwrap_err(),
            RentalError::NotFound(Subject::Renter(RenterClass::Client, 9))
        );

        let removed = directory.remove_renter(RenterClass::Client, 2).unwrap();
        assert_eq!(removed.name, "ahmed");
        assert_eq!(directory.renters(RenterClass::Client).len(), 1);
    }

    #[test]
    fn test_update_renter_fields() {
        let mut directory = directory();
        directory
            .update_renter(RenterClass::Staff, 1, RenterField::Reputation(0.75))
            .unwrap();
        directory
            .update_renter(RenterClass::Staff, 1, RenterField::Password("new".into()))
            .unwrap();
        directory
            .update_renter(RenterClass::Staff, 1, RenterField::Name("devan".into()))
            .unwrap();

        let staff = directory.get(RenterClass::Staff, 1).unwrap();
        assert_eq!(staff.name, "devan");
        assert_eq!(staff.ledger().reputation(), Reputation::Rating(0.75));
        assert!(directory.authenticate("devan", "new", RenterClass::Staff).is_some());
    }

    #[test]
    fn test_update_renter_rejects_taken_name_and_negative_dues() {
        let mut directory = directory();
        assert_eq!(
            directory
                .update_renter(RenterClass::Client, 2, RenterField::Name("dev".into()))
                .unwrap_err(),
            RentalError::DuplicateName("dev".into())
        );
        assert!(directory
            .update_renter(RenterClass::Client, 2, RenterField::Name("ahmed".into()))
            .is_ok());
        assert_eq!(
            directory
                .update_renter(RenterClass::Client, 2, RenterField::Dues(-5))
                .unwrap_err(),
            RentalError::InvalidAmount(-5)
        );
    }

    #[test]
    fn test_update_unknown_renter_is_not_found() {
        let mut directory = directory();
        assert_eq!(
            directory
                .update_renter(RenterClass::Client, 42, RenterField::Name("dev".into()))
                .unwrap_err(),
            RentalError::NotFound(Subject::Renter(RenterClass::Client, 42))
        );
    }

    #[test]
    fn test_update_reputation_rejects_bad_values() {
        let mut directory = directory();
        assert!(matches!(
            directory.update_renter(RenterClass::Client, 1, RenterField::Reputation(95.7)),
            Err(RentalError::InvalidRating(_))
        ));
        assert!(matches!(
            directory.update_renter(RenterClass::Staff, 1, RenterField::Reputation(f64::NAN)),
            Err(RentalError::InvalidRating(_))
        ));

        let ali = directory.get(RenterClass::Client, 1).unwrap();
        assert_eq!(ali.ledger().reputation(), Reputation::Points(100));
        let dev = directory.get(RenterClass::Staff, 1).unwrap();
        assert_eq!(dev.ledger().reputation(), Reputation::Rating(1.0));
    }

    #[test]
    fn test_admin_credentials() {
        let admin = Administrator::default();
        assert!(admin.authenticate("admin", "admin"));
        assert!(!admin.authenticate("admin", "Admin"));
        assert_eq!(admin.name(), "admin");
    }
}
