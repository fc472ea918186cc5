//! Login state for one interactive session

use carrent_types::{RenterClass, RenterId};
use serde::Serialize;

/// Identifies one renter across the directory's two classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RenterRef {
    pub class: RenterClass,
    pub id: RenterId,
}

impl RenterRef {
    pub fn new(class: RenterClass, id: RenterId) -> Self {
        Self { class, id }
    }
}

/// `LoggedOut` -> `Renter`/`Admin` on a successful login, back to
/// `LoggedOut` on logout. Nothing else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    Renter(RenterRef),
    Admin,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        !matches!(self, Session::LoggedOut)
    }

    pub fn renter(&self) -> Option<RenterRef> {
        match self {
            Session::Renter(who) => Some(*who),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Admin)
    }

    pub fn logout(&mut self) {
        *self = Session::LoggedOut;
    }
}
