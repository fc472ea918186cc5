//! Domain services

pub mod ledger;
pub mod penalty;

pub use ledger::{Ledger, RentReceipt, ReturnReceipt};
pub use penalty::{compute_penalty, overdue_units, Penalty};
