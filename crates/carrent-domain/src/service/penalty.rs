//! Late-return penalty calculation

use serde::Serialize;

use carrent_types::{RentalError, RentalPeriod, RenterClass};

use crate::model::ClassPolicy;

/// Outcome of a late return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Penalty {
    /// Whole rental-period units past the due date
    pub overdue_units: i64,
    /// Amount added to the renter's dues
    pub fee: i64,
    /// Amount subtracted from the renter's reputation
    pub reputation_delta: i64,
}

impl Penalty {
    pub fn is_zero(&self) -> bool {
        self.fee == 0 && self.reputation_delta == 0
    }
}

/// Whole rental-period units in `overdue_secs`. Zero when not overdue.
pub fn overdue_units(overdue_secs: i64, period: RentalPeriod) -> i64 {
    if overdue_secs <= 0 {
        return 0;
    }
    overdue_secs / period.secs()
}

/// Late fee and reputation loss for a vehicle returned `overdue_secs` late.
///
/// Fails with `InvalidAmount(daily_rate)` when the fee does not fit in an i64.
pub fn compute_penalty(
    overdue_secs: i64,
    daily_rate: i64,
    class: RenterClass,
    period: RentalPeriod,
) -> Result<Penalty, RentalError> {
    if overdue_secs <= 0 {
        return Ok(Penalty::default());
    }

    let units = overdue_units(overdue_secs, period);
    let policy = ClassPolicy::for_class(class);
    let fee = daily_rate
        .checked_mul(units)
        .and_then(|overdue_rent| policy.late_fee.apply(overdue_rent))
        .ok_or(RentalError::InvalidAmount(daily_rate))?;
    let reputation_delta = policy
        .reputation_per_unit
        .checked_mul(units)
        .ok_or(RentalError::InvalidAmount(units))?;

    Ok(Penalty {
        overdue_units: units,
        fee,
        reputation_delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;

    #[test]
    fn test_client_ten_days_late() {
        let penalty = compute_penalty(10 * DAY, 1000, RenterClass::Client, RentalPeriod::default()).unwrap();
        assert_eq!(penalty.overdue_units, 10);
        assert_eq!(penalty.fee, 2000);
        assert_eq!(penalty.reputation_delta, 20);
    }

    #[test]
    fn test_staff_ten_days_late() {
        let penalty = compute_penalty(10 * DAY, 1000, RenterClass::Staff, RentalPeriod::default()).unwrap();
        assert_eq!(penalty.fee, 1700);
        assert_eq!(penalty.reputation_delta, 20);
    }

    #[test]
    fn test_not_overdue_is_free() {
        for class in [RenterClass::Client, RenterClass::Staff] {
            assert!(compute_penalty(0, 1000, class, RentalPeriod::default()).unwrap().is_zero());
            assert!(compute_penalty(-DAY, 1000, class, RentalPeriod::default()).unwrap().is_zero());
        }
    }

    #[test]
    fn test_partial_unit_is_not_counted() {
        let penalty = compute_penalty(DAY - 1, 1000, RenterClass::Client, RentalPeriod::default()).unwrap();
        assert_eq!(penalty.overdue_units, 0);
        assert!(penalty.is_zero());

        let penalty = compute_penalty(2 * DAY + 5, 1000, RenterClass::Client, RentalPeriod::default()).unwrap();
        assert_eq!(penalty.overdue_units, 2);
        assert_eq!(penalty.fee, 400);
    }

    #[test]
    fn test_short_period_for_testing() {
        let period = RentalPeriod::from_secs(30).unwrap();
        let penalty = compute_penalty(95, 500, RenterClass::Client, period).unwrap();
        assert_eq!(penalty.overdue_units, 3);
        assert_eq!(penalty.fee, 300);
        assert_eq!(penalty.reputation_delta, 6);
    }

    #[test]
    fn test_staff_fee_floors() {
        // 1234 * 3 * 0.17 = 629.34
        let penalty = compute_penalty(3 * DAY, 1234, RenterClass::Staff, RentalPeriod::default()).unwrap();
        assert_eq!(penalty.fee, 629);
    }

    #[test]
    fn test_fee_overflow_is_an_error() {
        let period = RentalPeriod::from_secs(1).unwrap();
        assert_eq!(
            compute_penalty(1_000_000, i64::MAX / 1000, RenterClass::Client, period),
            Err(RentalError::InvalidAmount(i64::MAX / 1000))
        );
    }
}
