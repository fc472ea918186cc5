//! Per-class business terms for renting and late returns

use carrent_types::RenterClass;

/// Exact fractional multiplier. Applying it floors the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rate {
    numerator: i64,
    denominator: i64,
}

impl Rate {
    pub const ONE: Rate = Rate::new(1, 1);

    pub const fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// `floor(amount * numerator / denominator)`, or None on overflow
    pub fn apply(&self, amount: i64) -> Option<i64> {
        amount
            .checked_mul(self.numerator)
            .map(|scaled| scaled.div_euclid(self.denominator))
    }
}

/// Business terms that differ between clients and staff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassPolicy {
    /// Multiplier on the daily rate charged when a vehicle is rented
    pub rent_factor: Rate,
    /// Multiplier on `daily_rate * overdue_units` charged on a late return
    pub late_fee: Rate,
    /// Reputation lost per overdue unit
    pub reputation_per_unit: i64,
}

/// Clients pay the full rate; late fees are a fifth of the overdue rent.
pub const CLIENT_POLICY: ClassPolicy = ClassPolicy {
    rent_factor: Rate::ONE,
    late_fee: Rate::new(1, 5),
    reputation_per_unit: 2,
};

/// Staff get 15% off rentals; late fees are 17% of the overdue rent.
pub const STAFF_POLICY: ClassPolicy = ClassPolicy {
    rent_factor: Rate::new(85, 100),
    late_fee: Rate::new(17, 100),
    reputation_per_unit: 2,
};

impl ClassPolicy {
    pub fn for_class(class: RenterClass) -> Self {
        match class {
            RenterClass::Client => CLIENT_POLICY,
            RenterClass::Staff => STAFF_POLICY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_floors() {
        assert_eq!(Rate::new(1, 5).apply(1004), Some(200));
        assert_eq!(Rate::new(85, 100).apply(999), Some(849));
        assert_eq!(Rate::ONE.apply(1500), Some(1500));
    }

    #[test]
    fn test_rate_overflow() {
        assert_eq!(Rate::new(85, 100).apply(i64::MAX / 10), None);
        assert_eq!(Rate::ONE.apply(i64::MAX), Some(i64::MAX));
    }

    #[test]
    fn test_staff_discount() {
        let policy = ClassPolicy::for_class(RenterClass::Staff);
        assert_eq!(policy.rent_factor.apply(1000), Some(850));
        assert_eq!(policy.late_fee.apply(10_000), Some(1700));
    }

    #[test]
    fn test_client_pays_full_rate() {
        let policy = ClassPolicy::for_class(RenterClass::Client);
        assert_eq!(policy.rent_factor.apply(1000), Some(1000));
    }
}
