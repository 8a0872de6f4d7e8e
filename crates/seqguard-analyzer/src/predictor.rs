//! Overflow projection against a day horizon.

/// Remaining capacity of a sequence and when it runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    pub remaining: u64,
    /// `None` once the ceiling has been reached.
    pub days_to_overflow: Option<u64>,
    pub within_horizon: bool,
}

impl Projection {
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Projects days-to-overflow from the current value, ceiling, and rate.
#[derive(Debug, Clone, Copy)]
pub struct OverflowPredictor {
    horizon_days: u64,
}

impl OverflowPredictor {
    pub fn new(horizon_days: u64) -> Self {
        Self { horizon_days }
    }

    pub fn horizon_days(&self) -> u64 {
        self.horizon_days
    }

    /// A value at or above the ceiling is exhausted and always within the
    /// horizon. Otherwise the horizon check is `days <= horizon_days`.
    pub fn project(&self, current_value: u64, ceiling: u64, daily_rate: u64) -> Projection {
        let remaining = ceiling.saturating_sub(current_value);
        if remaining == 0 {
            return Projection {
                remaining,
                days_to_overflow: None,
                within_horizon: true,
            };
        }

        let days = remaining / daily_rate.max(1);
        Projection {
            remaining,
            days_to_overflow: Some(days),
            within_horizon: days <= self.horizon_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INT_MAX: u64 = 2_147_483_647;
    const BIGINT_MAX: u64 = 9_223_372_036_854_775_807;

    #[test]
    fn exhausted_is_within_any_horizon() {
        for horizon in [0, 1, 60, u64::MAX] {
            let p = OverflowPredictor::new(horizon).project(INT_MAX, INT_MAX, 1);
            assert!(p.within_horizon);
            assert!(p.is_exhausted());
            assert_eq!(p.days_to_overflow, None);
        }
    }

    #[test]
    fn zero_remaining_with_zero_rate_does_not_divide() {
        let p = OverflowPredictor::new(10).project(INT_MAX, INT_MAX, 0);
        assert!(p.within_horizon);
    }

    #[test]
    fn six_days_left_is_within_ten() {
        let p = OverflowPredictor::new(10).project(INT_MAX - 6, INT_MAX, 1);
        assert_eq!(p.remaining, 6);
        assert_eq!(p.days_to_overflow, Some(6));
        assert!(p.within_horizon);
    }

    #[test]
    fn horizon_boundary_is_inclusive() {
        let predictor = OverflowPredictor::new(10);
        assert!(predictor.project(INT_MAX - 10, INT_MAX, 1).within_horizon);
        assert!(!predictor.project(INT_MAX - 11, INT_MAX, 1).within_horizon);
    }

    #[test]
    fn days_round_down() {
        // 25 remaining at 10/day → 2 days.
        let p = OverflowPredictor::new(2).project(75, 100, 10);
        assert_eq!(p.days_to_overflow, Some(2));
        assert!(p.within_horizon);
    }

    #[test]
    fn far_from_ceiling_is_outside() {
        let p = OverflowPredictor::new(60).project(1_000, INT_MAX, 100_000);
        assert_eq!(p.days_to_overflow, Some((INT_MAX - 1_000) / 100_000));
        assert!(!p.within_horizon);
    }

    #[test]
    fn bigint_ceiling_keeps_precision() {
        let p = OverflowPredictor::new(60).project(BIGINT_MAX - 1, BIGINT_MAX, 1);
        assert_eq!(p.remaining, 1);
        let p = OverflowPredictor::new(60).project(1, BIGINT_MAX, 1);
        assert_eq!(p.days_to_overflow, Some(BIGINT_MAX - 1));
    }

    #[test]
    fn value_past_ceiling_counts_as_exhausted() {
        let p = OverflowPredictor::new(60).project(INT_MAX + 5, INT_MAX, 1);
        assert_eq!(p.remaining, 0);
        assert!(p.within_horizon);
    }
}
