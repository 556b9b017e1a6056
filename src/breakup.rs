//! Fragmentation state and post-breakup debris-cloud spreading.
//!
//! Each object carries a two-state machine: `Intact` until the first step
//! where dynamic pressure exceeds material strength, then permanently
//! `Broken` with a timer that drives the pancake growth factor. The
//! transition is monotone — once broken, an object never reverts.

/// Per-object fragmentation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreakupState {
    Intact,
    Broken {
        /// Seconds since the breakup step; resets to 0 at the transition.
        time_since_s: f64,
        /// Altitude recorded at the breakup step (m).
        altitude_m: f64,
    },
}

impl BreakupState {
    pub fn has_broken(&self) -> bool {
        matches!(self, BreakupState::Broken { .. })
    }

    /// Altitude at which breakup occurred, if it has.
    pub fn breakup_altitude_m(&self) -> Option<f64> {
        match *self {
            BreakupState::Intact => None,
            BreakupState::Broken { altitude_m, .. } => Some(altitude_m),
        }
    }

    /// Seconds since breakup, if broken.
    pub fn time_since_breakup_s(&self) -> Option<f64> {
        match *self {
            BreakupState::Intact => None,
            BreakupState::Broken { time_since_s, .. } => Some(time_since_s),
        }
    }

    /// Transition to `Broken` at the given altitude. No-op when already
    /// broken: the state is monotone and the first breakup altitude wins.
    pub fn trigger(&mut self, altitude_m: f64) {
        if let BreakupState::Intact = self {
            *self = BreakupState::Broken {
                time_since_s: 0.0,
                altitude_m,
            };
        }
    }

    /// Advance the post-breakup timer by one time step.
    pub fn advance(&mut self, dt_s: f64) {
        if let BreakupState::Broken { time_since_s, .. } = self {
            *time_since_s += dt_s;
        }
    }
}

/// Saturating pancake growth factor for the effective radius.
///
/// 1 at the instant of breakup, rising toward `max_growth` with time
/// constant `time_constant_s` as the debris cloud spreads:
///
/// `f(t) = 1 + (max_growth - 1) · (1 - exp(-t/τ))`
pub fn pancake_growth_factor(time_since_s: f64, max_growth: f64, time_constant_s: f64) -> f64 {
    if time_since_s <= 0.0 {
        return 1.0;
    }
    1.0 + (max_growth - 1.0) * (1.0 - (-time_since_s / time_constant_s).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_is_monotone() {
        let mut state = BreakupState::Intact;
        assert!(!state.has_broken());

        state.trigger(32_000.0);
        assert!(state.has_broken());
        assert_eq!(state.breakup_altitude_m(), Some(32_000.0));
        assert_eq!(state.time_since_breakup_s(), Some(0.0));

        // A second trigger must not overwrite the first breakup altitude
        state.trigger(15_000.0);
        assert_eq!(state.breakup_altitude_m(), Some(32_000.0));
    }

    #[test]
    fn test_timer_advances_only_after_breakup() {
        let mut state = BreakupState::Intact;
        state.advance(0.05);
        assert_eq!(state.time_since_breakup_s(), None);

        state.trigger(30_000.0);
        state.advance(0.05);
        state.advance(0.05);
        assert!((state.time_since_breakup_s().unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_growth_factor_starts_at_one() {
        assert_eq!(pancake_growth_factor(0.0, 5.0, 1.0), 1.0);
        assert_eq!(pancake_growth_factor(-1.0, 5.0, 1.0), 1.0);
    }

    #[test]
    fn test_growth_factor_saturates_at_cap() {
        let f = pancake_growth_factor(50.0, 5.0, 1.0);
        assert!((f - 5.0).abs() < 1e-9);
        // Never exceeds the cap
        assert!(pancake_growth_factor(1e6, 5.0, 1.0) <= 5.0 + 1e-12);
    }

    #[test]
    fn test_growth_factor_is_monotone() {
        let mut prev = pancake_growth_factor(0.0, 5.0, 1.0);
        for i in 1..100 {
            let f = pancake_growth_factor(i as f64 * 0.1, 5.0, 1.0);
            assert!(f >= prev);
            prev = f;
        }
    }

    #[test]
    fn test_growth_factor_time_constant() {
        // After one time constant: 1 + 4*(1 - 1/e) ≈ 3.528
        let f = pancake_growth_factor(1.0, 5.0, 1.0);
        assert!((f - (1.0 + 4.0 * (1.0 - (-1.0f64).exp()))).abs() < 1e-12);
    }
}
