/// Bout configuration constants and tunable parameters.
///
/// Every field has a `DEFAULT_*` constant; a TOML file may override any subset
/// of them and missing keys fall back to the defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Simulated time advanced per loop iteration.
    pub tick_granularity: f64,

    /// Bout time after which the simulation ends in a draw.
    pub max_duration: f64,

    /// Qi regenerated per time unit while an actor is cooling down.
    pub qi_regen_rate: f64,

    /// Delay before a stunned actor is re-evaluated.
    pub stun_retry_delay: f64,

    /// Delay applied when the current slot's technique is unaffordable.
    pub unaffordable_retry_delay: f64,

    /// Consecutive skipped decisions that force a struggle.
    pub struggle_threshold: u32,

    /// Flat qi granted after a forced struggle.
    pub struggle_qi_refund: f64,

    /// Minimum remaining cooldown before an idle `wait` marker is considered.
    pub idle_wait_threshold: f64,

    /// Minimum time between two idle `wait` markers.
    pub idle_wait_throttle: f64,
}

impl CombatConfig {
    // ===== compile-time constants =====
    /// Number of technique slots in a loadout.
    pub const LOADOUT_SLOTS: usize = 5;
    /// Catalog id of the fallback technique used by forced struggles.
    pub const STRUGGLE_TECHNIQUE_ID: &'static str = "struggle";
    /// Tolerance used when comparing accumulated simulation times.
    pub const TIME_EPSILON: f64 = 1e-9;
    /// Tolerance used when comparing qi against a technique cost.
    pub const QI_EPSILON: f64 = 1e-9;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK_GRANULARITY: f64 = 0.1;
    pub const DEFAULT_MAX_DURATION: f64 = 1200.0;
    pub const DEFAULT_QI_REGEN_RATE: f64 = 0.5;
    pub const DEFAULT_STUN_RETRY_DELAY: f64 = 1.0;
    pub const DEFAULT_UNAFFORDABLE_RETRY_DELAY: f64 = 1.0;
    pub const DEFAULT_STRUGGLE_THRESHOLD: u32 = 5;
    pub const DEFAULT_STRUGGLE_QI_REFUND: f64 = 5.0;
    pub const DEFAULT_IDLE_WAIT_THRESHOLD: f64 = 1.5;
    pub const DEFAULT_IDLE_WAIT_THROTTLE: f64 = 1.0;

    pub fn new() -> Self {
        Self {
            tick_granularity: Self::DEFAULT_TICK_GRANULARITY,
            max_duration: Self::DEFAULT_MAX_DURATION,
            qi_regen_rate: Self::DEFAULT_QI_REGEN_RATE,
            stun_retry_delay: Self::DEFAULT_STUN_RETRY_DELAY,
            unaffordable_retry_delay: Self::DEFAULT_UNAFFORDABLE_RETRY_DELAY,
            struggle_threshold: Self::DEFAULT_STRUGGLE_THRESHOLD,
            struggle_qi_refund: Self::DEFAULT_STRUGGLE_QI_REFUND,
            idle_wait_threshold: Self::DEFAULT_IDLE_WAIT_THRESHOLD,
            idle_wait_throttle: Self::DEFAULT_IDLE_WAIT_THROTTLE,
        }
    }

    /// Same defaults with a different time cap.
    pub fn with_max_duration(max_duration: f64) -> Self {
        Self {
            max_duration,
            ..Self::new()
        }
    }

    /// Number of loop iterations before the time cap is reached.
    pub fn max_ticks(&self) -> u64 {
        if self.tick_granularity <= 0.0 {
            return 0;
        }
        (self.max_duration / self.tick_granularity).round() as u64
    }

    /// Qi regenerated during one cooling-down tick.
    pub fn qi_trickle_per_tick(&self) -> f64 {
        self.qi_regen_rate * self.tick_granularity
    }

    /// Simulation time at the given loop iteration.
    ///
    /// Computed from the integer tick counter so long bouts do not accumulate
    /// floating-point drift.
    pub fn time_at(&self, tick: u64) -> f64 {
        tick as f64 * self.tick_granularity
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true once `now` has reached `at`, tolerating float accumulation error.
pub fn time_reached(now: f64, at: f64) -> bool {
    now + CombatConfig::TIME_EPSILON >= at
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cap_is_twelve_thousand_ticks() {
        let config = CombatConfig::default();
        assert_eq!(config.max_ticks(), 12_000);
        assert!((config.qi_trickle_per_tick() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn time_reached_tolerates_drift() {
        let drifted = 0.1 + 0.2;
        assert!(time_reached(0.3, drifted));
        assert!(!time_reached(0.29, 0.3));
    }
}
