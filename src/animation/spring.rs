//! Damped Spring Simulation - Physically plausible motion toward a target.
//!
//! A second-order damped system (position, velocity, stiffness, damping)
//! integrated with semi-implicit Euler. Coarse frame intervals are split
//! into fixed substeps so the integration stays stable at TUI frame rates.
//!
//! Mass is fixed at 1, so critical damping is `2 * sqrt(stiffness)`.
//!
//! # Example
//!
//! ```ignore
//! use inview_tui::animation::{Spring, SpringParams};
//!
//! let mut spring = Spring::at_rest(0.0, SpringParams::COUNTER);
//! spring.set_target(443.0);
//!
//! while !spring.step(1.0 / 30.0) {
//!     println!("{}", spring.position.floor());
//! }
//! assert_eq!(spring.position, 443.0);
//! ```

/// Maximum integration substep in seconds. A 30 FPS frame (33ms) runs as
/// four substeps.
const MAX_STEP: f64 = 1.0 / 120.0;

// =============================================================================
// Spring Parameters
// =============================================================================

/// Physical parameters of a damped spring (mass fixed at 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    /// Pull strength toward the target.
    pub stiffness: f64,
    /// Resistance to oscillation.
    pub damping: f64,
    /// Distance from target below which the spring may come to rest.
    pub rest_delta: f64,
    /// Speed below which the spring may come to rest.
    pub rest_speed: f64,
}

impl SpringParams {
    /// Parameters for view-triggered counters: stiffness 50, damping 15.
    ///
    /// Damping ratio ~1.06 - just past critical, so the approach is a
    /// monotone deceleration with no overshoot, settling in about two
    /// seconds from a few hundred units away.
    pub const COUNTER: Self = Self::new(50.0, 15.0);

    /// Spring with explicit stiffness and damping, default rest thresholds.
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }

    /// Spring specified by damping ratio instead of a raw coefficient.
    ///
    /// Ratio 1.0 is critical damping (fastest approach without overshoot),
    /// below 1.0 underdamped (oscillates), above 1.0 overdamped.
    pub fn with_damping_ratio(stiffness: f64, ratio: f64) -> Self {
        let stiffness = stiffness.max(0.0);
        let ratio = ratio.max(0.0);
        let critical = 2.0 * stiffness.sqrt();
        Self::new(stiffness, ratio * critical)
    }
}

// =============================================================================
// Spring
// =============================================================================

/// A damped spring moving `position` toward `target`.
///
/// Targets are never validated: negative and non-finite values are
/// integrated literally. A NaN target simply never settles; callers own
/// teardown either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    /// Current simulated value.
    pub position: f64,
    /// Current velocity (units per second).
    pub velocity: f64,
    target: f64,
    params: SpringParams,
}

impl Spring {
    /// Create a spring already settled at `value`.
    pub const fn at_rest(value: f64, params: SpringParams) -> Self {
        Self {
            position: value,
            velocity: 0.0,
            target: value,
            params,
        }
    }

    /// Current target.
    pub const fn target(&self) -> f64 {
        self.target
    }

    /// Retarget without resetting position or velocity, so an in-flight
    /// spring redirects smoothly.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// True once the spring has snapped to its target.
    pub fn is_settled(&self) -> bool {
        self.position == self.target && self.velocity == 0.0
    }

    /// Advance the simulation by `dt` seconds. Returns true when settled.
    ///
    /// Settling snaps position exactly to the target and zeroes velocity,
    /// so `position.floor()` reads the target with no residual fraction.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.is_settled() {
            return true;
        }

        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            remaining -= h;

            let accel = -self.params.stiffness * (self.position - self.target)
                - self.params.damping * self.velocity;
            self.velocity += accel * h;
            self.position += self.velocity * h;

            if (self.target - self.position).abs() < self.params.rest_delta
                && self.velocity.abs() < self.params.rest_speed
            {
                self.position = self.target;
                self.velocity = 0.0;
                return true;
            }
        }

        false
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Step at 30 FPS until settled or the step budget runs out.
    fn run_to_rest(spring: &mut Spring, max_frames: usize) -> usize {
        for frame in 0..max_frames {
            if spring.step(1.0 / 30.0) {
                return frame + 1;
            }
        }
        max_frames
    }

    #[test]
    fn test_at_rest_is_settled() {
        let spring = Spring::at_rest(42.0, SpringParams::COUNTER);
        assert!(spring.is_settled());
        assert_eq!(spring.position, 42.0);
    }

    #[test]
    fn test_settles_exactly_on_target() {
        let mut spring = Spring::at_rest(0.0, SpringParams::COUNTER);
        spring.set_target(443.0);
        assert!(!spring.is_settled());

        let frames = run_to_rest(&mut spring, 300);
        assert!(spring.is_settled());
        assert_eq!(spring.position, 443.0);
        assert_eq!(spring.velocity, 0.0);
        // ~2s expected; anything past 5s means the physics are wrong.
        assert!(frames < 150, "took {frames} frames to settle");
    }

    #[test]
    fn test_counter_params_monotone_no_overshoot() {
        let mut spring = Spring::at_rest(0.0, SpringParams::COUNTER);
        spring.set_target(200.0);

        let mut prev = spring.position;
        loop {
            let settled = spring.step(1.0 / 30.0);
            assert!(
                spring.position >= prev,
                "position decreased: {} -> {}",
                prev,
                spring.position
            );
            assert!(
                spring.position <= 200.0,
                "overshoot to {}",
                spring.position
            );
            prev = spring.position;
            if settled {
                break;
            }
        }
        assert_eq!(spring.position, 200.0);
    }

    #[test]
    fn test_floor_never_exceeds_target_before_rest() {
        let mut spring = Spring::at_rest(0.0, SpringParams::COUNTER);
        spring.set_target(3.0);

        while !spring.step(1.0 / 30.0) {
            assert!(spring.position.floor() as i64 <= 2);
        }
        assert_eq!(spring.position.floor() as i64, 3);
    }

    #[test]
    fn test_zero_distance_settles_immediately() {
        let mut spring = Spring::at_rest(0.0, SpringParams::COUNTER);
        spring.set_target(0.0);
        assert!(spring.step(1.0 / 30.0));
        assert_eq!(spring.position, 0.0);
    }

    #[test]
    fn test_negative_target_animates_literally() {
        let mut spring = Spring::at_rest(0.0, SpringParams::COUNTER);
        spring.set_target(-50.0);

        run_to_rest(&mut spring, 300);
        assert!(spring.is_settled());
        assert_eq!(spring.position, -50.0);
    }

    #[test]
    fn test_retarget_in_flight() {
        let mut spring = Spring::at_rest(0.0, SpringParams::COUNTER);
        spring.set_target(100.0);

        // Partway there, redirect.
        for _ in 0..10 {
            spring.step(1.0 / 30.0);
        }
        let midway = spring.position;
        assert!(midway > 0.0 && midway < 100.0);

        spring.set_target(10.0);
        run_to_rest(&mut spring, 300);
        assert_eq!(spring.position, 10.0);
    }

    #[test]
    fn test_nan_target_never_settles_never_panics() {
        let mut spring = Spring::at_rest(0.0, SpringParams::COUNTER);
        spring.set_target(f64::NAN);

        for _ in 0..30 {
            assert!(!spring.step(1.0 / 30.0));
        }
        assert!(spring.position.is_nan());
    }

    #[test]
    fn test_damping_ratio_critical() {
        let params = SpringParams::with_damping_ratio(100.0, 1.0);
        assert!((params.damping - 20.0).abs() < 1e-9);

        // Critically damped: still no overshoot.
        let mut spring = Spring::at_rest(0.0, params);
        spring.set_target(50.0);
        loop {
            let settled = spring.step(1.0 / 30.0);
            assert!(spring.position <= 50.0 + params.rest_delta);
            if settled {
                break;
            }
        }
        assert_eq!(spring.position, 50.0);
    }

    #[test]
    fn test_large_dt_is_substepped() {
        // One giant step should behave like many small ones, not explode.
        let mut spring = Spring::at_rest(0.0, SpringParams::COUNTER);
        spring.set_target(443.0);
        assert!(spring.step(10.0));
        assert_eq!(spring.position, 443.0);
    }
}
