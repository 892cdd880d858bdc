pub const SMOOTH_TAU_SECONDS: f64 = 0.25;

const PARALLAX_BASE_SPEED: f64 = 0.5;
const PARALLAX_SPEED_STEP: f64 = 0.1;

pub fn easing_factor(delta_seconds: f64, tau: f64) -> f64 {
    if tau <= 0.0 {
        return 1.0;
    }
    1.0 - (-delta_seconds.max(0.0) / tau).exp()
}

// A non-positive period has no canonical range and collapses to zero.
pub fn wrap_position(position: f64, period: f64) -> f64 {
    if period <= 0.0 || !period.is_finite() || !position.is_finite() {
        return 0.0;
    }

    let wrapped = ((position % period) + period) % period;
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

pub fn remap(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let span = from.1 - from.0;
    if span == 0.0 {
        return to.0;
    }
    to.0 + (to.1 - to.0) * (value - from.0) / span
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub fn stagger_ms(index: usize, step_ms: u32) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX).saturating_mul(step_ms)
}

pub fn parallax_offset(scroll_y: f64, index: usize) -> f64 {
    let speed = PARALLAX_BASE_SPEED + index as f64 * PARALLAX_SPEED_STEP;
    scroll_y.max(0.0) * speed
}

#[derive(Clone, Debug, PartialEq)]
pub struct Smoother {
    current: f64,
    target: f64,
    tau: f64,
    last_timestamp: Option<f64>,
}

impl Smoother {
    pub fn new(initial: f64, tau: f64) -> Self {
        Self {
            current: initial,
            target: initial,
            tau,
            last_timestamp: None,
        }
    }

    pub fn value(&self) -> f64 {
        self.current
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Returns the elapsed seconds. The first call only records the clock.
    pub fn advance(&mut self, timestamp_ms: f64) -> f64 {
        let Some(last) = self.last_timestamp.replace(timestamp_ms) else {
            return 0.0;
        };

        let delta_seconds = (timestamp_ms - last).max(0.0) / 1000.0;
        self.current += (self.target - self.current) * easing_factor(delta_seconds, self.tau);
        delta_seconds
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RateIntegrator {
    rate: Smoother,
    position: f64,
    period: f64,
}

impl RateIntegrator {
    pub fn new(initial_rate: f64, tau: f64, period: f64) -> Self {
        Self {
            rate: Smoother::new(initial_rate, tau),
            position: 0.0,
            period,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn set_target_rate(&mut self, rate: f64) {
        self.rate.set_target(rate);
    }

    pub fn set_period(&mut self, period: f64) {
        self.period = period;
        self.position = wrap_position(self.position, period);
    }

    pub fn advance(&mut self, timestamp_ms: f64) -> f64 {
        let delta_seconds = self.rate.advance(timestamp_ms);
        if self.period > 0.0 {
            self.position = wrap_position(self.position + self.rate.value() * delta_seconds, self.period);
        }
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn first_frame_only_records_the_clock() {
        let mut smoother = Smoother::new(12.0, SMOOTH_TAU_SECONDS);
        smoother.set_target(3.0);

        assert_eq!(smoother.advance(10_000.0), 0.0);
        assert_eq!(smoother.value(), 12.0);
        assert!(smoother.last_timestamp.is_some());
    }

    #[test]
    fn one_time_constant_covers_one_minus_inverse_e() {
        let mut smoother = Smoother::new(12.0, 0.25);
        smoother.set_target(3.0);
        smoother.advance(0.0);
        smoother.advance(250.0);

        let expected = 3.0 + 9.0 * (-1.0f64).exp();
        assert!((smoother.value() - expected).abs() < EPSILON);
        assert!((smoother.value() - 6.31).abs() < 0.01);
    }

    #[test]
    fn backwards_timestamps_do_not_move_the_value() {
        let mut smoother = Smoother::new(0.0, 0.25);
        smoother.set_target(10.0);
        smoother.advance(1_000.0);

        assert_eq!(smoother.advance(900.0), 0.0);
        assert_eq!(smoother.value(), 0.0);
    }

    #[test]
    fn zero_target_decays_gradually() {
        let mut smoother = Smoother::new(120.0, 0.25);
        smoother.set_target(0.0);
        smoother.advance(0.0);
        smoother.advance(16.0);

        assert!(smoother.value() > 0.0);
        assert!(smoother.value() < 120.0);
    }

    #[test]
    fn retargeting_keeps_current_value() {
        let mut smoother = Smoother::new(12.0, 0.25);
        smoother.advance(0.0);
        smoother.set_target(3.0);
        smoother.advance(100.0);
        let midway = smoother.value();

        smoother.set_target(12.0);
        assert_eq!(smoother.value(), midway);
        smoother.advance(116.0);
        assert!(smoother.value() > midway);
    }

    #[test]
    fn converges_monotonically_without_overshoot() {
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..200 {
            let start = rng.random_range(-500.0..500.0);
            let target = rng.random_range(-500.0..500.0);
            let tau = rng.random_range(0.01..2.0);
            let mut smoother = Smoother::new(start, tau);
            smoother.set_target(target);

            let mut timestamp = rng.random_range(0.0..1_000.0);
            smoother.advance(timestamp);
            let mut previous_gap = (target - start).abs();

            for _ in 0..100 {
                timestamp += rng.random_range(0.0..250.0);
                smoother.advance(timestamp);
                let gap = (target - smoother.value()).abs();

                assert!(gap <= previous_gap + EPSILON);
                if start <= target {
                    assert!(smoother.value() <= target + EPSILON);
                } else {
                    assert!(smoother.value() >= target - EPSILON);
                }
                previous_gap = gap;
            }
        }
    }

    #[test]
    fn wrapped_position_stays_in_period() {
        let mut rng = SmallRng::seed_from_u64(11);

        for _ in 0..500 {
            let period = rng.random_range(0.5..2_000.0);
            let rate = rng.random_range(-5_000.0..5_000.0);
            let mut integrator = RateIntegrator::new(rate, 0.25, period);
            let mut timestamp = 0.0;
            integrator.advance(timestamp);

            for _ in 0..20 {
                timestamp += rng.random_range(0.0..3_000.0);
                let position = integrator.advance(timestamp);
                assert!((0.0..period).contains(&position), "{position} not in [0, {period})");
            }
        }
    }

    #[test]
    fn wrap_handles_negative_and_degenerate_input() {
        assert!((wrap_position(-30.0, 360.0) - 330.0).abs() < EPSILON);
        assert!((wrap_position(725.0, 360.0) - 5.0).abs() < EPSILON);
        assert_eq!(wrap_position(-1e-18, 360.0), 0.0);
        assert_eq!(wrap_position(12.0, 0.0), 0.0);
        assert_eq!(wrap_position(f64::INFINITY, 10.0), 0.0);
    }

    #[test]
    fn empty_period_keeps_position_still() {
        let mut integrator = RateIntegrator::new(120.0, 0.25, 0.0);
        integrator.advance(0.0);
        integrator.advance(500.0);

        assert_eq!(integrator.position(), 0.0);
        assert_eq!(integrator.rate.value(), 120.0);
    }

    #[test]
    fn integration_uses_the_smoothed_rate() {
        let mut integrator = RateIntegrator::new(10.0, 0.25, 1_000.0);
        integrator.advance(0.0);
        integrator.advance(1_000.0);

        assert!((integrator.position() - 10.0).abs() < EPSILON);
    }

    #[test]
    fn non_positive_tau_snaps_to_target() {
        let mut smoother = Smoother::new(0.0, 0.0);
        smoother.set_target(5.0);
        smoother.advance(0.0);
        smoother.advance(1.0);

        assert_eq!(smoother.value(), 5.0);
    }

    #[test]
    fn cubic_ease_hits_its_anchor_points() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < EPSILON);
        assert!((ease_in_out_cubic(0.75) - 0.9375).abs() < EPSILON);
        assert_eq!(ease_in_out_cubic(3.0), 1.0);
    }

    #[test]
    fn stagger_grows_linearly_and_saturates() {
        assert_eq!(stagger_ms(0, 200), 0);
        assert_eq!(stagger_ms(3, 200), 600);
        assert_eq!(stagger_ms(usize::MAX, 300), u32::MAX);
    }

    #[test]
    fn deeper_shapes_scroll_faster() {
        assert_eq!(parallax_offset(0.0, 2), 0.0);
        assert!((parallax_offset(100.0, 0) - 50.0).abs() < EPSILON);
        assert!((parallax_offset(100.0, 2) - 70.0).abs() < EPSILON);
        assert_eq!(parallax_offset(-40.0, 1), 0.0);
    }

    #[test]
    fn remap_matches_linear_interpolation() {
        assert_eq!(remap(50.0, (0.0, 100.0), (35.0, 65.0)), 50.0);
        assert_eq!(remap(0.0, (0.0, 100.0), (35.0, 65.0)), 35.0);
        assert_eq!(remap(1.0, (1.0, 1.0), (2.0, 3.0)), 2.0);
        assert_eq!(round_to(1.23456, 3), 1.235);
    }
}
