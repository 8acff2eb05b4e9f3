//! Facial dynamics state machines
//!
//! Pure logic for the three involuntary motions that make a face look
//! alive: saccades (rapid gaze jumps), blinking, and breathing. Each
//! machine is clocked with caller-supplied millisecond timestamps and a
//! caller-owned random generator, so the dynamics driver owns its own
//! seedable randomness and tests run deterministically.

use rand::Rng;

use crate::context::Gaze;

/// Randomized gaze-jump scheduler
///
/// Fires when the elapsed time since the last saccade exceeds the current
/// interval, then redraws the interval as `500 + 100 * U{0..19}` ms.
#[derive(Debug, Clone)]
pub struct SaccadeTimer {
    interval_ms: u32,
    last_ms: u64,
}

impl SaccadeTimer {
    pub const fn new() -> Self {
        Self {
            interval_ms: 1000,
            last_ms: 0,
        }
    }

    /// Current interval until the next saccade, milliseconds
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Returns a new gaze target when a saccade fires
    ///
    /// Both eyes receive the same target; vertical and horizontal are
    /// drawn independently from [-1, 1].
    pub fn poll<R: Rng>(&mut self, now_ms: u64, rng: &mut R) -> Option<Gaze> {
        if now_ms.saturating_sub(self.last_ms) <= self.interval_ms as u64 {
            return None;
        }
        let vertical = rng.gen_range(-1.0f32..=1.0);
        let horizontal = rng.gen_range(-1.0f32..=1.0);
        self.interval_ms = 500 + 100 * rng.gen_range(0..20u32);
        self.last_ms = now_ms;
        Some(Gaze::new(vertical, horizontal))
    }
}

impl Default for SaccadeTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Randomized blink scheduler
///
/// Alternates the eyes between open (ratio 1.0, held for
/// `2500 + 100 * U{0..19}` ms) and closed (ratio 0.0, held for
/// `300 + 10 * U{0..19}` ms).
#[derive(Debug, Clone)]
pub struct BlinkTimer {
    interval_ms: u32,
    last_ms: u64,
    eye_open: bool,
}

impl BlinkTimer {
    pub const fn new() -> Self {
        Self {
            interval_ms: 1000,
            last_ms: 0,
            eye_open: true,
        }
    }

    /// Current interval until the next transition, milliseconds
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Returns the new eye-open ratio when a transition fires
    pub fn poll<R: Rng>(&mut self, now_ms: u64, rng: &mut R) -> Option<f32> {
        if now_ms.saturating_sub(self.last_ms) <= self.interval_ms as u64 {
            return None;
        }
        let ratio = if self.eye_open {
            self.interval_ms = 2500 + 100 * rng.gen_range(0..20u32);
            1.0
        } else {
            self.interval_ms = 300 + 10 * rng.gen_range(0..20u32);
            0.0
        };
        self.eye_open = !self.eye_open;
        self.last_ms = now_ms;
        Some(ratio)
    }
}

impl Default for BlinkTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// 100-step breathing cycle
///
/// One `advance` per dynamics tick; at ~30 Hz the full sine period is a
/// little over three seconds.
#[derive(Debug, Clone, Default)]
pub struct BreathCycle {
    count: u32,
}

impl BreathCycle {
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Step the cycle and return the new breath value, `sin(2*pi*k/100)`
    pub fn advance(&mut self) -> f32 {
        self.count = (self.count + 1) % 100;
        libm::sinf(self.count as f32 * 2.0 * core::f32::consts::PI / 100.0)
    }

    /// Current cycle position, 0..100
    pub fn phase(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_saccade_does_not_fire_within_interval() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut s = SaccadeTimer::new();
        assert!(s.poll(0, &mut rng).is_none());
        assert!(s.poll(1000, &mut rng).is_none());
        assert!(s.poll(1001, &mut rng).is_some());
    }

    #[test]
    fn test_saccade_gaze_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut s = SaccadeTimer::new();
        let mut now = 0u64;
        for _ in 0..200 {
            now += 5000; // always past the interval
            let g = s.poll(now, &mut rng).expect("saccade should fire");
            assert!((-1.0..=1.0).contains(&g.vertical));
            assert!((-1.0..=1.0).contains(&g.horizontal));
        }
    }

    #[test]
    fn test_blink_alternates_and_holds_open_longer() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut b = BlinkTimer::new();
        let mut now = 0u64;

        now += 2000;
        let first = b.poll(now, &mut rng).expect("first transition");
        assert_eq!(first, 1.0); // starts open, re-opens first
        let open_hold = b.interval_ms();
        assert!((2500..=4400).contains(&open_hold));

        now += open_hold as u64 + 1;
        let second = b.poll(now, &mut rng).expect("second transition");
        assert_eq!(second, 0.0);
        let closed_hold = b.interval_ms();
        assert!((300..=490).contains(&closed_hold));
    }

    #[test]
    fn test_blink_respects_interval() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut b = BlinkTimer::new();
        assert!(b.poll(500, &mut rng).is_none());
        assert!(b.poll(1001, &mut rng).is_some());
        // Just transitioned; nothing until the new interval elapses
        assert!(b.poll(1002, &mut rng).is_none());
    }

    #[test]
    fn test_breath_reproduces_sine_cycle() {
        let mut breath = BreathCycle::new();
        for k in 1..=100u32 {
            let v = breath.advance();
            let expected = libm::sinf((k % 100) as f32 * 2.0 * core::f32::consts::PI / 100.0);
            assert!((v - expected).abs() < 1e-6, "tick {}: {} vs {}", k, v, expected);
        }
        assert_eq!(breath.phase(), 0); // full period
    }

    #[test]
    fn test_breath_is_periodic() {
        let mut a = BreathCycle::new();
        let mut b = BreathCycle::new();
        for _ in 0..100 {
            b.advance();
        }
        for _ in 0..150 {
            assert_eq!(a.advance(), b.advance());
        }
    }

    proptest! {
        #[test]
        fn saccade_interval_in_range(seed in any::<u64>()) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut s = SaccadeTimer::new();
            s.poll(5000, &mut rng).unwrap();
            prop_assert!((500..=2400).contains(&s.interval_ms()));
        }

        #[test]
        fn blink_intervals_in_range(seed in any::<u64>()) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut b = BlinkTimer::new();
            let mut now = 5000u64;
            let ratio = b.poll(now, &mut rng).unwrap();
            prop_assert_eq!(ratio, 1.0);
            prop_assert!((2500..=4400).contains(&b.interval_ms()));
            now += b.interval_ms() as u64 + 1;
            let ratio = b.poll(now, &mut rng).unwrap();
            prop_assert_eq!(ratio, 0.0);
            prop_assert!((300..=490).contains(&b.interval_ms()));
        }
    }
}
