//! Animation drivers
//!
//! Two periodic runner futures keep the face alive:
//!
//! - the **renderer** (~10 ms): snapshot the state, compose, blit
//! - the **dynamics** driver (~33 ms): saccades, blinking, breathing
//!
//! Both run until drawing is disabled, observing the stop request within
//! one tick. Each runner refuses to run twice concurrently, so a
//! restart after `stop()` can never leave two drivers fighting over the
//! same avatar.
//!
//! The application binds the runners to its executor:
//!
//! ```ignore
//! #[embassy_executor::task]
//! async fn renderer(avatar: &'static Avatar<Lcd>) {
//!     avatar.run_renderer().await;
//! }
//! ```

use embassy_time::{Duration, Instant, Ticker, Timer};
use portable_atomic::Ordering;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use mien_core::{BlinkTimer, BreathCycle, SaccadeTimer};
use mien_render::DisplayBackend;

use crate::avatar::Avatar;

/// Renderer frame poll interval
pub const FRAME_INTERVAL_MS: u64 = 10;
/// Facial dynamics tick interval (approx. 30 Hz)
pub const DYNAMICS_INTERVAL_MS: u64 = 33;

impl<D: DisplayBackend> Avatar<D> {
    /// Render one frame now, outside the driver cadence
    ///
    /// Used internally by the renderer; public for callers that need a
    /// frame at a specific moment. Failures (allocation, degenerate
    /// geometry, display errors) are absorbed here - the frame is
    /// skipped and the next one retries.
    pub async fn draw(&self) {
        let ctx = self.state.snapshot();
        let mut guard = self.unit.lock().await;
        let unit = &mut *guard;
        if let Some((top, left)) = self.state.take_position() {
            unit.face.set_position(top, left);
        }
        unit.face.set_rotation(ctx.rotation);
        if let Err(_e) = unit.face.draw(&mut unit.display, &ctx).await {
            #[cfg(feature = "defmt")]
            defmt::warn!("avatar: frame skipped: {}", _e);
        }
    }

    /// Redraw driver loop
    ///
    /// Runs until `stop()`; any in-flight frame completes before the
    /// loop exits. A second concurrent call returns immediately.
    pub async fn run_renderer(&self) {
        if self.renderer_active.swap(true, Ordering::Acquire) {
            return;
        }
        #[cfg(feature = "defmt")]
        defmt::info!("avatar: renderer started");
        while self.state.is_drawing() {
            if !self.state.is_paused() {
                self.draw().await;
            }
            Timer::after_millis(FRAME_INTERVAL_MS).await;
        }
        #[cfg(feature = "defmt")]
        defmt::info!("avatar: renderer stopped");
        self.renderer_active.store(false, Ordering::Release);
    }

    /// Facial dynamics driver loop, seeded from the clock
    pub async fn run_dynamics(&self) {
        self.run_dynamics_seeded(Instant::now().as_ticks()).await;
    }

    /// Facial dynamics driver loop with an explicit random seed
    ///
    /// Drives saccades, blinking (when auto-blink is enabled) and the
    /// breathing cycle into the shared state at ~30 Hz until `stop()`.
    pub async fn run_dynamics_seeded(&self, seed: u64) {
        if self.dynamics_active.swap(true, Ordering::Acquire) {
            return;
        }
        #[cfg(feature = "defmt")]
        defmt::info!("avatar: dynamics started");
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut saccade = SaccadeTimer::new();
        let mut blink = BlinkTimer::new();
        let mut breath = BreathCycle::new();
        let start = Instant::now();
        let mut ticker = Ticker::every(Duration::from_millis(DYNAMICS_INTERVAL_MS));

        while self.state.is_drawing() {
            let now_ms = start.elapsed().as_millis();

            if let Some(gaze) = saccade.poll(now_ms, &mut rng) {
                // A saccade points both eyes at the same target
                self.state.set_right_gaze(gaze);
                self.state.set_left_gaze(gaze);
            }

            if self.state.auto_blink() {
                if let Some(ratio) = blink.poll(now_ms, &mut rng) {
                    self.state.set_right_eye_open(ratio);
                    self.state.set_left_eye_open(ratio);
                }
            }

            self.state.set_breath(breath.advance());
            ticker.next().await;
        }
        #[cfg(feature = "defmt")]
        defmt::info!("avatar: dynamics stopped");
        self.dynamics_active.store(false, Ordering::Release);
    }
}
