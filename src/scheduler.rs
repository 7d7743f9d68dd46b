//! Tick scheduling and timing utilities.
//!
//! Provides portable tick pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between ticks.

use embassy_time::{Duration, Instant};

use crate::engine::{PixelEngine, TickReport};
use crate::sync::FrameState;
use crate::{AnimationSet, Transmitter};

/// Default target tick rate (60 ticks per second).
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Default tick period based on the target rate.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(1000 / DEFAULT_TICK_RATE as u64);

/// Result of one scheduler tick.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// What the engine did this tick.
    pub report: TickReport,
}

/// Portable tick scheduler that manages timing without async.
///
/// This scheduler:
/// - Tracks tick timing with drift correction
/// - Polls the transmitter and runs the frame hand-off
/// - Calls the engine's `process`
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(engine, transmitter);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis() as u64);
/// }
/// ```
///
/// Interrupt-driven drivers may skip the polling hand-off and call
/// `FrameSync::end_send` from their completion interrupt instead.
pub struct TickScheduler<'a, S: AnimationSet, T: Transmitter> {
    engine: PixelEngine<'a, S>,
    transmitter: T,
    next_tick: Instant,
    tick_period: Duration,
}

impl<'a, S: AnimationSet, T: Transmitter> TickScheduler<'a, S, T> {
    /// Create a new tick scheduler.
    ///
    /// Uses `DEFAULT_TICK_PERIOD` (60 ticks per second) for pacing.
    pub fn new(engine: PixelEngine<'a, S>, transmitter: T) -> Self {
        Self::with_tick_period(engine, transmitter, DEFAULT_TICK_PERIOD)
    }

    /// Create a new tick scheduler with a custom tick period.
    pub fn with_tick_period(
        engine: PixelEngine<'a, S>,
        transmitter: T,
        tick_period: Duration,
    ) -> Self {
        Self {
            engine,
            transmitter,
            next_tick: Instant::from_millis(0),
            tick_period,
        }
    }

    /// Run one tick and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Completes the active send once the transmitter goes idle
    /// 3. Runs the engine's `process`
    /// 4. Hands a freshly updated frame to the transmitter
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift_ms = self.tick_period.as_millis() * 2;
        let max_drift = Duration::from_millis(max_drift_ms);
        if now.as_millis() > self.next_tick.as_millis() + max_drift.as_millis() {
            self.next_tick = now;
        }

        let sync = self.engine.sync();
        if sync.state() == FrameState::Sending && !self.transmitter.is_busy() {
            sync.end_send();
        }

        let report = self.engine.process();

        if sync.state() == FrameState::Update && sync.begin_send().is_ok() {
            self.transmitter.start(self.engine.buffers());
        }

        // Calculate next tick deadline
        self.next_tick += self.tick_period;

        // Calculate sleep duration (may be zero if we're behind)
        let sleep_duration = if self.next_tick.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_tick.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_tick,
            sleep_duration,
            report,
        }
    }

    /// Get a reference to the engine.
    pub fn engine(&self) -> &PixelEngine<'a, S> {
        &self.engine
    }

    /// Get a mutable reference to the engine.
    pub fn engine_mut(&mut self) -> &mut PixelEngine<'a, S> {
        &mut self.engine
    }

    /// Get a reference to the transmitter.
    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }

    /// Get a mutable reference to the transmitter.
    pub fn transmitter_mut(&mut self) -> &mut T {
        &mut self.transmitter
    }
}
