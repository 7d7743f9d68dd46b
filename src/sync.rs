//! Frame hand-off synchronization.
//!
//! A single tri-state value guards the pixel buffers between the tick
//! loop and the asynchronous transmission path. Built on
//! `critical-section`, so the same code works from thread and
//! interrupt context.

use core::cell::Cell;

use critical_section::Mutex;

/// Error returned when starting a send while one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendInProgress;

/// Hand-off state of the pixel buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameState {
    /// Buffers idle, nothing new to transmit
    #[default]
    Ready,
    /// Buffers modified since the last transmission
    Update,
    /// Transmission path is reading the buffers
    Sending,
}

/// Shared hand-off state, one per buffer set.
///
/// Const-constructible so it can live in a `static` shared by the
/// engine and the transmission driver. Every transition runs inside a
/// critical section.
pub struct FrameSync {
    state: Mutex<Cell<FrameState>>,
}

impl FrameSync {
    /// New hand-off in the Ready state.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(FrameState::Ready)),
        }
    }

    /// Current state.
    pub fn state(&self) -> FrameState {
        critical_section::with(|cs| self.state.borrow(cs).get())
    }

    /// Record that buffer contents changed.
    ///
    /// Ready becomes Update; Update stays Update. The engine defers
    /// its tick while Sending, so this must never race a send.
    pub fn mark_update(&self) {
        critical_section::with(|cs| {
            let state = self.state.borrow(cs);
            debug_assert!(
                state.get() != FrameState::Sending,
                "buffer mutation during send"
            );
            state.set(FrameState::Update);
        });
    }

    /// Claim the buffers for transmission.
    ///
    /// Fails if a send is already active.
    pub fn begin_send(&self) -> Result<(), SendInProgress> {
        critical_section::with(|cs| {
            let state = self.state.borrow(cs);
            if state.get() == FrameState::Sending {
                return Err(SendInProgress);
            }
            state.set(FrameState::Sending);
            Ok(())
        })
    }

    /// Release the buffers after transmission, back to Ready.
    ///
    /// Safe from interrupt context. Calling it while no send is active
    /// is a driver bug, checked in debug builds.
    pub fn end_send(&self) {
        critical_section::with(|cs| {
            let state = self.state.borrow(cs);
            debug_assert!(
                state.get() == FrameState::Sending,
                "send completion without an active send"
            );
            state.set(FrameState::Ready);
        });
    }

    /// Force the Ready state.
    pub fn reset(&self) {
        critical_section::with(|cs| self.state.borrow(cs).set(FrameState::Ready));
    }
}

impl Default for FrameSync {
    fn default() -> Self {
        Self::new()
    }
}
