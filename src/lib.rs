#![no_std]

pub mod buffer;
pub mod change;
pub mod decode;
pub mod definition;
pub mod element;
pub mod engine;
pub mod modification;
pub mod scheduler;
pub mod stack;
pub mod sync;

pub use buffer::{AddressingFault, BufferSet, CellView, CellWidth, MAX_BUFFERS, PixelBuffer};
pub use change::PixelChange;
pub use decode::{DecodeError, FrameDecoder};
pub use definition::AnimationDef;
pub use element::{MAX_CHANNELS, PixelElement};
pub use engine::{PixelEngine, TickReport};
pub use modification::{PAYLOAD_CAP, Payload, PixelModification};
pub use scheduler::{DEFAULT_TICK_RATE, FrameResult, TickScheduler};
pub use stack::{
    ANIMATION_STACK_DEPTH, AnimationEntry, AnimationModifiers, AnimationStack, StackFull,
};
pub use sync::{FrameState, FrameSync, SendInProgress};

pub use embassy_time::{Duration, Instant};

/// Animation definition source
///
/// The collaborator owning the compiled animation tables. The engine is
/// generic over this trait; lookups must be deterministic and
/// side-effect-free, as the engine may fetch the same frame any number
/// of times.
pub trait AnimationSet {
    /// Number of frames in the given animation, 0 when the index is unknown.
    fn frame_count(&self, animation: u16) -> u16;

    /// Encoded modification stream of one frame (see [`decode`]).
    fn frame_data(&self, animation: u16, frame: u16) -> Option<&[u8]>;
}

/// Abstract transmission driver trait
///
/// Implement this trait to stream buffer contents to hardware. `start`
/// is called once the hand-off state reached Sending; the driver (or
/// its completion interrupt) reports the transfer finished through
/// `is_busy` or by calling [`FrameSync::end_send`] itself.
pub trait Transmitter {
    /// Begin an asynchronous transfer of the buffer set
    fn start(&mut self, buffers: &BufferSet<'_>);

    /// True while a transfer is in flight
    fn is_busy(&self) -> bool;
}
