//! Per-tick animation processing.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::AnimationSet;
use crate::buffer::BufferSet;
use crate::decode::FrameDecoder;
use crate::element::PixelElement;
use crate::stack::{AnimationEntry, AnimationModifiers, AnimationStack, StackFull};
use crate::sync::{FrameState, FrameSync};

/// Outcome of one engine tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Commands applied to the buffers
    pub applied: u16,
    /// Decode and addressing faults
    pub faults: u16,
    /// Whether the tick was skipped during an active send
    pub deferred: bool,
}

/// Decode one frame and apply its commands.
///
/// A decode fault drops the rest of the frame; an addressing fault
/// drops the rest of its own command only.
fn apply_frame(
    data: &[u8],
    elements: &[PixelElement],
    buffers: &mut BufferSet<'_>,
) -> (u16, u16) {
    let mut applied: u16 = 0;
    let mut faults: u16 = 0;
    for decoded in FrameDecoder::new(data, elements) {
        match decoded {
            Ok(modification) => match modification.apply(buffers, elements) {
                Ok(()) => applied = applied.saturating_add(1),
                Err(_) => faults = faults.saturating_add(1),
            },
            Err(_) => faults = faults.saturating_add(1),
        }
    }
    (applied, faults)
}

/// The animation engine.
///
/// Owns the pixel buffers and the animation stack; shares the frame
/// hand-off with the transmission driver by reference. `process` is
/// the per-tick entry point.
pub struct PixelEngine<'a, S: AnimationSet> {
    source: S,
    elements: &'a [PixelElement],
    buffers: BufferSet<'a>,
    stack: AnimationStack,
    sync: &'a FrameSync,
    fault_count: u32,
}

impl<'a, S: AnimationSet> PixelEngine<'a, S> {
    pub fn new(
        source: S,
        elements: &'a [PixelElement],
        buffers: BufferSet<'a>,
        sync: &'a FrameSync,
    ) -> Self {
        Self {
            source,
            elements,
            buffers,
            stack: AnimationStack::new(),
            sync,
            fault_count: 0,
        }
    }

    /// Reset to the power-on state.
    ///
    /// Zeroes the buffers, clears the stack, forces the hand-off to
    /// Ready.
    pub fn setup(&mut self) {
        self.buffers.zero();
        self.stack.clear();
        self.sync.reset();
        self.fault_count = 0;
    }

    /// Start an animation on top of the stack.
    ///
    /// `loops` of 0 repeats forever; `divider` is the number of ticks
    /// per frame advance (0 behaves as 1).
    pub fn push_animation(
        &mut self,
        index: u16,
        loops: u8,
        divider: u8,
        modifiers: AnimationModifiers,
    ) -> Result<(), StackFull> {
        #[cfg(feature = "esp32-log")]
        println!(
            "[PixelEngine.push_animation] animation {} loops {} divider {}",
            index, loops, divider
        );
        self.stack
            .push(AnimationEntry::new(index, loops, divider, modifiers))
    }

    /// Stop the top animation.
    pub fn pop_animation(&mut self) -> Option<AnimationEntry> {
        self.stack.pop()
    }

    /// Stop every animation.
    pub fn clear_animations(&mut self) {
        self.stack.clear();
    }

    /// Run one tick of every active animation.
    ///
    /// Entries run bottom-up, so layers pushed later compose over the
    /// layers below them. While a send is active the whole tick is
    /// deferred: no divider counts, no frame advances, no buffer
    /// mutation.
    pub fn process(&mut self) -> TickReport {
        if self.sync.state() == FrameState::Sending {
            return TickReport {
                applied: 0,
                faults: 0,
                deferred: true,
            };
        }

        let mut report = TickReport::default();
        let mut depth = 0;
        while let Some(mut entry) = self.stack.get(depth).copied() {
            entry.phase = entry.phase.saturating_add(1);
            if entry.phase < entry.divider {
                if let Some(slot) = self.stack.get_mut(depth) {
                    *slot = entry;
                }
                depth += 1;
                continue;
            }
            entry.phase = 0;

            let frames = self.source.frame_count(entry.index);
            if frames > 0 {
                if let Some(data) = self.source.frame_data(entry.index, entry.pos) {
                    let (applied, faults) = apply_frame(data, self.elements, &mut self.buffers);
                    report.applied = report.applied.saturating_add(applied);
                    report.faults = report.faults.saturating_add(faults);
                    self.fault_count = self.fault_count.wrapping_add(u32::from(faults));
                }
            }

            // step past the played frame, wrapping at the end
            entry.pos = entry.pos.saturating_add(1);
            if entry.pos >= frames {
                entry.pos = 0;
                if !entry.is_infinite() {
                    entry.loops -= 1;
                    if entry.loops == 0 {
                        self.stack.remove(depth);
                        continue;
                    }
                }
            }
            if let Some(slot) = self.stack.get_mut(depth) {
                *slot = entry;
            }
            depth += 1;
        }

        if report.applied > 0 || report.faults > 0 {
            self.sync.mark_update();
        }
        report
    }

    /// Read-only view of the hardware buffers.
    pub const fn buffers(&self) -> &BufferSet<'a> {
        &self.buffers
    }

    /// Direct access to the hardware buffers.
    ///
    /// Changes made here bypass the hand-off; mark the frame updated
    /// through [`PixelEngine::sync`] when they should be transmitted.
    pub const fn buffers_mut(&mut self) -> &mut BufferSet<'a> {
        &mut self.buffers
    }

    /// The active animation stack.
    pub const fn stack(&self) -> &AnimationStack {
        &self.stack
    }

    /// The shared frame hand-off.
    pub const fn sync(&self) -> &'a FrameSync {
        self.sync
    }

    /// The element map.
    pub const fn elements(&self) -> &'a [PixelElement] {
        self.elements
    }

    /// Faults seen since setup, wrapping.
    pub const fn fault_count(&self) -> u32 {
        self.fault_count
    }
}
