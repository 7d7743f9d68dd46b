//! Static animation definition tables.
//!
//! Definitions are compiled into the firmware image: each animation is
//! a table of encoded frames (see [`crate::decode`] for the layout),
//! referenced by index from the animation stack.

use crate::AnimationSet;

/// One compiled animation: an ordered table of encoded frames.
#[derive(Debug, Clone, Copy)]
pub struct AnimationDef {
    frames: &'static [&'static [u8]],
}

impl AnimationDef {
    /// Definition over a table of encoded frames.
    pub const fn new(frames: &'static [&'static [u8]]) -> Self {
        Self { frames }
    }

    /// Number of frames in the table.
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Encoded bytes of one frame.
    pub fn frame(&self, index: usize) -> Option<&'static [u8]> {
        self.frames.get(index).copied()
    }
}

impl AnimationSet for &[AnimationDef] {
    #[allow(clippy::cast_possible_truncation)]
    fn frame_count(&self, animation: u16) -> u16 {
        self.get(usize::from(animation))
            .map_or(0, |def| def.frame_count() as u16)
    }

    fn frame_data(&self, animation: u16, frame: u16) -> Option<&[u8]> {
        self.get(usize::from(animation))?.frame(usize::from(frame))
    }
}
