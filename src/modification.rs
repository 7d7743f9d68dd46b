//! Decoded pixel modification commands.

use heapless::Vec;

use crate::buffer::{AddressingFault, BufferSet, CellWidth};
use crate::change::PixelChange;
use crate::element::{MAX_CHANNELS, PixelElement};

/// Capacity of one command payload in bytes.
pub const PAYLOAD_CAP: usize = MAX_CHANNELS * 2;

/// Per-channel delta bytes of one command.
pub type Payload = Vec<u8, PAYLOAD_CAP>;

/// One modification command, addressed to a logical pixel.
///
/// Carries one delta per channel of the target pixel, little-endian
/// per 16-bit slot. A `contiguous` count above 1 broadcasts the same
/// payload over a run of consecutive pixel indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelModification {
    /// First logical pixel of the run
    pub pixel: u16,
    /// Operation combining the deltas with current values
    pub change: PixelChange,
    /// Length of the run; 0 behaves as 1
    pub contiguous: u8,
    /// Delta bytes, sized by the first pixel's element
    pub payload: Payload,
}

impl PixelModification {
    /// Command over a single pixel.
    pub fn single(pixel: u16, change: PixelChange, payload: Payload) -> Self {
        Self {
            pixel,
            change,
            contiguous: 1,
            payload,
        }
    }

    /// Number of pixels the command touches.
    pub fn run_len(&self) -> u16 {
        u16::from(self.contiguous.max(1))
    }

    /// Delta for one channel slot, read at the element's width.
    fn delta(&self, element: &PixelElement, slot: usize) -> Option<u16> {
        let start = slot * element.width().bytes();
        match element.width() {
            CellWidth::Byte => self.payload.get(start).copied().map(u16::from),
            CellWidth::Word => {
                let low = *self.payload.get(start)?;
                let high = *self.payload.get(start + 1)?;
                Some(u16::from_le_bytes([low, high]))
            }
        }
    }

    /// Apply the command to the buffers through the element map.
    ///
    /// A fault stops the command; channels already written stay
    /// written. Pixels of a run whose elements declare more channels
    /// than the payload covers keep those extra channels unmodified.
    pub fn apply(
        &self,
        buffers: &mut BufferSet<'_>,
        elements: &[PixelElement],
    ) -> Result<(), AddressingFault> {
        for step in 0..self.run_len() {
            let Some(pixel) = self.pixel.checked_add(step) else {
                return Err(AddressingFault::Pixel(u16::MAX));
            };
            let element = elements
                .get(usize::from(pixel))
                .ok_or(AddressingFault::Pixel(pixel))?;
            for (slot, &channel) in element.channels().iter().enumerate() {
                let Some(delta) = self.delta(element, slot) else {
                    break;
                };
                buffers.apply(channel, self.change, delta)?;
            }
        }
        Ok(())
    }
}
