//! Static pixel element map.

use crate::buffer::CellWidth;

/// Maximum hardware channels backing one logical pixel.
pub const MAX_CHANNELS: usize = 3;

/// Descriptor mapping one logical pixel to its hardware channels.
///
/// The element map is fixed at configuration time and shared
/// read-only, so all constructors are `const fn` and whole maps can
/// live in `static` tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelElement {
    width: CellWidth,
    channels: u8,
    indexes: [u16; MAX_CHANNELS],
}

impl PixelElement {
    /// Three 8-bit channels in red, green, blue order.
    pub const fn rgb(red: u16, green: u16, blue: u16) -> Self {
        Self {
            width: CellWidth::Byte,
            channels: 3,
            indexes: [red, green, blue],
        }
    }

    /// Three 16-bit channels in red, green, blue order.
    pub const fn rgb16(red: u16, green: u16, blue: u16) -> Self {
        Self {
            width: CellWidth::Word,
            channels: 3,
            indexes: [red, green, blue],
        }
    }

    /// Single 8-bit channel.
    pub const fn mono(index: u16) -> Self {
        Self {
            width: CellWidth::Byte,
            channels: 1,
            indexes: [index, 0, 0],
        }
    }

    /// Single 16-bit channel.
    pub const fn mono16(index: u16) -> Self {
        Self {
            width: CellWidth::Word,
            channels: 1,
            indexes: [index, 0, 0],
        }
    }

    /// Placeholder without channels, for gaps in the map.
    pub const fn blank() -> Self {
        Self {
            width: CellWidth::Byte,
            channels: 0,
            indexes: [0; MAX_CHANNELS],
        }
    }

    /// Storage width of the backing channels.
    pub const fn width(&self) -> CellWidth {
        self.width
    }

    /// Number of hardware channels backing the pixel.
    pub const fn channel_count(&self) -> usize {
        self.channels as usize
    }

    /// Hardware channel indexes, in element order.
    pub fn channels(&self) -> &[u16] {
        &self.indexes[..self.channel_count()]
    }

    /// Encoded payload size of one command targeting this pixel.
    pub const fn payload_len(&self) -> usize {
        self.channel_count() * self.width.bytes()
    }
}

impl Default for PixelElement {
    fn default() -> Self {
        Self::blank()
    }
}
