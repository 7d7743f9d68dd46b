//! Hardware pixel buffers and channel addressing.
//!
//! Output hardware exposes several independently-sized regions of 8-
//! or 16-bit cells. Each region carries a channel offset; an absolute
//! channel index addresses the cell `channel - offset` of the region
//! covering it. Addressing performs no clamping: an index resolving
//! outside every region is a fault, reported to the caller.

use heapless::Vec;

use crate::change::PixelChange;

/// Maximum number of independent hardware buffers one engine drives.
pub const MAX_BUFFERS: usize = 8;

/// Storage width of one buffer cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellWidth {
    /// 8-bit cells
    Byte,
    /// 16-bit cells
    Word,
}

impl CellWidth {
    /// Width in bits.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Byte => 8,
            Self::Word => 16,
        }
    }

    /// Width in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Word => 2,
        }
    }
}

/// Fault raised when an index resolves outside the configured map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingFault {
    /// Channel index not covered by any buffer
    Channel(u16),
    /// Logical pixel index outside the element map
    Pixel(u16),
}

/// Typed backing storage of one buffer.
#[derive(Debug)]
enum Cells<'a> {
    Byte(&'a mut [u8]),
    Word(&'a mut [u16]),
}

/// Read-only view of a buffer's cells.
///
/// This is the form the transmission driver consumes while the
/// hand-off state is Sending.
#[derive(Debug, Clone, Copy)]
pub enum CellView<'a> {
    /// 8-bit cells
    Byte(&'a [u8]),
    /// 16-bit cells
    Word(&'a [u16]),
}

/// One contiguous output region.
///
/// The engine holds the only mutable borrow of the backing storage for
/// its whole lifetime; the transmission driver sees it through
/// [`PixelBuffer::view`] only.
#[derive(Debug)]
pub struct PixelBuffer<'a> {
    offset: u16,
    cells: Cells<'a>,
}

impl<'a> PixelBuffer<'a> {
    /// Buffer over 8-bit cells starting at the given absolute channel.
    pub fn new_u8(cells: &'a mut [u8], offset: u16) -> Self {
        Self {
            offset,
            cells: Cells::Byte(cells),
        }
    }

    /// Buffer over 16-bit cells starting at the given absolute channel.
    pub fn new_u16(cells: &'a mut [u16], offset: u16) -> Self {
        Self {
            offset,
            cells: Cells::Word(cells),
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        match &self.cells {
            Cells::Byte(cells) => cells.len(),
            Cells::Word(cells) => cells.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absolute channel index of the first cell.
    pub const fn offset(&self) -> u16 {
        self.offset
    }

    /// Storage width of the cells.
    pub const fn width(&self) -> CellWidth {
        match self.cells {
            Cells::Byte(_) => CellWidth::Byte,
            Cells::Word(_) => CellWidth::Word,
        }
    }

    /// Whether the given absolute channel lives in this buffer.
    pub fn contains(&self, channel: u16) -> bool {
        self.local(channel).is_ok()
    }

    fn local(&self, channel: u16) -> Result<usize, AddressingFault> {
        match channel.checked_sub(self.offset) {
            Some(local) if usize::from(local) < self.len() => Ok(usize::from(local)),
            _ => Err(AddressingFault::Channel(channel)),
        }
    }

    /// Read a channel's raw value, widened to 16 bits.
    pub fn read(&self, channel: u16) -> Result<u16, AddressingFault> {
        let local = self.local(channel)?;
        Ok(match &self.cells {
            Cells::Byte(cells) => u16::from(cells[local]),
            Cells::Word(cells) => cells[local],
        })
    }

    /// Write a channel's raw value, truncated to the cell width.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write(&mut self, channel: u16, value: u16) -> Result<(), AddressingFault> {
        let local = self.local(channel)?;
        match &mut self.cells {
            Cells::Byte(cells) => cells[local] = value as u8,
            Cells::Word(cells) => cells[local] = value,
        }
        Ok(())
    }

    /// Combine a delta into a channel's current value.
    ///
    /// The operation runs at the cell's width, so wrapping and
    /// saturation behave per the storage, not per the caller's
    /// assumption about it.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(
        &mut self,
        channel: u16,
        change: PixelChange,
        delta: u16,
    ) -> Result<(), AddressingFault> {
        let local = self.local(channel)?;
        match &mut self.cells {
            Cells::Byte(cells) => {
                let cell = &mut cells[local];
                *cell = change.apply8(*cell, delta as u8);
            }
            Cells::Word(cells) => {
                let cell = &mut cells[local];
                *cell = change.apply16(*cell, delta);
            }
        }
        Ok(())
    }

    /// Read-only view of the whole region.
    pub fn view(&self) -> CellView<'_> {
        match &self.cells {
            Cells::Byte(cells) => CellView::Byte(cells),
            Cells::Word(cells) => CellView::Word(cells),
        }
    }

    /// Zero every cell.
    pub fn zero(&mut self) {
        match &mut self.cells {
            Cells::Byte(cells) => cells.fill(0),
            Cells::Word(cells) => cells.fill(0),
        }
    }
}

/// The set of hardware buffers addressed by absolute channel index.
#[derive(Debug, Default)]
pub struct BufferSet<'a> {
    buffers: Vec<PixelBuffer<'a>, MAX_BUFFERS>,
}

impl<'a> BufferSet<'a> {
    pub const fn new() -> Self {
        Self {
            buffers: Vec::new(),
        }
    }

    /// Add a buffer to the set.
    ///
    /// Returns the buffer if all [`MAX_BUFFERS`] slots are taken.
    pub fn push(&mut self, buffer: PixelBuffer<'a>) -> Result<(), PixelBuffer<'a>> {
        self.buffers.push(buffer)
    }

    /// Number of buffers in the set.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PixelBuffer<'a>> {
        self.buffers.get(index)
    }

    /// Buffers in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, PixelBuffer<'a>> {
        self.buffers.iter()
    }

    fn locate_mut(&mut self, channel: u16) -> Result<&mut PixelBuffer<'a>, AddressingFault> {
        self.buffers
            .iter_mut()
            .find(|buffer| buffer.contains(channel))
            .ok_or(AddressingFault::Channel(channel))
    }

    /// Read a channel's raw value, widened to 16 bits.
    pub fn read(&self, channel: u16) -> Result<u16, AddressingFault> {
        self.buffers
            .iter()
            .find(|buffer| buffer.contains(channel))
            .ok_or(AddressingFault::Channel(channel))?
            .read(channel)
    }

    /// Write a channel's raw value, truncated to the cell width.
    pub fn write(&mut self, channel: u16, value: u16) -> Result<(), AddressingFault> {
        self.locate_mut(channel)?.write(channel, value)
    }

    /// Combine a delta into a channel's current value.
    pub fn apply(
        &mut self,
        channel: u16,
        change: PixelChange,
        delta: u16,
    ) -> Result<(), AddressingFault> {
        self.locate_mut(channel)?.apply(channel, change, delta)
    }

    /// Zero every cell of every buffer.
    pub fn zero(&mut self) {
        for buffer in &mut self.buffers {
            buffer.zero();
        }
    }
}
