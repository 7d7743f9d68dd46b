//! Compact binary frame encoding.
//!
//! One frame is a concatenation of commands:
//!
//! ```text
//! pixel: u16 LE | change: u8 | contiguous: u8 | payload
//! ```
//!
//! The payload holds one delta per channel of the first pixel's
//! element, `channel_count * width / 8` bytes, little-endian per
//! 16-bit slot. Commands carry no framing of their own, so the stream
//! cannot be resynchronized after a bad header.

use crate::change::PixelChange;
use crate::element::PixelElement;
use crate::modification::{Payload, PixelModification};

const HEADER_LEN: usize = 4;

/// Errors raised while decoding one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Frame ended inside a command
    Truncated,
    /// Opcode above the defined range
    BadChange(u8),
    /// Pixel index outside the element map
    UnknownPixel(u16),
}

/// Streaming decoder over one encoded frame
///
/// Yields commands until the frame is exhausted. An error poisons the
/// decoder and the remaining bytes are dropped.
pub struct FrameDecoder<'a> {
    data: &'a [u8],
    elements: &'a [PixelElement],
    offset: usize,
    poisoned: bool,
}

impl<'a> FrameDecoder<'a> {
    pub const fn new(data: &'a [u8], elements: &'a [PixelElement]) -> Self {
        Self {
            data,
            elements,
            offset: 0,
            poisoned: false,
        }
    }

    /// Bytes not yet consumed
    pub const fn remaining(&self) -> usize {
        if self.poisoned {
            0
        } else {
            self.data.len() - self.offset
        }
    }

    fn decode_one(&self) -> Result<(PixelModification, usize), DecodeError> {
        let rest = &self.data[self.offset..];
        if rest.len() < HEADER_LEN {
            return Err(DecodeError::Truncated);
        }
        let pixel = u16::from_le_bytes([rest[0], rest[1]]);
        let change = PixelChange::from_raw(rest[2]).ok_or(DecodeError::BadChange(rest[2]))?;
        let contiguous = rest[3];
        let element = self
            .elements
            .get(usize::from(pixel))
            .ok_or(DecodeError::UnknownPixel(pixel))?;
        let tail = rest
            .get(HEADER_LEN..HEADER_LEN + element.payload_len())
            .ok_or(DecodeError::Truncated)?;

        let mut payload = Payload::new();
        // payload capacity covers MAX_CHANNELS at word width
        let _ = payload.extend_from_slice(tail);

        Ok((
            PixelModification {
                pixel,
                change,
                contiguous,
                payload,
            },
            HEADER_LEN + tail.len(),
        ))
    }
}

impl Iterator for FrameDecoder<'_> {
    type Item = Result<PixelModification, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.poisoned || self.offset >= self.data.len() {
            return None;
        }
        match self.decode_one() {
            Ok((modification, advance)) => {
                self.offset += advance;
                Some(Ok(modification))
            }
            Err(error) => {
                self.poisoned = true;
                Some(Err(error))
            }
        }
    }
}
