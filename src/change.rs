//! Modification operation semantics.
//!
//! Every operation runs at the width of the cell it targets, so the
//! same command behaves consistently on 8-bit and 16-bit hardware:
//! wrapping wraps at the cell width, saturation clamps to the cell
//! maximum, shifts zero-fill within the cell width.

/// Operation combining a command delta with a channel's current value
///
/// Raw values 0 to 6 are the wire opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PixelChange {
    /// Replace the value
    Set = 0,
    /// Add, wrapping at the cell width
    Add = 1,
    /// Subtract, wrapping at the cell width
    Subtract = 2,
    /// Add, clamping at the cell maximum
    SaturatingAdd = 3,
    /// Subtract, clamping at zero
    SaturatingSub = 4,
    /// Zero-filling left shift
    ShiftLeft = 5,
    /// Zero-filling right shift
    ShiftRight = 6,
}

impl PixelChange {
    /// Decode a wire opcode
    ///
    /// Returns None for values above 6
    pub fn from_raw(raw: u8) -> Option<Self> {
        Some(match raw {
            0 => Self::Set,
            1 => Self::Add,
            2 => Self::Subtract,
            3 => Self::SaturatingAdd,
            4 => Self::SaturatingSub,
            5 => Self::ShiftLeft,
            6 => Self::ShiftRight,
            _ => return None,
        })
    }

    /// Wire opcode of the operation
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Operator notation, for diagnostics
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Set => "=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::SaturatingAdd => "+:",
            Self::SaturatingSub => "-:",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
        }
    }

    /// Combine a delta into an 8-bit cell value
    #[inline]
    pub const fn apply8(self, value: u8, delta: u8) -> u8 {
        match self {
            Self::Set => delta,
            Self::Add => value.wrapping_add(delta),
            Self::Subtract => value.wrapping_sub(delta),
            Self::SaturatingAdd => value.saturating_add(delta),
            Self::SaturatingSub => value.saturating_sub(delta),
            Self::ShiftLeft => {
                if delta < 8 { value << delta } else { 0 }
            }
            Self::ShiftRight => {
                if delta < 8 { value >> delta } else { 0 }
            }
        }
    }

    /// Combine a delta into a 16-bit cell value
    #[inline]
    pub const fn apply16(self, value: u16, delta: u16) -> u16 {
        match self {
            Self::Set => delta,
            Self::Add => value.wrapping_add(delta),
            Self::Subtract => value.wrapping_sub(delta),
            Self::SaturatingAdd => value.saturating_add(delta),
            Self::SaturatingSub => value.saturating_sub(delta),
            Self::ShiftLeft => {
                if delta < 16 { value << delta } else { 0 }
            }
            Self::ShiftRight => {
                if delta < 16 { value >> delta } else { 0 }
            }
        }
    }
}
