use std::fmt::{Display, Error, Formatter};

use crate::common::metadata::Version;

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
}

impl Mode {
    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => {
                matches!(byte, b'0'..=b'9' | b'A'..=b'Z' | b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/' | b':')
            }
            Self::Byte => true,
        }
    }

    // Payload bits for `len` characters, excluding the header
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10 + 2) / 3,
            Self::Alphanumeric => (len * 11 + 1) / 2,
            Self::Byte => len * 8,
        }
    }
}


// Segment
//------------------------------------------------------------------------------

/// Text paired with the mode it is encoded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub mode: Mode,
    pub data: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn new(mode: Mode, data: &'a [u8]) -> Self {
        Self { mode, data }
    }

    pub fn numeric(text: &'a str) -> Self {
        Self::new(Mode::Numeric, text.as_bytes())
    }

    pub fn alphanumeric(text: &'a str) -> Self {
        Self::new(Mode::Alphanumeric, text.as_bytes())
    }

    pub fn byte(text: &'a str) -> Self {
        Self::new(Mode::Byte, text.as_bytes())
    }

    /// Picks the most compact mode that can hold all of `text`, in the order numeric,
    /// alphanumeric, byte.
    pub fn auto(text: &'a str) -> Self {
        let data = text.as_bytes();
        let mode = MODES
            .iter()
            .copied()
            .find(|m| data.iter().all(|b| m.contains(*b)))
            .unwrap_or(Mode::Byte);
        Self::new(mode, data)
    }

    /// Whether every character is valid in the segment's mode.
    pub fn check(&self) -> bool {
        self.data.iter().all(|b| self.mode.contains(*b))
    }

    pub fn bit_len(&self, ver: Version) -> usize {
        let encoded_bits = self.mode.encoded_len(self.data.len());
        ver.mode_bits() + ver.char_cnt_bits(self.mode) + encoded_bits
    }
}

impl Display for Segment<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{:?}({:?})", self.mode, String::from_utf8_lossy(self.data))
    }
}


// Global constants
//------------------------------------------------------------------------------

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

pub static MODES: [Mode; 3] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
