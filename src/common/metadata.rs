use std::fmt::{Display, Error, Formatter};
use std::ops::Deref;

use super::codec::Mode;
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;
use super::version_db::{VersionInfo, VERSION_DB};

// Metadata
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Metadata {
    pub version: Version,
    pub ec_level: ECLevel,
    pub mask: MaskPattern,
}

impl Metadata {
    pub fn new(version: Version, ec_level: ECLevel, mask: MaskPattern) -> Self {
        Self { version, ec_level, mask }
    }
}

impl Display for Metadata {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(
            f,
            "{{ Version: {}, Ec level: {}, Mask: {} }}",
            self.version, self.ec_level, *self.mask
        )
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for Version {
    type Error = QRError;
    fn try_from(v: usize) -> QRResult<Self> {
        if (MIN_VERSION..=MAX_VERSION).contains(&v) {
            Ok(Self(v))
        } else {
            Err(QRError::InvalidVersion(v))
        }
    }
}

impl Version {
    /// Panics if `v` is outside 1..=40; use `Version::try_from` for untrusted input.
    pub const fn new(v: usize) -> Self {
        assert!(MIN_VERSION <= v && v <= MAX_VERSION, "Invalid QR version");
        Self(v)
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (MIN_VERSION..=MAX_VERSION).map(Self)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    // Bucket that sizes the character count field
    pub const fn size_class(self) -> usize {
        match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        }
    }

    pub fn info(self) -> &'static VersionInfo {
        &VERSION_DB[self.0]
    }

    pub fn total_codewords(self) -> usize {
        self.info().total_codewords
    }

    pub fn block_count(self, ecl: ECLevel) -> usize {
        self.info().levels[ecl as usize].0
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        self.info().levels[ecl as usize].1
    }

    pub fn ecc_codewords(self, ecl: ECLevel) -> usize {
        let (blocks, ecc) = self.info().levels[ecl as usize];
        blocks * ecc
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.ecc_codewords(ecl)
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    pub fn remainder_bits(self) -> usize {
        self.info().remainder_bits
    }

    pub fn version_pattern(self) -> Option<u32> {
        match self.info().pattern {
            0 => None,
            p => Some(p),
        }
    }

    pub fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let sc = self.size_class();
        match mode {
            Mode::Numeric => [10, 12, 14][sc],
            Mode::Alphanumeric => [9, 11, 13][sc],
            Mode::Byte => [8, 16, 16][sc],
        }
    }

    /// Upper left coordinates of alignment patterns along either axis.
    pub fn alignment_anchors(self) -> impl Iterator<Item = usize> {
        let VersionInfo { apos, astride, .. } = *self.info();
        let w = self.width();
        std::iter::successors(Some(4), move |&a| Some(if a == 4 { apos } else { a + astride }))
            .take_while(move |&a| a + 5 < w)
    }
}


// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    // Level bits as stored in format info: L=01, M=00, Q=11, H=10
    pub fn format_bits(self) -> u32 {
        self as u32 ^ 1
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let s = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod ec_level_tests {
    use super::ECLevel;

    #[test]
    fn test_format_bits() {
        assert_eq!(ECLevel::L.format_bits(), 0b01);
        assert_eq!(ECLevel::M.format_bits(), 0b00);
        assert_eq!(ECLevel::Q.format_bits(), 0b11);
        assert_eq!(ECLevel::H.format_bits(), 0b10);
    }

    #[test]
    fn test_display() {
        let s: Vec<_> = ECLevel::ALL.iter().map(|l| l.to_string()).collect();
        assert_eq!(s, ["L", "M", "Q", "H"]);
    }
}

// Global constants
//------------------------------------------------------------------------------

pub const MIN_VERSION: usize = 1;

pub const MAX_VERSION: usize = 40;
