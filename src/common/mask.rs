use std::ops::Deref;

use super::error::{QRError, QRResult};

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    /// Panics if `pattern` is not in 0..8; use `MaskPattern::try_from` for untrusted input.
    pub const fn new(pattern: u8) -> Self {
        assert!(pattern < 8, "Invalid masking pattern");
        Self(pattern)
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(Self)
    }
}

impl Default for MaskPattern {
    fn default() -> Self {
        Self(0)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<u8> for MaskPattern {
    type Error = QRError;
    fn try_from(pattern: u8) -> QRResult<Self> {
        if pattern < 8 {
            Ok(Self(pattern))
        } else {
            Err(QRError::InvalidMask(pattern))
        }
    }
}

mod mask_functions {
    pub fn checkerboard(r: usize, c: usize) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: usize, _: usize) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: usize, c: usize) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: usize, c: usize) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: usize, c: usize) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: usize, c: usize) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: usize, c: usize) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: usize, c: usize) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

static MASK_FUNCTIONS: [fn(usize, usize) -> bool; 8] = [
    mask_functions::checkerboard,
    mask_functions::horizontal_lines,
    mask_functions::vertical_lines,
    mask_functions::diagonal_lines,
    mask_functions::large_checkerboard,
    mask_functions::fields,
    mask_functions::diamonds,
    mask_functions::meadow,
];

impl MaskPattern {
    pub fn mask_function(self) -> fn(usize, usize) -> bool {
        MASK_FUNCTIONS[self.0 as usize]
    }

    /// Whether the module at row `r`, column `c` is flipped by this mask.
    pub fn invert(self, r: usize, c: usize) -> bool {
        (self.mask_function())(r, c)
    }
}
