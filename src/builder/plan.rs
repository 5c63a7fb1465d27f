use std::fmt::{Display, Error, Formatter};
use std::sync::OnceLock;

use tracing::{debug, trace};

use super::code::Code;
use crate::common::{
    codec::{encode_with_version, Segment},
    ec::{add_check_bytes, codeword_order},
    error::QRResult,
    iter::ZigZagIter,
    mask::MaskPattern,
    metadata::{ECLevel, Metadata, Version, MAX_VERSION},
};

// Module
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub enum Role {
    #[default]
    Empty,
    Position,
    Alignment,
    Timing,
    Format,
    Version,
    Unused,
    Data,
    Check,
    Extra,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let s = match self {
            Self::Empty => "empty",
            Self::Position => "position",
            Self::Alignment => "alignment",
            Self::Timing => "timing",
            Self::Format => "format",
            Self::Version => "version",
            Self::Unused => "unused",
            Self::Data => "data",
            Self::Check => "check",
            Self::Extra => "extra",
        };
        f.write_str(s)
    }
}

/// Planned state of a single module. `dark` already includes the mask, `invert`
/// records whether the mask flipped it, and `offset` locates the codeword bit
/// for data and check modules.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct Module {
    role: Role,
    dark: bool,
    invert: bool,
    offset: u32,
}

impl Module {
    pub const EMPTY: Module = Module { role: Role::Empty, dark: false, invert: false, offset: 0 };

    pub const fn new(role: Role, dark: bool) -> Self {
        Self { role, dark, invert: false, offset: 0 }
    }

    pub const fn with_offset(role: Role, offset: u32) -> Self {
        Self { role, dark: false, invert: false, offset }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn carries_bit(&self) -> bool {
        matches!(self.role, Role::Data | Role::Check)
    }

    fn flip(&mut self) {
        self.dark = !self.dark;
        self.invert = !self.invert;
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{}", self.role)?;
        if self.dark {
            f.write_str("+dark")?;
        }
        if self.invert {
            f.write_str("+invert")?;
        }
        write!(f, "+{}", self.offset)
    }
}

#[cfg(test)]
mod module_tests {
    use super::{Module, Role};

    #[test]
    fn test_display() {
        assert_eq!(Module::EMPTY.to_string(), "empty+0");
        assert_eq!(Module::new(Role::Position, true).to_string(), "position+dark+0");
        let mut m = Module::with_offset(Role::Data, 17);
        assert_eq!(m.to_string(), "data+17");
        m.flip();
        assert_eq!(m.to_string(), "data+dark+invert+17");
        m.flip();
        assert_eq!(m, Module::with_offset(Role::Data, 17));
    }

    #[test]
    fn test_carries_bit() {
        assert!(Module::with_offset(Role::Data, 0).carries_bit());
        assert!(Module::with_offset(Role::Check, 0).carries_bit());
        assert!(!Module::new(Role::Extra, false).carries_bit());
        assert!(!Module::new(Role::Format, true).carries_bit());
    }
}

// Plan
//------------------------------------------------------------------------------

/// Role of every module for one (version, level, mask) combination. Data-independent,
/// so a plan is built once and shared by every encode with the same parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
    data_bytes: usize,
    check_bytes: usize,
    blocks: usize,
}

impl Plan {
    /// Builds the full plan. Panics if the layout doesn't account for every module,
    /// which would mean the capacity tables are inconsistent.
    pub fn new(ver: Version, ecl: ECLevel, mask: MaskPattern) -> Self {
        let mut plan = Self::empty(ver, ecl, mask);
        plan.draw_all_function_patterns();
        plan.draw_version_info();
        plan.draw_format_info();
        plan.draw_encoding_region();
        plan.apply_mask();
        trace!(version = *ver, ec_level = %ecl, mask = *mask, "Plan built");
        plan
    }

    fn empty(ver: Version, ecl: ECLevel, mask: MaskPattern) -> Self {
        let w = ver.width();
        Self {
            grid: vec![Module::EMPTY; w * w],
            w,
            ver,
            ecl,
            mask,
            data_bytes: ver.data_codewords(ecl),
            check_bytes: ver.ecc_codewords(ecl),
            blocks: ver.block_count(ecl),
        }
    }

    /// Shared plan for the parameters, built on first use. Safe to call from many
    /// threads, each plan is constructed once.
    pub fn cached(ver: Version, ecl: ECLevel, mask: MaskPattern) -> &'static Plan {
        let idx = ((*ver - 1) * 4 + ecl as usize) * 8 + *mask as usize;
        PLAN_CACHE[idx].get_or_init(|| {
            debug!(version = *ver, ec_level = %ecl, mask = *mask, "Building plan");
            Self::new(ver, ecl, mask)
        })
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::new(self.ver, self.ecl, self.mask)
    }

    pub fn data_bytes(&self) -> usize {
        self.data_bytes
    }

    pub fn check_bytes(&self) -> usize {
        self.check_bytes
    }

    pub fn blocks(&self) -> usize {
        self.blocks
    }

    pub fn modules(&self) -> &[Module] {
        &self.grid
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.grid.iter().filter(|m| m.role == role).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let m = self.get(i, j);
                let c = match m.role {
                    Role::Empty => '.',
                    Role::Position => 'p',
                    Role::Alignment => 'a',
                    Role::Timing => 't',
                    Role::Format => 'm',
                    Role::Version => 'v',
                    Role::Unused => 'u',
                    Role::Data => 'd',
                    Role::Check => 'c',
                    Role::Extra => 'x',
                };
                res.push(if m.dark || m.role == Role::Empty { c } else { c.to_ascii_uppercase() });
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    // Each module is assigned exactly once
    fn set(&mut self, r: i16, c: i16, module: Module) {
        let idx = self.coord_to_index(r, c);
        debug_assert!(
            self.grid[idx].role == Role::Empty,
            "Module already assigned at ({r}, {c}): {}",
            self.grid[idx]
        );
        self.grid[idx] = module;
    }

    fn is_empty_at(&self, r: i16, c: i16) -> bool {
        self.get(r, c).role == Role::Empty
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl Plan {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Centered at (r, c), including the light separator on the sides facing inward
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_left, dr_right) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_top, dc_bottom) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_left..=dr_right {
            for j in dc_top..=dc_bottom {
                let dark = match (i, j) {
                    (4 | -4, _) | (_, 4 | -4) => false,
                    (3 | -3, _) | (_, 3 | -3) => true,
                    (2 | -2, _) | (_, 2 | -2) => false,
                    _ => true,
                };
                self.set(r + i, c + j, Module::new(Role::Position, dark));
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl Plan {
    // Fills row and column 6 wherever another pattern hasn't claimed the module
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        for i in 0..w {
            let m = Module::new(Role::Timing, i & 1 == 0);
            if self.is_empty_at(TIMING_LINE, i) {
                self.set(TIMING_LINE, i, m);
            }
            if self.is_empty_at(i, TIMING_LINE) {
                self.set(i, TIMING_LINE, m);
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl Plan {
    fn draw_alignment_patterns(&mut self) {
        let w = self.w;
        let anchors = self.ver.alignment_anchors().collect::<Vec<_>>();
        for &r in anchors.iter() {
            for &c in anchors.iter() {
                let near_top = r < 7;
                let near_left = c < 7;
                let near_bottom = r + 5 >= w - 7;
                let near_right = c + 5 >= w - 7;
                if (near_left && near_top) || (near_left && near_bottom) || (near_right && near_top)
                {
                    continue;
                }
                self.draw_alignment_pattern_at(r as i16, c as i16);
            }
        }
    }

    // Upper left corner at (r, c)
    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        for i in 0..5 {
            for j in 0..5 {
                let dark = matches!((i, j), (0 | 4, _) | (_, 0 | 4) | (2, 2));
                self.set(r + i, c + j, Module::new(Role::Alignment, dark));
            }
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl Plan {
    // Alignment goes before timing so that timing yields where they cross
    fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_alignment_patterns();
        self.draw_timing_pattern();
    }
}

// Format & version info
//------------------------------------------------------------------------------

/// 15-bit format word for the level and mask: 5 data bits, 10 BCH bits, then
/// the fixed XOR mask.
pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> u32 {
    let data = (ecl.format_bits() << 3) | *mask as u32;
    let mut rem = data << 10;
    for i in (10..15).rev() {
        if rem & (1 << i) != 0 {
            rem ^= FORMAT_GENERATOR << (i - 10);
        }
    }
    ((data << 10) | rem) ^ FORMAT_MASK
}

impl Plan {
    fn draw_version_info(&mut self) {
        let Some(mut info) = self.ver.version_pattern() else {
            return;
        };
        for i in 0..6 {
            for j in 0..3 {
                let m = Module::new(Role::Version, info & 1 == 1);
                self.set(-11 + j, i, m);
                self.set(i, -11 + j, m);
                info >>= 1;
            }
        }
    }

    // Both copies of the format word, LSB first, plus the always dark module
    fn draw_format_info(&mut self) {
        let info = format_info(self.ecl, self.mask);
        for i in 0..FORMAT_INFO_BIT_LEN as i16 {
            let mut m = Module::with_offset(Role::Format, i as u32);
            m.dark = (info >> i) & 1 == 1;
            m.invert = (FORMAT_MASK >> i) & 1 == 1;

            let main = match i {
                0..=5 => (i, 8),
                6 | 7 => (i + 1, 8),
                8 => (8, 7),
                _ => (8, 14 - i),
            };
            self.set(main.0, main.1, m);

            let side = if i < 8 { (8, -1 - i) } else { (i - 15, 8) };
            self.set(side.0, side.1, m);
        }
        self.set(-8, 8, Module::new(Role::Unused, true));
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl Plan {
    // Assigns codeword bits along the zigzag in interleaved order, then remainder bits
    fn draw_encoding_region(&mut self) {
        let order = codeword_order(self.ver, self.ecl);
        let data_bytes = self.data_bytes;
        let mut bits = order.into_iter().flat_map(|byte| {
            let role = if byte < data_bytes { Role::Data } else { Role::Check };
            (0..8).map(move |k| Module::with_offset(role, (byte * 8 + k) as u32))
        });

        let mut placed = 0;
        let mut extra = 0;
        for (r, c) in ZigZagIter::new(self.ver) {
            let (r, c) = (r as i16, c as i16);
            if !self.is_empty_at(r, c) {
                continue;
            }
            match bits.next() {
                Some(m) => {
                    self.set(r, c, m);
                    placed += 1;
                }
                None => {
                    self.set(r, c, Module::new(Role::Extra, false));
                    extra += 1;
                }
            }
        }

        let total_bits = self.ver.total_codewords() * 8;
        assert!(
            placed == total_bits && bits.next().is_none(),
            "Codeword bits don't fit the encoding region: Placed {placed}, Total {total_bits}"
        );
        assert!(
            extra == self.ver.remainder_bits(),
            "Remainder bits mismatch: Found {extra}, Expected {}",
            self.ver.remainder_bits()
        );
        assert!(
            !self.grid.contains(&Module::EMPTY),
            "Unassigned module left in version {}",
            self.ver
        );
    }

    fn apply_mask(&mut self) {
        let w = self.w;
        let mask = self.mask;
        for (i, m) in self.grid.iter_mut().enumerate() {
            let masked = matches!(m.role, Role::Data | Role::Check | Role::Extra);
            if masked && mask.invert(i / w, i % w) {
                m.flip();
            }
        }
    }
}


// Materializing codes
//------------------------------------------------------------------------------

impl Plan {
    pub fn encode(&self, seg: &Segment) -> QRResult<Code> {
        self.encode_into(Vec::new(), seg)
    }

    /// Encodes into `bitmap`, reusing its allocation. Existing contents are discarded.
    pub fn encode_into(&self, mut bitmap: Vec<u8>, seg: &Segment) -> QRResult<Code> {
        let mut bs = encode_with_version(seg, self.ver, self.ecl)?;
        add_check_bytes(&mut bs, self.ver, self.ecl);

        let w = self.w;
        let stride = (w + 7) >> 3;
        bitmap.clear();
        bitmap.resize(stride * w, 0);

        for (row, out) in self.grid.chunks_exact(w).zip(bitmap.chunks_exact_mut(stride)) {
            for (c, m) in row.iter().enumerate() {
                let mut dark = m.dark;
                if m.carries_bit() && bs.bit(m.offset as usize) {
                    dark = !dark;
                }
                if dark {
                    out[c >> 3] |= 1 << (7 - (c & 7));
                }
            }
        }

        Ok(Code::new(w, stride, bitmap, self.metadata()))
    }
}

#[cfg(test)]
mod materialize_tests {
    use super::Plan;
    use crate::common::codec::Segment;
    use crate::common::error::QRError;
    use crate::common::{ECLevel, MaskPattern, Version};

    #[test]
    fn test_encode_leaves_plan_unchanged() {
        let plan = Plan::new(Version::new(2), ECLevel::L, MaskPattern::new(0));
        let before = plan.clone();
        plan.encode(&Segment::auto("HELLO WORLD")).unwrap();
        plan.encode(&Segment::auto("other text")).unwrap();
        assert_eq!(plan, before);
    }

    #[test]
    fn test_function_modules_ignore_data() {
        let plan = Plan::new(Version::new(1), ECLevel::L, MaskPattern::new(0));
        let a = plan.encode(&Segment::auto("1")).unwrap();
        let b = plan.encode(&Segment::auto("ZZZZ")).unwrap();
        for (r, c) in [(0, 0), (3, 3), (6, 8), (8, 6), (13, 8), (7, 7)] {
            assert_eq!(a.is_black(c, r), b.is_black(c, r));
        }
    }

    #[test]
    fn test_encode_into_clears_buffer() {
        let plan = Plan::new(Version::new(1), ECLevel::L, MaskPattern::new(0));
        let fresh = plan.encode(&Segment::auto("123")).unwrap();
        let reused = plan.encode_into(vec![0xFF; 500], &Segment::auto("123")).unwrap();
        assert_eq!(fresh.bitmap(), reused.bitmap());
        assert_eq!(reused.bitmap().len(), 21 * 3);
    }

    #[test]
    fn test_encode_overflow() {
        let plan = Plan::new(Version::new(1), ECLevel::H, MaskPattern::new(0));
        let err = plan.encode(&Segment::auto("HELLO WORLD")).unwrap_err();
        assert_eq!(err, QRError::Overflow { bits: 74, capacity: 72 });
    }

    #[test]
    fn test_cached() {
        let ver = Version::new(3);
        let a = Plan::cached(ver, ECLevel::Q, MaskPattern::new(2));
        let b = Plan::cached(ver, ECLevel::Q, MaskPattern::new(2));
        assert!(std::ptr::eq(a, b));
        assert_eq!(*a, Plan::new(ver, ECLevel::Q, MaskPattern::new(2)));
        let c = Plan::cached(ver, ECLevel::Q, MaskPattern::new(3));
        assert!(!std::ptr::eq(a, c));
    }
}

// Global constants
//------------------------------------------------------------------------------

const TIMING_LINE: i16 = 6;

pub const FORMAT_INFO_BIT_LEN: usize = 15;

// x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
pub const FORMAT_GENERATOR: u32 = 0x537;

pub const FORMAT_MASK: u32 = 0x5412;

static PLAN_CACHE: [OnceLock<Plan>; MAX_VERSION * 4 * 8] =
    [const { OnceLock::new() }; MAX_VERSION * 4 * 8];
