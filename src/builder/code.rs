use std::io::Cursor;

use image::{GrayImage, ImageFormat, ImageResult, Luma};

use crate::common::{ECLevel, MaskPattern, Metadata, Version};

// Code
//------------------------------------------------------------------------------

/// Encoded symbol as a packed bitmap, one bit per module, MSB first within each
/// byte, 1 for dark. Rows start every `stride` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    bitmap: Vec<u8>,
    size: usize,
    stride: usize,
    meta: Metadata,
}

impl Code {
    pub(crate) fn new(size: usize, stride: usize, bitmap: Vec<u8>, meta: Metadata) -> Self {
        debug_assert!(stride * 8 >= size, "Stride too short: Size {size}, Stride {stride}");
        debug_assert_eq!(bitmap.len(), stride * size, "Bitmap length mismatch");
        Self { bitmap, size, stride, meta }
    }

    /// Modules per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    /// Releases the bitmap so its allocation can be handed back to `encode_into`.
    pub fn into_bitmap(self) -> Vec<u8> {
        self.bitmap
    }

    pub fn metadata(&self) -> Metadata {
        self.meta
    }

    pub fn version(&self) -> Version {
        self.meta.version
    }

    pub fn ec_level(&self) -> ECLevel {
        self.meta.ec_level
    }

    pub fn mask(&self) -> MaskPattern {
        self.meta.mask
    }

    /// Whether the module at column `x`, row `y` is dark. Out of range is light.
    pub fn is_black(&self, x: i32, y: i32) -> bool {
        let sz = self.size as i32;
        if !(0..sz).contains(&x) || !(0..sz).contains(&y) {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        self.bitmap[y * self.stride + (x >> 3)] & (1 << (7 - (x & 7))) != 0
    }

    pub fn count_dark_modules(&self) -> usize {
        let sz = self.size as i32;
        (0..sz).flat_map(|y| (0..sz).map(move |x| (x, y))).filter(|&(x, y)| self.is_black(x, y)).count()
    }
}


// Render
//------------------------------------------------------------------------------

impl Code {
    /// Grayscale image with `module_sz` pixels per module and a 4 module quiet zone.
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let qz_sz = QUIET_ZONE * module_sz;
        let qr_sz = self.size as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        GrayImage::from_fn(total_sz, total_sz, |j, i| {
            let r = (i / module_sz) as i32 - QUIET_ZONE as i32;
            let c = (j / module_sz) as i32 - QUIET_ZONE as i32;
            if self.is_black(c, r) {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }

    /// PNG encoded [`Code::to_image`].
    pub fn to_png(&self, module_sz: u32) -> ImageResult<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.to_image(module_sz).write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    /// Text rendering for terminals with a light background character per module.
    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = QUIET_ZONE as usize * module_sz;
        let qr_sz = self.size * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz * 3 + 1));
        for i in 0..total_sz {
            for j in 0..total_sz {
                let r = (i / module_sz) as i32 - QUIET_ZONE as i32;
                let c = (j / module_sz) as i32 - QUIET_ZONE as i32;
                canvas.push(if self.is_black(c, r) { ' ' } else { '█' });
            }
            canvas.push('\n');
        }

        canvas
    }

    /// ANSI colored rendering, two terminal columns per module.
    pub fn to_ascii(&self) -> String {
        let mut res = String::from(ANSI_RESET);
        self.push_ascii_border(&mut res);
        for y in 0..self.size as i32 {
            res.push_str(ANSI_WHITE);
            res.push_str(ASCII_MARGIN);
            for x in 0..self.size as i32 {
                res.push_str(if self.is_black(x, y) { ANSI_BLACK } else { ANSI_WHITE });
                res.push_str("  ");
            }
            res.push_str(ANSI_WHITE);
            res.push_str(ASCII_MARGIN);
            res.push_str(ANSI_RESET);
            res.push('\n');
        }
        self.push_ascii_border(&mut res);
        res
    }

    fn push_ascii_border(&self, res: &mut String) {
        for _ in 0..2 {
            res.push_str(ANSI_WHITE);
            res.push_str(ASCII_MARGIN);
            res.push_str(&"  ".repeat(self.size));
            res.push_str(ASCII_MARGIN);
            res.push_str(ANSI_RESET);
            res.push('\n');
        }
    }
}

#[cfg(test)]
mod render_tests {
    use image::ImageFormat;

    use super::{Code, ANSI_BLACK, ANSI_RESET, ANSI_WHITE};
    use crate::builder::encode;
    use crate::common::{ECLevel, MaskPattern, Metadata, Version};

    fn code_2x2() -> Code {
        let bitmap = vec![0b10000000, 0b01000000];
        let meta = Metadata::new(Version::new(1), ECLevel::L, MaskPattern::new(0));
        Code::new(2, 1, bitmap, meta)
    }

    #[test]
    fn test_to_image() {
        let img = code_2x2().to_image(3);
        assert_eq!(img.dimensions(), (30, 30));
        assert_eq!(img.get_pixel(0, 0).0, [255]);
        assert_eq!(img.get_pixel(12, 12).0, [0]);
        assert_eq!(img.get_pixel(14, 14).0, [0]);
        assert_eq!(img.get_pixel(15, 12).0, [255]);
        assert_eq!(img.get_pixel(16, 16).0, [0]);
        assert_eq!(img.get_pixel(29, 29).0, [255]);
    }

    #[test]
    fn test_to_png() {
        let code = encode("hello, world", ECLevel::L).unwrap();
        let scale = 8;
        let png = code.to_png(scale).unwrap();
        let img = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap().to_luma8();

        let total_sz = (code.size() as u32 + 8) * scale;
        assert_eq!(img.dimensions(), (total_sz, total_sz));
        for (x, y, px) in img.enumerate_pixels() {
            let exp = if code.is_black((x / scale) as i32 - 4, (y / scale) as i32 - 4) { 0 } else { 255 };
            assert_eq!(px.0, [exp], "Pixel mismatch at ({x}, {y})");
        }
    }

    #[test]
    fn test_to_str() {
        let s = code_2x2().to_str(1);
        let rows = s.lines().collect::<Vec<_>>();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0], "██████████");
        assert_eq!(rows[4], "████ █████");
        assert_eq!(rows[5], "█████ ████");
    }

    #[test]
    fn test_to_ascii() {
        let s = code_2x2().to_ascii();
        let rows = s.lines().collect::<Vec<_>>();
        assert_eq!(rows.len(), 6);
        assert!(rows[0].starts_with(ANSI_RESET));
        let exp = format!("{ANSI_WHITE}    {ANSI_BLACK}  {ANSI_WHITE}  {ANSI_WHITE}    {ANSI_RESET}");
        assert_eq!(rows[2], exp);
    }
}

// Global constants
//------------------------------------------------------------------------------

pub const QUIET_ZONE: u32 = 4;

const ASCII_MARGIN: &str = "    ";

const ANSI_BLACK: &str = "\x1b[30;40m";

const ANSI_WHITE: &str = "\x1b[30;47m";

const ANSI_RESET: &str = "\x1b[0m";
