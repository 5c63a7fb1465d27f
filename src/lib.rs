//! # qrcoding
//!
//! A Rust library for encoding text into QR code symbols (Model 2, versions 1-40) with
//! Reed-Solomon error correction.
//!
//! ## Features
//!
//! - **Automatic sizing**: Picks the most compact mode and the smallest version that fits
//! - **Error correction levels**: L, M, Q and H with block interleaving per the symbol tables
//! - **Cached layout plans**: Module roles for every (version, level, mask) are computed once and shared across threads
//! - **Buffer reuse**: Encode into a caller provided bitmap to avoid reallocating
//! - **Rendering**: Grayscale images, PNG bytes, plain text and ANSI terminal output
//!
//! ## Quick Start
//!
//! ### Simple Encoding
//!
//! ```rust
//! use qrcoding::{encode, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = encode("HELLO WORLD", ECLevel::L)?;
//! assert_eq!(code.size(), 21);
//!
//! let img = code.to_image(4);  // 4 pixels per module
//! assert_eq!(img.width(), (21 + 8) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrcoding::{QRBuilder, ECLevel, Version, MaskPattern};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = QRBuilder::new("Hello, World!")
//!     .version(Version::new(2))     // QR version (size) - if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)         // Error correction level - if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3))    // Mask pattern - if not provided, defaults to pattern 0
//!     .build()?;
//!
//! assert!(code.is_black(0, 0));
//! assert!(!code.is_black(-1, 0));
//! # Ok(())
//! # }
//! ```
//!
//! ### Reusing Buffers
//!
//! ```rust
//! use qrcoding::{encode_into, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut buf = Vec::new();
//! for text in ["0123", "4567", "89"] {
//!     let code = encode_into(buf, text, ECLevel::M)?;
//!     print!("{}", code.to_ascii());
//!     buf = code.into_bitmap();
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ### Modes
//! - **Numeric**: Digits 0-9, 10 bits per 3 digits
//! - **Alphanumeric**: 0-9, A-Z, space and `$%*+-./:`, 11 bits per 2 characters
//! - **Byte**: Raw UTF-8 bytes, 8 bits each

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{encode, encode_into, Code, Module, Plan, QRBuilder, Role};
pub use common::codec::{Mode, Segment};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Metadata, Version};
