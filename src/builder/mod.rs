mod code;
mod plan;

pub use code::{Code, QUIET_ZONE};
pub use plan::{format_info, Module, Plan, Role};

use tracing::debug;

use crate::common::{
    codec::{find_min_version, Segment},
    error::QRResult,
    mask::MaskPattern,
    metadata::{ECLevel, Version},
};

/// Encodes `text` at `ec_level` in the smallest version that fits, using the most
/// compact of numeric, alphanumeric or byte mode and mask pattern 0.
pub fn encode(text: &str, ec_level: ECLevel) -> QRResult<Code> {
    encode_into(Vec::new(), text, ec_level)
}

/// Same as [`encode`], writing the bitmap into `bitmap` and reusing its allocation.
pub fn encode_into(bitmap: Vec<u8>, text: &str, ec_level: ECLevel) -> QRResult<Code> {
    QRBuilder::new(text).ec_level(ec_level).build_into(bitmap)
}

pub struct QRBuilder<'a> {
    text: &'a str,
    version: Option<Version>,
    ec_level: ECLevel,
    mask: MaskPattern,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, version: None, ec_level: ECLevel::M, mask: MaskPattern::default() }
    }

    pub fn text(&mut self, text: &'a str) -> &mut Self {
        self.text = text;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = mask;
        self
    }

    pub fn metadata(&self) -> String {
        match self.version {
            Some(v) => format!(
                "{{ Version: {}, Ec level: {}, Mask: {} }}",
                v, self.ec_level, *self.mask
            ),
            None => format!("{{ Version: None, Ec level: {}, Mask: {} }}", self.ec_level, *self.mask),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<Code> {
        self.build_into(Vec::new())
    }

    pub fn build_into(&self, bitmap: Vec<u8>) -> QRResult<Code> {
        debug!("Generating QR {}", self.metadata());

        let seg = Segment::auto(self.text);
        let version = match self.version {
            Some(v) => v,
            None => find_min_version(&seg, self.ec_level)?,
        };
        debug!(segment = %seg, version = *version, "Encoding data");

        let plan = Plan::cached(version, self.ec_level, self.mask);
        let code = plan.encode_into(bitmap, &seg)?;

        debug!(
            size = code.size(),
            dark_modules = code.count_dark_modules(),
            "QR generated {}",
            code.metadata()
        );
        Ok(code)
    }
}
