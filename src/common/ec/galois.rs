// Galois field GF(256)
//------------------------------------------------------------------------------

// Reducing polynomial x^8 + x^4 + x^3 + x^2 + 1
const PRIMITIVE: u16 = 0x11D;

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    table[255] = table[0];
    table
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Powers of the generator 2, `EXP_TABLE[i] = 2^i`.
pub static EXP_TABLE: [u8; 256] = build_exp_table();

/// Inverse of `EXP_TABLE`. Entry 0 is unused since 0 has no logarithm.
pub static LOG_TABLE: [u8; 256] = build_log_table();

#[inline]
pub fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let log_sum = LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize;
    debug_assert!(log_sum < 510, "Log sum has crossed 510: {log_sum}");
    EXP_TABLE[log_sum % 255]
}

#[cfg(test)]
mod galois_tests {
    use super::{gf_mul, EXP_TABLE, LOG_TABLE};

    #[test]
    fn test_exp_table() {
        assert_eq!(EXP_TABLE[0], 1);
        assert_eq!(EXP_TABLE[1], 2);
        assert_eq!(EXP_TABLE[7], 128);
        assert_eq!(EXP_TABLE[8], 29);
        assert_eq!(EXP_TABLE[254], 142);
    }

    #[test]
    fn test_log_inverts_exp() {
        for i in 0..255 {
            assert_eq!(LOG_TABLE[EXP_TABLE[i] as usize] as usize, i);
        }
    }

    #[test]
    fn test_gf_mul() {
        assert_eq!(gf_mul(0, 7), 0);
        assert_eq!(gf_mul(1, 7), 7);
        assert_eq!(gf_mul(2, 128), 29);
        for a in 1..=255u8 {
            let inv = EXP_TABLE[(255 - LOG_TABLE[a as usize] as usize) % 255];
            assert_eq!(gf_mul(a, inv), 1);
        }
    }
}

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Systematic Reed-Solomon encoder producing a fixed number of check bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsEncoder {
    // Generator polynomial, highest degree first, leading coefficient 1
    gen: Vec<u8>,
}

impl RsEncoder {
    /// Encoder whose generator is the product of (x - 2^i) for i in 0..ecc_len.
    pub fn new(ecc_len: usize) -> Self {
        let mut gen = Vec::with_capacity(ecc_len + 1);
        gen.push(1u8);
        for i in 0..ecc_len {
            let root = EXP_TABLE[i % 255];
            gen.push(0);
            for j in (1..gen.len()).rev() {
                gen[j] ^= gf_mul(gen[j - 1], root);
            }
        }
        Self { gen }
    }

    pub fn ecc_len(&self) -> usize {
        self.gen.len() - 1
    }

    #[cfg(test)]
    pub fn generator(&self) -> &[u8] {
        &self.gen
    }

    /// Remainder of `data * x^ecc_len` divided by the generator polynomial.
    pub fn ecc(&self, data: &[u8]) -> Vec<u8> {
        let len = data.len();
        let mut res = data.to_vec();
        res.resize(len + self.ecc_len(), 0);

        for i in 0..len {
            let lead_coeff = res[i];
            if lead_coeff == 0 {
                continue;
            }
            for (u, g) in res[i + 1..].iter_mut().zip(self.gen[1..].iter()) {
                *u ^= gf_mul(*g, lead_coeff);
            }
        }

        res.split_off(len)
    }
}
