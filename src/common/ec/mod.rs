mod galois;

pub use galois::*;

use std::ops::Deref;

use tracing::trace;

use super::bit_utils::BitStream;
use super::metadata::{ECLevel, Version};

// Blocks
//------------------------------------------------------------------------------

/// Data codewords in each block. When the data doesn't split evenly, the last
/// blocks carry one extra codeword.
pub fn block_sizes(version: Version, ec_level: ECLevel) -> impl Iterator<Item = usize> {
    let data_len = version.data_codewords(ec_level);
    let block_count = version.block_count(ec_level);
    let base = data_len / block_count;
    let extra = data_len % block_count;
    (0..block_count).map(move |i| base + (i >= block_count - extra) as usize)
}

pub fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    debug_assert!(
        version.data_codewords(ec_level) == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        version.data_codewords(ec_level)
    );

    let mut rest = data;
    block_sizes(version, ec_level)
        .map(|sz| {
            let (block, tail) = rest.split_at(sz);
            rest = tail;
            block
        })
        .collect()
}

#[cfg(test)]
mod block_tests {
    use test_case::test_case;

    use super::{block_sizes, blockify};
    use crate::common::metadata::{ECLevel, Version};

    #[test_case(1, ECLevel::M, vec![16])]
    #[test_case(5, ECLevel::Q, vec![15, 15, 16, 16])]
    #[test_case(5, ECLevel::H, vec![11, 11, 12, 12])]
    #[test_case(6, ECLevel::L, vec![68, 68])]
    fn test_block_sizes(v: usize, ecl: ECLevel, exp: Vec<usize>) {
        assert_eq!(block_sizes(Version::new(v), ecl).collect::<Vec<_>>(), exp);
    }

    #[test]
    fn test_block_sizes_sum() {
        for ver in Version::all() {
            for ecl in ECLevel::ALL {
                let sizes = block_sizes(ver, ecl).collect::<Vec<_>>();
                assert_eq!(sizes.len(), ver.block_count(ecl));
                assert_eq!(sizes.iter().sum::<usize>(), ver.data_codewords(ecl));
                assert!(sizes.windows(2).all(|w| w[0] <= w[1] && w[1] - w[0] <= 1));
            }
        }
    }

    #[test]
    fn test_blockify() {
        let data = (0..62u8).collect::<Vec<_>>();
        let blocks = blockify(&data, Version::new(5), ECLevel::Q);
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0], &data[..15]);
        assert_eq!(blocks[1], &data[15..30]);
        assert_eq!(blocks[2], &data[30..46]);
        assert_eq!(blocks[3], &data[46..]);
    }
}

// Error correction codewords
//------------------------------------------------------------------------------

// ECC: Error Correction Codeword generator
pub fn ecc(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<Vec<u8>> {
    let rs = RsEncoder::new(version.ecc_per_block(ec_level));
    blockify(data, version, ec_level).iter().map(|b| rs.ecc(b)).collect()
}

/// Appends the check bytes of every block, block by block, after the data codewords.
pub fn add_check_bytes(bs: &mut BitStream, version: Version, ec_level: ECLevel) {
    let data_bits = version.data_bit_capacity(ec_level);
    assert!(
        bs.len() == data_bits,
        "Data must fill the capacity before adding check bytes: Len {}, Capacity {data_bits}",
        bs.len()
    );

    let ecc_blocks = ecc(bs.data(), version, ec_level);
    trace!(blocks = ecc_blocks.len(), ecc_per_block = version.ecc_per_block(ec_level), "Check bytes");

    bs.reserve(version.ecc_codewords(ec_level) << 3);
    for b in ecc_blocks.iter() {
        bs.extend(b);
    }
    assert_eq!(
        bs.len(),
        version.total_codewords() << 3,
        "Check bytes must complete the symbol: Version {}, Ec level {ec_level}",
        *version
    );
}


// Interleaving
//------------------------------------------------------------------------------

/// Takes the first item of each block, then the second, and so on. Shorter
/// blocks are skipped once exhausted.
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

/// Byte offsets into the block-ordered codeword stream, listed in the order the
/// codewords are placed in the symbol: interleaved data followed by interleaved
/// check bytes.
pub fn codeword_order(version: Version, ec_level: ECLevel) -> Vec<usize> {
    let data_len = version.data_codewords(ec_level);
    let ecc_len = version.ecc_per_block(ec_level);

    let mut start = 0;
    let data_blocks = block_sizes(version, ec_level)
        .map(|sz| {
            let block = (start..start + sz).collect::<Vec<_>>();
            start += sz;
            block
        })
        .collect::<Vec<_>>();
    let check_blocks = (0..version.block_count(ec_level))
        .map(|i| {
            let s = data_len + i * ecc_len;
            (s..s + ecc_len).collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let mut order = interleave(&data_blocks);
    order.extend(interleave(&check_blocks));
    order
}
