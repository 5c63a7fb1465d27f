pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use tracing::debug;

    use super::writer::{pad_remaining_capacity, push_segment, push_terminator};
    use crate::common::bit_utils::BitStream;
    use crate::common::codec::Segment;
    use crate::common::error::{QRError, QRResult};
    use crate::common::metadata::{ECLevel, Version, MAX_VERSION};

    /// Smallest version whose data capacity at `ecl` holds the segment.
    pub fn find_min_version(seg: &Segment, ecl: ECLevel) -> QRResult<Version> {
        match Version::all().find(|&v| seg.bit_len(v) <= v.data_bit_capacity(ecl)) {
            Some(ver) => {
                debug!(mode = ?seg.mode, version = *ver, ec_level = %ecl, "Selected version");
                Ok(ver)
            }
            None => {
                let max = Version::new(MAX_VERSION);
                Err(QRError::TooLong { bits: seg.bit_len(max), capacity: max.data_bit_capacity(ecl) })
            }
        }
    }

    /// Serializes the segment and pads it to the data capacity of `ver` at `ecl`.
    pub fn encode_with_version(seg: &Segment, ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
        if !seg.check() {
            return Err(QRError::UnsupportedEncoding);
        }
        let bcap = ver.data_bit_capacity(ecl);
        let sz = seg.bit_len(ver);
        if sz > bcap {
            return Err(QRError::Overflow { bits: sz, capacity: bcap });
        }

        let mut bs = BitStream::new(bcap);
        push_segment(seg, ver, &mut bs);
        debug_assert_eq!(bs.len(), sz, "Segment bit length mismatch");
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        Ok(bs)
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use crate::common::bit_utils::BitStream;
    use crate::common::codec::{Mode, Segment, PADDING_CODEWORDS};
    use crate::common::metadata::Version;

    pub fn push_segment(seg: &Segment, ver: Version, out: &mut BitStream) {
        push_header(seg, ver, out);
        match seg.mode {
            Mode::Numeric => push_numeric_data(seg.data, out),
            Mode::Alphanumeric => push_alphanumeric_data(seg.data, out),
            Mode::Byte => push_byte_data(seg.data, out),
        }
    }

    fn push_header(seg: &Segment, ver: Version, out: &mut BitStream) {
        out.push_bits(seg.mode as u8, ver.mode_bits());
        let len_bits = ver.char_cnt_bits(seg.mode);
        let char_cnt = seg.data.len();
        debug_assert!(
            char_cnt < (1 << len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
        );
        out.push_bits(char_cnt as u16, len_bits);
    }

    fn push_numeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(3) {
            let len = (chunk.len() * 10 + 2) / 3;
            let data = Mode::Numeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(2) {
            let len = (chunk.len() * 11 + 1) / 2;
            let data = Mode::Alphanumeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    fn push_byte_data(data: &[u8], out: &mut BitStream) {
        for b in data {
            out.push_bits(*b, 8);
        }
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0u8, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0u8, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(offset == 0, "Bit offset should be zero before padding codewords: {offset}");

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

    #[cfg(test)]
    mod writer_tests {
        use super::{
            push_alphanumeric_data, push_byte_data, push_header, push_numeric_data,
            push_padding_bits, push_padding_codewords, push_terminator,
        };
        use crate::common::bit_utils::BitStream;
        use crate::common::codec::{Mode, Segment, PADDING_CODEWORDS};
        use crate::common::metadata::{ECLevel, Version};

        fn push_and_pad(f: impl Fn(&mut BitStream)) -> Vec<u8> {
            let mut bs = BitStream::new(128);
            f(&mut bs);
            push_padding_bits(&mut bs);
            bs.data().to_vec()
        }

        #[test]
        fn test_push_header_v1() {
            let ver = Version::new(1);
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111100],
                vec![0b00101111, 0b11111000],
                vec![0b01001111, 0b11110000],
            ];
            let dummy_vec = vec![0; 1023];
            let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
            let dummy_idx = [1023, 511, 255];
            for ((mode, di), exp_vec) in modes.iter().zip(dummy_idx.iter()).zip(exp_vecs.iter()) {
                let seg = Segment::new(*mode, &dummy_vec[..*di]);
                assert_eq!(&push_and_pad(|bs| push_header(&seg, ver, bs)), exp_vec);
            }
        }

        #[test]
        fn test_push_header_v10() {
            let ver = Version::new(10);
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111111],
                vec![0b00101111, 0b11111110],
                vec![0b01001111, 0b11111111, 0b11110000],
            ];
            let dummy_vec = vec![0; 65535];
            let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
            let dummy_idx = [4095, 2047, 65535];
            for ((mode, di), exp_vec) in modes.iter().zip(dummy_idx.iter()).zip(exp_vecs.iter()) {
                let seg = Segment::new(*mode, &dummy_vec[..*di]);
                assert_eq!(&push_and_pad(|bs| push_header(&seg, ver, bs)), exp_vec);
            }
        }

        #[test]
        fn test_push_header_v27() {
            let ver = Version::new(27);
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111111, 0b11000000],
                vec![0b00101111, 0b11111111, 0b10000000],
                vec![0b01001111, 0b11111111, 0b11110000],
            ];
            let dummy_vec = vec![0; 65535];
            let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
            let dummy_idx = [16383, 8191, 65535];
            for ((mode, di), exp_vec) in modes.iter().zip(dummy_idx.iter()).zip(exp_vecs.iter()) {
                let seg = Segment::new(*mode, &dummy_vec[..*di]);
                assert_eq!(&push_and_pad(|bs| push_header(&seg, ver, bs)), exp_vec);
            }
        }

        #[test]
        fn test_push_numeric_data() {
            let out = push_and_pad(|bs| push_numeric_data("01234567".as_bytes(), bs));
            assert_eq!(out, vec![0b00000011, 0b00010101, 0b10011000, 0b01100000]);
            let out = push_and_pad(|bs| push_numeric_data("8".as_bytes(), bs));
            assert_eq!(out, vec![0b10000000]);
        }

        #[test]
        fn test_push_alphanumeric_data() {
            let out = push_and_pad(|bs| push_alphanumeric_data("AC-42".as_bytes(), bs));
            assert_eq!(out, vec![0b00111001, 0b11011100, 0b11100100, 0b00100000]);
        }

        #[test]
        fn test_push_byte_data() {
            let out = push_and_pad(|bs| push_byte_data("a".as_bytes(), bs));
            assert_eq!(out, vec![0b01100001]);
        }

        #[test]
        fn test_push_terminator() {
            let bit_capacity = Version::new(1).data_bit_capacity(ECLevel::L);
            let capacity = bit_capacity >> 3;
            let mut bs = BitStream::new(bit_capacity);
            bs.push_bits(0b1u8, 1);
            push_terminator(&mut bs);
            assert_eq!(bs.len(), 5);
            push_padding_bits(&mut bs);
            for _ in 0..capacity - 1 {
                bs.push_bits(0b11111111u8, 8);
            }
            assert_eq!(bs.len(), bit_capacity);
            push_terminator(&mut bs);
            assert_eq!(bs.len(), bit_capacity);
        }

        #[test]
        fn test_push_short_terminator() {
            let mut bs = BitStream::new(16);
            bs.push_bits(0x3FFFu16, 14);
            push_terminator(&mut bs);
            assert_eq!(bs.len(), 16);
            assert_eq!(bs.data(), [0xFF, 0xFC]);
        }

        #[test]
        fn test_push_padding_codewords() {
            let bit_capacity = Version::new(1).data_bit_capacity(ECLevel::L);
            let mut bs = BitStream::new(bit_capacity);
            bs.push_bits(0b1u8, 1);
            push_padding_bits(&mut bs);
            push_padding_codewords(&mut bs);
            let mut output = vec![0b10000000];
            output.extend(PADDING_CODEWORDS.iter().cycle().take(18));
            assert_eq!(bs.data(), output);
        }
    }
}
