use std::{fmt::Display, mem};

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

/// Append-only, MSB-first bit sequence with a fixed bit capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: Vec::with_capacity((capacity + 7) >> 3), len: 0, capacity }
    }

    #[cfg(test)]
    pub fn from(inp: &[u8]) -> Self {
        let bit_len = inp.len() << 3;
        Self { data: inp.to_vec(), len: bit_len, capacity: bit_len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_byte_aligned(&self) -> bool {
        self.len & 7 == 0
    }

    /// Raises the bit capacity by `additional` bits.
    pub fn reserve(&mut self, additional: usize) {
        self.capacity += additional;
        self.data.reserve((self.capacity + 7) / 8 - self.data.len());
    }

    /// Underlying bytes. Panics on a fractional byte.
    pub fn data(&self) -> &[u8] {
        assert!(self.is_byte_aligned(), "Fractional byte: Bit length {}", self.len);
        &self.data
    }

    /// Bit at `pos`, counting from the MSB of the first byte.
    pub fn bit(&self, pos: usize) -> bool {
        debug_assert!(pos < self.len, "Out of bitstream bounds: Len {}, Pos {pos}", self.len);
        (self.data[pos >> 3] >> (7 - (pos & 7))) & 1 == 1
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    /// Appends the low `size` bits of `bits`, MSB first. Writes may span byte boundaries.
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Into<u32> + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= 32, "Cannot push more than 32 bits: Size {size}");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        let bits: u32 = bits.into();
        let mut rem = size;
        while rem > 0 {
            let offset = self.len & 7;
            if offset == 0 {
                self.data.push(0);
            }
            let n = rem.min(8 - offset);
            let chunk = ((bits >> (rem - n)) & ((1 << n) - 1)) as u8;
            let last = self.data.len() - 1;
            self.data[last] |= chunk << (8 - offset - n);
            self.len += n;
            rem -= n;
        }
    }

    #[cfg(test)]
    pub fn push(&mut self, bit: bool) {
        self.push_bits(bit as u8, 1);
    }

    pub fn extend(&mut self, arr: &[u8]) {
        assert!(
            self.is_byte_aligned(),
            "Bit offset must be zero to extend from another array: Bit offset {}",
            self.len & 7
        );
        let arr_bits = arr.len() << 3;
        assert!(
            self.len + arr_bits <= self.capacity,
            "Extension shouldn't overflow capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + arr_bits
        );
        self.data.extend_from_slice(arr);
        self.len += arr_bits;
    }
}
