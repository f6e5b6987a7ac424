//! Forward bitstream reader for the build string payload.
//!
//! The reverse-engineered format packs bits LSB-first within each byte
//! and byte-aligns its variable-length integers. Both points must be
//! reproduced exactly; every multi-bit read after a divergence would be
//! wrong otherwise.

/// Stateful cursor over a byte buffer, reading LSB-first.
///
/// Reads past the end of the buffer yield zero bits instead of failing,
/// and the cursor keeps advancing as if those bits existed. That
/// tolerance lets slightly short inputs decode to mostly-empty selection
/// tables rather than erroring mid-stream. The cursor only advances;
/// there is no rewind.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// The data buffer.
    data: &'a [u8],
    /// Current byte position. May run past `data.len()` on overreads.
    byte_pos: usize,
    /// Current bit position within the current byte (0 = LSB).
    bit_pos: u8,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            bit_pos: 0,
        }
    }

    /// Read `n` bits (up to 32), LSB-first, across byte boundaries.
    ///
    /// Bits past the end of the buffer read as zero.
    pub fn read_bits(&mut self, n: usize) -> u32 {
        debug_assert!(n <= 32, "read_bits supports at most 32 bits");

        let mut value = 0u32;
        for i in 0..n {
            let bit = match self.data.get(self.byte_pos) {
                Some(&byte) => (byte >> self.bit_pos) & 1,
                None => 0,
            };
            value |= u32::from(bit) << i;

            self.bit_pos += 1;
            if self.bit_pos == 8 {
                self.bit_pos = 0;
                self.byte_pos += 1;
            }
        }
        value
    }

    /// Advance to the next byte boundary, discarding unread bits of the
    /// current byte. No-op when already aligned.
    pub fn align_to_byte(&mut self) {
        if self.bit_pos != 0 {
            self.bit_pos = 0;
            self.byte_pos += 1;
        }
    }

    /// Read a byte-aligned variable-length integer.
    ///
    /// Aligns to the next byte boundary first, then accumulates the low
    /// 7 bits of each group little-endian; a set high bit means another
    /// group follows. Groups shifted past 64 bits are discarded.
    pub fn read_varint(&mut self) -> u64 {
        self.align_to_byte();

        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let group = u64::from(self.read_bits(8));
            if shift < 64 {
                value |= (group & 0x7f) << shift;
            }
            if group & 0x80 == 0 {
                return value;
            }
            shift += 7;
        }
    }

    /// Whole bytes at or after the current byte index, clamped to zero.
    #[inline]
    pub fn bytes_remaining(&self) -> usize {
        self.data.len().saturating_sub(self.byte_pos)
    }

    /// Absolute number of bits consumed so far, including overread zeros.
    #[inline]
    pub fn bit_position(&self) -> usize {
        self.byte_pos * 8 + usize::from(self.bit_pos)
    }
}
