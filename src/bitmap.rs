const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-width bit vector backing the equalizer tape and mask.
///
/// Bits are stored little-endian across `u64` words: bit 0 is the least
/// significant bit of the first word, bit `size - 1` the most significant
/// in-range bit. Reads past `size` return 0, mirroring arbitrary-precision
/// integer semantics.
pub(crate) struct Bitmap {
    words: Vec<u64>,
    size: usize,
}

impl Bitmap {
    /// An all-zero bitmap of `size` bits.
    pub fn zero(size: usize) -> Self {
        Self {
            words: vec![0; size.div_ceil(WORD_BITS)],
            size,
        }
    }

    /// Value of bit `index`; false for any index at or past `size`.
    pub fn bit(&self, index: usize) -> bool {
        if index >= self.size {
            return false;
        }
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    /// Sets every bit in `[from, to)` to `value`. The range is clamped to `size`.
    pub fn set_range(&mut self, from: usize, to: usize, value: bool) {
        for index in from..to.min(self.size) {
            let (word, bit) = (index / WORD_BITS, index % WORD_BITS);
            if value {
                self.words[word] |= 1 << bit;
            } else {
                self.words[word] &= !(1 << bit);
            }
        }
    } // end method set_range

    /// Shifts the bitmap left by `n`, discarding bits pushed past `size`.
    /// The vacated low `n` bits are zero.
    pub fn shift_left(&mut self, n: usize) {
        if n >= self.size {
            self.words.fill(0);
            return;
        }
        let word_shift = n / WORD_BITS;
        let bit_shift = n % WORD_BITS;
        for i in (0..self.words.len()).rev() {
            let mut word = if i >= word_shift {
                self.words[i - word_shift] << bit_shift
            } else {
                0
            };
            if bit_shift > 0 && i > word_shift {
                word |= self.words[i - word_shift - 1] >> (WORD_BITS - bit_shift);
            }
            self.words[i] = word;
        }
        self.clear_overflow();
    } // end method shift_left

    /// Bitwise OR of `other` into `self`. Both bitmaps must share a size.
    pub fn or_assign(&mut self, other: &Bitmap) {
        debug_assert_eq!(self.size, other.size);
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word |= *other_word;
        }
    }

    /// Zeroes the storage bits past `size` in the last word.
    fn clear_overflow(&mut self) {
        let overflow = self.words.len() * WORD_BITS - self.size;
        if overflow > 0 {
            let last = self.words.len() - 1;
            self.words[last] &= u64::MAX >> overflow;
        }
    }

    /// Binary rendering, most significant bit first, exactly `size` chars.
    #[cfg(test)]
    pub fn to_bit_string(&self) -> String {
        (0..self.size)
            .rev()
            .map(|i| if self.bit(i) { '1' } else { '0' })
            .collect()
    }
}
