//! # Bit Planes
//!
//! Fixed-length bitsets used for the engine's scratch state. 64 flags per
//! `u64` word; a matching attempt allocates its planes once and discards them
//! when it returns.

/// A fixed-length bitset.
///
/// ## Performance
///
/// - Set / toggle / test: O(1)
/// - Reset: O(n/64)
/// - Iterate set bits: O(n/64 + ones)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitPlane {
    /// 64 flags per word, little end first.
    words: Vec<u64>,
    /// Number of addressable bits.
    len: usize,
}

impl BitPlane {
    /// Creates a plane of `len` cleared bits.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0u64; len.div_ceil(64)],
            len,
        }
    }

    /// Tests a bit. Out-of-range indices read as clear.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Sets a bit.
    #[inline]
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < self.len, "Index out of bounds");
        if let Some(word) = self.words.get_mut(index / 64) {
            *word |= 1u64 << (index % 64);
        }
    }

    /// Flips a bit.
    #[inline]
    pub fn toggle(&mut self, index: usize) {
        debug_assert!(index < self.len, "Index out of bounds");
        if let Some(word) = self.words.get_mut(index / 64) {
            *word ^= 1u64 << (index % 64);
        }
    }

    /// Clears every bit.
    pub fn reset(&mut self) {
        self.words.fill(0);
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterates over the indices of set bits in ascending order.
    ///
    /// Uses `trailing_zeros` to skip clear regions.
    pub fn iter_ones(&self) -> Ones<'_> {
        Ones {
            words: &self.words,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
            len: self.len,
        }
    }
}

/// Iterator over set bit indices of a [`BitPlane`].
pub struct Ones<'a> {
    words: &'a [u64],
    word_idx: usize,
    current_word: u64,
    len: usize,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit = self.current_word.trailing_zeros() as usize;
                let index = self.word_idx * 64 + bit;
                self.current_word &= self.current_word - 1;
                if index < self.len {
                    return Some(index);
                }
            }

            self.word_idx += 1;
            if self.word_idx >= self.words.len() {
                return None;
            }
            self.current_word = self.words[self.word_idx];
        }
    }
}
