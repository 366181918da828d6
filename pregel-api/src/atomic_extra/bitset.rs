use std::sync::atomic::{AtomicU64, Ordering};

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-size bitset whose bits can be flipped concurrently.
///
/// Neighbouring bits share a word, so even when every bit has a single
/// writer the updates go through `fetch_or`/`fetch_and`.
#[derive(Debug)]
pub struct AtomicBitSet {
    words: Vec<AtomicU64>,
    len: usize,
}

impl AtomicBitSet {
    pub fn new(len: usize) -> Self {
        let words = (0..len.div_ceil(WORD_BITS))
            .map(|_| AtomicU64::new(0))
            .collect();
        Self { words, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn locate(&self, index: usize) -> (usize, u64) {
        assert!(
            index < self.len,
            "bit index {index} out of range for bitset of length {}",
            self.len
        );
        (index / WORD_BITS, 1u64 << (index % WORD_BITS))
    }

    #[inline]
    pub fn get(&self, index: usize) -> bool {
        let (word, mask) = self.locate(index);
        self.words[word].load(Ordering::Acquire) & mask != 0
    }

    /// Set the bit, returning its previous value
    #[inline]
    pub fn set(&self, index: usize) -> bool {
        let (word, mask) = self.locate(index);
        self.words[word].fetch_or(mask, Ordering::AcqRel) & mask != 0
    }

    /// Clear the bit, returning its previous value
    #[inline]
    pub fn clear(&self, index: usize) -> bool {
        let (word, mask) = self.locate(index);
        self.words[word].fetch_and(!mask, Ordering::AcqRel) & mask != 0
    }

    pub fn clear_all(&mut self) {
        for word in self.words.iter_mut() {
            *word.get_mut() = 0;
        }
    }

    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Acquire).count_ones() as usize)
            .sum()
    }

    /// `true` if every bit in `[0, len)` is set; vacuously true when empty
    pub fn all_set(&self) -> bool {
        let full_words = self.len / WORD_BITS;
        if self.words[..full_words]
            .iter()
            .any(|w| w.load(Ordering::Acquire) != u64::MAX)
        {
            return false;
        }
        let rest = self.len % WORD_BITS;
        if rest == 0 {
            return true;
        }
        let mask = (1u64 << rest) - 1;
        self.words[full_words].load(Ordering::Acquire) & mask == mask
    }
}
