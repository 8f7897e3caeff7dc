const WORD_BITS: usize = u64::BITS as usize;

/// Append-only sequence of booleans packed into 64-bit words.
///
/// # Bit Layout
///
/// Row `i` lives in word `i / 64` at bit offset `i % 64` (LSB first). Bits at
/// or past `len` in the last word are always zero, so whole-word population
/// counts never see stale data.
///
/// Storage grows one word at a time as rows are pushed, so the row count does
/// not need to be known up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitColumn {
    words: Vec<u64>,
    len: usize,
}

impl BitColumn {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects booleans into a packed column.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chirank_columnar::BitColumn;
    /// let column = BitColumn::from_bools([true, false, true]);
    /// assert_eq!(column.len(), 3);
    /// assert_eq!(column.get(0), Some(true));
    /// assert_eq!(column.get(1), Some(false));
    /// assert_eq!(column.get(3), None);
    /// assert_eq!(column.count_ones(), 2);
    /// ```
    #[must_use]
    pub fn from_bools<I>(values: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut column = Self::new();
        for value in values {
            column.push(value);
        }
        column
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Backing words. The last word may be partially used.
    #[must_use]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Appends one bit at row index `len()`.
    #[inline]
    pub fn push(&mut self, value: bool) {
        let (word, bit) = split_index(self.len);
        if word == self.words.len() {
            self.words.push(0);
        }
        if value {
            self.words[word] |= 1u64 << bit;
        }
        self.len += 1;
    }

    /// Reads the bit at `row`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize) -> Option<bool> {
        if row >= self.len {
            return None;
        }
        let (word, bit) = split_index(row);
        Some((self.words[word] >> bit) & 1 == 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|row| {
            let (word, bit) = split_index(row);
            (self.words[word] >> bit) & 1 == 1
        })
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    /// Number of rows where both `self` and `other` are set.
    ///
    /// # Panics
    ///
    /// Panics if the columns have different lengths.
    #[must_use]
    pub fn count_ones_and(&self, other: &Self) -> u64 {
        assert_eq!(
            self.len, other.len,
            "columns must have the same number of rows"
        );
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| u64::from((a & b).count_ones()))
            .sum()
    }
}

#[inline]
fn split_index(row: usize) -> (usize, usize) {
    (row / WORD_BITS, row % WORD_BITS)
}
