/// Joint frequency counts of a binary attribute against a binary label.
///
/// The table is laid out with the attribute on the rows and the label on the
/// columns:
///
/// ```text
///                 label = 1    label = 0
/// attribute = 1   true_pos     false_pos     (row 1)
/// attribute = 0   false_neg    true_neg      (row 2)
///                 (column 1)   (column 2)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContingencyTable {
    /// Rows with attribute = 1 and label = 1.
    pub true_pos: u64,
    /// Rows with attribute = 1 and label = 0.
    pub false_pos: u64,
    /// Rows with attribute = 0 and label = 1.
    pub false_neg: u64,
    /// Rows with attribute = 0 and label = 0.
    pub true_neg: u64,
}

impl ContingencyTable {
    /// Builds a table by scanning `(attribute, label)` pairs once.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chirank_stats::contingency::ContingencyTable;
    /// let attribute = [false, true, true, false];
    /// let label = [false, true, true, false];
    /// let table = ContingencyTable::from_pairs(attribute.into_iter().zip(label));
    /// assert_eq!(table.true_pos, 2);
    /// assert_eq!(table.true_neg, 2);
    /// assert_eq!(table.total(), 4);
    /// ```
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (bool, bool)>,
    {
        let mut table = Self::default();
        for (attribute, label) in pairs {
            match (attribute, label) {
                (true, true) => table.true_pos += 1,
                (true, false) => table.false_pos += 1,
                (false, true) => table.false_neg += 1,
                (false, false) => table.true_neg += 1,
            }
        }
        table
    }

    /// Builds a table from population counts.
    ///
    /// This is what a bit-packed scorer can compute without visiting rows
    /// individually: the number of rows where both bits are set, the number of
    /// set attribute bits, the number of set label bits, and the row count.
    ///
    /// # Panics
    ///
    /// Panics if the counts cannot describe a real table (for example,
    /// `both_ones` larger than either marginal count).
    #[must_use]
    pub fn from_counts(both_ones: u64, attribute_ones: u64, label_ones: u64, total: u64) -> Self {
        assert!(
            both_ones <= attribute_ones && both_ones <= label_ones,
            "joint count exceeds a marginal count"
        );
        assert!(
            attribute_ones + label_ones - both_ones <= total,
            "marginal counts exceed the total"
        );
        Self {
            true_pos: both_ones,
            false_pos: attribute_ones - both_ones,
            false_neg: label_ones - both_ones,
            true_neg: total - (attribute_ones + label_ones - both_ones),
        }
    }

    /// Number of observations in the table.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.true_pos + self.false_pos + self.false_neg + self.true_neg
    }

    /// Row totals as `(attribute = 1, attribute = 0)`.
    #[must_use]
    pub fn row_totals(&self) -> (u64, u64) {
        (
            self.true_pos + self.false_pos,
            self.false_neg + self.true_neg,
        )
    }

    /// Column totals as `(label = 1, label = 0)`.
    #[must_use]
    pub fn column_totals(&self) -> (u64, u64) {
        (
            self.true_pos + self.false_neg,
            self.false_pos + self.true_neg,
        )
    }

    /// Observed counts in `[true_pos, false_pos, false_neg, true_neg]` order.
    #[must_use]
    pub fn observed(&self) -> [u64; 4] {
        [self.true_pos, self.false_pos, self.false_neg, self.true_neg]
    }

    /// Expected counts under independence, in the same order as [`Self::observed`].
    ///
    /// Each cell's expectation is `row_total * column_total / n`. The four
    /// expectations sum to `n`. An empty table yields all zeros.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn expected(&self) -> [f64; 4] {
        let total = self.total();
        if total == 0 {
            return [0.0; 4];
        }
        let n = total as f64;
        let (row1, row2) = self.row_totals();
        let (col1, col2) = self.column_totals();
        let (row1, row2, col1, col2) = (row1 as f64, row2 as f64, col1 as f64, col2 as f64);
        [
            row1 * col1 / n,
            row1 * col2 / n,
            row2 * col1 / n,
            row2 * col2 / n,
        ]
    }

    /// Returns `true` when some expected count is zero.
    ///
    /// This happens exactly when a margin is zero: the attribute or the label
    /// is constant over every row (or the table is empty).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let (row1, row2) = self.row_totals();
        let (col1, col2) = self.column_totals();
        row1 == 0 || row2 == 0 || col1 == 0 || col2 == 0
    }

    /// Pearson's chi-square statistic for independence of attribute and label.
    ///
    /// Returns `0.0` for a degenerate table, where the statistic is undefined.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chirank_stats::contingency::ContingencyTable;
    /// let label = [false, true, true, false];
    ///
    /// let correlated = [false, true, true, false];
    /// let table = ContingencyTable::from_pairs(correlated.into_iter().zip(label));
    /// assert_eq!(table.chi_square(), 4.0);
    ///
    /// let constant = [true; 4];
    /// let table = ContingencyTable::from_pairs(constant.into_iter().zip(label));
    /// assert_eq!(table.chi_square(), 0.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn chi_square(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        self.observed()
            .into_iter()
            .zip(self.expected())
            .map(|(observed, expected)| (observed as f64 - expected).powi(2) / expected)
            .sum()
    }
}
