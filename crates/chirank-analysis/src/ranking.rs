use std::cmp::Ordering;

use chirank_columnar::AttributeId;
use serde::Serialize;

use crate::score::ScoreEntry;

/// One line of the ranked output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedAttribute {
    /// 1-based column number in the input schema.
    #[serde(rename = "column")]
    pub attribute: AttributeId,
    /// Chi-square statistic divided by the row count.
    pub score: f64,
}

/// Attributes ordered by descending score.
///
/// The score is the raw chi-square statistic divided by the number of rows.
/// This is a display scaling that keeps scores comparable across datasets of
/// different sizes; it is not a different test (for a 2×2 table it equals the
/// squared phi coefficient). Equal scores are ordered by ascending attribute
/// number so the output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ranking {
    attributes: Vec<RankedAttribute>,
}

impl Ranking {
    /// Normalizes and sorts scored attributes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chirank_analysis::{ranking::Ranking, score::ScoreEntry};
    /// # use chirank_columnar::AttributeId;
    /// # use chirank_stats::contingency::ContingencyTable;
    /// let entry = |index, statistic| ScoreEntry {
    ///     attribute: AttributeId::from_index(index),
    ///     table: ContingencyTable::default(),
    ///     statistic,
    /// };
    /// let ranking = Ranking::from_scores(&[entry(0, 2.0), entry(1, 8.0), entry(2, 2.0)], 4);
    /// let order = ranking.iter().map(|r| (r.attribute.number(), r.score)).collect::<Vec<_>>();
    /// assert_eq!(order, [(2, 2.0), (1, 0.5), (3, 0.5)]);
    /// ```
    #[must_use]
    pub fn from_scores(entries: &[ScoreEntry], num_rows: usize) -> Self {
        let mut attributes = entries
            .iter()
            .map(|entry| RankedAttribute {
                attribute: entry.attribute,
                score: normalize(entry.statistic, num_rows),
            })
            .collect::<Vec<_>>();
        attributes.sort_by(compare);
        Self { attributes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[RankedAttribute] {
        &self.attributes
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedAttribute> + '_ {
        self.attributes.iter()
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a RankedAttribute;
    type IntoIter = std::slice::Iter<'a, RankedAttribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

/// Scales a raw statistic by the row count. An empty dataset scores `0.0`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn normalize(statistic: f64, num_rows: usize) -> f64 {
    if num_rows == 0 {
        return 0.0;
    }
    statistic / num_rows as f64
}

fn compare(a: &RankedAttribute, b: &RankedAttribute) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.attribute.cmp(&b.attribute))
}
