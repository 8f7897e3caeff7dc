//! Per-attribute diagnostics
//!
//! Unlike [`crate::ranking::Ranking`], which only lists scored attributes, a
//! report covers every attribute of the schema and explains why an attribute
//! is missing from the ranking.

use chirank_columnar::{AttributeId, Binarity, ColumnStore};

use crate::{ranking, score::ScoreEntry};

/// Diagnostic view of a single attribute after encoding and scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeReport {
    pub attribute: AttributeId,
    pub binarity: Binarity,
    /// Number of bits written to the attribute's column.
    pub bits_written: usize,
    /// Number of `1` bits in the attribute's column.
    pub ones: u64,
    /// Present for attributes that were scored.
    pub score: Option<ScoreEntry>,
    /// Score divided by the row count, as shown in the ranking.
    pub normalized: Option<f64>,
}

impl AttributeReport {
    /// Builds one report per schema attribute, in schema order.
    ///
    /// `scores` are matched to attributes by id, so any subset of scored
    /// attributes in any order is accepted.
    #[must_use]
    pub fn collect(store: &ColumnStore, scores: &[ScoreEntry]) -> Vec<Self> {
        store
            .schema()
            .attributes()
            .filter_map(|attribute| {
                let binarity = store.binarity(attribute)?.clone();
                let column = store.attribute_column(attribute)?;
                let score = scores.iter().find(|s| s.attribute == attribute).copied();
                Some(Self {
                    attribute,
                    binarity,
                    bits_written: column.len(),
                    ones: column.count_ones(),
                    score,
                    normalized: score
                        .map(|s| ranking::normalize(s.statistic, store.num_rows())),
                })
            })
            .collect()
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}
