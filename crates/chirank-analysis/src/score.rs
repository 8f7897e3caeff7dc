use chirank_columnar::{AttributeId, BitColumn, ColumnStore};
use chirank_stats::contingency::ContingencyTable;
use rayon::prelude::*;
use tracing::info;

/// Chi-square result for one qualifying attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEntry {
    pub attribute: AttributeId,
    /// Joint counts of the attribute against the target.
    pub table: ContingencyTable,
    /// Raw chi-square statistic, `0.0` for a degenerate table.
    pub statistic: f64,
}

impl ScoreEntry {
    #[must_use]
    pub fn compute(attribute: AttributeId, column: &BitColumn, target: &BitColumn) -> Self {
        let table = contingency_table(column, target);
        Self {
            attribute,
            table,
            statistic: table.chi_square(),
        }
    }
}

/// Counts the 2×2 table of `column` against `target` with word-wise popcounts.
///
/// Equivalent to scanning every row and classifying each `(attribute, label)`
/// pair, but touches 64 rows per step.
///
/// # Panics
///
/// Panics if the columns have different lengths.
#[must_use]
pub fn contingency_table(column: &BitColumn, target: &BitColumn) -> ContingencyTable {
    ContingencyTable::from_counts(
        column.count_ones_and(target),
        column.count_ones(),
        target.count_ones(),
        target.len() as u64,
    )
}

/// Scores every qualifying attribute of `store` against its target column.
///
/// Attributes are scored in parallel on the current rayon pool. Each task
/// reads its own column and the shared target; results land in a slot per
/// attribute, so the output is in schema order regardless of scheduling.
#[must_use]
pub fn score_attributes(store: &ColumnStore) -> Vec<ScoreEntry> {
    let target = store.target_column();
    let columns = store
        .qualifying_attributes()
        .filter_map(|attribute| Some((attribute, store.attribute_column(attribute)?)))
        .collect::<Vec<_>>();

    let mut entries = Vec::with_capacity(columns.len());
    columns
        .par_iter()
        .map(|&(attribute, column)| ScoreEntry::compute(attribute, column, target))
        .collect_into_vec(&mut entries);

    info!(
        rows = store.num_rows(),
        scored = entries.len(),
        disqualified = store.disqualified_attributes().count(),
        "scored attributes"
    );
    entries
}

#[cfg(test)]
mod tests {
    use chirank_columnar::Schema;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn bits(values: &[u8]) -> BitColumn {
        BitColumn::from_bools(values.iter().map(|&v| v == 1))
    }

    #[test]
    fn test_popcount_table_matches_row_scan() {
        let column = bits(&[1, 0, 1, 1, 0, 0, 1, 0, 1, 1, 0]);
        let target = bits(&[1, 1, 0, 1, 0, 1, 0, 0, 1, 0, 0]);
        let scanned = ContingencyTable::from_pairs(column.iter().zip(target.iter()));
        assert_eq!(contingency_table(&column, &target), scanned);
    }

    #[test]
    fn test_popcount_table_across_word_boundary() {
        let column = BitColumn::from_bools((0..200).map(|i| i % 3 == 0));
        let target = BitColumn::from_bools((0..200).map(|i| i % 2 == 0));
        let scanned = ContingencyTable::from_pairs(column.iter().zip(target.iter()));
        let counted = contingency_table(&column, &target);
        assert_eq!(counted, scanned);
        assert_eq!(counted.total(), 200);
    }

    #[test]
    fn test_popcount_table_with_dense_columns() {
        // 3 of 4 attribute bits set, so attribute and label ones exceed the row count
        let column = bits(&[1, 1, 0, 1]);
        let target = bits(&[1, 0, 1, 1]);
        let scanned = ContingencyTable::from_pairs(column.iter().zip(target.iter()));
        assert_eq!(contingency_table(&column, &target), scanned);

        let column = bits(&[1, 1, 1, 1]);
        let target = bits(&[0, 1, 1, 0]);
        let counted = contingency_table(&column, &target);
        assert_eq!(counted.observed(), [2, 2, 0, 0]);
        let entry = ScoreEntry::compute(AttributeId::from_index(0), &column, &target);
        assert_eq!(entry.statistic, 0.0);
    }

    #[test]
    fn test_random_popcount_tables_match_row_scan() {
        let mut rng = Pcg64Mcg::seed_from_u64(0x0005_ca1e);
        let fixed = [0.0, 0.25, 0.5, 0.75, 1.0];
        for i in 0..300 {
            let len = rng.random_range(1..400);
            let (p_column, p_target) = if i < fixed.len() * fixed.len() {
                (fixed[i / fixed.len()], fixed[i % fixed.len()])
            } else {
                (rng.random_range(0.0..=1.0), rng.random_range(0.0..=1.0))
            };
            let column = BitColumn::from_bools((0..len).map(|_| rng.random_bool(p_column)));
            let target = BitColumn::from_bools((0..len).map(|_| rng.random_bool(p_target)));

            let scanned = ContingencyTable::from_pairs(column.iter().zip(target.iter()));
            let counted = contingency_table(&column, &target);
            assert_eq!(
                counted, scanned,
                "len={len} p_column={p_column} p_target={p_target}"
            );
            assert_eq!(counted.total(), len);
        }
    }

    #[test]
    fn test_scores_in_schema_order() {
        let schema = Schema::new(5, "normal").unwrap();
        let records = [
            ["0", "0", "1", "x", "normal"],
            ["1", "0", "1", "1", "smurf"],
            ["1", "1", "1", "0", "smurf"],
            ["0", "1", "1", "1", "normal"],
        ];
        let store = ColumnStore::from_records(schema, records);
        let entries = score_attributes(&store);

        let ids = entries
            .iter()
            .map(|e| e.attribute.number())
            .collect::<Vec<_>>();
        assert_eq!(ids, [1, 2, 3]);
        assert!((entries[0].statistic - 4.0).abs() < 1e-12);
        assert!(entries[1].statistic.abs() < 1e-12);
        // Constant attribute
        assert_eq!(entries[2].statistic, 0.0);
        assert_eq!(entries[2].table.row_totals(), (4, 0));
    }

    #[test]
    fn test_parallel_scoring_is_deterministic() {
        let num_attributes = 64;
        let schema = Schema::new(num_attributes + 1, "normal").unwrap();
        let records = (0..300_usize)
            .map(|row| {
                let mut record = (0..num_attributes)
                    .map(|col| if (row * (col + 1)) % 7 < 3 { "1" } else { "0" })
                    .collect::<Vec<_>>();
                record.push(if row % 5 < 2 { "normal" } else { "ipsweep" });
                record
            })
            .collect::<Vec<_>>();
        let store = ColumnStore::from_records(schema, &records);

        let first = score_attributes(&store);
        for _ in 0..5 {
            assert_eq!(score_attributes(&store), first);
        }
        let sequential = store
            .qualifying_attributes()
            .map(|a| {
                let column = store.attribute_column(a).unwrap();
                ScoreEntry::compute(a, column, store.target_column())
            })
            .collect::<Vec<_>>();
        assert_eq!(first, sequential);
    }

    #[test]
    fn test_empty_store() {
        let store = ColumnStore::new(Schema::new(3, "normal").unwrap());
        let entries = score_attributes(&store);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.statistic == 0.0));
    }
}
