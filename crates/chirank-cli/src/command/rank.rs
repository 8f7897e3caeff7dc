use std::path::PathBuf;

use anyhow::Context;
use chirank_analysis::{
    ranking::Ranking,
    score::{self, ScoreEntry},
};
use chirank_columnar::{AttributeId, ColumnStore};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::{command::InputArg, util::Output};

const DEFAULT_OUTPUT: &str = "ranked_columns.csv";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// `Column,Score` header followed by one line per attribute
    #[default]
    Csv,
    /// Pretty-printed JSON report with run metadata
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RankArg {
    #[clap(flatten)]
    pub input: InputArg,

    /// Output file path (`-` for stdout)
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Number of worker threads for scoring (defaults to one per CPU)
    #[arg(long)]
    pub threads: Option<usize>,
}

impl Default for RankArg {
    fn default() -> Self {
        Self {
            input: InputArg::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: OutputFormat::default(),
            threads: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct RankingReport<'a> {
    generated_at: DateTime<Utc>,
    source: String,
    num_rows: usize,
    skipped_records: usize,
    disqualified: Vec<AttributeId>,
    ranking: &'a Ranking,
}

pub(crate) fn run(arg: &RankArg) -> anyhow::Result<()> {
    let store = arg.input.load_store()?;
    let scores = score_with_threads(&store, arg.threads)?;
    let ranking = Ranking::from_scores(&scores, store.num_rows());

    let mut output = Output::from_output_path(arg.output.clone())?;
    match arg.format {
        OutputFormat::Csv => output.write_ranking_csv(&ranking)?,
        OutputFormat::Json => {
            let report = RankingReport {
                generated_at: Utc::now(),
                source: arg.input.input.display().to_string(),
                num_rows: store.num_rows(),
                skipped_records: store.skipped_records(),
                disqualified: store.disqualified_attributes().map(|(id, _)| id).collect(),
                ranking: &ranking,
            };
            output.write_json(&report)?;
        }
    }

    if !output.is_stdout() {
        println!("Results written to '{}'.", output.display_path());
    }
    Ok(())
}

/// Scores on a dedicated pool when a thread count is given, otherwise on
/// rayon's global pool.
fn score_with_threads(
    store: &ColumnStore,
    threads: Option<usize>,
) -> anyhow::Result<Vec<ScoreEntry>> {
    let Some(threads) = threads else {
        return Ok(score::score_attributes(store));
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build scoring thread pool")?;
    Ok(pool.install(|| score::score_attributes(store)))
}

#[cfg(test)]
mod tests {
    use chirank_columnar::Schema;

    use super::*;

    fn rank(width: usize, records: &[&[&str]]) -> Ranking {
        let schema = Schema::new(width, "normal").unwrap();
        let store = ColumnStore::from_records(schema, records.iter().copied());
        let scores = score_with_threads(&store, Some(2)).unwrap();
        Ranking::from_scores(&scores, store.num_rows())
    }

    fn numbers(ranking: &Ranking) -> Vec<usize> {
        ranking.iter().map(|r| r.attribute.number()).collect()
    }

    #[test]
    fn test_correlated_attribute_outranks_uncorrelated() {
        let ranking = rank(
            3,
            &[
                &["0", "0", "normal"],
                &["1", "0", "attack"],
                &["1", "1", "attack"],
                &["0", "1", "normal"],
            ],
        );
        assert_eq!(numbers(&ranking), [1, 2]);
        let [a, b] = ranking.as_slice() else {
            panic!("expected two ranked attributes");
        };
        assert!(a.score > b.score);
    }

    #[test]
    fn test_non_binary_attribute_is_excluded() {
        let ranking = rank(
            3,
            &[
                &["0", "0", "normal"],
                &["1", "1", "attack"],
                &["7", "1", "attack"],
                &["0", "0", "normal"],
            ],
        );
        assert_eq!(numbers(&ranking), [2]);
    }

    #[test]
    fn test_constant_attribute_scores_zero() {
        let ranking = rank(
            3,
            &[
                &["1", "0", "normal"],
                &["1", "1", "attack"],
                &["1", "1", "attack"],
                &["1", "0", "normal"],
            ],
        );
        assert_eq!(numbers(&ranking), [2, 1]);
        assert_eq!(ranking.as_slice()[1].score, 0.0);
    }

    #[test]
    fn test_thread_count_does_not_change_result() {
        let schema = Schema::new(4, "normal").unwrap();
        let records = (0..1000_usize).map(|i| {
            [
                if i % 2 == 0 { "1" } else { "0" },
                if i % 3 == 0 { "1" } else { "0" },
                if i % 7 < 4 { "1" } else { "0" },
                if i % 4 == 0 { "normal" } else { "teardrop" },
            ]
        });
        let store = ColumnStore::from_records(schema, records);
        let single = score_with_threads(&store, Some(1)).unwrap();
        let many = score_with_threads(&store, Some(4)).unwrap();
        let global = score_with_threads(&store, None).unwrap();
        assert_eq!(single, many);
        assert_eq!(single, global);
    }

    #[test]
    fn test_json_report_shape() {
        let schema = Schema::new(3, "normal").unwrap();
        let store = ColumnStore::from_records(
            schema,
            [["0", "x", "normal"], ["1", "0", "attack"]],
        );
        let ranking = Ranking::from_scores(&score::score_attributes(&store), store.num_rows());
        let report = RankingReport {
            generated_at: Utc::now(),
            source: "in-memory".to_owned(),
            num_rows: store.num_rows(),
            skipped_records: store.skipped_records(),
            disqualified: store.disqualified_attributes().map(|(id, _)| id).collect(),
            ranking: &ranking,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["num_rows"], 2);
        assert_eq!(value["disqualified"], serde_json::json!([2]));
        assert_eq!(value["ranking"][0]["column"], 1);
        assert!(value["generated_at"].is_string());
    }
}
