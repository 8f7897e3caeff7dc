//! Per-attribute diagnostics command
//!
//! Prints how each attribute fared during encoding and, for the ones that
//! stayed binary, their contingency counts against the label.

use chirank_analysis::{report::AttributeReport, score};
use chirank_columnar::{Binarity, ColumnStore};

use crate::command::InputArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    #[clap(flatten)]
    pub input: InputArg,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let store = arg.input.load_store()?;
    let scores = score::score_attributes(&store);
    let reports = AttributeReport::collect(&store, &scores);

    println!("Attribute Report ({})", arg.input.input.display());
    println!("==========================================\n");
    println!("{}", summary_line(&store, scores.len()));
    println!();

    print_legend();
    println!();

    print_header();
    print_separator();
    for report in &reports {
        print_row(report);
    }
    Ok(())
}

fn summary_line(store: &ColumnStore, scored: usize) -> String {
    format!(
        "Rows: {}  Skipped records: {}  Scored: {}  Disqualified: {}",
        store.num_rows(),
        store.skipped_records(),
        scored,
        store.disqualified_attributes().count(),
    )
}

fn print_legend() {
    println!("Legend:");
    println!("  Ones   : Number of 1 bits written before encoding ended or the attribute was dropped");
    println!("  TP/FP  : Attribute = 1 with attack / normal label");
    println!("  FN/TN  : Attribute = 0 with attack / normal label");
    println!("  Chi2   : Raw chi-square statistic (0 when attribute or label is constant)");
    println!("  Score  : Chi2 divided by the number of rows, as used for ranking");
}

fn print_header() {
    println!(
        "  {:>6} {:<24} {:>10} {:>10} {:>10} {:>10} {:>10} {:>14} {:>10}",
        "Column", "Status", "Ones", "TP", "FP", "FN", "TN", "Chi2", "Score",
    );
}

fn print_separator() {
    // column(6) + status(24) + ones(10) + 4 counts(40) + chi2(14) + score(10) + spaces(8)
    println!("  {}", "-".repeat(112));
}

fn print_row(report: &AttributeReport) {
    let status = match &report.binarity {
        Binarity::Binary => "binary".to_owned(),
        Binarity::Disqualified { row, value } => format!("dropped @{row}: {value:?}"),
    };
    let status = truncate(&status, 24);

    match (&report.score, report.normalized) {
        (Some(entry), Some(normalized)) => {
            let table = &entry.table;
            println!(
                "  {:>6} {:<24} {:>10} {:>10} {:>10} {:>10} {:>10} {:>14.4} {:>10.6}",
                report.attribute,
                status,
                report.ones,
                table.true_pos,
                table.false_pos,
                table.false_neg,
                table.true_neg,
                entry.statistic,
                normalized,
            );
        }
        _ => {
            println!(
                "  {:>6} {:<24} {:>10} {:>10} {:>10} {:>10} {:>10} {:>14} {:>10}",
                report.attribute, status, report.ones, "-", "-", "-", "-", "-", "-",
            );
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut truncated = text.chars().take(width - 1).collect::<String>();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use chirank_columnar::{ColumnId, Schema};

    use super::*;

    #[test]
    fn test_summary_counts_only_latched_attributes() {
        let mut store = ColumnStore::new(Schema::new(3, "normal").unwrap());
        store.push_record(&["1", "x", "normal"]);
        // A second target bit leaves attribute 1 binary but one bit short
        store.append(ColumnId::Target, true).unwrap();
        let scores = score::score_attributes(&store);
        assert!(scores.is_empty());
        assert_eq!(
            summary_line(&store, scores.len()),
            "Rows: 2  Skipped records: 0  Scored: 0  Disqualified: 1"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("binary", 24), "binary");
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abcd", 4), "abcd");
    }
}
