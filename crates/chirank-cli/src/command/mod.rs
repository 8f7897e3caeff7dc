use std::path::PathBuf;

use anyhow::Context;
use chirank_columnar::{ColumnStore, Schema};
use clap::{Args, Parser, Subcommand};

use crate::source::RecordSource;

use self::{describe::DescribeArg, rank::RankArg};

mod describe;
mod rank;

const DEFAULT_INPUT: &str = "KDDCup99.csv";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Rank binary attributes by chi-square association with the label
    Rank(#[clap(flatten)] RankArg),
    /// Show encoding status and contingency counts for every attribute
    Describe(#[clap(flatten)] DescribeArg),
}

/// Input file and record layout, shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct InputArg {
    /// Path to the comma-separated input file (first line is a header)
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Number of columns per record, including the trailing label
    #[arg(long, default_value_t = Schema::KDD_CUP_99_WIDTH)]
    pub schema_width: usize,

    /// Label value of the normal (negative) class; every other label is positive
    #[arg(long, default_value = Schema::KDD_CUP_99_NORMAL_LABEL)]
    pub normal_label: String,
}

impl Default for InputArg {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            schema_width: Schema::KDD_CUP_99_WIDTH,
            normal_label: Schema::KDD_CUP_99_NORMAL_LABEL.to_owned(),
        }
    }
}

impl InputArg {
    pub fn schema(&self) -> anyhow::Result<Schema> {
        Schema::new(self.schema_width, self.normal_label.clone())
            .context("Invalid --schema-width")
    }

    /// Opens the input and encodes every record into a column store.
    pub fn load_store(&self) -> anyhow::Result<ColumnStore> {
        let schema = self.schema()?;
        RecordSource::open(&self.input)?.encode(schema)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Rank(RankArg::default())) {
        Mode::Rank(arg) => rank::run(&arg)?,
        Mode::Describe(arg) => describe::run(&arg)?,
    }
    Ok(())
}
