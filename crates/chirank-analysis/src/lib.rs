//! Chi-square feature ranking over bit-packed columns
//!
//! This crate turns a fully encoded [`chirank_columnar::ColumnStore`] into a
//! ranked list of attributes.
//!
//! # Overview
//!
//! 1. **Encode Records** ([`chirank_columnar::ColumnStore`]): Stream records once,
//!    keeping only attributes whose values are all `0` or `1`
//! 2. **Score Attributes** ([`score::score_attributes`]): Build a 2×2 contingency
//!    table per qualifying attribute against the target and compute its
//!    chi-square statistic, in parallel
//! 3. **Rank** ([`ranking::Ranking`]): Scale statistics by the row count and
//!    order them, highest first
//! 4. **Inspect** ([`report::AttributeReport`]): Per-attribute view including
//!    disqualified attributes, for diagnostics
//!
//! # Examples
//!
//! ```
//! use chirank_analysis::{ranking::Ranking, score::score_attributes};
//! use chirank_columnar::{ColumnStore, Schema};
//!
//! let schema = Schema::new(4, "normal").unwrap();
//! let records = [
//!     ["0", "0", "1", "normal"],
//!     ["1", "0", "1", "smurf"],
//!     ["1", "1", "7", "smurf"],
//!     ["0", "1", "1", "normal"],
//! ];
//! let store = ColumnStore::from_records(schema, records);
//!
//! let scores = score_attributes(&store);
//! let ranking = Ranking::from_scores(&scores, store.num_rows());
//!
//! let order = ranking.iter().map(|r| r.attribute.number()).collect::<Vec<_>>();
//! // Attribute 3 is disqualified by the value "7"
//! assert_eq!(order, [1, 2]);
//! assert_eq!(ranking.as_slice()[0].score, 1.0);
//! ```

pub mod ranking;
pub mod report;
pub mod score;
