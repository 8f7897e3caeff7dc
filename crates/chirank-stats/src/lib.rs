//! Statistical scoring utilities for the Chirank project.
//!
//! This crate holds the numerical side of feature ranking and has no
//! dependencies:
//!
//! - **Contingency tables**: 2×2 joint frequency counts of a binary attribute
//!   against a binary label, with margins and expected counts
//! - **Chi-square test of independence**: Pearson's statistic over a
//!   contingency table, with a defined score of `0.0` for degenerate tables
//!
//! # Modules
//!
//! - [`contingency`]: Contingency tables and the chi-square statistic
//!
//! # Examples
//!
//! ```
//! use chirank_stats::contingency::ContingencyTable;
//!
//! let attribute = [false, true, true, false];
//! let label = [false, true, true, false];
//! let table = ContingencyTable::from_pairs(attribute.into_iter().zip(label));
//! assert_eq!(table.chi_square(), 4.0);
//! ```

pub mod contingency;
