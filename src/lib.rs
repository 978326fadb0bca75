//! # uni-results
//!
//! Tracks a running weighted average (RWA) of module grades across years of
//! study and works out the average still needed on the remaining credits to
//! finish on a target degree score.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Degree classification and target difficulty bands
pub mod classification;
/// Environment driven defaults
pub mod config;
/// Constant values used throughout
pub mod constants;
/// Error types
pub mod error;
/// Plan files describing weightings, totals, modules and targets
pub mod plan;
/// Console summary, tables and their JSON form
pub mod report;
/// The grade tracker itself
pub mod tracker;

pub use classification::{Classification, Difficulty};
pub use constants::{CreditSum, Credits, DEFAULT_CREDITS, DEFAULT_TARGETS, Year};
pub use error::TrackerError;
pub use plan::{Plan, PlannedModule};
pub use report::{ModuleRow, TargetRow, YearRow, rows_json};
pub use tracker::{CreditTotals, GradeTracker, ModuleGrade, Requirement, Weightings};
