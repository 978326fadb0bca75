#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Identifier for a year of study, eg. `2` for second year.
pub type Year = u32;

/// Credit counts are signed so unvalidated negative input flows through the
/// arithmetic instead of wrapping.
pub type Credits = i32;

/// Running credit totals are wider than a single module's credits so that
/// accumulating them never overflows.
pub type CreditSum = i64;

/// Credits assumed for a module when none are given.
pub const DEFAULT_CREDITS: Credits = 15;

/// Credits a year is assumed to comprise when a plan does not say.
pub const DEFAULT_TOTAL_CREDITS: Credits = 120;

/// Targets reported on when none are given.
pub const DEFAULT_TARGETS: [f64; 3] = [70.0, 75.0, 80.0];

/// Width of the dashed rule under the summary header.
pub const SUMMARY_RULE_WIDTH: usize = 60;

/// Width of the `Target` column in the summary.
pub const TARGET_COLUMN_WIDTH: usize = 8;

/// Width of the `Required Avg Remaining` column in the summary.
pub const REQUIRED_COLUMN_WIDTH: usize = 22;

/// Highest grade a module can realistically be awarded.
pub const MAX_GRADE: f64 = 100.0;

/// Environment variable holding the default plan path.
pub const PLAN_ENV: &str = "UNI_RESULTS_PLAN";

/// Environment variable holding comma-separated default targets.
pub const TARGETS_ENV: &str = "UNI_RESULTS_TARGETS";

/// Environment variable holding the default credits per year.
pub const TOTAL_CREDITS_ENV: &str = "UNI_RESULTS_TOTAL_CREDITS";

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "UNI_RESULTS_LOG";
