#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::constants::{CreditSum, Year};

/// Errors raised by the grade tracker and its inputs.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// A tracker needs at least one weighted year.
    #[error("At least one year weighting is required.")]
    NoWeightings,
    /// A weighted year has no entry in the total credits map.
    #[error("No total credits were given for year {year}.")]
    MissingYear {
        /// The weighted year that could not be found.
        year: Year,
    },
    /// A weighted year comprises zero credits but has some recorded.
    #[error("Year {year} comprises 0 credits but has {completed} recorded.")]
    ZeroTotal {
        /// The weighted year with a zero total.
        year:      Year,
        /// Credits recorded against it.
        completed: CreditSum,
    },
    /// A module entry could not be parsed.
    #[error("Could not parse module `{input}`, expected YEAR:GRADE[:CREDITS] ({reason}).")]
    InvalidModule {
        /// The text that was given.
        input:  String,
        /// What went wrong.
        reason: String,
    },
}
