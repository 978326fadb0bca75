#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use serde::Serialize;

use crate::{constants::MAX_GRADE, tracker::Requirement};

/// UK undergraduate degree classification bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Classification {
    /// Below 40
    Fail,
    /// 40 and above
    Third,
    /// 50 and above, a 2:2
    LowerSecond,
    /// 60 and above, a 2:1
    UpperSecond,
    /// 70 and above
    First,
}

impl Classification {
    /// Band an average falls into.
    ///
    /// | Range  | Band  |
    /// |--------|-------|
    /// | >= 70  | First |
    /// | >= 60  | 2:1   |
    /// | >= 50  | 2:2   |
    /// | >= 40  | Third |
    /// | < 40   | Fail  |
    pub fn from_average(avg: f64) -> Self {
        match avg {
            a if a >= 70.0 => Classification::First,
            a if a >= 60.0 => Classification::UpperSecond,
            a if a >= 50.0 => Classification::LowerSecond,
            a if a >= 40.0 => Classification::Third,
            _ => Classification::Fail,
        }
    }

    /// Long label for a degree, eg. `Upper Second (2:1)`.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::First => "First Class",
            Classification::UpperSecond => "Upper Second (2:1)",
            Classification::LowerSecond => "Lower Second (2:2)",
            Classification::Third => "Third Class",
            Classification::Fail => "Fail",
        }
    }

    /// Short label for a single module, eg. `2:1`.
    pub fn short_label(&self) -> &'static str {
        match self {
            Classification::First => "1st",
            Classification::UpperSecond => "2:1",
            Classification::LowerSecond => "2:2",
            Classification::Third => "3rd",
            Classification::Fail => "Fail",
        }
    }
}

impl Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// How hard a target looks given the average it requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Required average below 60
    OnTrack,
    /// 60 and above
    Moderate,
    /// 75 and above
    Hard,
    /// 90 and above
    VeryHard,
    /// Above 100, or nothing left to sit
    Impossible,
    /// Already met
    Achieved,
}

impl Difficulty {
    /// Rates a solved requirement.
    pub fn from_requirement(requirement: Requirement) -> Self {
        match requirement {
            r if r.is_achieved() => Difficulty::Achieved,
            Requirement::Achieved => Difficulty::Achieved,
            Requirement::Impossible => Difficulty::Impossible,
            Requirement::Required(v) if v > MAX_GRADE => Difficulty::Impossible,
            Requirement::Required(v) if v >= 90.0 => Difficulty::VeryHard,
            Requirement::Required(v) if v >= 75.0 => Difficulty::Hard,
            Requirement::Required(v) if v >= 60.0 => Difficulty::Moderate,
            Requirement::Required(_) => Difficulty::OnTrack,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::OnTrack => "On Track",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
            Difficulty::VeryHard => "Very Hard",
            Difficulty::Impossible => "Impossible",
            Difficulty::Achieved => "Achieved",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}
