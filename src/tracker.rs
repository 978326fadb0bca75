#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use typed_builder::TypedBuilder;

use crate::{
    constants::{CreditSum, Credits, DEFAULT_CREDITS, Year},
    error::TrackerError,
};

/// Contribution of each year towards the final degree.
pub type Weightings = BTreeMap<Year, f64>;

/// Credits each year is expected to comprise in total.
pub type CreditTotals = BTreeMap<Year, Credits>;

#[derive(Clone, Debug, PartialEq, TypedBuilder)]
/// A single module result waiting to be recorded.
pub struct ModuleGrade {
    /// Year of study the module belongs to
    pub year:    Year,
    /// Grade awarded, usually out of 100
    pub grade:   f64,
    /// Credits the module is worth
    #[builder(default = DEFAULT_CREDITS)]
    pub credits: Credits,
}

impl ModuleGrade {
    /// Creates a module worth the default number of credits.
    pub fn new(year: Year, grade: f64) -> Self {
        Self::builder().year(year).grade(grade).build()
    }
}

impl FromStr for ModuleGrade {
    type Err = TrackerError;

    /// Parses `YEAR:GRADE` or `YEAR:GRADE:CREDITS`, eg. `2:71:30`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| TrackerError::InvalidModule {
            input:  s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid("wrong number of fields"));
        }

        let year = parts[0]
            .parse::<Year>()
            .map_err(|_| invalid("year is not a whole number"))?;
        let grade = parts[1]
            .parse::<f64>()
            .map_err(|_| invalid("grade is not a number"))?;
        let credits = match parts.get(2) {
            Some(c) => c
                .parse::<Credits>()
                .map_err(|_| invalid("credits are not a whole number"))?,
            None => DEFAULT_CREDITS,
        };

        Ok(Self {
            year,
            grade,
            credits,
        })
    }
}

/// Outcome of solving for the average needed on the remaining credits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Requirement {
    /// Nothing is left to sit and the target is already met.
    Achieved,
    /// Nothing is left to sit and the target was missed.
    Impossible,
    /// Uniform average needed across every remaining credit. May be above
    /// 100 or below 0.
    Required(f64),
}

impl Requirement {
    /// Legacy scalar form: `0` when achieved, `+inf` when impossible.
    pub fn as_f64(&self) -> f64 {
        match self {
            Requirement::Achieved => 0.0,
            Requirement::Impossible => f64::INFINITY,
            Requirement::Required(v) => *v,
        }
    }

    /// The required average, if there is one to aim for.
    pub fn value(&self) -> Option<f64> {
        match self {
            Requirement::Required(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether the target is already met. A required average of exactly 0
    /// counts as met even with credits still to sit.
    pub fn is_achieved(&self) -> bool {
        match self {
            Requirement::Achieved => true,
            Requirement::Required(v) => *v == 0.0,
            Requirement::Impossible => false,
        }
    }

    /// Status label used in the summary report.
    pub fn status(&self) -> &'static str {
        match self {
            _ if self.is_achieved() => "Already achieved",
            Requirement::Impossible => "Impossible",
            _ => "Required",
        }
    }
}

impl Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requirement::Required(v) if !self.is_achieved() => f.pad(&format!("{v:.2}%")),
            _ => f.pad("-"),
        }
    }
}

/// Running sums for one year.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct YearTally {
    /// Sum of `grade * credits`
    grade_credits: f64,
    /// Sum of `credits`
    credits:       CreditSum,
}

/// Accumulates module grades per year and keeps the running weighted average
/// (RWA) up to date.
#[derive(Clone, Debug)]
pub struct GradeTracker {
    /// Degree contribution of each year
    weightings: Weightings,
    /// Per-year accumulators
    tallies:    BTreeMap<Year, YearTally>,
    /// RWA as of the last recorded module
    rwa:        f64,
}

impl GradeTracker {
    /// Creates an empty tracker.
    ///
    /// * `weightings`: year to contribution, eg. `[(2, 0.4), (3, 0.6)]`.
    ///   Weights need not sum to 1.
    pub fn new(weightings: impl IntoIterator<Item = (Year, f64)>) -> Result<Self, TrackerError> {
        let weightings: Weightings = weightings.into_iter().collect();
        if weightings.is_empty() {
            return Err(TrackerError::NoWeightings);
        }

        Ok(Self {
            weightings,
            tallies: BTreeMap::new(),
            rwa: 0.0,
        })
    }

    /// Records a module worth the default 15 credits.
    pub fn add_module_grade(&mut self, year: Year, grade: f64) {
        self.add_module_grade_with_credits(year, grade, DEFAULT_CREDITS);
    }

    /// Records a module worth `credits`. Nothing is range checked.
    pub fn add_module_grade_with_credits(&mut self, year: Year, grade: f64, credits: Credits) {
        let tally = self.tallies.entry(year).or_default();
        tally.grade_credits += grade * f64::from(credits);
        tally.credits += CreditSum::from(credits);

        if !self.weightings.contains_key(&year) {
            tracing::debug!("Year {year} has no weighting, its modules will not count");
        }

        self.recalculate();
        tracing::debug!(year, grade, credits, rwa = self.rwa, "Recorded module grade");
    }

    /// Records a module built with [`ModuleGrade::builder`].
    pub fn add_module(&mut self, module: ModuleGrade) {
        self.add_module_grade_with_credits(module.year, module.grade, module.credits);
    }

    /// Returns the current running weighted average.
    pub fn rwa(&self) -> f64 {
        self.rwa
    }

    /// Credit weighted average for `year`, or `None` if it has no credits.
    pub fn year_average(&self, year: Year) -> Option<f64> {
        self.tallies
            .get(&year)
            .filter(|t| t.credits > 0)
            .map(|t| t.grade_credits / t.credits as f64)
    }

    /// Credits recorded so far for `year`.
    pub fn year_credits(&self, year: Year) -> CreditSum {
        self.tallies.get(&year).map_or(0, |t| t.credits)
    }

    /// Weighting for `year`, if it has one.
    pub fn weight(&self, year: Year) -> Option<f64> {
        self.weightings.get(&year).copied()
    }

    /// All year weightings.
    pub fn weightings(&self) -> &Weightings {
        &self.weightings
    }

    /// Weighted years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.weightings.keys().copied()
    }

    /// Whether any module has been recorded, weighted or not.
    pub fn has_grades(&self) -> bool {
        !self.tallies.is_empty()
    }

    /// Total weight of the weighted years that have credits. This is what the
    /// RWA is normalised by.
    pub fn active_weight(&self) -> f64 {
        self.weightings
            .iter()
            .filter(|(year, _)| self.year_average(**year).is_some())
            .map(|(_, weight)| weight)
            .sum()
    }

    /// Solves for the uniform average needed across every remaining credit
    /// to finish on `target`.
    ///
    /// * `target`: final weighted score to reach
    /// * `totals`: credits each weighted year comprises; every weighted year
    ///   must be present, and a year with credits recorded must not total 0
    pub fn required_average_for_remaining_credits(
        &self,
        target: f64,
        totals: &CreditTotals,
    ) -> Result<Requirement, TrackerError> {
        let mut completed_contribution = 0.0;
        let mut denominator = 0.0;

        for (&year, &weight) in &self.weightings {
            let total = *totals
                .get(&year)
                .ok_or(TrackerError::MissingYear { year })?;
            let completed = self.year_credits(year);
            let remaining = CreditSum::from(total) - completed;
            if total == 0 && completed != 0 {
                return Err(TrackerError::ZeroTotal { year, completed });
            }
            let total = f64::from(total);

            if let Some(avg) = self.year_average(year) {
                completed_contribution += weight * (avg * completed as f64 / total);
            }

            // over-enrolled years have negative remaining and add nothing
            if remaining > 0 {
                denominator += weight * (remaining as f64 / total);
            }
        }

        let requirement = if denominator == 0.0 {
            if self.rwa >= target {
                Requirement::Achieved
            } else {
                Requirement::Impossible
            }
        } else {
            Requirement::Required((target - completed_contribution) / denominator)
        };

        tracing::debug!(goal = target, ?requirement, "Solved required average");
        Ok(requirement)
    }

    /// Recomputes the cached RWA from the accumulators.
    fn recalculate(&mut self) {
        let (weighted, total_weight) = self
            .weightings
            .iter()
            .filter_map(|(year, weight)| self.year_average(*year).map(|avg| (weight * avg, *weight)))
            .fold((0.0, 0.0), |(sum, weights), (w, t)| (sum + w, weights + t));

        self.rwa = if total_weight > 0.0 {
            weighted / total_weight
        } else {
            0.0
        };
    }
}
