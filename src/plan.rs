#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    config,
    constants::{CreditSum, Credits, DEFAULT_CREDITS, DEFAULT_TARGETS, DEFAULT_TOTAL_CREDITS, MAX_GRADE, Year},
    tracker::{CreditTotals, GradeTracker, ModuleGrade, Weightings},
};

/// Serde default for module credits.
fn default_credits() -> Credits {
    DEFAULT_CREDITS
}

/// A module as it appears in a plan file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedModule {
    /// Grade awarded
    pub grade:   f64,
    /// Credits, 15 when omitted
    #[serde(default = "default_credits")]
    pub credits: Credits,
}

/// Everything needed to build a tracker and report on it: weightings, the
/// credits each year comprises, the grades so far and the targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Degree contribution per year
    pub weightings:    Weightings,
    /// Credits per year. Weighted years left out get the configured default.
    #[serde(default)]
    pub total_credits: CreditTotals,
    /// Modules recorded so far, by year
    #[serde(default)]
    pub modules:       BTreeMap<Year, Vec<PlannedModule>>,
    /// Targets to report on. Empty means the configured defaults.
    #[serde(default)]
    pub targets:       Vec<f64>,
}

impl Default for Plan {
    /// A second and third year split 40/60, with a full second year and three
    /// third year modules recorded.
    fn default() -> Self {
        let module = |grade: f64, credits: Credits| PlannedModule { grade, credits };

        let mut year_two: Vec<PlannedModule> = [76.0, 84.0, 88.0, 72.0, 78.0, 70.0]
            .into_iter()
            .map(|g| module(g, DEFAULT_CREDITS))
            .collect();
        year_two.push(module(71.0, 30));
        let year_three = [69.0, 94.0, 80.0]
            .into_iter()
            .map(|g| module(g, DEFAULT_CREDITS))
            .collect();

        Self {
            weightings:    BTreeMap::from([(2, 0.4), (3, 0.6)]),
            total_credits: BTreeMap::from([(2, DEFAULT_TOTAL_CREDITS), (3, DEFAULT_TOTAL_CREDITS)]),
            modules:       BTreeMap::from([(2, year_two), (3, year_three)]),
            targets:       DEFAULT_TARGETS.to_vec(),
        }
    }
}

impl Plan {
    /// Parses a plan from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Could not parse plan JSON")
    }

    /// Reads a plan file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read plan {}", path.display()))?;
        let plan = Self::from_json(&json)
            .with_context(|| format!("Invalid plan in {}", path.display()))?;
        tracing::info!("Loaded plan from {}", path.display());
        Ok(plan)
    }

    /// Reads `path` if given, then the configured plan path, and falls back to
    /// the built-in plan.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let configured = config::plan_path();
        match path.or(configured.as_deref()) {
            Some(p) => Self::load(p),
            None => {
                tracing::debug!("No plan given, using the built-in plan");
                Ok(Self::default())
            }
        }
    }

    /// Pretty printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Could not serialize plan")
    }

    /// Appends extra modules, eg. from the command line.
    pub fn with_modules(mut self, extra: impl IntoIterator<Item = ModuleGrade>) -> Self {
        for m in extra {
            self.modules
                .entry(m.year)
                .or_default()
                .push(PlannedModule {
                    grade:   m.grade,
                    credits: m.credits,
                });
        }
        self
    }

    /// Credit totals with every weighted year filled in.
    pub fn totals(&self) -> CreditTotals {
        let default_total = config::default_total_credits();
        let mut totals = self.total_credits.clone();
        for year in self.weightings.keys() {
            totals.entry(*year).or_insert(default_total);
        }
        totals
    }

    /// Targets to report on.
    pub fn targets(&self) -> Vec<f64> {
        if self.targets.is_empty() {
            config::default_targets()
        } else {
            self.targets.clone()
        }
    }

    /// Logs anything that looks wrong. Nothing is rejected.
    pub fn check(&self) {
        let totals = self.totals();

        for (year, total) in &totals {
            if *total <= 0 && self.weightings.contains_key(year) {
                tracing::warn!("Year {year} comprises {total} credits");
            }
        }

        for (year, modules) in &self.modules {
            if !self.weightings.contains_key(year) {
                tracing::warn!("Year {year} has modules but no weighting, they will not count");
            }

            for m in modules {
                if !(0.0..=MAX_GRADE).contains(&m.grade) {
                    tracing::warn!("Year {year} has a grade of {} outside 0-100", m.grade);
                }
                if m.credits <= 0 {
                    tracing::warn!("Year {year} has a module worth {} credits", m.credits);
                }
            }

            let used: CreditSum = modules.iter().map(|m| CreditSum::from(m.credits)).sum();
            if let Some(total) = totals.get(year)
                && used > CreditSum::from(*total)
            {
                tracing::warn!("Year {year} has {used} credits recorded but only {total} available");
            }
        }
    }

    /// Builds a tracker with every planned module recorded, in order.
    pub fn tracker(&self) -> Result<GradeTracker> {
        self.check();

        let mut tracker = GradeTracker::new(self.weightings.clone())?;
        for (&year, modules) in &self.modules {
            for m in modules {
                tracker.add_module_grade_with_credits(year, m.grade, m.credits);
            }
        }

        tracing::info!("Recorded {} modules, RWA {:.2}", self.module_count(), tracker.rwa());
        Ok(tracker)
    }

    /// Number of modules across all years.
    pub fn module_count(&self) -> usize {
        self.modules.values().map(Vec::len).sum()
    }
}
