#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{collections::BTreeSet, io::Write};

use anyhow::{Context, Result};
use itertools::Itertools;
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, object::Rows},
};

use crate::{
    classification::{Classification, Difficulty},
    constants::{
        CreditSum, MAX_GRADE, REQUIRED_COLUMN_WIDTH, SUMMARY_RULE_WIDTH, TARGET_COLUMN_WIDTH,
        Year,
    },
    error::TrackerError,
    plan::Plan,
    tracker::{CreditTotals, GradeTracker, Requirement},
};

/// One row of the per-year breakdown.
#[derive(Tabled, Clone, Debug, Serialize)]
pub struct YearRow {
    #[tabled(rename = "Year")]
    /// * `year`: year of study
    pub year:         Year,
    #[tabled(rename = "Weight")]
    /// * `weight`: share of the final degree, eg. `40%`
    pub weight:       String,
    #[tabled(rename = "Credits")]
    /// * `credits`: credits recorded out of the year's total
    pub credits:      String,
    #[tabled(rename = "Average")]
    /// * `average`: credit weighted average, `--` when nothing is recorded
    pub average:      String,
    #[tabled(rename = "Class")]
    /// * `class`: classification of the average
    pub class:        String,
    #[tabled(rename = "Contribution")]
    /// * `contribution`: share of the current RWA this year provides
    pub contribution: String,
}

/// One row of the target outlook.
#[derive(Tabled, Clone, Debug, Serialize)]
pub struct TargetRow {
    #[tabled(rename = "Target")]
    /// * `target`: final score aimed for
    pub target:     String,
    #[tabled(rename = "Basis")]
    /// * `basis`: what the figure means
    pub basis:      String,
    #[tabled(rename = "Figure")]
    /// * `figure`: current average when achieved, otherwise the average needed
    pub figure:     String,
    #[tabled(rename = "Outlook")]
    /// * `difficulty`: how realistic the target is
    pub difficulty: Difficulty,
}

/// One module in a year's listing.
#[derive(Tabled, Clone, Debug, Serialize)]
pub struct ModuleRow {
    #[tabled(rename = "#")]
    /// * `number`: position within the year, from 1
    pub number:  usize,
    #[tabled(rename = "Grade")]
    /// * `grade`: grade awarded, eg. `76%`
    pub grade:   String,
    #[tabled(rename = "Credits")]
    /// * `credits`: eg. `15 cr`
    pub credits: String,
    #[tabled(rename = "Class")]
    /// * `class`: short classification of the grade, eg. `2:1`
    pub class:   String,
}

/// Pretty printed JSON for any set of report rows.
pub fn rows_json<T: Serialize>(rows: &[T]) -> Result<String> {
    serde_json::to_string_pretty(rows).context("Could not serialize report rows")
}

/// Formats a percentage with `dp` decimal places.
fn percent(value: f64, dp: usize) -> String {
    format!("{value:.dp$}%")
}

/// Applies the table layout shared by every report.
fn styled(table: &mut Table, header: &str, footer: String) -> String {
    table
        .with(Panel::header(header))
        .with(Panel::footer(footer))
        .with(
            Modify::new(Rows::first())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(
            Modify::new(Rows::last())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(Style::modern())
        .to_string()
}

impl GradeTracker {
    /// Renders the plain text summary of the RWA and the average needed
    /// for each target.
    pub fn render_summary(
        &self,
        totals: &CreditTotals,
        targets: &[f64],
    ) -> Result<String, TrackerError> {
        let rows = targets
            .iter()
            .map(|&t| {
                let req = self.required_average_for_remaining_credits(t, totals)?;
                Ok(format!(
                    "{:>tw$}% | {:>rw$} | {}",
                    t,
                    req,
                    req.status(),
                    tw = TARGET_COLUMN_WIDTH,
                    rw = REQUIRED_COLUMN_WIDTH,
                ))
            })
            .collect::<Result<Vec<String>, TrackerError>>()?;

        let mut out = format!("Current Running Weighted Average (RWA): {:.2}\n\n", self.rwa());
        out.push_str(&format!(
            "{:>tw$} | {:>rw$} | Status\n",
            "Target",
            "Required Avg Remaining",
            tw = TARGET_COLUMN_WIDTH,
            rw = REQUIRED_COLUMN_WIDTH,
        ));
        out.push_str(&"-".repeat(SUMMARY_RULE_WIDTH));
        out.push('\n');
        for row in rows {
            out.push_str(&row);
            out.push('\n');
        }

        Ok(out)
    }

    /// Writes the summary to `out`.
    pub fn write_summary<W: Write>(
        &self,
        out: &mut W,
        totals: &CreditTotals,
        targets: &[f64],
    ) -> Result<()> {
        let text = self.render_summary(totals, targets)?;
        out.write_all(text.as_bytes())
            .context("Could not write summary")?;
        Ok(())
    }

    /// Prints the summary to standard output.
    pub fn summary(&self, totals: &CreditTotals, targets: &[f64]) -> Result<()> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.write_summary(&mut lock, totals, targets)
    }

    /// Rows of the per-year breakdown. Contributions are normalised by the
    /// active weight so they add up to the RWA.
    pub fn breakdown_rows(&self, totals: &CreditTotals) -> Result<Vec<YearRow>, TrackerError> {
        let active = self.active_weight();

        self.weightings()
            .iter()
            .map(|(&year, &weight)| {
                let total = *totals
                    .get(&year)
                    .ok_or(TrackerError::MissingYear { year })?;
                let avg = self.year_average(year);

                let contribution = match avg {
                    Some(avg) if active > 0.0 => percent(weight / active * avg, 2),
                    _ => "--".to_string(),
                };

                Ok(YearRow {
                    year,
                    weight: percent(weight * 100.0, 0),
                    credits: format!("{} / {}", self.year_credits(year), total),
                    average: avg.map_or_else(|| "--".to_string(), |a| percent(a, 2)),
                    class: avg.map_or_else(
                        || "--".to_string(),
                        |a| Classification::from_average(a).to_string(),
                    ),
                    contribution,
                })
            })
            .collect()
    }

    /// Renders the per-year breakdown as a table.
    pub fn render_breakdown(&self, totals: &CreditTotals) -> Result<String, TrackerError> {
        let rows = self.breakdown_rows(totals)?;
        let footer = if self.has_grades() {
            format!(
                "RWA: {} ({})",
                percent(self.rwa(), 2),
                Classification::from_average(self.rwa())
            )
        } else {
            "No data yet".to_string()
        };

        Ok(styled(&mut Table::new(&rows), "Year Breakdown", footer))
    }

    /// Rows of the target outlook.
    pub fn outlook_rows(
        &self,
        totals: &CreditTotals,
        targets: &[f64],
    ) -> Result<Vec<TargetRow>, TrackerError> {
        targets
            .iter()
            .map(|&target| {
                let req = self.required_average_for_remaining_credits(target, totals)?;
                let (basis, figure) = match req {
                    r if r.is_achieved() => ("Current avg", percent(self.rwa(), 1)),
                    Requirement::Required(v) if v <= MAX_GRADE => {
                        ("Needed in remaining", percent(v, 1))
                    }
                    _ => ("Needed in remaining", "N/A".to_string()),
                };

                Ok(TargetRow {
                    target: format!("{target}%"),
                    basis: basis.to_string(),
                    figure,
                    difficulty: Difficulty::from_requirement(req),
                })
            })
            .collect()
    }

    /// Renders the target outlook as a table.
    pub fn render_outlook(
        &self,
        totals: &CreditTotals,
        targets: &[f64],
    ) -> Result<String, TrackerError> {
        let rows = self.outlook_rows(totals, targets)?;
        let footer = format!(
            "Targets: {}",
            targets.iter().map(|t| format!("{t}%")).join(", ")
        );

        Ok(styled(&mut Table::new(&rows), "Target Outlook", footer))
    }
}

impl Plan {
    /// Years that have a weighting or any modules, ascending.
    pub fn years(&self) -> Vec<Year> {
        self.weightings
            .keys()
            .chain(self.modules.keys())
            .copied()
            .collect::<BTreeSet<Year>>()
            .into_iter()
            .collect()
    }

    /// Rows listing the modules recorded for `year`, in order.
    pub fn module_rows(&self, year: Year) -> Vec<ModuleRow> {
        self.modules
            .get(&year)
            .map(|modules| {
                modules
                    .iter()
                    .enumerate()
                    .map(|(i, m)| ModuleRow {
                        number:  i + 1,
                        grade:   format!("{}%", m.grade),
                        credits: format!("{} cr", m.credits),
                        class:   Classification::from_average(m.grade)
                            .short_label()
                            .to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Renders one table per year listing its modules, or only `year` if
    /// given.
    pub fn render_modules(&self, year: Option<Year>) -> String {
        let years = match year {
            Some(y) => vec![y],
            None => self.years(),
        };

        years
            .into_iter()
            .map(|year| {
                let rows = self.module_rows(year);
                if rows.is_empty() {
                    return format!("No modules added for Year {year} yet.");
                }

                let modules = self.modules.get(&year).map(Vec::as_slice).unwrap_or_default();
                let credits: CreditSum = modules.iter().map(|m| CreditSum::from(m.credits)).sum();
                let weighted: f64 = modules.iter().map(|m| m.grade * f64::from(m.credits)).sum();
                let avg = if credits > 0 {
                    percent(weighted / credits as f64, 2)
                } else {
                    "--".to_string()
                };

                let plural = if rows.len() == 1 { "" } else { "s" };
                let header = format!("Year {year}: {} module{plural}", rows.len());
                let footer = format!("{credits} credits, avg {avg}");
                styled(&mut Table::new(&rows), &header, footer)
            })
            .join("\n")
    }
}
