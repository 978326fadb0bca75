#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # uni-results
//!
//! Works out your running weighted average and what you need on the rest of
//! your modules to land a target degree score.
//!
//! Reads a plan file (`--plan`, or `UNI_RESULTS_PLAN`) and falls back to a
//! built-in example plan. Run `uni-results plan` to print it as a starting
//! point.

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use tracing::metadata::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};
use uni_results::{
    GradeTracker, ModuleGrade, Plan, Requirement, Year, config, constants::MAX_GRADE, rows_json,
};

/// Where grades come from for a report.
#[derive(Debug, Clone)]
struct Source {
    /// Plan file, if given
    plan:    Option<PathBuf>,
    /// Extra modules added on top of the plan
    modules: Vec<ModuleGrade>,
}

impl Source {
    /// Loads the plan and applies extra modules.
    fn plan(&self) -> Result<Plan> {
        let plan = Plan::load_or_default(self.plan.as_deref())?;
        Ok(plan.with_modules(self.modules.iter().cloned()))
    }

    /// Loads the plan and records every module into a tracker.
    fn tracker(&self) -> Result<(Plan, GradeTracker)> {
        let plan = self.plan()?;
        let tracker = plan.tracker()?;
        Ok((plan, tracker))
    }
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Print the RWA and the average needed for each target
    Summary(Source, Vec<f64>),
    /// Print a per-year table, or JSON rows
    Breakdown(Source, bool),
    /// Print how realistic each target is, or JSON rows
    Outlook(Source, Vec<f64>, bool),
    /// List the modules of every year, or one year
    Modules(Source, Option<Year>, bool),
    /// Print the average needed for a single target
    Required(Source, f64),
    /// Print the built-in plan as JSON
    Plan,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses the plan path and extra modules
    fn s() -> impl Parser<Source> {
        let plan = long("plan")
            .short('p')
            .help("Path to a plan JSON file")
            .argument::<PathBuf>("PATH")
            .optional();
        let modules = long("module")
            .short('m')
            .help("Extra module as YEAR:GRADE[:CREDITS], credits default to 15")
            .argument::<ModuleGrade>("MODULE")
            .many();
        construct!(Source { plan, modules })
    }

    /// parses targets
    fn t() -> impl Parser<Vec<f64>> {
        long("target")
            .short('t')
            .help("Target final score, overrides the plan's targets")
            .argument::<f64>("TARGET")
            .many()
    }

    /// parses a single target
    fn g() -> impl Parser<f64> {
        positional::<f64>("TARGET").help("Target final score")
    }

    /// parses the JSON output switch
    fn j() -> impl Parser<bool> {
        long("json").help("Print rows as JSON instead of a table").switch()
    }

    /// parses an optional year filter
    fn y() -> impl Parser<Option<Year>> {
        long("year")
            .short('y')
            .help("Only list this year")
            .argument::<Year>("YEAR")
            .optional()
    }

    let summary = construct!(Cmd::Summary(s(), t()))
        .to_options()
        .command("summary")
        .help("Print the RWA and the average needed on remaining credits per target");

    let breakdown = construct!(Cmd::Breakdown(s(), j()))
        .to_options()
        .command("breakdown")
        .help("Print each year's average, credits and contribution");

    let outlook = construct!(Cmd::Outlook(s(), t(), j()))
        .to_options()
        .command("outlook")
        .help("Print how realistic each target is");

    let modules = construct!(Cmd::Modules(s(), y(), j()))
        .to_options()
        .command("modules")
        .help("List each year's modules with their grade, credits and class");

    let required = construct!(Cmd::Required(s(), g()))
        .to_options()
        .command("required")
        .help("Print the average needed on remaining credits for one target");

    let plan = pure(Cmd::Plan)
        .to_options()
        .command("plan")
        .help("Print the built-in plan as JSON");

    let cmd = construct!([summary, breakdown, outlook, modules, required, plan]);

    cmd.to_options()
        .descr("Running weighted average and degree target calculator")
        .run()
}

/// Picks command line targets over the plan's.
fn targets_for(plan: &Plan, overrides: Vec<f64>) -> Vec<f64> {
    if overrides.is_empty() {
        plan.targets()
    } else {
        overrides
    }
}

/// Prints the answer for a single target.
fn print_required(tracker: &GradeTracker, target: f64, requirement: Requirement) {
    let line = match requirement {
        Requirement::Achieved => {
            format!("{target}% is already achieved (RWA {:.2})", tracker.rwa()).green()
        }
        Requirement::Impossible => {
            format!("{target}% is impossible, no credits remain (RWA {:.2})", tracker.rwa()).red()
        }
        Requirement::Required(v) if v > MAX_GRADE => {
            format!("{target}% needs {v:.2}% on the remaining credits, which is out of reach").red()
        }
        Requirement::Required(v) => {
            format!("{target}% needs {v:.2}% on the remaining credits").yellow()
        }
    };
    println!("{line}");
}

fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let filter_layer = LevelFilter::from_level(config::log_level());
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let cmd = options();

    match cmd {
        Cmd::Summary(source, targets) => {
            let (plan, tracker) = source.tracker()?;
            tracker.summary(&plan.totals(), &targets_for(&plan, targets))?;
        }
        Cmd::Breakdown(source, json) => {
            let (plan, tracker) = source.tracker()?;
            if json {
                println!("{}", rows_json(&tracker.breakdown_rows(&plan.totals())?)?);
            } else {
                println!("{}", tracker.render_breakdown(&plan.totals())?);
            }
        }
        Cmd::Outlook(source, targets, json) => {
            let (plan, tracker) = source.tracker()?;
            let targets = targets_for(&plan, targets);
            if json {
                println!("{}", rows_json(&tracker.outlook_rows(&plan.totals(), &targets)?)?);
            } else {
                println!("{}", tracker.render_outlook(&plan.totals(), &targets)?);
            }
        }
        Cmd::Modules(source, year, json) => {
            let plan = source.plan()?;
            plan.check();
            if json {
                let rows: BTreeMap<Year, _> = year
                    .map_or_else(|| plan.years(), |y| vec![y])
                    .into_iter()
                    .map(|y| (y, plan.module_rows(y)))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{}", plan.render_modules(year));
            }
        }
        Cmd::Required(source, target) => {
            let (plan, tracker) = source.tracker()?;
            let requirement = tracker
                .required_average_for_remaining_credits(target, &plan.totals())
                .with_context(|| format!("Could not solve for a target of {target}"))?;
            print_required(&tracker, target, requirement);
        }
        Cmd::Plan => println!("{}", Plan::default().to_json()?),
    };

    Ok(())
}
