#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex, OnceLock},
};

use tracing::Level;

use crate::constants::{
    Credits, DEFAULT_TARGETS, DEFAULT_TOTAL_CREDITS, LOG_ENV, PLAN_ENV, TARGETS_ENV,
    TOTAL_CREDITS_ENV,
};

/// Defaults sourced from the environment, shared across the crate.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigState {
    /// Plan file used when none is passed explicitly.
    plan_path:     Option<PathBuf>,
    /// Targets reported on when a plan lists none.
    targets:       Vec<f64>,
    /// Credits a year comprises when a plan does not say.
    total_credits: Credits,
    /// Log level for the binary.
    log_level:     Level,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            plan_path:     None,
            targets:       DEFAULT_TARGETS.to_vec(),
            total_credits: DEFAULT_TOTAL_CREDITS,
            log_level:     Level::INFO,
        }
    }
}

impl ConfigState {
    /// Reads the environment, falling back to defaults for anything unset
    /// or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let plan_path = lookup(PLAN_ENV)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let targets = lookup(TARGETS_ENV)
            .map(|v| parse_targets(&v))
            .filter(|t| !t.is_empty())
            .unwrap_or(defaults.targets);

        let total_credits = lookup(TOTAL_CREDITS_ENV)
            .and_then(|v| v.trim().parse::<Credits>().ok())
            .unwrap_or(defaults.total_credits);

        let log_level = lookup(LOG_ENV)
            .and_then(|v| v.trim().parse::<Level>().ok())
            .unwrap_or(defaults.log_level);

        Self {
            plan_path,
            targets,
            total_credits,
            log_level,
        }
    }

    /// Returns the configured plan path, if any.
    pub fn plan_path(&self) -> Option<&PathBuf> {
        self.plan_path.as_ref()
    }

    /// Returns the default targets.
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Returns the default credits per year.
    pub fn total_credits(&self) -> Credits {
        self.total_credits
    }

    /// Returns the log level.
    pub fn log_level(&self) -> Level {
        self.log_level
    }
}

/// Parses comma separated targets, keeping those in `(0, 100]`, sorted
/// ascending. Anything else is dropped.
pub fn parse_targets(raw: &str) -> Vec<f64> {
    let mut targets: Vec<f64> = raw
        .split(',')
        .filter_map(|s| s.trim().parse::<f64>().ok())
        .filter(|t| *t > 0.0 && *t <= 100.0)
        .collect();
    targets.sort_by(f64::total_cmp);
    targets
}

/// Shared configuration handle used throughout the crate.
#[derive(Clone, Debug)]
pub struct ConfigHandle(Arc<ConfigState>);

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Global storage for the lazily constructed configuration state.
static CONFIG_SLOT: OnceLock<Mutex<Option<Arc<ConfigState>>>> = OnceLock::new();

/// Returns the mutex guarding the global configuration slot.
fn slot() -> &'static Mutex<Option<Arc<ConfigState>>> {
    CONFIG_SLOT.get_or_init(|| Mutex::new(None))
}

/// Returns the active configuration, reading the environment on first use.
pub fn get() -> ConfigHandle {
    let mut guard = slot().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(cfg) = guard.as_ref() {
        return ConfigHandle(Arc::clone(cfg));
    }

    let cfg = Arc::new(ConfigState::from_env());
    *guard = Some(Arc::clone(&cfg));
    ConfigHandle(cfg)
}

/// Returns the configured plan path, if any.
pub fn plan_path() -> Option<PathBuf> {
    get().plan_path().cloned()
}

/// Returns the configured default targets.
pub fn default_targets() -> Vec<f64> {
    get().targets().to_vec()
}

/// Returns the configured default credits per year.
pub fn default_total_credits() -> Credits {
    get().total_credits()
}

/// Returns the configured log level.
pub fn log_level() -> Level {
    get().log_level()
}
