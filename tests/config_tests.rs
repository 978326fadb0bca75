use std::{collections::HashMap, path::PathBuf};

use tracing::Level;
use uni_results::config::{ConfigState, parse_targets};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn unset_environment_gives_defaults() {
    let cfg = ConfigState::from_lookup(lookup(&[]));
    assert_eq!(cfg, ConfigState::default());
    assert_eq!(cfg.targets(), &[70.0, 75.0, 80.0]);
    assert_eq!(cfg.total_credits(), 120);
    assert_eq!(cfg.log_level(), Level::INFO);
    assert!(cfg.plan_path().is_none());
}

#[test]
fn environment_overrides_are_read() {
    let cfg = ConfigState::from_lookup(lookup(&[
        ("UNI_RESULTS_PLAN", " grades.json "),
        ("UNI_RESULTS_TARGETS", "80, 60,70"),
        ("UNI_RESULTS_TOTAL_CREDITS", "180"),
        ("UNI_RESULTS_LOG", "debug"),
    ]));

    assert_eq!(cfg.plan_path(), Some(&PathBuf::from("grades.json")));
    assert_eq!(cfg.targets(), &[60.0, 70.0, 80.0]);
    assert_eq!(cfg.total_credits(), 180);
    assert_eq!(cfg.log_level(), Level::DEBUG);
}

#[test]
fn unparsable_values_fall_back() {
    let cfg = ConfigState::from_lookup(lookup(&[
        ("UNI_RESULTS_PLAN", "   "),
        ("UNI_RESULTS_TARGETS", "lots, 0, 101"),
        ("UNI_RESULTS_TOTAL_CREDITS", "many"),
        ("UNI_RESULTS_LOG", "chatty"),
    ]));

    assert_eq!(cfg, ConfigState::default());
}

#[test]
fn targets_are_filtered_and_sorted() {
    assert_eq!(parse_targets("75, 70.5 ,x,100,0,-5,80"), vec![70.5, 75.0, 80.0, 100.0]);
    assert!(parse_targets("").is_empty());
}
