//! Catalog validation: bounds checks for event definitions, backing the CLI
//! `validate` command. Returns every issue found rather than failing fast.

use crate::model::catalog::load_event_catalog;
use crate::model::event::GameEvent;

pub fn validate_events(events: &[GameEvent]) -> Result<(), Vec<String>> {
    let mut issues = Vec::new();

    if events.is_empty() {
        issues.push("catalog is empty".to_string());
    }

    let mut seen_ids = std::collections::HashSet::new();
    for event in events {
        let label = format!("event {} '{}'", event.id, event.name);
        if !seen_ids.insert(event.id) {
            issues.push(format!("{label}: duplicate id"));
        }
        if event.name.trim().is_empty() {
            issues.push(format!("event {}: name is empty", event.id));
        }
        if !(1..=10).contains(&event.difficulty) {
            issues.push(format!("{label}: difficulty {} out of 1-10", event.difficulty));
        }
        if !(0.10..=0.99).contains(&event.elimination_rate) {
            issues.push(format!(
                "{label}: elimination_rate {} out of [0.10, 0.99]",
                event.elimination_rate
            ));
        }
        if event.min_survival_secs > event.max_survival_secs {
            issues.push(format!("{label}: survival bounds inverted"));
        }
        // Halved survival time minus the betrayal penalty must stay positive,
        // or cumulative scores would stall.
        if event.min_survival_secs < 20 {
            issues.push(format!("{label}: min_survival_secs below 20"));
        }
        if event.causes.is_empty() {
            issues.push(format!("{label}: no death causes"));
        }
        if event.decor.trim().is_empty() {
            issues.push(format!("{label}: decor is empty"));
        }
        if event.is_final && event.min_players_for_final < 2 {
            issues.push(format!("{label}: final needs min_players_for_final >= 2"));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Validate a catalog file on disk.
pub fn validate_catalog_file(path: &str) -> Result<(), Vec<String>> {
    match load_event_catalog(path) {
        Some(events) => validate_events(&events),
        None => Err(vec![format!("could not read catalog at '{path}'")]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::builtin_events;

    #[test]
    fn builtin_passes() {
        assert!(validate_events(&builtin_events()).is_ok());
    }

    #[test]
    fn out_of_range_rate_is_reported() {
        let mut events = builtin_events();
        events[0].elimination_rate = 1.5;
        let issues = validate_events(&events).unwrap_err();
        assert!(issues.iter().any(|i| i.contains("elimination_rate")));
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let mut events = builtin_events();
        events[1].id = events[0].id;
        let issues = validate_events(&events).unwrap_err();
        assert!(issues.iter().any(|i| i.contains("duplicate id")));
    }

    #[test]
    fn final_without_threshold_is_reported() {
        let mut events = builtin_events();
        let idx = events.iter().position(|e| e.is_final).expect("has a final");
        events[idx].min_players_for_final = 0;
        let issues = validate_events(&events).unwrap_err();
        assert!(issues.iter().any(|i| i.contains("min_players_for_final")));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(validate_catalog_file("no/such/catalog.json").is_err());
    }
}
