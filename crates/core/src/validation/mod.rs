//! Validation gate: named rule sets applied to transfer objects.
//!
//! Each entity builds one [`ValidationGate`] holding a rule set per
//! operation label ([`CREATE`], [`UPDATE`]). Update typically repeats the
//! create rules and adds an id-presence check. Rules are synchronous and
//! never consult storage; foreign keys are only checked for shape here.

pub mod rules;

use std::collections::HashMap;

use crate::error::CoreError;

/// Rule set applied before inserting a new record.
pub const CREATE: &str = "create";

/// Rule set applied before updating an existing record.
pub const UPDATE: &str = "update";

/// A single predicate. `Err` carries a human-readable message.
pub type Rule<T> = Box<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// Rule sets for one transfer type, keyed by operation label.
pub struct ValidationGate<T> {
    rule_sets: HashMap<&'static str, Vec<Rule<T>>>,
}

impl<T> ValidationGate<T> {
    pub fn new() -> Self {
        Self {
            rule_sets: HashMap::new(),
        }
    }

    /// Register (or replace) the rules for `name`.
    pub fn with_rule_set(mut self, name: &'static str, rules: Vec<Rule<T>>) -> Self {
        self.rule_sets.insert(name, rules);
        self
    }

    /// Whether a rule set named `name` is registered.
    pub fn has_rule_set(&self, name: &str) -> bool {
        self.rule_sets.contains_key(name)
    }

    /// Apply every rule in `rule_set` to `value`.
    ///
    /// All failing rules are reported in one [`CoreError::Validation`],
    /// joined with `"; "` in registration order. Asking for an unregistered
    /// rule set is a wiring bug and yields [`CoreError::Internal`].
    pub fn validate(&self, value: &T, rule_set: &str) -> Result<(), CoreError> {
        let rules = self.rule_sets.get(rule_set).ok_or_else(|| {
            CoreError::Internal(format!("Unknown validation rule set '{rule_set}'"))
        })?;

        let failures: Vec<String> = rules.iter().filter_map(|rule| rule(value).err()).collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(failures.join("; ")))
        }
    }
}

impl<T> Default for ValidationGate<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    struct Probe {
        name: String,
        size: i32,
    }

    fn gate() -> ValidationGate<Probe> {
        ValidationGate::new()
            .with_rule_set(
                CREATE,
                vec![Box::new(|p: &Probe| {
                    if p.name.is_empty() {
                        Err("name is required".to_string())
                    } else {
                        Ok(())
                    }
                })],
            )
            .with_rule_set(
                UPDATE,
                vec![
                    Box::new(|p: &Probe| {
                        if p.name.is_empty() {
                            Err("name is required".to_string())
                        } else {
                            Ok(())
                        }
                    }),
                    Box::new(|p: &Probe| {
                        if p.size < 0 {
                            Err("size must not be negative".to_string())
                        } else {
                            Ok(())
                        }
                    }),
                ],
            )
    }

    #[test]
    fn passing_value_is_accepted() {
        let probe = Probe {
            name: "ok".into(),
            size: 1,
        };
        assert!(gate().validate(&probe, CREATE).is_ok());
        assert!(gate().validate(&probe, UPDATE).is_ok());
    }

    #[test]
    fn rule_sets_apply_different_rules() {
        let probe = Probe {
            name: "ok".into(),
            size: -1,
        };
        assert!(gate().validate(&probe, CREATE).is_ok());
        assert_matches!(
            gate().validate(&probe, UPDATE),
            Err(CoreError::Validation(msg)) if msg == "size must not be negative"
        );
    }

    #[test]
    fn all_failures_are_reported_together() {
        let probe = Probe {
            name: String::new(),
            size: -1,
        };
        assert_matches!(
            gate().validate(&probe, UPDATE),
            Err(CoreError::Validation(msg))
                if msg == "name is required; size must not be negative"
        );
    }

    #[test]
    fn unknown_rule_set_is_internal_error() {
        let probe = Probe {
            name: "ok".into(),
            size: 0,
        };
        assert_matches!(
            gate().validate(&probe, "archive"),
            Err(CoreError::Internal(_))
        );
        assert!(!gate().has_rule_set("archive"));
    }
}
