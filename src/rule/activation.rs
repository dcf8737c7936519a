//! Decides whether a rule is active.

use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};

use super::Rule;

/// The explicit enable / disable decisions of a session.
///
/// A rule is active unless one of the following holds, checked in order:
/// 1. its ID is disabled,
/// 2. its category is disabled,
/// 3. it is off by default and its ID is not enabled.
///
/// Enabling an ID therefore only overrides the default-off flag of a rule, never an explicit
/// disable. Unknown IDs are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationState {
    disabled_rules: FnvHashSet<String>,
    disabled_categories: FnvHashSet<String>,
    enabled_rules: FnvHashSet<String>,
}

impl ActivationState {
    pub fn is_active(&self, rule: &Rule) -> bool {
        let id = rule.id().id();

        if self.disabled_rules.contains(id) {
            return false;
        }

        if let Some(category) = rule.category() {
            if self.disabled_categories.contains(category.as_str()) {
                return false;
            }
        }

        !rule.is_default_off() || self.enabled_rules.contains(id)
    }

    pub fn disable_rule<S: Into<String>>(&mut self, id: S) {
        self.disabled_rules.insert(id.into());
    }

    /// Removes an explicit disable of the rule.
    pub fn restore_rule(&mut self, id: &str) {
        self.disabled_rules.remove(id);
    }

    pub fn enable_rule<S: Into<String>>(&mut self, id: S) {
        self.enabled_rules.insert(id.into());
    }

    pub fn disable_category<S: Into<String>>(&mut self, category: S) {
        self.disabled_categories.insert(category.into());
    }

    pub fn enable_category(&mut self, category: &str) {
        self.disabled_categories.remove(category);
    }

    pub fn disabled_rules(&self) -> &FnvHashSet<String> {
        &self.disabled_rules
    }

    pub fn disabled_categories(&self) -> &FnvHashSet<String> {
        &self.disabled_categories
    }

    pub fn enabled_rules(&self) -> &FnvHashSet<String> {
        &self.enabled_rules
    }
}
