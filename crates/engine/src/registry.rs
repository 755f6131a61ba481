//! Concurrent rule store.
//!
//! Reads hand out cloned snapshots so no caller ever holds the lock while
//! running rule code. Writes (register, unregister, enable toggles) are
//! exclusive with reads via `std::sync::RwLock`. Listing preserves
//! registration order.

use std::sync::RwLock;

use indexmap::IndexMap;
use tracing::debug;

use crate::rule::{ComplianceRule, RuleDescriptor};

pub struct RuleRegistry {
    rules: RwLock<IndexMap<String, ComplianceRule>>,
}

impl RuleRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        RuleRegistry {
            rules: RwLock::new(IndexMap::new()),
        }
    }

    /// Registry pre-populated with the given rules, in order.
    pub fn with_rules(rules: impl IntoIterator<Item = ComplianceRule>) -> Self {
        let registry = RuleRegistry::new();
        for rule in rules {
            registry.register(rule);
        }
        registry
    }

    /// Registry pre-populated with the built-in catalog.
    pub fn with_default_rules() -> Self {
        RuleRegistry::with_rules(crate::builtin::default_rules())
    }

    /// Insert a rule, overwriting any existing rule with the same id.
    pub fn register(&self, rule: ComplianceRule) {
        let mut guard = self.rules.write().expect("rule registry lock poisoned");
        let replaced = guard.insert(rule.id.clone(), rule.clone()).is_some();
        if replaced {
            debug!(rule_id = %rule.id, "replaced registered rule");
        } else {
            debug!(rule_id = %rule.id, category = %rule.category, "registered rule");
        }
    }

    /// Remove a rule by id. Returns false if the id is unknown.
    pub fn unregister(&self, id: &str) -> bool {
        let mut guard = self.rules.write().expect("rule registry lock poisoned");
        let removed = guard.shift_remove(id).is_some();
        if removed {
            debug!(rule_id = %id, "unregistered rule");
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<ComplianceRule> {
        let guard = self.rules.read().expect("rule registry lock poisoned");
        guard.get(id).cloned()
    }

    /// All rules in registration order, enabled or not.
    pub fn list_all(&self) -> Vec<ComplianceRule> {
        let guard = self.rules.read().expect("rule registry lock poisoned");
        guard.values().cloned().collect()
    }

    /// Serializable snapshots of all rules, in registration order.
    pub fn descriptors(&self) -> Vec<RuleDescriptor> {
        let guard = self.rules.read().expect("rule registry lock poisoned");
        guard.values().map(ComplianceRule::descriptor).collect()
    }

    /// Toggle a rule. Returns false if the id is unknown.
    pub fn set_enabled(&self, id: &str, enabled: bool) -> bool {
        let mut guard = self.rules.write().expect("rule registry lock poisoned");
        match guard.get_mut(id) {
            Some(rule) => {
                rule.enabled = enabled;
                debug!(rule_id = %id, enabled, "toggled rule");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.rules.read().expect("rule registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot for the evaluator. Poisoning is propagated instead of
    /// panicking so an evaluation call can report it to its caller.
    pub(crate) fn try_list_all(&self) -> Result<Vec<ComplianceRule>, String> {
        let guard = self
            .rules
            .read()
            .map_err(|e| format!("rule registry read lock: {e}"))?;
        Ok(guard.values().cloned().collect())
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
