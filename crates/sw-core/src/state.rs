//! Story state: where the reader is and what has happened so far.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Untyped key/value store for story flags and counters.
///
/// Values are JSON values; the last write to a key wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables(HashMap<String, Value>);

impl Variables {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a variable. Unset keys yield `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a variable as an integer, if it holds one.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    /// Remove a variable, returning its old value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Number of variables set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no variable is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All variables sorted by key.
    pub fn sorted(&self) -> Vec<(&str, &Value)> {
        let mut vars: Vec<_> = self.0.iter().map(|(k, v)| (k.as_str(), v)).collect();
        vars.sort_by_key(|(k, _)| *k);
        vars
    }

    /// Remove every variable.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Navigation state of one story session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryState {
    /// Name of the passage on display. Never empty.
    pub(crate) current_passage: String,
    /// Passages visited, in order. Only restart clears it.
    pub(crate) history: Vec<String>,
    /// Story variables.
    pub(crate) variables: Variables,
}

impl StoryState {
    /// Create a fresh state positioned at `start`.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            current_passage: start.into(),
            history: Vec::new(),
            variables: Variables::new(),
        }
    }

    /// Name of the passage on display.
    pub fn current_passage(&self) -> &str {
        &self.current_passage
    }

    /// Passages visited, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The variable store.
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Record a successful visit.
    pub(crate) fn visit(&mut self, name: &str) {
        self.current_passage = name.to_string();
        self.history.push(name.to_string());
    }

    /// Reset to `start` with empty history and variables.
    pub(crate) fn reset(&mut self, start: &str) {
        self.current_passage = start.to_string();
        self.history.clear();
        self.variables.clear();
    }
}
