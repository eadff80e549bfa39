//! Hooks that run after every successful navigation.

use tracing::info;

use crate::state::Variables;

/// Record of one successful navigation, handed to each hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// The passage navigated to.
    pub passage: String,
    /// The passage that was current before.
    pub previous: String,
    /// History length after this navigation.
    pub step: usize,
}

/// Identifies a registered hook so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(pub(crate) u64);

/// Extension point invoked after history and current passage are updated.
///
/// Hooks run in registration order. They may read and write story
/// variables but cannot touch history.
pub trait NavigationHook: std::fmt::Debug + Send {
    /// Human-readable name for this hook.
    fn name(&self) -> &str;

    /// Called once per successful navigation.
    fn on_navigate(&mut self, nav: &Navigation, variables: &mut Variables);
}

/// Counts successful navigations in an integer variable.
#[derive(Debug, Clone)]
pub struct VisitCounter {
    key: String,
}

impl VisitCounter {
    /// Default variable the counter writes to.
    pub const DEFAULT_KEY: &'static str = "passagesVisited";

    /// Count into the variable `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The variable this counter writes to.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Default for VisitCounter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl NavigationHook for VisitCounter {
    fn name(&self) -> &str {
        "visit-counter"
    }

    fn on_navigate(&mut self, _nav: &Navigation, variables: &mut Variables) {
        // Non-integer values restart the count.
        let visited = variables.get_i64(&self.key).unwrap_or(0) + 1;
        variables.set(self.key.clone(), visited);
        info!("total passages visited: {visited}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(passage: &str) -> Navigation {
        Navigation {
            passage: passage.to_string(),
            previous: "start".to_string(),
            step: 1,
        }
    }

    #[test]
    fn counter_starts_from_zero() {
        let mut counter = VisitCounter::default();
        let mut vars = Variables::new();

        counter.on_navigate(&nav("a"), &mut vars);
        counter.on_navigate(&nav("b"), &mut vars);
        assert_eq!(vars.get_i64(VisitCounter::DEFAULT_KEY), Some(2));
    }

    #[test]
    fn counter_continues_existing_value() {
        let mut counter = VisitCounter::new("steps");
        let mut vars = Variables::new();
        vars.set("steps", 10);

        counter.on_navigate(&nav("a"), &mut vars);
        assert_eq!(vars.get_i64("steps"), Some(11));
    }

    #[test]
    fn counter_replaces_non_integer() {
        let mut counter = VisitCounter::default();
        let mut vars = Variables::new();
        vars.set(VisitCounter::DEFAULT_KEY, "lots");

        counter.on_navigate(&nav("a"), &mut vars);
        assert_eq!(vars.get_i64(VisitCounter::DEFAULT_KEY), Some(1));
    }
}
