//! Configuration for a story engine.

/// What [`PassageRegistry::create_passage`](crate::PassageRegistry::create_passage)
/// does when the name is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the existing passage and return an error.
    #[default]
    Reject,
    /// Overwrite title, content, and choices in place.
    Replace,
}

/// Configuration for a story engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryConfig {
    /// Passage shown by `init` and `restart`.
    pub start_passage: String,
    /// Handling of duplicate passage names.
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            start_passage: "start".to_string(),
            duplicate_policy: DuplicatePolicy::Reject,
        }
    }
}

impl StoryConfig {
    /// Set the start passage. Empty names are ignored.
    pub fn with_start(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.start_passage = name;
        }
        self
    }

    /// Set the duplicate passage policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}
