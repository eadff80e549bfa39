//! The passage collection that the engine looks passages up in.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::DuplicatePolicy;
use crate::error::{StoryError, StoryResult};
use crate::passage::{Choice, Passage};

/// Name-keyed store of passages, in insertion order.
///
/// This is the display surface's passage collection: every passage carries
/// an active flag, and at most one passage is active at a time.
#[derive(Debug, Clone, Default)]
pub struct PassageRegistry {
    passages: Vec<Passage>,
    /// Passage name -> index into `passages`.
    index: HashMap<String, usize>,
    policy: DuplicatePolicy,
}

impl PassageRegistry {
    /// Create an empty registry that rejects duplicate names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// The duplicate policy in effect.
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Create a passage from its parts and register it.
    ///
    /// Pass an empty iterator when the passage has no choices yet.
    pub fn create_passage(
        &mut self,
        name: &str,
        title: &str,
        content: &str,
        choices: impl IntoIterator<Item = Choice>,
    ) -> StoryResult<()> {
        let mut passage = Passage::new(name, title, content);
        passage.choices.extend(choices);
        self.insert(passage)
    }

    /// Register a fully built passage.
    pub fn insert(&mut self, passage: Passage) -> StoryResult<()> {
        if passage.name.is_empty() {
            warn!(title = %passage.title, "passage with empty name rejected");
            return Err(StoryError::EmptyPassageName);
        }

        if let Some(&idx) = self.index.get(&passage.name) {
            return match self.policy {
                DuplicatePolicy::Reject => {
                    warn!(passage = %passage.name, "duplicate passage rejected");
                    Err(StoryError::DuplicatePassage(passage.name))
                }
                DuplicatePolicy::Replace => {
                    let existing = &mut self.passages[idx];
                    existing.title = passage.title;
                    existing.content = passage.content;
                    existing.choices = passage.choices;
                    info!(passage = %existing.name, "passage replaced");
                    Ok(())
                }
            };
        }

        info!(passage = %passage.name, "passage created");
        self.index.insert(passage.name.clone(), self.passages.len());
        self.passages.push(passage);
        Ok(())
    }

    /// Append a choice to an existing passage.
    ///
    /// A missing passage leaves every passage untouched and returns
    /// [`StoryError::PassageNotFound`].
    pub fn add_choice(&mut self, passage_name: &str, text: &str, target: &str) -> StoryResult<()> {
        let Some(passage) = self.get_mut(passage_name) else {
            warn!(passage = %passage_name, "cannot add choice: passage not found");
            return Err(StoryError::PassageNotFound(passage_name.to_string()));
        };

        passage.choices.push(Choice::new(text, target));
        info!(passage = %passage_name, "choice added: \"{text}\" -> {target}");
        Ok(())
    }

    /// Look up a passage by name.
    pub fn get(&self, name: &str) -> Option<&Passage> {
        self.index.get(name).map(|&idx| &self.passages[idx])
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Passage> {
        self.index.get(name).map(|&idx| &mut self.passages[idx])
    }

    /// Whether a passage with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All passages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Passage> {
        self.passages.iter()
    }

    /// All passage names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.passages.iter().map(|p| p.name.as_str())
    }

    /// Number of registered passages.
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// The passage currently flagged active, if any.
    pub fn active(&self) -> Option<&Passage> {
        self.passages.iter().find(|p| p.active)
    }

    /// Make `name` the only active passage.
    ///
    /// Returns `None` without touching any flag when the name is unknown.
    pub(crate) fn activate(&mut self, name: &str) -> Option<&Passage> {
        let idx = *self.index.get(name)?;
        self.deactivate_all();
        self.passages[idx].active = true;
        debug!(passage = %name, "passage activated");
        Some(&self.passages[idx])
    }

    /// Clear every active flag, leaving nothing on display.
    pub(crate) fn deactivate_all(&mut self) {
        for passage in &mut self.passages {
            passage.active = false;
        }
    }

    /// Choices whose target names no registered passage.
    pub fn unresolved_choices(&self) -> Vec<(&Passage, &Choice)> {
        self.passages
            .iter()
            .flat_map(|p| p.choices.iter().map(move |c| (p, c)))
            .filter(|(_, c)| !self.contains(&c.target))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PassageRegistry {
        let mut registry = PassageRegistry::new();
        registry
            .create_passage("start", "Start", "<p>Begin</p>", [Choice::new("Go", "a")])
            .unwrap();
        registry
            .create_passage("a", "A", "<p>A</p>", Vec::new())
            .unwrap();
        registry
    }

    #[test]
    fn create_and_lookup() {
        let registry = sample();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("start"));
        assert_eq!(registry.get("a").map(|p| p.title.as_str()), Some("A"));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn insertion_order_preserved() {
        let mut registry = sample();
        registry.create_passage("b", "B", "", []).unwrap();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["start", "a", "b"]);
    }

    #[test]
    fn choices_default_to_empty() {
        let registry = sample();
        assert!(registry.get("a").unwrap().choices.is_empty());
    }

    #[test]
    fn empty_name_rejected() {
        let mut registry = PassageRegistry::new();
        let err = registry.create_passage("", "Title", "", []).unwrap_err();
        assert_eq!(err, StoryError::EmptyPassageName);
        assert!(registry.is_empty());
    }

    #[test]
    fn empty_name_is_logged() {
        let mut registry = PassageRegistry::new();
        let logs = crate::testing::captured_logs(|| {
            registry.create_passage("", "Nameless", "", []).unwrap_err();
        });
        assert!(logs.contains("WARN"));
        assert!(logs.contains("passage with empty name rejected"));
    }

    #[test]
    fn duplicate_rejected_by_default() {
        let mut registry = sample();
        let err = registry
            .create_passage("a", "Other", "<p>other</p>", [])
            .unwrap_err();
        assert_eq!(err, StoryError::DuplicatePassage("a".to_string()));
        assert_eq!(registry.get("a").unwrap().title, "A");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_replaced_in_place() {
        let mut registry = PassageRegistry::with_policy(DuplicatePolicy::Replace);
        registry.create_passage("a", "A", "", []).unwrap();
        registry.create_passage("b", "B", "", []).unwrap();
        registry
            .create_passage("a", "New A", "<p>new</p>", [Choice::new("To b", "b")])
            .unwrap();

        assert_eq!(registry.len(), 2);
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["a", "b"]);
        let a = registry.get("a").unwrap();
        assert_eq!(a.title, "New A");
        assert_eq!(a.choices.len(), 1);
    }

    #[test]
    fn add_choice_appends() {
        let mut registry = sample();
        registry.add_choice("a", "Back", "start").unwrap();
        registry.add_choice("a", "Onward", "b").unwrap();

        let a = registry.get("a").unwrap();
        assert_eq!(a.choices.len(), 2);
        assert_eq!(a.choices[0], Choice::new("Back", "start"));
        assert_eq!(a.choices[1], Choice::new("Onward", "b"));
    }

    #[test]
    fn add_choice_to_missing_passage() {
        let mut registry = sample();
        let before: Vec<_> = registry.iter().cloned().collect();

        let err = registry
            .add_choice("missingPassage", "text", "target")
            .unwrap_err();
        assert_eq!(err, StoryError::PassageNotFound("missingPassage".to_string()));

        let after: Vec<_> = registry.iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn activate_is_exclusive() {
        let mut registry = sample();
        assert!(registry.active().is_none());

        registry.activate("start");
        registry.activate("a");
        assert_eq!(registry.active().map(|p| p.name.as_str()), Some("a"));
        assert_eq!(registry.iter().filter(|p| p.is_active()).count(), 1);
    }

    #[test]
    fn activate_unknown_keeps_flags() {
        let mut registry = sample();
        registry.activate("start");
        assert!(registry.activate("nowhere").is_none());
        assert_eq!(registry.active().map(|p| p.name.as_str()), Some("start"));
    }

    #[test]
    fn deactivate_all_hides_everything() {
        let mut registry = sample();
        registry.activate("a");
        registry.deactivate_all();
        assert!(registry.active().is_none());
        assert!(registry.iter().all(|p| !p.is_active()));
    }

    #[test]
    fn unresolved_choices_found() {
        let mut registry = sample();
        registry.add_choice("a", "Into the void", "void").unwrap();

        let dangling = registry.unresolved_choices();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].0.name, "a");
        assert_eq!(dangling[0].1.target, "void");
    }
}
