//! Passages and the choices that link them.

use serde::{Deserialize, Serialize};

/// A single named screen of narrative content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Unique name used for lookup and as choice target.
    pub name: String,
    /// Heading shown above the content.
    pub title: String,
    /// Opaque markup supplied by the author.
    pub content: String,
    /// Outgoing choices, in display order.
    pub choices: Vec<Choice>,
    /// Whether the passage is currently visible.
    #[serde(skip)]
    pub(crate) active: bool,
}

impl Passage {
    /// Create a passage with no choices.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            content: content.into(),
            choices: Vec::new(),
            active: false,
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Whether this passage is the one on display.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Get the choice at `index`.
    pub fn choice(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }
}

/// A labeled link to another passage.
///
/// The target is a name, not an owned passage, so it may refer to a
/// passage that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Text shown on the choice button.
    pub text: String,
    /// Name of the passage this choice leads to.
    pub target: String,
}

impl Choice {
    /// Create a choice leading to `target`.
    pub fn new(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: target.into(),
        }
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.text, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passage_builder() {
        let passage = Passage::new("start", "The Beginning", "<p>Hello</p>")
            .with_choice(Choice::new("Go on", "choice1"));

        assert_eq!(passage.name, "start");
        assert_eq!(passage.choices.len(), 1);
        assert!(!passage.is_active());
        assert_eq!(passage.choice(0).map(|c| c.target.as_str()), Some("choice1"));
        assert!(passage.choice(1).is_none());
    }

    #[test]
    fn choice_display() {
        let choice = Choice::new("Return to start", "start");
        assert_eq!(choice.to_string(), "Return to start -> start");
    }

    #[test]
    fn active_flag_not_serialized() {
        let mut passage = Passage::new("a", "A", "");
        passage.active = true;
        let json = serde_json::to_value(&passage).unwrap();
        assert!(json.get("active").is_none());

        let back: Passage = serde_json::from_value(json).unwrap();
        assert!(!back.is_active());
    }
}
