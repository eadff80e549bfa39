//! Input events a frontend hands to the engine.

/// The element a click landed on.
///
/// Only elements marked as choices that also name a target passage cause
/// navigation; anything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    /// Whether the element carries the choice marker.
    pub is_choice: bool,
    /// The element's target passage attribute.
    pub target: Option<String>,
}

impl ClickTarget {
    /// A choice button leading to `target`.
    pub fn choice(target: impl Into<String>) -> Self {
        Self {
            is_choice: true,
            target: Some(target.into()),
        }
    }

    /// Any element that is not a choice button.
    pub fn other() -> Self {
        Self::default()
    }

    /// The passage to navigate to, if this click should navigate at all.
    pub fn navigation_target(&self) -> Option<&str> {
        if !self.is_choice {
            return None;
        }
        self.target.as_deref().filter(|t| !t.is_empty())
    }
}

/// An event delivered by the rendering frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A click somewhere in the document.
    Click(ClickTarget),
    /// The restart control was activated.
    Restart,
}
