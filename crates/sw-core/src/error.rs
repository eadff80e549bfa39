/// Alias for `Result<T, StoryError>`.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors reported by the story engine and passage registry.
///
/// None of these are fatal: the engine logs each one and leaves its state
/// untouched before returning it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoryError {
    /// No passage with this name is registered.
    #[error("passage not found: {0}")]
    PassageNotFound(String),

    /// A passage with this name already exists.
    #[error("passage already exists: \"{0}\"")]
    DuplicatePassage(String),

    /// The current passage has no choice at this zero-based index.
    ///
    /// Displayed as the one-based number readers pick choices by.
    #[error("invalid choice: {}", choice_number(.0))]
    InvalidChoice(usize),

    /// Passage names must not be empty.
    #[error("passage name must not be empty")]
    EmptyPassageName,
}

fn choice_number(index: &usize) -> usize {
    index.saturating_add(1)
}
