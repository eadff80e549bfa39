//! Core story engine for Storyweave.
//!
//! A story is a set of named passages linked by choices. The
//! [`StoryEngine`] tracks which passage is showing, the visitation history,
//! and a small untyped variable store. Passages live in a
//! [`PassageRegistry`] and are always referenced by name, so a choice may
//! point at a passage that is registered later.

/// Engine configuration.
pub mod config;
/// Built-in sample story.
pub mod demo;
/// The story engine: navigation, click dispatch, and restart.
pub mod engine;
/// Error types used throughout the crate.
pub mod error;
/// UI events delivered to the engine by a rendering frontend.
pub mod event;
/// Hooks run after every successful navigation.
pub mod hook;
/// Passage and choice definitions.
pub mod passage;
/// Name-keyed passage collection.
pub mod registry;
/// Story state: current passage, history, and variables.
pub mod state;
/// Rendering surface side effects.
pub mod surface;
#[cfg(test)]
mod testing;

/// Re-export configuration types.
pub use config::{DuplicatePolicy, StoryConfig};
/// Re-export the engine.
pub use engine::StoryEngine;
/// Re-export error types.
pub use error::{StoryError, StoryResult};
/// Re-export UI event types.
pub use event::{ClickTarget, UiEvent};
/// Re-export hook types.
pub use hook::{HookId, Navigation, NavigationHook, VisitCounter};
/// Re-export passage types.
pub use passage::{Choice, Passage};
/// Re-export the registry.
pub use registry::PassageRegistry;
/// Re-export state types.
pub use state::{StoryState, Variables};
/// Re-export surface types.
pub use surface::{HeadlessSurface, Surface};
