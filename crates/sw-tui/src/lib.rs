//! Terminal UI for Storyweave.
//!
//! Renders the passage on display with its choices as clickable rows,
//! alongside the visit history and story variables. The terminal is the
//! rendering surface: mouse clicks on a choice row and number keys are
//! delivered to the engine as choice clicks.

pub mod app;
pub mod shared;
pub mod surface;
pub mod terminal;
pub mod view;
