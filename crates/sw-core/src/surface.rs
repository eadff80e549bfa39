//! Visual side effects of navigation.

use tracing::trace;

use crate::passage::Passage;

/// A rendering surface the engine notifies after each successful navigation.
///
/// The engine owns passage visibility itself (see
/// [`PassageRegistry::active`](crate::PassageRegistry::active)); a surface
/// only performs the visual follow-up.
pub trait Surface: std::fmt::Debug + Send {
    /// Called when `passage` becomes the visible passage.
    fn present(&mut self, passage: &Passage);

    /// Reset the viewport to the top of the content.
    fn scroll_to_top(&mut self);
}

/// A surface with no display. Used by tests and line-based frontends.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessSurface;

impl Surface for HeadlessSurface {
    fn present(&mut self, passage: &Passage) {
        trace!(passage = %passage.name, "present");
    }

    fn scroll_to_top(&mut self) {
        trace!("scroll to top");
    }
}
