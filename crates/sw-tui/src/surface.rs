//! Rendering surface backed by the terminal viewport.

use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};

use sw_core::{Passage, Surface};
use tracing::debug;

/// Surface that resets the passage panel's scroll offset on navigation.
///
/// The offset is shared with the view through [`TuiSurface::scroll_handle`].
#[derive(Debug, Clone, Default)]
pub struct TuiSurface {
    scroll: Arc<AtomicU16>,
}

impl TuiSurface {
    /// Create a surface scrolled to the top.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the scroll offset.
    pub fn scroll_handle(&self) -> Arc<AtomicU16> {
        Arc::clone(&self.scroll)
    }
}

impl Surface for TuiSurface {
    fn present(&mut self, passage: &Passage) {
        debug!(passage = %passage.name, "presenting passage");
    }

    fn scroll_to_top(&mut self) {
        self.scroll.store(0, Ordering::Relaxed);
    }
}
