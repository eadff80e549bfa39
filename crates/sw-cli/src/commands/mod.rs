pub mod check;
pub mod passages;
pub mod play;
pub mod tui;

use sw_core::{StoryConfig, StoryEngine};

/// Build the story engine for a command.
fn load_story(config: StoryConfig) -> Result<StoryEngine, String> {
    sw_core::demo::demo_story(config).map_err(|e| format!("failed to build story: {e}"))
}
