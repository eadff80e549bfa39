//! Launch the terminal UI on the story.

use sw_core::StoryConfig;
use sw_tui::app::StoryApp;

pub fn run(config: StoryConfig) -> Result<(), String> {
    let engine = super::load_story(config)?;
    sw_tui::terminal::run(StoryApp::new(engine))
}
