//! Application state wrapping a story engine.

use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use sw_core::{ClickTarget, StoryEngine, StoryError, UiEvent};

use crate::shared::OutputLine;
use crate::surface::TuiSurface;

/// Main application state for the story TUI.
pub struct StoryApp {
    engine: StoryEngine,
    /// Passage panel scroll offset, reset by the surface on navigation.
    scroll: Arc<AtomicU16>,
    /// Feedback shown in the status bar.
    status: Option<OutputLine>,
    /// Screen area of each choice row from the last draw.
    choice_rows: Vec<Rect>,
    /// Whether to show the help popup.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl StoryApp {
    /// Wrap an engine, installing the terminal surface.
    pub fn new(engine: StoryEngine) -> Self {
        let surface = TuiSurface::new();
        let scroll = surface.scroll_handle();
        Self {
            engine: engine.with_surface(surface),
            scroll,
            status: None,
            choice_rows: Vec::new(),
            show_help: false,
            should_quit: false,
        }
    }

    /// Show the start passage and start listening for choice clicks.
    pub fn start(&mut self) {
        let result = self.engine.init();
        self.settle(result);
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &StoryEngine {
        &self.engine
    }

    /// Current status bar feedback.
    pub fn status(&self) -> Option<&OutputLine> {
        self.status.as_ref()
    }

    /// Passage panel scroll offset.
    pub fn scroll(&self) -> u16 {
        self.scroll.load(Ordering::Relaxed)
    }

    /// Screen area of each choice row, by choice index.
    pub fn choice_rows(&self) -> &[Rect] {
        &self.choice_rows
    }

    pub(crate) fn set_choice_rows(&mut self, rows: Vec<Rect>) {
        self.choice_rows = rows;
    }

    /// Clamp the scroll offset to the scrollable range of the last draw.
    pub(crate) fn clamp_scroll(&mut self, max: u16) {
        if self.scroll() > max {
            self.scroll.store(max, Ordering::Relaxed);
        }
    }

    /// Click the choice at `index` on the passage on display.
    pub fn choose(&mut self, index: usize) {
        let result = self.engine.click_choice(index);
        self.settle(result);
    }

    /// Restart the story.
    pub fn restart(&mut self) {
        let result = self.engine.dispatch(&UiEvent::Restart);
        self.settle(result);
        if self.status.is_none() {
            self.status = Some(OutputLine::system("Story restarted."));
        }
    }

    /// Deliver a click at a screen position.
    ///
    /// Clicks on a choice row navigate; clicks anywhere else reach the
    /// engine as a non-choice click and are ignored by it.
    pub fn click_at(&mut self, column: u16, row: u16) {
        let pos = Position::new(column, row);
        let hit = self.choice_rows.iter().position(|r| r.contains(pos));
        match hit {
            Some(index) => self.choose(index),
            None => {
                let result = self.engine.dispatch(&UiEvent::Click(ClickTarget::other()));
                self.settle(result);
            }
        }
    }

    /// Scroll the passage panel down one line.
    pub fn scroll_down(&mut self) {
        self.scroll.fetch_add(1, Ordering::Relaxed);
    }

    /// Scroll the passage panel up one line.
    pub fn scroll_up(&mut self) {
        let _ = self
            .scroll
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| s.checked_sub(1));
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
            KeyCode::Char(c) => {
                if let Some(n) = c.to_digit(10)
                    && n > 0
                {
                    self.choose(n as usize - 1);
                }
            }
            _ => {}
        }
    }

    /// Handle a mouse event.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click_at(mouse.column, mouse.row),
            MouseEventKind::ScrollDown => self.scroll_down(),
            MouseEventKind::ScrollUp => self.scroll_up(),
            _ => {}
        }
    }

    fn settle(&mut self, result: Result<(), StoryError>) {
        self.status = result.err().map(|e| OutputLine::error(format!("Error: {e}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use sw_core::StoryConfig;
    use sw_core::demo::demo_story;

    use crate::shared::OutputStyle;

    fn app() -> StoryApp {
        let mut app = StoryApp::new(demo_story(StoryConfig::default()).unwrap());
        app.start();
        app
    }

    fn press(app: &mut StoryApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn start_shows_start_passage() {
        let app = app();
        assert_eq!(app.engine().current_passage(), "start");
        assert!(app.status().is_none());
    }

    #[test]
    fn number_keys_choose() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.engine().current_passage(), "choice1");
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.engine().current_passage(), "resources");
        assert_eq!(app.engine().history(), ["start", "choice1", "resources"]);
    }

    #[test]
    fn out_of_range_choice_reports_error() {
        let mut app = app();
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.engine().current_passage(), "start");
        let status = app.status().unwrap();
        assert_eq!(status.style, OutputStyle::Error);
        assert_eq!(status.text, "Error: invalid choice: 9");
    }

    #[test]
    fn zero_key_ignored() {
        let mut app = app();
        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.engine().history(), ["start"]);
    }

    #[test]
    fn restart_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.engine().history(), ["start"]);
        assert_eq!(app.status().unwrap().style, OutputStyle::System);
    }

    #[test]
    fn navigation_resets_scroll() {
        let mut app = app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.scroll(), 2);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.scroll(), 1);

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.scroll(), 0);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.scroll(), 0);
    }

    #[test]
    fn click_on_choice_row_navigates() {
        let mut app = app();
        app.set_choice_rows(vec![Rect::new(2, 10, 30, 1), Rect::new(2, 11, 30, 1)]);

        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 11,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.engine().current_passage(), "walk-away");
    }

    #[test]
    fn click_elsewhere_ignored() {
        let mut app = app();
        app.set_choice_rows(vec![Rect::new(2, 10, 30, 1)]);
        app.click_at(50, 3);
        assert_eq!(app.engine().history(), ["start"]);
        assert!(app.status().is_none());
    }

    #[test]
    fn help_popup_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.engine().current_passage(), "start");
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn quit_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
