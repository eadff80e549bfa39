//! Shared utilities for TUI views: output types, layout helpers, and markup.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Visual style for a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// Error output (red).
    Error,
    /// System message (cyan).
    System,
}

impl OutputStyle {
    /// Foreground color for this style.
    pub fn color(self) -> Color {
        match self {
            OutputStyle::Error => Color::Red,
            OutputStyle::System => Color::Cyan,
        }
    }
}

/// A single line of feedback shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// Visual style of this line.
    pub style: OutputStyle,
    /// The text content.
    pub text: String,
}

impl OutputLine {
    /// An error line.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            style: OutputStyle::Error,
            text: text.into(),
        }
    }

    /// A system line.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            style: OutputStyle::System,
            text: text.into(),
        }
    }
}

/// Render passage markup as plain text lines.
///
/// Tags are dropped; block-level tags start a new line and list items get
/// a bullet. Whitespace is collapsed and blank lines are removed.
pub fn plain_text(markup: &str) -> Vec<String> {
    let mut text = String::new();
    let mut tag = String::new();
    let mut in_tag = false;

    for c in markup.chars() {
        match c {
            '<' if !in_tag => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                let closing = tag.starts_with('/');
                let name = tag
                    .trim_start_matches('/')
                    .split(|c: char| c.is_whitespace() || c == '/')
                    .next()
                    .unwrap_or("")
                    .to_ascii_lowercase();
                match name.as_str() {
                    "li" if !closing => text.push_str("\n\u{2022} "),
                    "p" | "br" | "div" | "ul" | "ol" | "li" | "h1" | "h2" | "h3" | "h4" => {
                        text.push('\n');
                    }
                    _ => {}
                }
            }
            _ if in_tag => tag.push(c),
            _ => text.push(c),
        }
    }

    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");

    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Draw the help popup overlay.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("  1-9         Choose a choice"),
        Line::from("  Click       Choose the clicked choice"),
        Line::from("  j / k       Scroll passage down / up"),
        Line::from("  r           Restart the story"),
        Line::from(""),
        Line::from("  ?           Toggle this help"),
        Line::from("  q / Esc     Quit"),
        Line::from("  Ctrl+C      Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
