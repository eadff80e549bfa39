//! Drawing the story screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::StoryApp;
use crate::shared::{draw_help_popup, plain_text};

const HINT: &str = "1-9/click:choose  j/k:scroll  r:restart  ?:help  q:quit";

/// Draw the whole screen and record where the choice rows landed.
pub fn draw(frame: &mut Frame, app: &mut StoryApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[0]);

    draw_story(frame, app, body[0]);
    draw_sidebar(frame, app, body[1]);
    draw_status(frame, app, chunks[1]);

    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_story(frame: &mut Frame, app: &mut StoryApp, area: Rect) {
    let choice_count = app.engine().current().map_or(0, |p| p.choices.len()) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                   // Passage
            Constraint::Length(choice_count + 2), // Choices
        ])
        .split(area);

    let Some(passage) = app.engine().current() else {
        let msg = Paragraph::new(Span::styled(
            format!("Passage not found: {}", app.engine().current_passage()),
            Style::default().fg(Color::Red),
        ))
        .block(
            Block::default()
                .title(" Story ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
        frame.render_widget(msg, area);
        app.set_choice_rows(Vec::new());
        return;
    };

    let lines: Vec<Line> = plain_text(&passage.content)
        .into_iter()
        .map(Line::from)
        .collect();

    let inner_width = chunks[0].width.saturating_sub(2) as usize;
    let total_wrapped: u16 = lines
        .iter()
        .map(|l| {
            if inner_width == 0 {
                1
            } else {
                l.width().max(1).div_ceil(inner_width) as u16
            }
        })
        .sum();
    let max_scroll = total_wrapped.saturating_sub(chunks[0].height.saturating_sub(2));

    let title = format!(" {} ", passage.title);
    let choice_lines: Vec<Line> = passage
        .choices
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::Yellow)),
                Span::raw(c.text.clone()),
            ])
        })
        .collect();

    app.clamp_scroll(max_scroll);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.scroll(), 0));
    frame.render_widget(paragraph, chunks[0]);

    let choices_block = Block::default()
        .title(" Choices ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = choices_block.inner(chunks[1]);
    let rows: Vec<Rect> = (0..choice_lines.len() as u16)
        .take_while(|i| *i < inner.height)
        .map(|i| Rect::new(inner.x, inner.y + i, inner.width, 1))
        .collect();
    frame.render_widget(Paragraph::new(choice_lines).block(choices_block), chunks[1]);
    app.set_choice_rows(rows);
}

fn draw_sidebar(frame: &mut Frame, app: &StoryApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Most recent visits, newest at the bottom.
    let history = app.engine().history();
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let skip = history.len().saturating_sub(visible);
    let history_lines: Vec<Line> = history
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, name)| Line::from(format!("{:>3}. {name}", i + 1)))
        .collect();
    frame.render_widget(
        Paragraph::new(history_lines).block(
            Block::default()
                .title(" History ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        chunks[0],
    );

    let variable_lines: Vec<Line> = app
        .engine()
        .variables()
        .sorted()
        .into_iter()
        .map(|(key, value)| Line::from(format!("{key} = {value}")))
        .collect();
    frame.render_widget(
        Paragraph::new(variable_lines)
            .block(
                Block::default()
                    .title(" Variables ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
}

fn draw_status(frame: &mut Frame, app: &StoryApp, area: Rect) {
    let status = match app.status() {
        Some(line) => Paragraph::new(line.text.as_str())
            .style(Style::default().fg(line.style.color()).bg(Color::Black)),
        None => Paragraph::new(HINT).style(Style::default().fg(Color::Black).bg(Color::White)),
    };
    frame.render_widget(status, area);
}
