use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::SpeedPreset;
use crate::game::{GameState, GameStatus};

/// Renders the one-line HUD and returns the play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    speed: SpeedPreset,
) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(Paragraph::new(status_line(state, speed)), status_area);

    play_area
}

fn status_line(state: &GameState, speed: SpeedPreset) -> Line<'static> {
    let status = match state.status {
        GameStatus::Over => "over",
        // The snake stands still until the first direction key.
        GameStatus::Running if state.filter.current().is_none() => "arrows/WASD to start",
        GameStatus::Running => "running",
    };

    Line::from(vec![
        label(" Score "),
        value(state.score.to_string()),
        label("  Length "),
        value(state.snake.len().to_string()),
        label("  Speed "),
        value(speed.name().to_string()),
        label("  Tick "),
        value(state.tick_count.to_string()),
        label("  Status "),
        value(status.to_string()),
        label("  Seed "),
        label_owned(state.seed().to_string()),
    ])
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

fn label_owned(text: String) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

fn value(text: String) -> Span<'static> {
    Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
}
