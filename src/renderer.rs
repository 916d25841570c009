use std::collections::BTreeMap;

use ratatui::Frame;
use ratatui::style::Color;
use ratatui::symbols;
use ratatui::widgets::Block;
use ratatui::widgets::canvas::{Canvas, Points, Rectangle};

use crate::commands::{MarkerId, PointRole, RenderCommand};
use crate::config::{BOUNDARY_MARGIN, SpeedPreset};
use crate::game::{GameState, GameStatus};
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::render_game_over_menu;

/// Replayed view of the command stream.
///
/// The board keeps one point per live marker and forgets a marker as
/// soon as its erase command arrives. Replaying the same stream on a
/// fresh board always reproduces the same picture, which is all a
/// front end needs to draw a round.
#[derive(Debug, Clone, Default)]
pub struct MarkerBoard {
    points: BTreeMap<MarkerId, (Position, PointRole)>,
    announced_score: Option<u32>,
}

impl MarkerBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a batch of commands in stream order.
    pub fn apply(&mut self, commands: &[RenderCommand]) {
        for command in commands {
            match *command {
                RenderCommand::DrawPoint {
                    marker,
                    position,
                    role,
                } => {
                    self.points.insert(marker, (position, role));
                }
                RenderCommand::ErasePoint { marker } => {
                    self.points.remove(&marker);
                }
                RenderCommand::AnnounceGameOver { score } => {
                    self.announced_score = Some(score);
                }
            }
        }
    }

    /// Positions of every live point with the given role.
    #[must_use]
    pub fn positions(&self, role: PointRole) -> Vec<(f64, f64)> {
        self.points
            .values()
            .filter(|(_, point_role)| *point_role == role)
            .map(|(position, _)| (position.x, position.y))
            .collect()
    }

    /// Score carried by the game-over announcement, if one has arrived.
    #[must_use]
    pub fn announced_score(&self) -> Option<u32> {
        self.announced_score
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Renders one full frame: HUD row, bordered play surface, and the
/// game-over popup once the round has ended.
pub fn render(frame: &mut Frame<'_>, state: &GameState, board: &MarkerBoard, speed: SpeedPreset) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, speed);

    let bounds = state.bounds();
    let snake_points = flipped(board.positions(PointRole::SnakeBody), bounds.height);
    let food_points = flipped(board.positions(PointRole::Food), bounds.height);

    let canvas = Canvas::default()
        .block(Block::bordered())
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, bounds.width])
        .y_bounds([0.0, bounds.height])
        .paint(|ctx| {
            // Outline of the region the head must stay inside.
            ctx.draw(&Rectangle {
                x: BOUNDARY_MARGIN,
                y: BOUNDARY_MARGIN,
                width: bounds.width - 2.0 * BOUNDARY_MARGIN,
                height: bounds.height - 2.0 * BOUNDARY_MARGIN,
                color: Color::DarkGray,
            });
            ctx.draw(&Points {
                coords: &food_points,
                color: Color::Red,
            });
            ctx.draw(&Points {
                coords: &snake_points,
                color: Color::Green,
            });
        });
    frame.render_widget(canvas, play_area);

    if state.status == GameStatus::Over {
        let score = board.announced_score().unwrap_or(state.score);
        render_game_over_menu(frame, play_area, score, state.cause);
    }
}

/// The simulation's y axis grows downward; the canvas' grows upward.
fn flipped(points: Vec<(f64, f64)>, height: f64) -> Vec<(f64, f64)> {
    points.into_iter().map(|(x, y)| (x, height - y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::input::Direction;

    fn draw(marker: u64, x: f64, y: f64, role: PointRole) -> RenderCommand {
        RenderCommand::DrawPoint {
            marker: MarkerId::new(marker),
            position: Position::new(x, y),
            role,
        }
    }

    #[test]
    fn erase_removes_a_drawn_point() {
        let mut board = MarkerBoard::new();
        board.apply(&[
            draw(0, 10.0, 20.0, PointRole::SnakeBody),
            RenderCommand::ErasePoint {
                marker: MarkerId::new(0),
            },
        ]);

        assert!(board.is_empty());
    }

    #[test]
    fn points_are_reported_by_role() {
        let mut board = MarkerBoard::new();
        board.apply(&[
            draw(0, 10.0, 20.0, PointRole::SnakeBody),
            draw(1, 30.0, 40.0, PointRole::Food),
            draw(2, 50.0, 60.0, PointRole::Food),
        ]);

        assert_eq!(board.positions(PointRole::SnakeBody), vec![(10.0, 20.0)]);
        assert_eq!(board.positions(PointRole::Food).len(), 2);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn announcement_is_retained() {
        let mut board = MarkerBoard::new();
        assert_eq!(board.announced_score(), None);

        board.apply(&[RenderCommand::AnnounceGameOver { score: 30 }]);

        assert_eq!(board.announced_score(), Some(30));
    }

    #[test]
    fn replaying_the_stream_tracks_live_counts() {
        let mut state = GameState::new_with_seed(&GameConfig::default(), 11);
        let mut board = MarkerBoard::new();
        board.apply(&state.drain_commands());

        assert_eq!(board.positions(PointRole::SnakeBody).len(), 1);
        assert_eq!(board.positions(PointRole::Food).len(), 10);

        state.handle_direction(Direction::Right);
        for _ in 0..7 {
            state.tick();
        }
        board.apply(&state.drain_commands());

        assert_eq!(board.positions(PointRole::SnakeBody).len(), state.snake.len());
        assert_eq!(board.positions(PointRole::Food).len(), state.foods.len());
    }
}
