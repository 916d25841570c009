use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::commands::{MarkerId, PointRole, RenderCommand};
use crate::config::{
    BOUNDARY_MARGIN, GameConfig, POINTS_PER_FOOD, SurfaceSize, TRAIL_GROWTH_PER_FOOD,
};
use crate::food::{FoodPool, FoodSlot, interior_margin, spawn_position};
use crate::input::{Direction, DirectionFilter};
use crate::snake::Snake;

/// Current phase of a round.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Over,
}

/// Which rule ended the round.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverCause {
    BoundaryBreach,
    SelfCollision,
}

/// Complete simulation state for one round.
///
/// The state machine never touches a screen. Every visible change is
/// recorded as a [`RenderCommand`] and handed out through
/// [`GameState::drain_commands`], so a front end replays the stream
/// without knowing the rules that produced it.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub foods: FoodPool,
    pub filter: DirectionFilter,
    pub score: u32,
    pub status: GameStatus,
    pub cause: Option<GameOverCause>,
    pub tick_count: u64,
    bounds: SurfaceSize,
    seed: u64,
    rng: StdRng,
    next_marker: u64,
    commands: Vec<RenderCommand>,
}

impl GameState {
    /// Creates a new round from an entropy seed.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::new_with_seed(config, seed)
    }

    /// Creates a new round with an explicit RNG seed.
    ///
    /// Two states built from the same config and seed emit identical
    /// command streams for identical input.
    #[must_use]
    pub fn new_with_seed(config: &GameConfig, seed: u64) -> Self {
        let head_size = config.snake_size.head_size();
        let margin = interior_margin(head_size);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut next_marker = 0u64;
        let mut commands = Vec::with_capacity(config.food_slots + 1);

        // Paint order matters to front ends that replay the stream from
        // scratch: the snake's starting point first, then the food pool.
        let head_marker = MarkerId::new(next_marker);
        next_marker += 1;
        let snake = Snake::new(config.start, head_marker, head_size, config.initial_capacity);
        commands.push(RenderCommand::DrawPoint {
            marker: head_marker,
            position: config.start,
            role: PointRole::SnakeBody,
        });

        let mut foods = FoodPool::new();
        for _ in 0..config.food_slots {
            let marker = MarkerId::new(next_marker);
            next_marker += 1;
            let position = spawn_position(&mut rng, config.surface, margin);
            foods.push(FoodSlot { position, marker });
            commands.push(RenderCommand::DrawPoint {
                marker,
                position,
                role: PointRole::Food,
            });
        }

        Self {
            snake,
            foods,
            filter: DirectionFilter::new(),
            score: 0,
            status: GameStatus::Running,
            cause: None,
            tick_count: 0,
            bounds: config.surface,
            seed,
            rng,
            next_marker,
            commands,
        }
    }

    /// Requests a direction change for upcoming ticks.
    ///
    /// A request that would reverse the direction committed on the last
    /// tick is dropped. Input after the round has ended is ignored.
    pub fn handle_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::Running {
            self.filter.request(direction);
        }
    }

    /// Advances the simulation by one step.
    ///
    /// A tick moves the snake one unit along the current direction, then
    /// applies the rules in a fixed order: boundary breach, food
    /// consumption, self collision. Before the first direction request
    /// the snake stays put, but the rules still judge the resting head.
    /// Ticks after the round has ended do nothing.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }
        self.tick_count += 1;

        // No direction yet means no motion and no new trail point; the
        // checks below still run where the head rests.
        let head = match self.filter.current() {
            Some(direction) => {
                let marker = self.alloc_marker();
                let head = self.snake.advance(direction, marker);
                self.commands.push(RenderCommand::DrawPoint {
                    marker,
                    position: head,
                    role: PointRole::SnakeBody,
                });
                for evicted in self.snake.trim() {
                    self.commands.push(RenderCommand::ErasePoint {
                        marker: evicted.marker,
                    });
                }
                head
            }
            None => self.snake.head(),
        };
        self.filter.commit();

        if !head.is_within_margin(self.bounds, BOUNDARY_MARGIN) {
            self.end_round(GameOverCause::BoundaryBreach);
            return;
        }

        if let Some(index) = self.foods.find_hit(head, self.snake.head_size()) {
            self.consume_food(index);
        }

        if self.snake.self_collision() {
            self.end_round(GameOverCause::SelfCollision);
        }
    }

    /// Hands out every command recorded since the last drain.
    pub fn drain_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Play surface the round was created with.
    #[must_use]
    pub fn bounds(&self) -> SurfaceSize {
        self.bounds
    }

    /// Seed this round's RNG was built from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn consume_food(&mut self, index: usize) {
        self.snake.grow(TRAIL_GROWTH_PER_FOOD);
        self.score += POINTS_PER_FOOD;

        // The consumed slot respawns in place with a fresh marker, so a
        // front end never keeps a stale point under the new one.
        let marker = self.alloc_marker();
        let margin = interior_margin(self.snake.head_size());
        let position = spawn_position(&mut self.rng, self.bounds, margin);
        let consumed = self.foods.replace(index, FoodSlot { position, marker });
        self.commands.push(RenderCommand::ErasePoint {
            marker: consumed.marker,
        });
        self.commands.push(RenderCommand::DrawPoint {
            marker,
            position,
            role: PointRole::Food,
        });
    }

    fn end_round(&mut self, cause: GameOverCause) {
        self.status = GameStatus::Over;
        self.cause = Some(cause);
        self.commands.push(RenderCommand::AnnounceGameOver { score: self.score });
    }

    fn alloc_marker(&mut self) -> MarkerId {
        let marker = MarkerId::new(self.next_marker);
        self.next_marker += 1;
        marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
    use crate::snake::Position;

    fn state_with_seed(seed: u64) -> GameState {
        GameState::new_with_seed(&GameConfig::default(), seed)
    }

    /// Parks every food slot far from the test's path so only the rule
    /// under test can fire.
    fn park_food(state: &mut GameState) {
        for index in 0..state.foods.len() {
            state.foods.place(index, Position::new(650.0, 400.0));
        }
    }

    fn announce_count(commands: &[RenderCommand]) -> usize {
        commands
            .iter()
            .filter(|command| matches!(command, RenderCommand::AnnounceGameOver { .. }))
            .count()
    }

    #[test]
    fn construction_paints_snake_start_then_food_pool() {
        let mut state = state_with_seed(42);
        let commands = state.drain_commands();

        assert_eq!(commands.len(), 11);
        match commands[0] {
            RenderCommand::DrawPoint { position, role, .. } => {
                assert_eq!(position, Position::new(100.0, 100.0));
                assert_eq!(role, PointRole::SnakeBody);
            }
            other => panic!("unexpected first command {other:?}"),
        }
        for command in &commands[1..] {
            assert!(matches!(
                command,
                RenderCommand::DrawPoint {
                    role: PointRole::Food,
                    ..
                }
            ));
        }
    }

    #[test]
    fn construction_markers_are_unique() {
        let mut state = state_with_seed(42);
        let mut markers: Vec<u64> = state
            .drain_commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::DrawPoint { marker, .. } => Some(marker.raw()),
                _ => None,
            })
            .collect();
        markers.sort_unstable();
        markers.dedup();
        assert_eq!(markers.len(), 11);
    }

    #[test]
    fn same_seed_produces_identical_command_streams() {
        let mut first = state_with_seed(99);
        let mut second = state_with_seed(99);

        first.handle_direction(Direction::Right);
        second.handle_direction(Direction::Right);
        for _ in 0..20 {
            first.tick();
            second.tick();
        }

        assert_eq!(first.drain_commands(), second.drain_commands());
        assert_eq!(first.seed(), second.seed());
    }

    #[test]
    fn ticks_before_any_direction_leave_the_snake_in_place() {
        let mut state = state_with_seed(7);
        park_food(&mut state);
        state.drain_commands();

        for _ in 0..4 {
            state.tick();
        }

        assert_eq!(state.snake.head(), Position::new(100.0, 100.0));
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.tick_count, 4);
        assert_eq!(state.status, GameStatus::Running);
        assert!(state.drain_commands().is_empty());
    }

    #[test]
    fn stationary_head_consumes_adjacent_food() {
        let mut state = state_with_seed(7);
        park_food(&mut state);
        // (104, 103) is within strict Chebyshev range 8 of the resting
        // head at (100, 100).
        state.foods.place(3, Position::new(104.0, 103.0));
        let old_marker = state.foods.slots()[3].marker;
        state.drain_commands();

        state.tick();

        assert_eq!(state.score, 10);
        assert_eq!(state.snake.capacity(), 110);
        assert_eq!(state.snake.head(), Position::new(100.0, 100.0));
        assert_eq!(state.snake.len(), 1);

        // The tick drew no body point, only the erase/draw pair for the
        // respawned slot.
        let commands = state.drain_commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], RenderCommand::ErasePoint { marker: old_marker });
        assert!(matches!(
            commands[1],
            RenderCommand::DrawPoint {
                role: PointRole::Food,
                ..
            }
        ));
    }

    #[test]
    fn stationary_start_outside_the_margin_ends_the_round() {
        let config = GameConfig {
            start: Position::new(2.0, 100.0),
            ..GameConfig::default()
        };
        let mut state = GameState::new_with_seed(&config, 7);
        park_food(&mut state);
        state.drain_commands();

        state.tick();

        assert_eq!(state.status, GameStatus::Over);
        assert_eq!(state.cause, Some(GameOverCause::BoundaryBreach));
        assert_eq!(state.snake.head(), Position::new(2.0, 100.0));
        assert_eq!(state.tick_count, 1);
        assert_eq!(
            state.drain_commands(),
            vec![RenderCommand::AnnounceGameOver { score: 0 }]
        );
    }

    #[test]
    fn five_ticks_right_move_the_head_five_units() {
        let mut state = state_with_seed(7);
        park_food(&mut state);

        state.handle_direction(Direction::Right);
        for _ in 0..5 {
            state.tick();
        }

        assert_eq!(state.snake.head(), Position::new(105.0, 100.0));
        assert_eq!(state.snake.len(), 6);
        assert_eq!(state.score, 0);
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn each_moving_tick_draws_exactly_one_body_point() {
        let mut state = state_with_seed(7);
        park_food(&mut state);
        state.drain_commands();

        state.handle_direction(Direction::Up);
        for _ in 0..3 {
            state.tick();
        }

        let commands = state.drain_commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[2],
            RenderCommand::DrawPoint {
                marker: MarkerId::new(13),
                position: Position::new(100.0, 97.0),
                role: PointRole::SnakeBody,
            }
        );
    }

    #[test]
    fn reversal_requested_mid_run_is_ignored() {
        let mut state = state_with_seed(7);
        park_food(&mut state);

        state.handle_direction(Direction::Right);
        state.tick();
        state.tick();
        state.handle_direction(Direction::Left);
        state.tick();

        assert_eq!(state.snake.head(), Position::new(103.0, 100.0));
        assert_eq!(state.filter.current(), Some(Direction::Right));
    }

    #[test]
    fn crossing_the_left_margin_ends_the_round() {
        let config = GameConfig {
            start: Position::new(4.0, 100.0),
            ..GameConfig::default()
        };
        let mut state = GameState::new_with_seed(&config, 7);
        park_food(&mut state);
        state.drain_commands();

        state.handle_direction(Direction::Left);
        state.tick();

        assert_eq!(state.status, GameStatus::Over);
        assert_eq!(state.cause, Some(GameOverCause::BoundaryBreach));
        assert_eq!(state.snake.head(), Position::new(3.0, 100.0));

        let commands = state.drain_commands();
        assert_eq!(announce_count(&commands), 1);
        assert!(commands.contains(&RenderCommand::AnnounceGameOver { score: 0 }));
    }

    #[test]
    fn ticks_after_the_round_ends_do_nothing() {
        let config = GameConfig {
            start: Position::new(4.0, 100.0),
            ..GameConfig::default()
        };
        let mut state = GameState::new_with_seed(&config, 7);
        park_food(&mut state);

        state.handle_direction(Direction::Left);
        state.tick();
        state.drain_commands();

        state.tick();
        state.tick();

        assert_eq!(state.tick_count, 1);
        assert!(state.drain_commands().is_empty());
    }

    #[test]
    fn direction_input_after_the_round_ends_is_ignored() {
        let config = GameConfig {
            start: Position::new(4.0, 100.0),
            ..GameConfig::default()
        };
        let mut state = GameState::new_with_seed(&config, 7);
        park_food(&mut state);

        state.handle_direction(Direction::Left);
        state.tick();
        state.handle_direction(Direction::Right);

        assert_eq!(state.filter.current(), Some(Direction::Left));
    }

    #[test]
    fn eating_food_scores_grows_and_respawns_the_slot() {
        let mut state = state_with_seed(7);
        park_food(&mut state);
        // Head size 8: the head at x=105 is the first position within
        // strict Chebyshev range of a slot at (112, 104).
        state.foods.place(2, Position::new(112.0, 104.0));
        let old_marker = state.foods.slots()[2].marker;
        state.drain_commands();

        state.handle_direction(Direction::Right);
        for _ in 0..4 {
            state.tick();
        }
        assert_eq!(state.score, 0);

        state.tick();

        assert_eq!(state.score, 10);
        assert_eq!(state.snake.capacity(), 110);
        assert_eq!(state.status, GameStatus::Running);

        let slot = state.foods.slots()[2];
        assert_ne!(slot.marker, old_marker);
        let margin = interior_margin(state.snake.head_size());
        assert!(slot.position.x >= margin && slot.position.x <= DEFAULT_SURFACE_WIDTH - margin);
        assert!(slot.position.y >= margin && slot.position.y <= DEFAULT_SURFACE_HEIGHT - margin);

        let commands = state.drain_commands();
        assert!(commands.contains(&RenderCommand::ErasePoint { marker: old_marker }));
        assert!(commands.contains(&RenderCommand::DrawPoint {
            marker: slot.marker,
            position: slot.position,
            role: PointRole::Food,
        }));
    }

    #[test]
    fn overlapping_food_hits_consume_the_lowest_slot_only() {
        let mut state = state_with_seed(7);
        park_food(&mut state);
        // Both slots come into range of the head at (105, 100) on the
        // same tick; the pool is scanned in slot order, so only slot 0
        // is consumed.
        state.foods.place(0, Position::new(112.0, 103.0));
        state.foods.place(1, Position::new(112.0, 100.0));

        state.handle_direction(Direction::Right);
        for _ in 0..5 {
            state.tick();
        }

        assert_eq!(state.score, 10);
        assert_eq!(state.foods.slots()[1].position, Position::new(112.0, 100.0));
    }

    #[test]
    fn growth_raises_the_trim_threshold() {
        let config = GameConfig {
            initial_capacity: 5,
            ..GameConfig::default()
        };
        let mut state = GameState::new_with_seed(&config, 7);
        park_food(&mut state);
        state.foods.place(0, Position::new(112.0, 104.0));

        state.handle_direction(Direction::Right);
        for _ in 0..5 {
            state.tick();
        }

        // The fifth tick trimmed the trail to capacity and then grew it.
        assert_eq!(state.snake.len(), 5);
        assert_eq!(state.snake.capacity(), 15);

        for _ in 0..5 {
            state.tick();
        }
        assert_eq!(state.snake.len(), 10);
    }

    #[test]
    fn doubling_back_onto_the_trail_ends_the_round() {
        let mut state = state_with_seed(7);
        park_food(&mut state);

        // Run right for 40 ticks, climb for 3, then turn back left. The
        // third left tick brings the head to (137, 97), within
        // head-size range of the tick-30 trail point at (130, 100),
        // which is old enough to be scanned.
        state.handle_direction(Direction::Right);
        for _ in 0..40 {
            state.tick();
        }
        state.handle_direction(Direction::Up);
        for _ in 0..3 {
            state.tick();
        }
        state.handle_direction(Direction::Left);
        state.tick();
        state.tick();
        assert_eq!(state.status, GameStatus::Running);

        state.tick();

        assert_eq!(state.status, GameStatus::Over);
        assert_eq!(state.cause, Some(GameOverCause::SelfCollision));
        assert_eq!(state.tick_count, 46);
        assert_eq!(announce_count(&state.drain_commands()), 1);
    }
}
