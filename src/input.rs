/// Canonical movement directions for snake input.
///
/// The unset initial state is represented as `Option::<Direction>::None`:
/// the snake stands still until the first key arrives.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// High-level input events consumed by the front-end loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Quit,
    Confirm,
}

/// Two-field direction memory with the no-reversal rule.
///
/// `current` is the direction the next tick will apply; `previous` is the
/// direction the last tick actually applied. A request is silently ignored
/// only when it is the exact opposite of `previous` — reversing into the
/// segment occupied one tick ago would be an unavoidable self collision.
/// Every other request wins, including one that reverses a direction that
/// was requested but has not been applied yet.
///
/// The filter owns the two direction fields and nothing else; it never
/// touches geometry.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct DirectionFilter {
    current: Option<Direction>,
    previous: Option<Direction>,
}

impl DirectionFilter {
    /// Creates a filter with no direction set; the first request always
    /// passes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one directional key signal.
    pub fn request(&mut self, requested: Direction) {
        if self.previous == Some(requested.opposite()) {
            return;
        }
        self.current = Some(requested);
    }

    /// Records that this tick's motion used `current`; called once per tick
    /// after movement, even when the direction did not change.
    pub fn commit(&mut self) {
        self.previous = self.current;
    }

    /// Returns the direction the next tick will apply.
    #[must_use]
    pub fn current(self) -> Option<Direction> {
        self.current
    }

    /// Returns the direction the last tick applied.
    #[must_use]
    pub fn previous(self) -> Option<Direction> {
        self.previous
    }
}
