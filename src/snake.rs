use std::collections::VecDeque;

use crate::commands::MarkerId;
use crate::config::SurfaceSize;
use crate::input::Direction;

/// Point on the play surface in canvas units.
///
/// The y axis grows downward, canvas style: `Up` decreases y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this position advanced one unit in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1.0,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1.0,
            },
            Direction::Left => Self {
                x: self.x - 1.0,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1.0,
                y: self.y,
            },
        }
    }

    /// Coarse proximity test: both axis distances strictly within `radius`.
    ///
    /// This is the classic forgiving collision rule, not exact overlap.
    #[must_use]
    pub fn is_near(self, other: Self, radius: f64) -> bool {
        (self.x - other.x).abs() < radius && (self.y - other.y).abs() < radius
    }

    /// Returns true while the position stays inside `bounds` inset by
    /// `margin` on every edge.
    #[must_use]
    pub fn is_within_margin(self, bounds: SurfaceSize, margin: f64) -> bool {
        self.x >= margin
            && self.x <= bounds.width - margin
            && self.y >= margin
            && self.y <= bounds.height - margin
    }
}

/// One trail entry: where the point is and which drawn marker shows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Position,
    pub marker: MarkerId,
}

/// Snake trail with a mutable capacity target.
///
/// New points are appended at the back; once the trail exceeds `capacity`
/// the oldest entries are evicted from the front. Capacity only ever
/// grows (+10 per food), so at most one entry is evicted per tick.
#[derive(Debug, Clone)]
pub struct Snake {
    trail: VecDeque<TrailPoint>,
    capacity: usize,
    head_size: f64,
}

impl Snake {
    /// Creates a one-point snake at `start`.
    #[must_use]
    pub fn new(start: Position, marker: MarkerId, head_size: f64, capacity: usize) -> Self {
        let mut trail = VecDeque::new();
        trail.push_back(TrailPoint {
            position: start,
            marker,
        });

        Self {
            trail,
            capacity,
            head_size,
        }
    }

    /// Creates a snake from explicit trail entries (back is the head).
    #[must_use]
    pub fn from_trail(points: Vec<TrailPoint>, head_size: f64, capacity: usize) -> Self {
        Self {
            trail: VecDeque::from(points),
            capacity,
            head_size,
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.trail
            .back()
            .expect("snake trail must always contain at least one point")
            .position
    }

    /// Advances the head one unit in `direction`, appending a new trail
    /// entry drawn as `marker`. Returns the new head position.
    pub fn advance(&mut self, direction: Direction, marker: MarkerId) -> Position {
        let position = self.head().step(direction);
        self.trail.push_back(TrailPoint { position, marker });
        position
    }

    /// Evicts the oldest entries until the trail fits `capacity`.
    ///
    /// Returns the evicted entries oldest first so their markers can be
    /// erased.
    pub fn trim(&mut self) -> Vec<TrailPoint> {
        let mut evicted = Vec::new();
        while self.trail.len() > self.capacity {
            if let Some(point) = self.trail.pop_front() {
                evicted.push(point);
            }
        }
        evicted
    }

    /// Raises the capacity target.
    pub fn grow(&mut self, amount: usize) {
        self.capacity += amount;
    }

    /// Returns true when the head sits on an older part of the trail.
    ///
    /// The newest `2 * head_size` entries are excluded from the scan: the
    /// segment immediately behind the head is always geometrically close
    /// and would trigger a false collision. The scan runs oldest first and
    /// stops at the first hit.
    #[must_use]
    pub fn self_collision(&self) -> bool {
        let head = self.head();
        let scan = self.trail.len().saturating_sub(self.collision_skip());
        self.trail
            .iter()
            .take(scan)
            .any(|point| point.position.is_near(head, self.head_size))
    }

    /// Number of newest trail entries excluded from the self-collision scan.
    #[must_use]
    pub fn collision_skip(&self) -> usize {
        (2.0 * self.head_size) as usize
    }

    /// Returns the current trail length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trail.len()
    }

    /// Returns true when there are no trail entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    /// Returns the current capacity target.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the collision radius / visual diameter.
    #[must_use]
    pub fn head_size(&self) -> f64 {
        self.head_size
    }

    /// Iterates over trail entries from oldest to newest.
    pub fn segments(&self) -> impl Iterator<Item = &TrailPoint> {
        self.trail.iter()
    }
}
