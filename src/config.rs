use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::snake::Position;

/// Play-surface dimensions in canvas units, as a named type.
///
/// Replaces the anonymous `(f64, f64)` pair that would otherwise travel
/// through the simulation, making width vs. height unambiguous at every
/// call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

/// Reference play surface width in canvas units.
pub const DEFAULT_SURFACE_WIDTH: f64 = 785.0;

/// Reference play surface height in canvas units.
pub const DEFAULT_SURFACE_HEIGHT: f64 = 485.0;

/// Lethal boundary margin: the head dies outside
/// `[BOUNDARY_MARGIN, extent - BOUNDARY_MARGIN]` on either axis.
pub const BOUNDARY_MARGIN: f64 = 5.0;

/// Number of food slots kept active on the surface.
pub const FOOD_POOL_SLOTS: usize = 10;

/// Trail capacity at game start.
pub const INITIAL_TRAIL_CAPACITY: usize = 100;

/// Trail capacity gained per food consumed.
pub const TRAIL_GROWTH_PER_FOOD: usize = 10;

/// Score gained per food consumed.
pub const POINTS_PER_FOOD: u32 = 10;

/// Head start position on the reference surface.
pub const DEFAULT_START: Position = Position { x: 100.0, y: 100.0 };

/// One abstract timer unit is 100 nanoseconds.
const TIMER_UNIT_NANOS: u64 = 100;

/// Named tick-interval presets, in raw timer units.
///
/// The values are deliberately kept as the classic configuration knob:
/// `Moderate` is 10000 units, i.e. one tick per millisecond.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SpeedPreset {
    Fast,
    Moderate,
    Slow,
    DamnSlow,
}

impl SpeedPreset {
    /// Returns the raw interval in 100 ns timer units.
    #[must_use]
    pub fn timer_units(self) -> u64 {
        match self {
            Self::Fast => 1,
            Self::Moderate => 10_000,
            Self::Slow => 50_000,
            Self::DamnSlow => 500_000,
        }
    }

    /// Returns the tick interval as a wall-clock duration.
    #[must_use]
    pub fn interval(self) -> Duration {
        Duration::from_nanos(self.timer_units() * TIMER_UNIT_NANOS)
    }

    /// Returns the preset name for display.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Moderate => "moderate",
            Self::Slow => "slow",
            Self::DamnSlow => "damn-slow",
        }
    }
}

impl FromStr for SpeedPreset {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "moderate" => Ok(Self::Moderate),
            "slow" => Ok(Self::Slow),
            "damn-slow" | "damnslow" => Ok(Self::DamnSlow),
            _ => Err(ConfigError::UnknownSpeedPreset(raw.to_owned())),
        }
    }
}

/// Named snake thickness presets.
///
/// The head size doubles as the collision radius, so a thicker snake is
/// both easier to feed and easier to kill.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SnakeSize {
    Thin,
    Normal,
    Thick,
}

impl SnakeSize {
    /// Returns the head diameter / collision radius in canvas units.
    #[must_use]
    pub fn head_size(self) -> f64 {
        match self {
            Self::Thin => 4.0,
            Self::Normal => 6.0,
            Self::Thick => 8.0,
        }
    }

    /// Returns the preset name for display.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Thin => "thin",
            Self::Normal => "normal",
            Self::Thick => "thick",
        }
    }
}

impl FromStr for SnakeSize {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "thin" => Ok(Self::Thin),
            "normal" => Ok(Self::Normal),
            "thick" => Ok(Self::Thick),
            _ => Err(ConfigError::UnknownSnakeSize(raw.to_owned())),
        }
    }
}

/// Everything the simulation needs to start one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub surface: SurfaceSize,
    pub snake_size: SnakeSize,
    pub speed: SpeedPreset,
    pub food_slots: usize,
    pub initial_capacity: usize,
    pub start: Position,
    /// RNG seed; `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceSize {
                width: DEFAULT_SURFACE_WIDTH,
                height: DEFAULT_SURFACE_HEIGHT,
            },
            snake_size: SnakeSize::Thick,
            speed: SpeedPreset::Moderate,
            food_slots: FOOD_POOL_SLOTS,
            initial_capacity: INITIAL_TRAIL_CAPACITY,
            start: DEFAULT_START,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Rejects configurations the simulation cannot run on.
    ///
    /// Validation happens once, before the engine is constructed; the
    /// per-tick rules assume a valid surface and never re-check it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_extent = 2.0 * (self.snake_size.head_size() + 1.0).max(BOUNDARY_MARGIN);
        if !(self.surface.width > min_extent) || !(self.surface.height > min_extent) {
            return Err(ConfigError::SurfaceTooSmall {
                width: self.surface.width,
                height: self.surface.height,
                size: self.snake_size.name(),
            });
        }

        let inside = self.start.x.is_finite()
            && self.start.y.is_finite()
            && self.start.x >= 0.0
            && self.start.x <= self.surface.width
            && self.start.y >= 0.0
            && self.start.y <= self.surface.height;
        if !inside {
            return Err(ConfigError::StartOutsideSurface {
                x: self.start.x,
                y: self.start.y,
                width: self.surface.width,
                height: self.surface.height,
            });
        }

        if self.food_slots == 0 {
            return Err(ConfigError::EmptyFoodPool);
        }

        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroTrailCapacity);
        }

        Ok(())
    }
}

/// Configuration problems detected before the engine is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("play surface {width}x{height} is too small for a {size} snake")]
    SurfaceTooSmall {
        width: f64,
        height: f64,
        size: &'static str,
    },
    #[error("start position ({x}, {y}) is outside the {width}x{height} surface")]
    StartOutsideSurface {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    #[error("food pool needs at least one slot")]
    EmptyFoodPool,
    #[error("initial trail capacity must be at least 1")]
    ZeroTrailCapacity,
    #[error("unknown speed preset `{0}` (expected fast, moderate, slow or damn-slow)")]
    UnknownSpeedPreset(String),
    #[error("unknown snake size `{0}` (expected thin, normal or thick)")]
    UnknownSnakeSize(String),
}
