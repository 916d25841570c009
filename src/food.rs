use rand::Rng;

use crate::commands::MarkerId;
use crate::config::SurfaceSize;
use crate::snake::Position;

/// Interior margin food keeps from every surface edge.
///
/// One unit wider than the head so a fresh spawn can never overlap the
/// lethal boundary band.
#[must_use]
pub fn interior_margin(head_size: f64) -> f64 {
    head_size + 1.0
}

/// One food slot: where it is and which drawn marker shows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodSlot {
    pub position: Position,
    pub marker: MarkerId,
}

/// Fixed-size ordered collection of active food.
///
/// Slots are seeded once at game start and afterwards only ever respawn in
/// place; the pool never changes size mid-game. Food storage is fully
/// independent of the snake trail.
#[derive(Debug, Clone, Default)]
pub struct FoodPool {
    slots: Vec<FoodSlot>,
}

impl FoodPool {
    /// Creates an empty pool; the engine fills it at construction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a seeded slot.
    pub fn push(&mut self, slot: FoodSlot) {
        self.slots.push(slot);
    }

    /// Returns the first slot in pool order within `radius` of `head` on
    /// both axes, if any.
    ///
    /// At most one food is consumed per tick, so the scan stops at the
    /// first match.
    #[must_use]
    pub fn find_hit(&self, head: Position, radius: f64) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.position.is_near(head, radius))
    }

    /// Swaps in a freshly spawned slot at `index`, returning the consumed
    /// one so its marker can be erased.
    pub fn replace(&mut self, index: usize, slot: FoodSlot) -> FoodSlot {
        std::mem::replace(&mut self.slots[index], slot)
    }

    /// Moves the food in `index` to `position`, keeping its drawn marker.
    ///
    /// Scenario setup hook: scripted sessions park or stage food at known
    /// coordinates without disturbing marker bookkeeping.
    pub fn place(&mut self, index: usize, position: Position) {
        self.slots[index].position = position;
    }

    /// Returns all slots in pool order.
    #[must_use]
    pub fn slots(&self) -> &[FoodSlot] {
        &self.slots
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true when no slots are seeded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Samples a uniform position inside the interior margin.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: SurfaceSize,
    margin: f64,
) -> Position {
    debug_assert!(bounds.width > 2.0 * margin && bounds.height > 2.0 * margin);

    Position {
        x: rng.gen_range(margin..bounds.width - margin),
        y: rng.gen_range(margin..bounds.height - margin),
    }
}
