use crate::snake::Position;

/// Handle of one drawn point marker.
///
/// The engine allocates marker ids monotonically and never reuses them, so
/// an erase can always name exactly the marker it means. This replaces the
/// index arithmetic the classic implementation shared between its logical
/// lists and the drawn shapes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MarkerId(u64);

impl MarkerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// What a drawn point represents.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PointRole {
    SnakeBody,
    Food,
}

/// One discrete instruction from the tick engine to the renderer.
///
/// The engine queues commands while it mutates simulation state; the
/// presentation layer drains the queue and applies them in order. The
/// engine never holds a reference into presentation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCommand {
    /// Add a visual marker for a snake-body or food point.
    DrawPoint {
        marker: MarkerId,
        position: Position,
        role: PointRole,
    },
    /// Remove a previously drawn marker.
    ErasePoint { marker: MarkerId },
    /// Terminal transition: emitted exactly once, with the final score.
    AnnounceGameOver { score: u32 },
}
