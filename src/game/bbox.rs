//! Bounding Boxes
//!
//! Identified, activatable axis-aligned rectangles.

use serde::{Serialize, Deserialize};
use crate::core::vec2::Position;

/// Axis-aligned box anchored at its top-left corner.
///
/// An inactive box takes part in no collision or point query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Extent along x
    pub width: i32,
    /// Extent along y
    pub height: i32,
    id: String,
    active: bool,
}

impl BoundingBox {
    /// Create an active box.
    pub fn new(x: i32, y: i32, width: i32, height: i32, id: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            id: id.into(),
            active: true,
        }
    }

    /// Identifier given at creation.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Is this box visible to queries?
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable the box.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Top-left corner.
    #[inline]
    pub fn top_left(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Move the top-left corner. No clamping.
    #[inline]
    pub fn update_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Overlap test.
    ///
    /// Both boxes must be active. Touching edges do not overlap
    /// (half-open intervals on both axes).
    pub fn collides_with(&self, other: &BoundingBox) -> bool {
        if !self.active || !other.active {
            return false;
        }

        let (x, y) = (self.x as i64, self.y as i64);
        let (ox, oy) = (other.x as i64, other.y as i64);
        let separated_x = self.right() <= ox || other.right() <= x;
        let separated_y = self.bottom() <= oy || other.bottom() <= y;

        !separated_x && !separated_y
    }

    /// Point containment with inclusive bounds on all four edges.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        let (px, py) = (x as i64, y as i64);
        self.active
            && x >= self.x
            && px <= self.right()
            && y >= self.y
            && py <= self.bottom()
    }

    // Edges widened so extreme coordinates cannot overflow.
    #[inline]
    fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    #[inline]
    fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }
}
