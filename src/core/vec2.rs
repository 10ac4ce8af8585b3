//! Screen-Space Positions
//!
//! Integer 2D positions in screen pixels. Y grows downward.

use std::fmt;
use std::ops::{Add, Sub, Neg};
use serde::{Serialize, Deserialize};

/// Integer position (or offset) in screen-pixel space.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate (grows right)
    pub x: i32,
    /// Y coordinate (grows down)
    pub y: i32,
}

impl Position {
    /// Origin
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by a displacement.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }

    /// Per-axis absolute distance to another position.
    #[inline]
    pub fn axis_distance(self, other: Self) -> (u32, u32) {
        (self.x.abs_diff(other.x), self.y.abs_diff(other.y))
    }
}

impl Add for Position {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        self.offset(other.x, other.y)
    }
}

impl Sub for Position {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_sub(other.x),
            y: self.y.wrapping_sub(other.y),
        }
    }
}

impl Neg for Position {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: self.x.wrapping_neg(),
            y: self.y.wrapping_neg(),
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Facing direction of an actor.
///
/// Discriminants follow the sprite-sheet row order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[derive(Default)]
pub enum Direction {
    /// Toward larger y
    #[default]
    Down = 0,
    /// Toward smaller x
    Left = 1,
    /// Toward larger x
    Right = 2,
    /// Toward smaller y
    Up = 3,
}

impl Direction {
    /// All directions in sprite-row order.
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];

    /// Row index into a direction-indexed table.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Half-plane test: does `target` lie on the side `from` is facing?
    ///
    /// Strict comparison; a target level with the actor is not faced.
    pub fn faces(self, from: Position, target: Position) -> bool {
        match self {
            Direction::Down => from.y < target.y,
            Direction::Up => from.y > target.y,
            Direction::Left => from.x > target.x,
            Direction::Right => from.x < target.x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_arithmetic() {
        let a = Position::new(10, 20);
        let b = Position::new(3, -4);

        assert_eq!(a + b, Position::new(13, 16));
        assert_eq!(a - b, Position::new(7, 24));
        assert_eq!(-b, Position::new(-3, 4));
        assert_eq!(a.offset(5, 0), Position::new(15, 20));
    }

    #[test]
    fn test_arithmetic_wraps_at_extremes() {
        let min = Position::new(i32::MIN, i32::MAX);
        assert_eq!(-min, Position::new(i32::MIN, -i32::MAX));
        assert_eq!(min.offset(-1, 1), Position::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn test_axis_distance() {
        let a = Position::new(380, 200);
        let b = Position::new(380, 280);
        assert_eq!(a.axis_distance(b), (0, 80));
        assert_eq!(b.axis_distance(a), (0, 80));
    }

    #[test]
    fn test_direction_faces() {
        let obj = Position::new(100, 100);

        assert!(Direction::Down.faces(Position::new(100, 50), obj));
        assert!(!Direction::Down.faces(Position::new(100, 150), obj));
        assert!(Direction::Up.faces(Position::new(100, 150), obj));
        assert!(Direction::Left.faces(Position::new(150, 100), obj));
        assert!(Direction::Right.faces(Position::new(50, 100), obj));

        // Level with the target on the facing axis
        assert!(!Direction::Down.faces(Position::new(0, 100), obj));
        assert!(!Direction::Right.faces(Position::new(100, 0), obj));
    }

    #[test]
    fn test_direction_index_order() {
        let indices: Vec<usize> = Direction::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
