// ------------------------------------------------------------------------------- MODULES

mod d2q9;

// ------------------------------------------------------------------------------- IMPORTS

use crate::constants::Float;

pub use d2q9::{C, D, Q, Q_BAR, Q_EAST, Q_NORTH, Q_SOUTH, Q_WEST, W};
pub(crate) use d2q9::{velocity_computation, velocity_projection};

// ---------------------------------------------------------------------- ENUM: Direction

/// The nine D2Q9 directions, numbered like the distribution arrays:
///
/// ```text
/// 6 2 5
///  \|/
/// 3-0-1
///  /|\
/// 7 4 8
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Rest = 0,
    East = 1,
    North = 2,
    West = 3,
    South = 4,
    NorthEast = 5,
    NorthWest = 6,
    SouthWest = 7,
    SouthEast = 8,
}

pub use Direction::*;

impl Direction {
    pub const ALL: [Direction; Q] = [
        Rest, East, North, West, South, NorthEast, NorthWest, SouthWest, SouthEast,
    ];

    pub fn get_index(self) -> usize {
        self as usize
    }

    /// # Examples
    /// ```
    /// # use bgkflow::velocity_set::Direction;
    /// assert_eq!(Direction::East.get_opposite(), Direction::West);
    /// assert_eq!(Direction::NorthWest.get_opposite(), Direction::SouthEast);
    /// assert_eq!(Direction::Rest.get_opposite(), Direction::Rest);
    /// ```
    pub fn get_opposite(self) -> Direction {
        Direction::ALL[Q_BAR[self as usize]]
    }

    pub fn get_c(self) -> [i32; D] {
        C[self as usize]
    }

    pub fn get_w(self) -> Float {
        W[self as usize]
    }
}

pub(crate) fn get_opposite_direction(direction: usize) -> usize {
    Q_BAR[direction]
}
