//! # Game Module
//!
//! Core game state: the dungeon world, per-room state, and the hero/monster
//! combat model.
//!
//! This module contains the fundamental building blocks of the Delve engine:
//! - Grid geometry (positions and cardinal directions)
//! - Combat resolution shared by heroes and monsters
//! - Room and dungeon state, including the pillar/boss progression
//! - The session controller that applies player actions

pub mod combat;
pub mod hero;
pub mod interact;
pub mod monster;
pub mod room;
pub mod session;
pub mod world;

pub use combat::*;
pub use hero::*;
pub use interact::*;
pub use monster::*;
pub use room::*;
pub use session::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D grid coordinate in the dungeon.
///
/// Positions key rooms in the dungeon grid and locate characters. They are
/// immutable values compared and hashed by coordinate.
///
/// # Examples
///
/// ```
/// use delve::Position;
///
/// let pos = Position::new(3, 2);
/// assert_eq!(pos.x, 3);
/// assert_eq!(pos.y, 2);
///
/// let around = pos.adjacent_positions();
/// assert_eq!(around.len(), 8); // All 8 surrounding positions
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Returns all 8 adjacent positions (including diagonals).
    pub fn adjacent_positions(self) -> Vec<Position> {
        vec![
            Position::new(self.x - 1, self.y - 1), // NW
            Position::new(self.x, self.y - 1),     // N
            Position::new(self.x + 1, self.y - 1), // NE
            Position::new(self.x - 1, self.y),     // W
            Position::new(self.x + 1, self.y),     // E
            Position::new(self.x - 1, self.y + 1), // SW
            Position::new(self.x, self.y + 1),     // S
            Position::new(self.x + 1, self.y + 1), // SE
        ]
    }

    /// Returns only the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::all()
            .into_iter()
            .map(|dir| self + dir.to_delta())
            .collect()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal directions for movement and door placement.
///
/// Rooms expose one door per direction; movement translates a position by
/// the matching unit delta. North decreases `y`, matching a top-left grid
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Converts a position delta to a direction.
    ///
    /// Returns None if the delta doesn't correspond to a cardinal step.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }

    /// Returns the opposite direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Returns all 4 cardinal directions.
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
    }

    #[test]
    fn test_position_manhattan_distance() {
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(3, 4);
        assert_eq!(pos1.manhattan_distance(pos2), 7);
    }

    #[test]
    fn test_position_adjacent() {
        let pos = Position::new(5, 5);
        let adjacent = pos.adjacent_positions();
        assert_eq!(adjacent.len(), 8);
        assert!(adjacent.contains(&Position::new(4, 4)));
        assert!(adjacent.contains(&Position::new(6, 6)));
    }

    #[test]
    fn test_position_cardinal_adjacent() {
        let pos = Position::new(5, 5);
        let adjacent = pos.cardinal_adjacent_positions();
        assert_eq!(adjacent.len(), 4);
        assert!(adjacent.contains(&Position::new(5, 4))); // North
        assert!(adjacent.contains(&Position::new(4, 5))); // West
        assert!(!adjacent.contains(&Position::new(4, 4))); // No diagonal
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
    }

    #[test]
    fn test_direction_to_delta() {
        assert_eq!(Direction::North.to_delta(), Position::new(0, -1));
        assert_eq!(Direction::East.to_delta(), Position::new(1, 0));
        assert_eq!(Direction::from_delta(Position::new(0, 1)), Some(Direction::South));
        assert_eq!(Direction::from_delta(Position::new(1, 1)), None);
    }

    #[test]
    fn test_direction_opposite() {
        for dir in Direction::all() {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(
                dir.to_delta() + dir.opposite().to_delta(),
                Position::origin()
            );
        }
    }
}
