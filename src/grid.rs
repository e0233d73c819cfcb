//! Toroidal grid addressing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Combine the wind direction of an origin cell with the direction of
    /// the cell it blows into. Head-on pairs deflect 90 degrees; every
    /// other pairing keeps the origin's direction.
    pub fn merged_with(self, other: Direction) -> Direction {
        match (self, other) {
            (Direction::North, Direction::South) => Direction::East,
            (Direction::South, Direction::North) => Direction::West,
            (Direction::East, Direction::West) => Direction::North,
            (Direction::West, Direction::East) => Direction::South,
            _ => self,
        }
    }
}

/// Square N x N grid where every edge wraps to the opposite edge, so each
/// cell has exactly four neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    pub fn neighbor(&self, index: usize, direction: Direction) -> usize {
        let (row, col) = self.coords(index);
        let n = self.size;
        let (row, col) = match direction {
            Direction::North => ((row + n - 1) % n, col),
            Direction::South => ((row + 1) % n, col),
            Direction::West => (row, (col + n - 1) % n),
            Direction::East => (row, (col + 1) % n),
        };
        self.index(row, col)
    }
}
