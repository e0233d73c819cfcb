use serde::{Deserialize, Serialize};

use crate::grid::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Earth,
    Sea,
    Glacier,
    Forest,
    City,
}

impl CellType {
    /// Map a layout token to a cell type. Any other character is not a
    /// token and is skipped by the layout loader.
    pub fn from_token(token: char) -> Option<CellType> {
        match token {
            'E' => Some(CellType::Earth),
            'S' => Some(CellType::Sea),
            'F' => Some(CellType::Forest),
            'C' => Some(CellType::City),
            'G' => Some(CellType::Glacier),
            _ => None,
        }
    }

    pub fn initial_wind_speed(self) -> i32 {
        match self {
            CellType::Glacier => 10,
            CellType::Sea => 30,
            _ => 20,
        }
    }
}

/// Terrain height at world build time; only used to derive the initial
/// temperature. Sea and glacier cells always sit at sea level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Height {
    Valley,
    SeaLevel,
    Mountain,
}

/// The full mutable state of one grid position. Kept `Copy` so the world
/// can hold a current and a staged array and commit with a plain copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellState {
    pub kind: CellType,
    pub wind_direction: Direction,
    pub wind_speed: i32,
    pub pollution: i32,
    pub temperature: f64,
    pub clouds: bool,
    pub rain: bool,
}
