pub mod cell;
pub mod config;
pub mod engine;
pub mod grid;
pub mod layout;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod world;

pub use cell::{CellState, CellType};
pub use config::{ConfigError, SimConfig};
pub use engine::{Engine, EngineBuilder, EngineSettings};
pub use grid::{Direction, Grid};
pub use layout::LayoutError;
pub use scenario::{Scenario, ScenarioLoader};
pub use snapshot::{GenerationSnapshot, MemorySink, SnapshotWriter, StatsSink};
pub use world::{TypeCounts, World, WorldBuildError};
