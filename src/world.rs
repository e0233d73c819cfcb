use thiserror::Error;

use crate::cell::{CellState, CellType, Height};
use crate::config::{ConfigError, SimConfig};
use crate::grid::Grid;
use crate::layout::{self, LayoutError};
use crate::rng::InitRng;
use crate::snapshot::GenerationSnapshot;

/// A forest scorches to earth at this temperature.
const FOREST_SCORCH_TEMPERATURE: f64 = 60.0;
/// A sea boils away to earth above this temperature.
const SEA_BOIL_TEMPERATURE: f64 = 100.0;
/// A sea freezes into a glacier below this temperature.
const SEA_FREEZE_TEMPERATURE: f64 = -10.0;
/// A glacier melts into sea above this temperature.
const GLACIER_MELT_TEMPERATURE: f64 = 0.0;
/// Above this pollution level a cell warms every generation.
const WARMING_POLLUTION_THRESHOLD: i32 = 50;
/// Below this temperature a cell sheds pollution every generation.
const COOLING_TEMPERATURE_THRESHOLD: f64 = 10.0;
/// One hop of wind per this much speed; also the boost given to a cell a
/// chain passes through and the speed lost at the source afterwards.
const WIND_SPEED_STEP: i32 = 10;

/// Running totals of the transitioning cell kinds. Earth and city never
/// change, so only these three are tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeCounts {
    pub sea: usize,
    pub forest: usize,
    pub glacier: usize,
}

/// The simulation state: a flat row-major array of cells plus a staged
/// copy that the compute phase writes into. Neighbors are addressed by
/// index through [`Grid`].
pub struct World {
    config: SimConfig,
    grid: Grid,
    cells: Vec<CellState>,
    staged: Vec<CellState>,
    counts: TypeCounts,
    generation: u64,
}

impl World {
    /// Build a world from parsed layout tokens, assigned in row-major
    /// order. The staged array starts as a copy of the current one, and
    /// that equality holds again after every commit.
    pub fn new(
        config: SimConfig,
        kinds: Vec<CellType>,
        rng: &mut InitRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let expected = config.grid_size * config.grid_size;
        if kinds.len() != expected {
            return Err(ConfigError::LayoutSize {
                expected,
                actual: kinds.len(),
            });
        }

        let mut counts = TypeCounts::default();
        let mut cells = Vec::with_capacity(expected);
        for kind in kinds {
            match kind {
                CellType::Sea => counts.sea += 1,
                CellType::Forest => counts.forest += 1,
                CellType::Glacier => counts.glacier += 1,
                CellType::Earth | CellType::City => {}
            }
            cells.push(build_cell(&config, kind, rng));
        }

        let staged = cells.clone();
        Ok(Self {
            grid: Grid::new(config.grid_size),
            config,
            cells,
            staged,
            counts,
            generation: 0,
        })
    }

    /// Build a world straight from a layout character source.
    pub fn from_layout_source(
        config: SimConfig,
        source: &str,
        rng: &mut InitRng,
    ) -> Result<Self, WorldBuildError> {
        let kinds = layout::parse(source, config.grid_size)?;
        Ok(Self::new(config, kinds, rng)?)
    }

    /// Run one generation: increment the counter, evaluate every cell in
    /// row-major order (local rules, then wind propagation), then commit
    /// the staged state. The commit is a pure copy and only happens after
    /// every cell has been computed.
    pub fn advance(&mut self) {
        self.generation += 1;
        for index in 0..self.cells.len() {
            self.apply_cell_rules(index);
            self.propagate_wind(index);
        }
        self.cells.copy_from_slice(&self.staged);
        debug_assert_eq!(self.counts, self.tally());
    }

    /// Read-only export of the pre-mutation state for stats consumers.
    pub fn snapshot(&self) -> GenerationSnapshot {
        GenerationSnapshot {
            generation: self.generation,
            temperatures: self.cells.iter().map(|c| c.temperature).collect(),
            pollutions: self.cells.iter().map(|c| c.pollution).collect(),
            sea_count: self.counts.sea,
            forest_count: self.counts.forest,
            glacier_count: self.counts.glacier,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn counts(&self) -> TypeCounts {
        self.counts
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellState {
        &self.cells[self.grid.index(row, col)]
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Overwrite one cell's current and staged state in lockstep, keeping
    /// the counters consistent. This is the seam for seeding specific
    /// conditions into a freshly built world.
    pub fn set_cell(&mut self, row: usize, col: usize, state: CellState) {
        let index = self.grid.index(row, col);
        let old = self.cells[index].kind;
        if old != state.kind {
            self.count_transition(old, state.kind);
        }
        self.cells[index] = state;
        self.staged[index] = state;
    }

    /// Recount the transitioning kinds by full scan. The incremental
    /// counters must always agree with this.
    pub fn tally(&self) -> TypeCounts {
        let mut counts = TypeCounts::default();
        for cell in &self.cells {
            match cell.kind {
                CellType::Sea => counts.sea += 1,
                CellType::Forest => counts.forest += 1,
                CellType::Glacier => counts.glacier += 1,
                CellType::Earth | CellType::City => {}
            }
        }
        counts
    }

    /// Steps 1-3 of a cell's evaluation: the type rule, rain, and the
    /// pollution/temperature feedback, in that order. Reads the current
    /// state, writes only this cell's staged state (and the counters).
    fn apply_cell_rules(&mut self, index: usize) {
        let cell = self.cells[index];
        match cell.kind {
            CellType::City => self.stage_pollution(index, 5),
            CellType::Forest => {
                if cell.temperature >= FOREST_SCORCH_TEMPERATURE
                    || cell.pollution >= self.config.max_pollution
                {
                    self.staged[index].kind = CellType::Earth;
                    self.counts.forest -= 1;
                } else {
                    self.stage_pollution(index, -2);
                }
            }
            CellType::Glacier => {
                if cell.temperature > GLACIER_MELT_TEMPERATURE
                    || cell.pollution >= self.config.max_pollution
                {
                    self.staged[index].kind = CellType::Sea;
                    self.counts.glacier -= 1;
                    self.counts.sea += 1;
                }
            }
            CellType::Sea => {
                if cell.temperature > SEA_BOIL_TEMPERATURE {
                    self.staged[index].kind = CellType::Earth;
                    self.counts.sea -= 1;
                } else if cell.temperature < SEA_FREEZE_TEMPERATURE {
                    self.staged[index].kind = CellType::Glacier;
                    self.counts.sea -= 1;
                    self.counts.glacier += 1;
                }
            }
            CellType::Earth => {}
        }

        if cell.rain {
            self.stage_pollution(index, -2);
            self.staged[index].temperature -= 0.1;
        }

        if cell.pollution > WARMING_POLLUTION_THRESHOLD {
            self.staged[index].temperature += 0.3;
        }
        if cell.temperature < COOLING_TEMPERATURE_THRESHOLD {
            self.stage_pollution(index, -2);
        }
    }

    /// Step 4: walk the wind chain. The chain length and the pollution
    /// reference are fixed by the acting cell's current state; each hop
    /// reads the current state of the cells it passes and writes their
    /// staged state. After the chain the acting cell itself slows down.
    fn propagate_wind(&mut self, index: usize) {
        let acting = self.cells[index];
        let hops = acting.wind_speed / WIND_SPEED_STEP;
        let mut origin = index;
        let mut direction = acting.wind_direction;
        for _ in 0..hops {
            let dest = self.grid.neighbor(origin, direction);
            let origin_cell = self.cells[origin];
            let dest_cell = self.cells[dest];

            if origin_cell.clouds {
                self.staged[dest].clouds = true;
                self.staged[origin].clouds = false;
                if origin_cell.rain {
                    // The cloud carries its rain along; the origin keeps
                    // its own rain flag.
                    self.staged[dest].rain = true;
                }
            }

            self.stage_wind_speed(dest, WIND_SPEED_STEP);

            direction = origin_cell.wind_direction.merged_with(dest_cell.wind_direction);
            self.staged[dest].wind_direction = direction;

            if dest_cell.pollution < acting.pollution {
                self.stage_pollution(dest, 5);
            } else if dest_cell.pollution > acting.pollution {
                self.stage_pollution(dest, -2);
            }

            origin = dest;
        }
        self.stage_wind_speed(index, -WIND_SPEED_STEP);
    }

    /// Add to the staged pollution, which may already carry contributions
    /// from neighbors processed earlier this generation, then clamp.
    fn stage_pollution(&mut self, index: usize, delta: i32) {
        let value = self.staged[index].pollution + delta;
        self.staged[index].pollution =
            value.clamp(self.config.min_pollution, self.config.max_pollution);
    }

    fn stage_wind_speed(&mut self, index: usize, delta: i32) {
        let value = self.staged[index].wind_speed + delta;
        self.staged[index].wind_speed =
            value.clamp(self.config.min_wind_speed, self.config.max_wind_speed);
    }

    fn count_transition(&mut self, from: CellType, to: CellType) {
        match from {
            CellType::Sea => self.counts.sea -= 1,
            CellType::Forest => self.counts.forest -= 1,
            CellType::Glacier => self.counts.glacier -= 1,
            CellType::Earth | CellType::City => {}
        }
        match to {
            CellType::Sea => self.counts.sea += 1,
            CellType::Forest => self.counts.forest += 1,
            CellType::Glacier => self.counts.glacier += 1,
            CellType::Earth | CellType::City => {}
        }
    }
}

fn build_cell(config: &SimConfig, kind: CellType, rng: &mut InitRng) -> CellState {
    let wind_direction = rng.direction();
    let height = match kind {
        CellType::Glacier | CellType::Sea => Height::SeaLevel,
        _ => rng.height(),
    };
    let temperature = match kind {
        CellType::Glacier => config.glacier_temperature,
        _ => config.height_temperatures.for_height(height),
    };
    CellState {
        kind,
        wind_direction,
        wind_speed: kind.initial_wind_speed(),
        pollution: config.initial_pollution,
        temperature,
        clouds: rng.clouds(),
        // Cells always start dry; rain only ever arrives by wind from a
        // cell that was raining.
        rain: false,
    }
}

/// Construction can fail on the layout source or on the configuration.
#[derive(Debug, Error)]
pub enum WorldBuildError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
