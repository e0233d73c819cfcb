use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::Height;

fn default_grid_size() -> usize {
    40
}

fn default_max_pollution() -> i32 {
    100
}

fn default_max_wind_speed() -> i32 {
    30
}

fn default_glacier_temperature() -> f64 {
    -20.0
}

/// Numeric parameters of the simulation. Every field has a default, so a
/// scenario file only spells out what it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    #[serde(default)]
    pub initial_pollution: i32,
    #[serde(default)]
    pub min_pollution: i32,
    #[serde(default = "default_max_pollution")]
    pub max_pollution: i32,
    #[serde(default)]
    pub min_wind_speed: i32,
    #[serde(default = "default_max_wind_speed")]
    pub max_wind_speed: i32,
    #[serde(default)]
    pub height_temperatures: HeightTemperatures,
    #[serde(default = "default_glacier_temperature")]
    pub glacier_temperature: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            initial_pollution: 0,
            min_pollution: 0,
            max_pollution: default_max_pollution(),
            min_wind_speed: 0,
            max_wind_speed: default_max_wind_speed(),
            height_temperatures: HeightTemperatures::default(),
            glacier_temperature: default_glacier_temperature(),
        }
    }
}

/// Initial temperature by terrain height.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeightTemperatures {
    pub valley: f64,
    pub sea_level: f64,
    pub mountain: f64,
}

impl Default for HeightTemperatures {
    fn default() -> Self {
        Self {
            valley: 20.0,
            sea_level: 10.0,
            mountain: 0.0,
        }
    }
}

impl HeightTemperatures {
    pub fn for_height(&self, height: Height) -> f64 {
        match height {
            Height::Valley => self.valley,
            Height::SeaLevel => self.sea_level,
            Height::Mountain => self.mountain,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    ZeroGridSize,
    #[error("pollution bounds are inverted: min {min} > max {max}")]
    PollutionBounds { min: i32, max: i32 },
    #[error("wind speed bounds are inverted: min {min} > max {max}")]
    WindSpeedBounds { min: i32, max: i32 },
    #[error("layout provides {actual} cells but the grid needs {expected}")]
    LayoutSize { expected: usize, actual: usize },
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if self.min_pollution > self.max_pollution {
            return Err(ConfigError::PollutionBounds {
                min: self.min_pollution,
                max: self.max_pollution,
            });
        }
        if self.min_wind_speed > self.max_wind_speed {
            return Err(ConfigError::WindSpeedBounds {
                min: self.min_wind_speed,
                max: self.max_wind_speed,
            });
        }
        Ok(())
    }
}
