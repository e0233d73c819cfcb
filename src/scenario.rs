use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::config::SimConfig;
use crate::rng::InitRng;
use crate::world::World;

fn default_snapshot_interval() -> u64 {
    30
}

const DEFAULT_GENERATIONS: u64 = 365;

/// A scenario file: which layout to load, how to seed the randomized
/// initial state, and how long to run.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default)]
    pub generations: Option<u64>,
    #[serde(default = "default_snapshot_interval")]
    pub snapshot_interval: u64,
    /// Inline layout source; takes precedence over `layout_file`.
    #[serde(default)]
    pub layout: Option<String>,
    /// Path to a layout file, resolved against the loader's base dir.
    #[serde(default)]
    pub layout_file: Option<PathBuf>,
    #[serde(default)]
    pub sim: SimConfig,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let mut scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if let Some(layout_file) = scenario.layout_file.take() {
            scenario.layout_file = Some(self.base_dir.join(layout_file));
        }
        Ok(scenario)
    }
}

impl Scenario {
    pub fn build_world(&self) -> Result<World> {
        let source = match (&self.layout, &self.layout_file) {
            (Some(inline), _) => inline.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read layout file {}", path.display()))?,
            (None, None) => bail!(
                "scenario '{}' defines neither an inline layout nor a layout_file",
                self.name
            ),
        };
        let mut rng = InitRng::new(self.seed);
        let world = World::from_layout_source(self.sim.clone(), &source, &mut rng)
            .with_context(|| format!("Failed to build world for scenario '{}'", self.name))?;
        Ok(world)
    }

    pub fn generations(&self, override_generations: Option<u64>) -> u64 {
        override_generations
            .or(self.generations)
            .unwrap_or(DEFAULT_GENERATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_layout_builds_a_world() {
        let yaml = "
name: inline
seed: 3
layout: |
  E S
  F G
sim:
  grid_size: 2
";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        let world = scenario.build_world().unwrap();
        assert_eq!(world.size(), 2);
        assert_eq!(world.counts().sea, 1);
        assert_eq!(world.counts().forest, 1);
        assert_eq!(world.counts().glacier, 1);
        assert_eq!(scenario.generations(None), 365);
        assert_eq!(scenario.generations(Some(10)), 10);
    }

    #[test]
    fn missing_layout_is_an_error() {
        let yaml = "
name: empty
seed: 1
";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert!(scenario.build_world().is_err());
    }
}
