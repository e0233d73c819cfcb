use std::any::Any;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Read-only export of one generation, taken before that generation's
/// changes are applied. Per-cell values are in grid (row-major) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSnapshot {
    pub generation: u64,
    pub temperatures: Vec<f64>,
    pub pollutions: Vec<i32>,
    pub sea_count: usize,
    pub forest_count: usize,
    pub glacier_count: usize,
}

/// Consumer of per-generation snapshots. Sinks only observe; the engine
/// never depends on what they do with a record.
pub trait StatsSink {
    fn record(&mut self, snapshot: &GenerationSnapshot) -> Result<()>;
    fn as_any(&self) -> &dyn Any;
}

/// Keeps every record in memory, for tests and post-run analysis.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<GenerationSnapshot>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[GenerationSnapshot] {
        &self.records
    }
}

impl StatsSink for MemorySink {
    fn record(&mut self, snapshot: &GenerationSnapshot) -> Result<()> {
        self.records.push(snapshot.clone());
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Writes every `interval`-th snapshot as pretty JSON under its directory.
/// An interval of 0 disables writing entirely.
pub struct SnapshotWriter {
    dir: PathBuf,
    interval: u64,
}

impl SnapshotWriter {
    pub fn new(dir: impl Into<PathBuf>, interval: u64) -> Self {
        Self {
            dir: dir.into(),
            interval,
        }
    }
}

impl StatsSink for SnapshotWriter {
    fn record(&mut self, snapshot: &GenerationSnapshot) -> Result<()> {
        if self.interval == 0 || snapshot.generation % self.interval != 0 {
            return Ok(());
        }
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create snapshot dir {}", self.dir.display()))?;
        let path = self.dir.join(format!("gen_{:06}.json", snapshot.generation));
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Aggregates every cell value seen across a run: the figures reported
/// when the stop generation is reached.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub temperature: SeriesSummary,
    pub pollution: SeriesSummary,
    generations: u64,
}

impl RunSummary {
    pub fn observe(&mut self, snapshot: &GenerationSnapshot) {
        for &value in &snapshot.temperatures {
            self.temperature.push(value);
        }
        for &value in &snapshot.pollutions {
            self.pollution.push(value as f64);
        }
        self.generations += 1;
    }

    pub fn generations(&self) -> u64 {
        self.generations
    }
}

/// Streaming min/max/mean/standard deviation over one series of values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesSummary {
    count: u64,
    sum: f64,
    sum_squares: f64,
    min: f64,
    max: f64,
}

impl SeriesSummary {
    fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
        self.sum_squares += value * value;
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Sample standard deviation; 0 for fewer than two values.
    pub fn std_dev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        let mean = self.sum / n;
        let variance = (self.sum_squares - n * mean * mean) / (n - 1.0);
        variance.max(0.0).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn snapshot(generation: u64) -> GenerationSnapshot {
        GenerationSnapshot {
            generation,
            temperatures: vec![10.0, 20.0, 30.0, 20.0],
            pollutions: vec![0, 5, 10, 5],
            sea_count: 1,
            forest_count: 1,
            glacier_count: 1,
        }
    }

    #[test]
    fn series_summary_math() {
        let mut series = SeriesSummary::default();
        for value in [10.0, 20.0, 30.0] {
            series.push(value);
        }
        assert_eq!(series.min(), 10.0);
        assert_eq!(series.max(), 30.0);
        assert_eq!(series.mean(), 20.0);
        assert!((series.std_dev() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn writer_respects_the_interval() {
        let temp = tempdir().unwrap();
        let mut writer = SnapshotWriter::new(temp.path().join("out"), 2);
        for generation in 0..5 {
            writer.record(&snapshot(generation)).unwrap();
        }
        let dir = temp.path().join("out");
        assert!(dir.join("gen_000000.json").exists());
        assert!(!dir.join("gen_000001.json").exists());
        assert!(dir.join("gen_000002.json").exists());
        assert!(dir.join("gen_000004.json").exists());
    }

    #[test]
    fn writer_interval_zero_writes_nothing() {
        let temp = tempdir().unwrap();
        let mut writer = SnapshotWriter::new(temp.path().join("out"), 0);
        writer.record(&snapshot(0)).unwrap();
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let original = snapshot(3);
        let json = serde_json::to_string(&original).unwrap();
        let parsed: GenerationSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
