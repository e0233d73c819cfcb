use std::path::PathBuf;

use anyhow::Result;

use crate::snapshot::{GenerationSnapshot, SnapshotWriter, StatsSink};
use crate::world::World;

pub struct EngineSettings {
    pub scenario_name: String,
    pub snapshot_interval: u64,
    pub snapshot_dir: PathBuf,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    sinks: Vec<Box<dyn StatsSink>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            sinks: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: impl StatsSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn push_sink(&mut self, sink: impl StatsSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn build(self) -> Engine {
        let writer = SnapshotWriter::new(
            self.settings.snapshot_dir.join(&self.settings.scenario_name),
            self.settings.snapshot_interval,
        );
        Engine {
            snapshot_writer: writer,
            sinks: self.sinks,
        }
    }
}

pub struct Engine {
    snapshot_writer: SnapshotWriter,
    sinks: Vec<Box<dyn StatsSink>>,
}

impl Engine {
    pub fn run(&mut self, world: &mut World, generations: u64) -> Result<()> {
        self.run_with_hook(world, generations, |_| {})
    }

    /// Drive the world for the given number of generations. Each
    /// iteration records the pre-mutation snapshot to the writer, every
    /// sink and the hook, and only then advances the world.
    pub fn run_with_hook<F>(
        &mut self,
        world: &mut World,
        generations: u64,
        mut hook: F,
    ) -> Result<()>
    where
        F: FnMut(&GenerationSnapshot),
    {
        for _ in 0..generations {
            let snapshot = world.snapshot();
            self.snapshot_writer.record(&snapshot)?;
            for sink in &mut self.sinks {
                sink.record(&snapshot)?;
            }
            hook(&snapshot);
            world.advance();
        }
        Ok(())
    }

    /// Fetch a registered sink back out by concrete type, e.g. a
    /// [`crate::snapshot::MemorySink`] after a run.
    pub fn get_sink<T: 'static>(&self) -> Option<&T> {
        self.sinks
            .iter()
            .find_map(|sink| sink.as_any().downcast_ref::<T>())
    }
}
