use ecotone::{
    engine::{EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    snapshot::MemorySink,
};
use tempfile::tempdir;

fn load_tiny() -> ecotone::Scenario {
    let loader = ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"));
    loader.load("scenarios/tiny.yaml").expect("scenario should load")
}

#[test]
fn engine_runs_hook_each_generation() {
    let scenario = load_tiny();
    let mut world = scenario.build_world().expect("world should build");
    let temp = tempdir().expect("tempdir");
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        snapshot_interval: 0,
        snapshot_dir: temp.path().to_path_buf(),
    };
    let mut engine = EngineBuilder::new(settings).build();

    let mut generations = Vec::new();
    engine
        .run_with_hook(&mut world, 6, |snapshot| generations.push(snapshot.generation))
        .expect("run succeeds");

    // The hook sees the pre-mutation snapshot of every generation.
    assert_eq!(generations, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(world.generation(), 6);
}

#[test]
fn memory_sink_records_every_generation() {
    let scenario = load_tiny();
    let mut world = scenario.build_world().expect("world should build");
    let temp = tempdir().expect("tempdir");
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        snapshot_interval: 0,
        snapshot_dir: temp.path().to_path_buf(),
    };
    let mut engine = EngineBuilder::new(settings)
        .with_sink(MemorySink::new())
        .build();
    engine.run(&mut world, 4).expect("run succeeds");

    let sink = engine.get_sink::<MemorySink>().expect("sink is registered");
    let records = sink.records();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].generation, 0);
    assert_eq!(records[0].sea_count, 6);
    assert_eq!(records[0].forest_count, 3);
    assert_eq!(records[0].glacier_count, 3);
    assert_eq!(records[0].temperatures.len(), 16);
    assert_eq!(records[0].pollutions.len(), 16);
}

#[test]
fn snapshot_files_follow_the_interval() {
    let scenario = load_tiny();
    let mut world = scenario.build_world().expect("world should build");
    let temp = tempdir().expect("tempdir");
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        snapshot_interval: 2,
        snapshot_dir: temp.path().to_path_buf(),
    };
    let mut engine = EngineBuilder::new(settings).build();
    engine.run(&mut world, 5).expect("run succeeds");

    let dir = temp.path().join("tiny");
    assert!(dir.join("gen_000000.json").exists());
    assert!(!dir.join("gen_000001.json").exists());
    assert!(dir.join("gen_000002.json").exists());
    assert!(dir.join("gen_000004.json").exists());
}
