use skirmish::{
    engine::{EngineBuilder, EngineSettings},
    scenario::Scenario,
    snapshot::{self, SnapshotError, SnapshotManager},
    systems::{
        BookkeepingSystem, IncomeSystem, MovementSystem, RecruitSystem, VisionSystem,
    },
};

fn run_world(seed: u64, turns: u64) -> skirmish::WorldState {
    let mut world = Scenario::standard(seed).build_world().unwrap();
    let mut engine = EngineBuilder::new(EngineSettings {
        scenario_name: "snapshot-test".into(),
        seed,
        snapshot_interval_ticks: 0,
        snapshot_dir: std::path::PathBuf::from("unused"),
    })
    .with_system(IncomeSystem::new())
    .with_system(RecruitSystem::new())
    .with_system(MovementSystem::new())
    .with_system(VisionSystem::new())
    .with_system(BookkeepingSystem::new())
    .build();
    engine.run(&mut world, turns).unwrap();
    world
}

#[test]
fn round_trip_preserves_gameplay_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");

    let world = run_world(42, 5);
    snapshot::save_world(&world, "snapshot-test", &path).unwrap();
    let restored = snapshot::load_world(&path).unwrap();

    assert_eq!(restored.turn(), world.turn());
    assert_eq!(restored.era(), world.era());
    assert_eq!(restored.unit_count(), world.unit_count());
    for (a, b) in world.factions().iter().zip(restored.factions()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.treasury, b.treasury);
        assert_eq!(a.regions, b.regions);
        assert_eq!(a.units.len(), b.units.len());
    }
    for (a, b) in world.tiles().iter().zip(restored.tiles()) {
        assert_eq!(a.water, b.water);
        assert_eq!(a.mountain, b.mountain);
        assert_eq!(a.region, b.region);
        assert_eq!(a.unit, b.unit);
        assert_eq!(a.city.is_some(), b.city.is_some());
    }
    for (a, b) in world.regions().iter().zip(restored.regions()) {
        assert_eq!(a.owner, b.owner);
        assert_eq!(a.tiles, b.tiles);
    }
}

#[test]
fn vision_is_rebuilt_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");

    let world = run_world(7, 2);
    snapshot::save_world(&world, "snapshot-test", &path).unwrap();
    let restored = snapshot::load_world(&path).unwrap();

    for id in restored.unit_ids() {
        let unit = restored.unit(id).unwrap();
        assert!(restored.is_visible(unit.faction, unit.x, unit.y));
    }
}

#[test]
fn corrupt_snapshot_is_a_recoverable_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json at all").unwrap();

    match snapshot::load_world(&path) {
        Err(SnapshotError::Parse(_)) => {}
        Err(other) => panic!("expected a parse error, got {other}"),
        Ok(_) => panic!("corrupt snapshot must not load"),
    }
}

#[test]
fn missing_snapshot_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.json");
    assert!(matches!(
        snapshot::load_world(&path),
        Err(SnapshotError::Io(_))
    ));
}

#[test]
fn manager_writes_on_the_interval() {
    let dir = tempfile::tempdir().unwrap();
    let manager = SnapshotManager::new(dir.path(), 2);

    let mut world = Scenario::standard(1).build_world().unwrap();
    let mut engine = EngineBuilder::new(EngineSettings {
        scenario_name: "interval-test".into(),
        seed: 1,
        snapshot_interval_ticks: 0,
        snapshot_dir: std::path::PathBuf::from("unused"),
    })
    .build();

    engine.run(&mut world, 1).unwrap();
    assert!(manager.maybe_snapshot(&world, "interval-test").unwrap().is_none());

    engine.run(&mut world, 1).unwrap();
    let written = manager.maybe_snapshot(&world, "interval-test").unwrap();
    let path = written.expect("turn 2 hits the interval");
    assert!(path.exists());

    let restored = snapshot::load_world(&path).unwrap();
    assert_eq!(restored.turn(), 2);
}
