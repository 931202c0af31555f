//! Engine integration tests
//!
//! Sequence editing, playback reports, config loading and threading.

use crate::helpers::*;
use choreo::prelude::*;
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn test_engine_from_config_file() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("choreo.toml");
    std::fs::write(
        &path,
        "[grid]\nbpm = 90.0\nmax_bars = 4\n\n[dynamics]\nmomentum_scale = 10.0\n",
    )
    .unwrap();

    let engine = ChoreoEngine::builder()
        .config(ChoreoConfig::from_file(&path).unwrap())
        .bars(2)
        .build()
        .unwrap();
    assert_eq!(engine.grid().bpm(), 90.0);
    assert_eq!(engine.analyzer().config().momentum_scale, 10.0);

    engine.add_bar().unwrap();
    engine.add_bar().unwrap();
    assert!(matches!(
        engine.add_bar(),
        Err(choreo::Error::Core(choreo::core::Error::SequenceFull { max_bars: 4 }))
    ));
}

#[test]
fn test_removing_bars_keeps_playhead_valid() {
    let engine = test_engine(3);
    engine.transport().seek(GridPosition::new(3, 8)).unwrap();
    engine.remove_bar(3).unwrap();

    engine.transport().start();
    let report = engine.tick().unwrap();
    assert_eq!(report.tick.position, GridPosition::new(1, 0));
}

#[test]
fn test_sequence_edits_show_up_in_playback() {
    let engine = test_engine(1);
    engine.transport().start();

    let before = engine.tick().unwrap();
    assert_eq!(before.dynamics.driver, None);

    put(&engine, 1, 1, reaching_beat(0.8));
    let after = engine.tick().unwrap();
    assert_eq!(after.tick.position, GridPosition::new(1, 1));
    assert_eq!(after.dynamics.driver, Some(Joint::RightWrist));
}

#[test]
fn test_subscribers_receive_ticks() {
    let engine = test_engine(1);
    let rx = engine.transport().subscribe();
    engine.transport().start();
    for _ in 0..4 {
        engine.tick();
    }

    let steps: Vec<u32> = rx.try_iter().map(|tick| tick.position.step).collect();
    assert_eq!(steps, vec![0, 1, 2, 3]);
}

#[test]
fn test_playback_thread_with_concurrent_edits() {
    let engine = Arc::new(test_engine(1));
    engine.transport().start();

    let player = {
        let engine = Arc::clone(&engine);
        std::thread::spawn(move || {
            (0..64)
                .filter_map(|_| engine.tick())
                .map(|report| report.tick.position)
                .collect::<Vec<_>>()
        })
    };

    for step in 0..16 {
        put(&engine, 1, step, reaching_beat(0.5));
    }

    let positions = player.join().unwrap();
    assert_eq!(positions.len(), 64);
    assert!(positions.iter().all(|p| p.bar == 1 && p.step < 16));
    assert_eq!(engine.sequence(|seq| seq.iter_beats().filter(|(_, b)| !b.is_empty()).count()), 16);
}

#[test]
fn test_report_serializes() {
    let engine = test_engine(1);
    put(&engine, 1, 0, reaching_beat(0.9));
    engine.transport().start();
    let report = engine.tick().unwrap();

    let toml = toml::to_string(&report.notation).unwrap();
    assert!(toml.contains("plainEnglish"));
}

proptest! {
    #[test]
    fn prop_bar_edits_stay_within_cap(
        max_bars in 1u32..6,
        edits in proptest::collection::vec(0u8..3, 0..24),
    ) {
        let engine = ChoreoEngine::builder().bars(1).max_bars(max_bars).build().unwrap();
        engine.transport().start();
        for edit in edits {
            match edit {
                0 => { let _ = engine.add_bar(); }
                1 => { let _ = engine.sequence_mut(|seq| seq.insert_bar(1)); }
                _ => { let _ = engine.remove_bar(1); }
            }
            let bars = engine.sequence(|seq| seq.bar_count());
            prop_assert!(bars <= max_bars);
            prop_assert_eq!(engine.transport().bar_lengths().len() as u32, bars);
            if let Some(report) = engine.tick() {
                prop_assert!(report.tick.position.bar >= 1 && report.tick.position.bar <= bars);
                prop_assert!(report.tick.position.step < 16);
                prop_assert!(report.dynamics.stability <= 100);
            }
        }
    }
}
