//! End-to-end checks for the hour-sequence driver

use fire_spread_core::grid::{FnWindSource, Grid, HourlyWind, Shape, WindField};
use fire_spread_core::{SpreadConfig, SpreadError, SpreadSimulation};
use std::cell::RefCell;

/// Route engine logs through the test harness; set `RUST_LOG=debug` to see them
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn centre_ignition(shape: Shape) -> Grid<bool> {
    let mut mask = Grid::filled(shape, false);
    mask.set(shape.rows / 2, shape.cols / 2, true);
    mask
}

#[test]
fn test_three_by_three_fully_ignites_in_one_step() {
    init_tracing();
    let shape = Shape::new(3, 3);
    let winds = HourlyWind::new().with_hour(1, WindField::calm(shape));
    let config = SpreadConfig::default()
        .with_ignition_prob_base(1.0)
        .with_hours(vec![1])
        .with_seed(17);

    let history = SpreadSimulation::new(config)
        .unwrap()
        .run(
            &centre_ignition(shape),
            &winds,
            &Grid::filled(shape, 0.0),
            &Grid::filled(shape, true),
        )
        .unwrap();

    let snapshot = history.get(1).unwrap();
    assert_eq!(snapshot.new_ignitions, 8);
    assert_eq!(snapshot.ignited_cells(), 9);
    assert!(snapshot.mask.as_slice().iter().all(|&cell| cell));
}

#[test]
fn test_sparse_sequence_only_queries_requested_hours() {
    init_tracing();
    let shape = Shape::new(15, 15);
    let queried = RefCell::new(Vec::new());
    let winds = FnWindSource(|hour: u32| {
        queried.borrow_mut().push(hour);
        Some(WindField::uniform(shape, hour as f32, 45.0))
    });
    let config = SpreadConfig::default()
        .with_hours(vec![1, 2, 3, 6, 12])
        .with_seed(3);

    let history = SpreadSimulation::new(config)
        .unwrap()
        .run(
            &centre_ignition(shape),
            &winds,
            &Grid::filled(shape, 0.2),
            &Grid::filled(shape, true),
        )
        .unwrap();

    assert_eq!(*queried.borrow(), vec![1, 2, 3, 6, 12]);
    assert_eq!(history.len(), 5);
    assert_eq!(history.hours(), vec![1, 2, 3, 6, 12]);
    for hour in [4, 5, 7, 8, 9, 10, 11] {
        assert!(history.get(hour).is_none());
    }
}

#[test]
fn test_cumulative_mask_never_shrinks() {
    init_tracing();
    let shape = Shape::new(25, 25);
    let hours: Vec<u32> = (1..=20).collect();
    let winds: HourlyWind = hours
        .iter()
        .map(|&h| (h, WindField::uniform(shape, 3.0, h as f32 * 18.0)))
        .collect();
    let slope = Grid::from_fn(shape, |row, col| ((row + col) % 10) as f32 / 10.0);
    let fuel = Grid::from_fn(shape, |row, col| (row * col) % 7 != 3);

    for parallel in [false, true] {
        let config = SpreadConfig::default()
            .with_hours(hours.clone())
            .with_seed(8)
            .with_parallel(parallel);
        let initial = centre_ignition(shape);
        let history = SpreadSimulation::new(config)
            .unwrap()
            .run(&initial, &winds, &slope, &fuel)
            .unwrap();

        let mut previous = initial;
        for snapshot in &history {
            assert!(
                snapshot.mask.is_superset_of(&previous),
                "hour {} lost cells (parallel={parallel})",
                snapshot.hour
            );
            assert_eq!(
                snapshot.ignited_cells(),
                previous.count_ignited() + snapshot.new_ignitions
            );
            previous = snapshot.mask.clone();
        }
    }
}

#[test]
fn test_same_seed_same_history() {
    init_tracing();
    let shape = Shape::new(18, 18);
    let hours = vec![1, 2, 4, 8];
    let winds: HourlyWind = hours
        .iter()
        .map(|&h| (h, WindField::uniform(shape, 5.0, 120.0)))
        .collect();
    let slope = Grid::from_fn(shape, |row, _| row as f32 / 17.0);
    let fuel = Grid::filled(shape, true);

    for parallel in [false, true] {
        let config = SpreadConfig::default()
            .with_hours(hours.clone())
            .with_seed(1234)
            .with_parallel(parallel);
        let sim = SpreadSimulation::new(config).unwrap();
        let a = sim.run(&centre_ignition(shape), &winds, &slope, &fuel).unwrap();
        let b = sim.run(&centre_ignition(shape), &winds, &slope, &fuel).unwrap();
        assert_eq!(a, b, "parallel={parallel}");
    }
}

#[test]
fn test_missing_hour_aborts_with_partial_history() {
    init_tracing();
    let shape = Shape::new(6, 6);
    let winds = HourlyWind::new()
        .with_hour(1, WindField::calm(shape))
        .with_hour(2, WindField::calm(shape))
        .with_hour(6, WindField::calm(shape));
    let config = SpreadConfig::default()
        .with_hours(vec![1, 2, 3, 6])
        .with_seed(0);

    let err = SpreadSimulation::new(config)
        .unwrap()
        .run(
            &centre_ignition(shape),
            &winds,
            &Grid::filled(shape, 0.0),
            &Grid::filled(shape, true),
        )
        .unwrap_err();

    assert_eq!(err.hour, Some(3));
    assert_eq!(err.cause, SpreadError::MissingHourData { hour: 3 });
    assert_eq!(err.partial.completed().hours(), vec![1, 2]);
    assert!(err.to_string().contains("hour offset 3"));
}

#[test]
fn test_unburnable_landscape_keeps_initial_mask() {
    init_tracing();
    let shape = Shape::new(8, 8);
    let winds: HourlyWind = [1, 2, 3]
        .into_iter()
        .map(|h| (h, WindField::uniform(shape, 20.0, 0.0)))
        .collect();
    let initial = centre_ignition(shape);
    let config = SpreadConfig::default()
        .with_ignition_prob_base(1.0)
        .with_hours(vec![1, 2, 3])
        .with_seed(99);

    let history = SpreadSimulation::new(config)
        .unwrap()
        .run(
            &initial,
            &winds,
            &Grid::filled(shape, 1.0),
            &Grid::filled(shape, false),
        )
        .unwrap();

    for snapshot in &history {
        assert_eq!(snapshot.mask, initial);
        assert_eq!(snapshot.new_ignitions, 0);
    }
}
