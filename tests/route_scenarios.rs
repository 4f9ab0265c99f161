use std::collections::HashSet;

use u_lastmile::distance::{tour_distance, DistanceMatrix};
use u_lastmile::error::SolveError;
use u_lastmile::ga::{GaConfig, GaRunner};
use u_lastmile::route::{Endpoints, OpenPath, PinnedPath, RouteSolver};

fn collinear(n: usize) -> DistanceMatrix {
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| i.abs_diff(j) as f64 * 100.0).collect())
        .collect();
    DistanceMatrix::from_rows(rows).expect("valid")
}

fn small_config(seed: u64) -> GaConfig {
    GaConfig::default()
        .with_pop_size(50)
        .with_generations(100)
        .with_seed(seed)
}

fn assert_permutation(route: &[usize], n: usize) {
    let seen: HashSet<usize> = route.iter().copied().collect();
    assert_eq!(route.len(), n, "route {route:?}");
    assert_eq!(seen.len(), n, "duplicate stop in {route:?}");
    assert!(route.iter().all(|&s| s < n), "out of range stop in {route:?}");
}

#[test]
fn collinear_open_route_is_optimal() {
    let solver = RouteSolver::new(collinear(5), small_config(1)).expect("valid");
    let solution = solver.solve(Endpoints::free()).expect("solved");
    assert_permutation(&solution.route, 5);
    assert!(solution.distance <= 400.0, "{}", solution.distance);
    assert_eq!(solution.distance, tour_distance(&solution.route, &collinear(5)));
}

#[test]
fn collinear_pinned_route_runs_in_order() {
    let solver = RouteSolver::new(collinear(5), small_config(3)).expect("valid");
    let solution = solver
        .solve(Endpoints::new(Some(0), Some(4)))
        .expect("solved");
    assert_eq!(solution.route, vec![0, 1, 2, 3, 4]);
    assert_eq!(solution.distance, 400.0);
}

#[test]
fn reversed_endpoints_walk_backwards() {
    let solver = RouteSolver::new(collinear(6), small_config(5)).expect("valid");
    let solution = solver
        .solve(Endpoints::new(Some(5), Some(0)))
        .expect("solved");
    assert_eq!(solution.route, vec![5, 4, 3, 2, 1, 0]);
}

#[test]
fn same_seed_same_route() {
    let dm = collinear(12);
    let a = RouteSolver::new(dm.clone(), small_config(99))
        .expect("valid")
        .solve(Endpoints::new(Some(2), None))
        .expect("solved");
    let b = RouteSolver::new(dm, small_config(99))
        .expect("valid")
        .solve(Endpoints::new(Some(2), None))
        .expect("solved");
    assert_eq!(a, b);
}

#[test]
fn single_stop_route() {
    let dm = DistanceMatrix::from_rows(vec![vec![0.0]]).expect("valid");
    let solution = RouteSolver::new(dm, small_config(1))
        .expect("valid")
        .solve(Endpoints::free())
        .expect("solved");
    assert_eq!(solution.route, vec![0]);
    assert_eq!(solution.distance, 0.0);
}

#[test]
fn three_stops_pinned_leaves_single_middle() {
    let dm = DistanceMatrix::from_rows(vec![
        vec![0.0, 3.0, 9.0],
        vec![3.0, 0.0, 4.0],
        vec![9.0, 4.0, 0.0],
    ])
    .expect("valid");
    let solution = RouteSolver::new(dm, small_config(1))
        .expect("valid")
        .solve(Endpoints::new(Some(0), Some(2)))
        .expect("solved");
    assert_eq!(solution.route, vec![0, 1, 2]);
    assert_eq!(solution.distance, 7.0);
    assert_eq!(solution.generations_run, 0);
}

#[test]
fn validation_failures() {
    let solver = RouteSolver::new(collinear(3), small_config(1)).expect("valid");

    let err = solver.solve(Endpoints::new(Some(3), None)).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "start_index must be between 0 and 2 (got 3)");

    let err = solver.solve(Endpoints::new(None, Some(10))).unwrap_err();
    assert_eq!(err.to_string(), "end_index must be between 0 and 2 (got 10)");

    let err = solver.solve(Endpoints::new(Some(1), Some(1))).unwrap_err();
    assert_eq!(err, SolveError::SameEndpoints(1));

    assert!(matches!(
        RouteSolver::new(collinear(3), small_config(1).with_elite_size(51)),
        Err(SolveError::InvalidConfig(_))
    ));
    assert!(DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).is_err());
}

#[test]
fn flat_landscape_stops_early() {
    let n = 8;
    let dm = DistanceMatrix::from_data(n, vec![0.0; n * n]).expect("valid");
    let config = GaConfig::default()
        .with_pop_size(30)
        .with_generations(500)
        .with_early_stop(Some(10))
        .with_seed(4);
    let solution = RouteSolver::new(dm, config)
        .expect("valid")
        .solve(Endpoints::free())
        .expect("solved");
    assert!(solution.stopped_early);
    assert_eq!(solution.generations_run, 11);
    assert_permutation(&solution.route, n);
}

#[test]
fn pinned_and_open_agree_on_scoring() {
    let dm = DistanceMatrix::from_rows(vec![
        vec![0.0, 2.0, 9.0, 10.0],
        vec![1.0, 0.0, 6.0, 4.0],
        vec![15.0, 7.0, 0.0, 8.0],
        vec![6.0, 3.0, 12.0, 0.0],
    ])
    .expect("valid");
    let config = small_config(8);

    let open = GaRunner::run(&OpenPath::new(&dm), &config).expect("ran");
    assert_eq!(open.best_distance, dm.path_length(open.best.stops()));

    let pinned = PinnedPath::new(&dm, Endpoints::new(Some(0), None));
    let run = GaRunner::run(&pinned, &config).expect("ran");
    let route = pinned.assemble(run.best.stops());
    assert_eq!(route[0], 0);
    assert_eq!(run.best_distance, dm.path_length(&route));
}

#[test]
fn history_never_increases() {
    let dm = collinear(15);
    let result = GaRunner::run(
        &OpenPath::new(&dm),
        &small_config(21).with_early_stop(None),
    )
    .expect("ran");
    assert_eq!(result.fitness_history.len(), result.generations);
    assert!(result.fitness_history.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(result.fitness_history.last(), Some(&result.best_distance));
}
