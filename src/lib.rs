//! Last-mile delivery route optimization.
//!
//! Finds a short visiting order over a set of stops given a distance
//! matrix. The route is an open path: it ends at its last stop with no
//! return leg. The first and/or last stop can be pinned.
//!
//! - **Distance**: validated dense matrix and open-path scoring.
//! - **Genetic Algorithm (GA)**: permutation GA with ordered crossover,
//!   swap and inversion mutation, tournament selection, elitism, early
//!   stopping, cancellation and a wall-clock limit.
//! - **Route**: free and pinned-endpoint formulations, input validation,
//!   and an optional worker thread for long runs.
//! - **Geo**: geocoding and matrix-building contracts with caching and a
//!   great-circle fallback.
//!
//! # Example
//!
//! ```
//! use u_lastmile::distance::DistanceMatrix;
//! use u_lastmile::ga::GaConfig;
//! use u_lastmile::route::{Endpoints, RouteSolver};
//!
//! let rows: Vec<Vec<f64>> = (0..4)
//!     .map(|i: usize| (0..4).map(|j: usize| i.abs_diff(j) as f64).collect())
//!     .collect();
//! let matrix = DistanceMatrix::from_rows(rows).unwrap();
//! let solver = RouteSolver::new(matrix, GaConfig::default().with_seed(1)).unwrap();
//! let solution = solver.solve(Endpoints::new(Some(0), None)).unwrap();
//! assert_eq!(solution.route[0], 0);
//! assert_eq!(solution.route.len(), 4);
//! ```

pub mod distance;
pub mod error;
pub mod ga;
pub mod geo;
pub mod random;
pub mod route;
