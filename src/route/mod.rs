//! Route formulations and the validated solver entry point.
//!
//! - [`Endpoints`]: optional pinned first/last stop
//! - [`OpenPath`] / [`PinnedPath`]: [`TourProblem`](crate::ga::TourProblem)
//!   implementations over a [`DistanceMatrix`](crate::distance::DistanceMatrix)
//! - [`RouteSolver`]: input validation, dispatch, worker-thread execution

mod endpoints;
mod problem;
mod solver;

pub use endpoints::Endpoints;
pub use problem::{OpenPath, PinnedPath};
pub use solver::{RouteSolution, RouteSolver, SolveHandle};
