//! Validated entry point for route optimization.
//!
//! [`RouteSolver`] checks every input up front, dispatches to the full or
//! fixed-endpoint formulation, and reassembles the result. Long runs can be
//! moved onto a dedicated worker thread with [`RouteSolver::spawn`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::distance::DistanceMatrix;
use crate::error::{SolveError, SolveResult};
use crate::ga::{GaConfig, GaResult, GaRunner, TourProblem};

use super::endpoints::Endpoints;
use super::problem::{OpenPath, PinnedPath};

/// Outcome of a route optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSolution {
    /// Visiting order: every stop exactly once, honoring pinned endpoints.
    pub route: Vec<usize>,

    /// Total open-path weight of `route` over the distance matrix.
    pub distance: f64,

    /// Total travel time along `route`, when a duration matrix was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Generations actually executed.
    pub generations_run: usize,

    /// Whether the run ended through early stopping.
    #[serde(default)]
    pub stopped_early: bool,

    /// Whether the run was cancelled before finishing.
    #[serde(default)]
    pub cancelled: bool,

    /// Whether the run hit its time limit.
    #[serde(default)]
    pub timed_out: bool,
}

/// Solves open-path routes over a fixed distance matrix.
///
/// # Examples
///
/// ```
/// use u_lastmile::distance::DistanceMatrix;
/// use u_lastmile::ga::GaConfig;
/// use u_lastmile::route::{Endpoints, RouteSolver};
///
/// let rows: Vec<Vec<f64>> = (0..5)
///     .map(|i: usize| (0..5).map(|j: usize| i.abs_diff(j) as f64 * 100.0).collect())
///     .collect();
/// let dm = DistanceMatrix::from_rows(rows).unwrap();
/// let config = GaConfig::default().with_pop_size(50).with_generations(100).with_seed(7);
///
/// let solver = RouteSolver::new(dm, config).unwrap();
/// let solution = solver.solve(Endpoints::new(Some(0), Some(4))).unwrap();
/// assert_eq!(solution.route, vec![0, 1, 2, 3, 4]);
/// assert_eq!(solution.distance, 400.0);
/// ```
#[derive(Debug, Clone)]
pub struct RouteSolver {
    distances: DistanceMatrix,
    durations: Option<DistanceMatrix>,
    config: GaConfig,
}

impl RouteSolver {
    /// Creates a solver, rejecting an invalid configuration.
    pub fn new(distances: DistanceMatrix, config: GaConfig) -> SolveResult<Self> {
        config.validate()?;
        Ok(Self {
            distances,
            durations: None,
            config,
        })
    }

    /// Attaches a duration matrix used to report total travel time.
    pub fn with_durations(mut self, durations: DistanceMatrix) -> SolveResult<Self> {
        if durations.size() != self.distances.size() {
            return Err(SolveError::InvalidMatrix(format!(
                "duration matrix is {0}x{0} but distance matrix is {1}x{1}",
                durations.size(),
                self.distances.size()
            )));
        }
        self.durations = Some(durations);
        Ok(self)
    }

    /// Number of stops.
    pub fn size(&self) -> usize {
        self.distances.size()
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Solves synchronously on the calling thread.
    pub fn solve(&self, endpoints: Endpoints) -> SolveResult<RouteSolution> {
        self.solve_with_cancel(endpoints, None)
    }

    /// Solves synchronously, stopping early once `cancel` is set.
    pub fn solve_with_cancel(
        &self,
        endpoints: Endpoints,
        cancel: Option<Arc<AtomicBool>>,
    ) -> SolveResult<RouteSolution> {
        let n = self.size();
        endpoints.validate(n)?;

        let (route, run) = if endpoints.is_pinned() {
            let problem = PinnedPath::new(&self.distances, endpoints);
            if problem.genes().is_empty() {
                (problem.assemble(&[]), None)
            } else {
                let run = GaRunner::run_with_cancel(&problem, &self.config, cancel)?;
                (problem.assemble(run.best.stops()), Some(run))
            }
        } else {
            let problem = OpenPath::new(&self.distances);
            let run = GaRunner::run_with_cancel(&problem, &self.config, cancel)?;
            (run.best.stops().to_vec(), Some(run))
        };

        let solution = self.finish(route, run.as_ref());
        info!(
            stops = n,
            distance = solution.distance,
            generations = solution.generations_run,
            "route solved"
        );
        Ok(solution)
    }

    /// Moves the solve onto a dedicated worker thread.
    ///
    /// Endpoints are validated before the thread starts. The returned
    /// handle can cancel the run; the best route found so far is still
    /// returned.
    pub fn spawn(self, endpoints: Endpoints) -> SolveResult<SolveHandle> {
        endpoints.validate(self.size())?;
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let worker = std::thread::Builder::new()
            .name("u-lastmile-solver".into())
            .spawn(move || self.solve_with_cancel(endpoints, Some(flag)))
            .map_err(|e| SolveError::ResourceExhausted(format!("solver thread: {e}")))?;
        Ok(SolveHandle { cancel, worker })
    }

    fn finish(&self, route: Vec<usize>, run: Option<&GaResult>) -> RouteSolution {
        let distance = self.distances.path_length(&route);
        let duration = self.durations.as_ref().map(|d| d.path_length(&route));
        RouteSolution {
            distance,
            duration,
            generations_run: run.map_or(0, |r| r.generations),
            stopped_early: run.is_some_and(|r| r.stagnated),
            cancelled: run.is_some_and(|r| r.cancelled),
            timed_out: run.is_some_and(|r| r.timed_out),
            route,
        }
    }
}

/// A route optimization running on a worker thread.
pub struct SolveHandle {
    cancel: Arc<AtomicBool>,
    worker: JoinHandle<SolveResult<RouteSolution>>,
}

impl SolveHandle {
    /// Asks the worker to stop after its current generation.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once the worker has produced its result.
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Waits for the worker and returns its result.
    pub fn join(self) -> SolveResult<RouteSolution> {
        self.worker.join().map_err(|panic| {
            let msg = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "worker panicked".into());
            SolveError::Worker(msg)
        })?
    }
}
