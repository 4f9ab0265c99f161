//! Core types for the route GA.
//!
//! [`TourProblem`] is the contract between the generic evolution engine and
//! a concrete route formulation (full open path, or pinned endpoints).
//! [`Tour`] is the candidate solution it evolves.

/// A route formulation the GA can optimize.
///
/// The engine evolves permutations of [`genes`](TourProblem::genes) and
/// scores them with [`evaluate`](TourProblem::evaluate). Lower is better.
pub trait TourProblem {
    /// The stop indices to be permuted.
    ///
    /// Every individual the engine produces is a permutation of exactly
    /// this set.
    fn genes(&self) -> &[usize];

    /// Returns the total weight of the route encoded by `perm`.
    fn evaluate(&self, perm: &[usize]) -> f64;

    /// Called at the end of each generation with the best distance so far.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _best_distance: f64) {}
}

/// A candidate route: a permutation of stop indices with its cached
/// distance.
///
/// # Examples
///
/// ```
/// use u_lastmile::ga::Tour;
///
/// let tour = Tour::new(vec![2, 0, 1]);
/// assert_eq!(tour.stops(), &[2, 0, 1]);
/// assert_eq!(tour.distance(), f64::INFINITY);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    stops: Vec<usize>,
    distance: f64,
}

impl Tour {
    /// Creates an unevaluated tour.
    pub fn new(stops: Vec<usize>) -> Self {
        Self {
            stops,
            distance: f64::INFINITY,
        }
    }

    /// Creates a tour and scores it against `problem`.
    pub fn evaluated<P: TourProblem + ?Sized>(stops: Vec<usize>, problem: &P) -> Self {
        let distance = problem.evaluate(&stops);
        Self { stops, distance }
    }

    /// Returns the visiting order.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Consumes the tour, returning the visiting order.
    pub fn into_stops(self) -> Vec<usize> {
        self.stops
    }

    /// Returns the cached distance (`INFINITY` if never evaluated).
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of stops in this tour.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if the tour has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
