//! [`TourProblem`] implementations over a distance matrix.
//!
//! - [`OpenPath`]: every stop is free; the GA permutes `0..n`
//! - [`PinnedPath`]: one or both endpoints are fixed; the GA permutes only
//!   the middle stops and each candidate is scored as the assembled route

use crate::distance::DistanceMatrix;
use crate::ga::TourProblem;

use super::endpoints::Endpoints;

/// Unconstrained open-path route over all stops.
pub struct OpenPath<'a> {
    distances: &'a DistanceMatrix,
    genes: Vec<usize>,
}

impl<'a> OpenPath<'a> {
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self {
            distances,
            genes: (0..distances.size()).collect(),
        }
    }
}

impl TourProblem for OpenPath<'_> {
    fn genes(&self) -> &[usize] {
        &self.genes
    }

    fn evaluate(&self, perm: &[usize]) -> f64 {
        self.distances.path_length(perm)
    }
}

/// Route with pinned endpoints, evolving the middle stops only.
///
/// Scoring a middle permutation is equivalent to
/// `distances.path_length(&endpoints.assemble(perm))` without building the
/// assembled route.
///
/// # Examples
///
/// ```
/// use u_lastmile::distance::DistanceMatrix;
/// use u_lastmile::ga::TourProblem;
/// use u_lastmile::route::{Endpoints, PinnedPath};
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.0],
///     vec![2.0, 1.0, 0.0],
/// ]).unwrap();
/// let problem = PinnedPath::new(&dm, Endpoints::new(Some(0), Some(2)));
/// assert_eq!(problem.genes(), &[1]);
/// assert_eq!(problem.evaluate(&[1]), 2.0);
/// ```
pub struct PinnedPath<'a> {
    distances: &'a DistanceMatrix,
    endpoints: Endpoints,
    middle: Vec<usize>,
}

impl<'a> PinnedPath<'a> {
    /// Creates the problem. `endpoints` must already be validated against
    /// the matrix size.
    pub fn new(distances: &'a DistanceMatrix, endpoints: Endpoints) -> Self {
        Self {
            distances,
            endpoints,
            middle: endpoints.middle(distances.size()),
        }
    }

    /// The pinned endpoints.
    pub fn endpoints(&self) -> Endpoints {
        self.endpoints
    }

    /// Builds the full route for a middle permutation.
    pub fn assemble(&self, perm: &[usize]) -> Vec<usize> {
        self.endpoints.assemble(perm)
    }
}

impl TourProblem for PinnedPath<'_> {
    fn genes(&self) -> &[usize] {
        &self.middle
    }

    fn evaluate(&self, perm: &[usize]) -> f64 {
        let dm = self.distances;
        let (start, end) = (self.endpoints.start, self.endpoints.end);
        match (perm.first(), perm.last()) {
            (Some(&first), Some(&last)) => {
                let head = start.map_or(0.0, |s| dm.get(s, first));
                let tail = end.map_or(0.0, |e| dm.get(last, e));
                head + dm.path_length(perm) + tail
            }
            _ => match (start, end) {
                (Some(s), Some(e)) => dm.get(s, e),
                _ => 0.0,
            },
        }
    }
}
