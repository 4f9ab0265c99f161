//! Pinned route endpoints.

use serde::{Deserialize, Serialize};

use crate::error::{SolveError, SolveResult};

/// Optional fixed first and last stops of a route.
///
/// # Examples
///
/// ```
/// use u_lastmile::route::Endpoints;
///
/// let ends = Endpoints::new(Some(0), Some(4));
/// assert!(ends.validate(5).is_ok());
/// assert_eq!(ends.middle(5), vec![1, 2, 3]);
/// assert_eq!(ends.assemble(&[2, 1, 3]), vec![0, 2, 1, 3, 4]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Stop the route must begin at.
    pub start: Option<usize>,
    /// Stop the route must end at.
    pub end: Option<usize>,
}

impl Endpoints {
    pub fn new(start: Option<usize>, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// No pinned stops.
    pub fn free() -> Self {
        Self::default()
    }

    /// Returns `true` if either endpoint is pinned.
    pub fn is_pinned(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Checks that pinned stops exist among `n` stops and differ.
    pub fn validate(&self, n: usize) -> SolveResult<()> {
        for (name, index) in [("start_index", self.start), ("end_index", self.end)] {
            if let Some(index) = index {
                if index >= n {
                    return Err(SolveError::IndexOutOfRange {
                        name,
                        index,
                        size: n,
                    });
                }
            }
        }
        match (self.start, self.end) {
            (Some(s), Some(e)) if s == e => Err(SolveError::SameEndpoints(s)),
            _ => Ok(()),
        }
    }

    /// Stops in `0..n` that are not pinned, in ascending order.
    pub fn middle(&self, n: usize) -> Vec<usize> {
        (0..n)
            .filter(|&i| Some(i) != self.start && Some(i) != self.end)
            .collect()
    }

    /// Builds the full route `[start?] + middle + [end?]`.
    pub fn assemble(&self, middle: &[usize]) -> Vec<usize> {
        let mut route = Vec::with_capacity(middle.len() + 2);
        route.extend(self.start);
        route.extend_from_slice(middle);
        route.extend(self.end);
        route
    }
}
