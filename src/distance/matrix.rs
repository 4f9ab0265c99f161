//! Dense distance matrix.

use serde::{Deserialize, Serialize};

use crate::error::{SolveError, SolveResult};

/// A dense, validated n×n matrix of edge weights stored in row-major order.
///
/// Entries are finite and non-negative. The matrix may be asymmetric
/// (directed road networks). The diagonal is never read when scoring a
/// permutation and is therefore not checked.
///
/// # Examples
///
/// ```
/// use u_lastmile::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 100.0, 200.0],
///     vec![100.0, 0.0, 100.0],
///     vec![200.0, 100.0, 0.0],
/// ]).unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.path_length(&[0, 1, 2]), 200.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Builds a matrix from nested rows.
    ///
    /// Fails if there are no rows, a row has the wrong length, or an entry
    /// is negative or not finite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> SolveResult<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(SolveError::InvalidMatrix(
                "matrix must contain at least one row".into(),
            ));
        }
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(SolveError::InvalidMatrix(format!(
                    "matrix is not square: row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Self::from_data(size, data)
    }

    /// Builds a matrix from a flat row-major buffer of `size * size` entries.
    pub fn from_data(size: usize, data: Vec<f64>) -> SolveResult<Self> {
        if size == 0 {
            return Err(SolveError::InvalidMatrix(
                "matrix must have at least one stop".into(),
            ));
        }
        if data.len() != size * size {
            return Err(SolveError::InvalidMatrix(format!(
                "expected {} entries for a {size}x{size} matrix, got {}",
                size * size,
                data.len()
            )));
        }
        if let Some(pos) = data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            return Err(SolveError::InvalidMatrix(format!(
                "entry [{}][{}] = {} is not a finite non-negative weight",
                pos / size,
                pos % size,
                data[pos]
            )));
        }
        Ok(Self { data, size })
    }

    /// Returns the weight of the edge `from → to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of stops in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Total weight of the open path visiting `tour` in order.
    ///
    /// There is no closing edge back to the first stop: delivery routes end
    /// at their last stop. Tours shorter than two stops have length zero.
    pub fn path_length(&self, tour: &[usize]) -> f64 {
        tour.windows(2)
            .fold(0.0, |acc, w| acc + self.get(w[0], w[1]))
    }

    /// Returns the rows as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size).map(<[f64]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = SolveError;

    fn try_from(rows: Vec<Vec<f64>>) -> SolveResult<Self> {
        Self::from_rows(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<f64>> {
    fn from(dm: DistanceMatrix) -> Self {
        dm.to_rows()
    }
}

/// Total weight of the open path `tour` over `matrix`.
///
/// Free-function form of [`DistanceMatrix::path_length`].
pub fn tour_distance(tour: &[usize], matrix: &DistanceMatrix) -> f64 {
    matrix.path_length(tour)
}
