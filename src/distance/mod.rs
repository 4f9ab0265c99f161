//! Distance and travel time matrices.
//!
//! Provides the validated dense matrix the GA reads, and the open-path
//! length used as the optimization objective.

mod matrix;

pub use matrix::{tour_distance, DistanceMatrix};
