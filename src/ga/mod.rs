//! Genetic Algorithm for open-path routing.
//!
//! The engine evolves permutations of the stops exposed by a
//! [`TourProblem`]: the whole stop set for unconstrained routes, or only
//! the middle stops when endpoints are pinned (see [`crate::route`]).
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population, rates, elitism, early stop)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best tour found plus run statistics
//! - [`Tour`]: A candidate permutation with its cached distance
//!
//! # Submodules
//!
//! - [`operators`]: Initialization, ordered crossover, swap and inversion mutation
//! - [`selection`]: Tournament selection
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman Problem"

mod config;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use types::{Tour, TourProblem};
