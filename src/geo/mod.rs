//! Collaborators that turn caller locations into a distance matrix.
//!
//! - [`Geocoder`] / [`CachedGeocoder`] / [`resolve_locations`]: address lookup
//! - [`MatrixBuilder`] / [`HaversineMatrixBuilder`] / [`FallbackMatrixBuilder`]
//! - [`Cache`] / [`MemoryCache`] / [`FileCache`]: memoization
//!
//! None of these are used by the GA itself.

mod cache;
mod geocode;
mod location;
mod matrix_builder;

pub use cache::{Cache, CacheError, FileCache, MemoryCache};
pub use geocode::{resolve_locations, CachedGeocoder, GeocodeError, Geocoder};
pub use location::{haversine_m, Coordinate, InputLocation, Location, EARTH_RADIUS_M};
pub use matrix_builder::{
    FallbackMatrixBuilder, HaversineMatrixBuilder, MatrixBuilder, MatrixError, TravelMatrices,
};
