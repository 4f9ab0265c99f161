//! Travel matrix construction.
//!
//! A [`MatrixBuilder`] turns resolved coordinates into a distance matrix
//! (meters) and optionally a duration matrix (seconds). Road-network
//! backends are supplied by callers; [`HaversineMatrixBuilder`] is the
//! built-in great-circle estimate used on its own or as a fallback.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::cache::Cache;
use super::location::Coordinate;
use crate::distance::DistanceMatrix;
use crate::error::SolveError;

/// Matrix backend failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// The backend could not be reached or returned an unusable payload.
    #[error("matrix backend error: {0}")]
    Backend(String),

    /// The backend produced weights that fail validation.
    #[error(transparent)]
    Invalid(#[from] SolveError),
}

/// Distance and optional duration matrices over the same stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelMatrices {
    pub distances: DistanceMatrix,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durations: Option<DistanceMatrix>,
}

/// Builds travel matrices for a list of coordinates.
pub trait MatrixBuilder {
    fn build(&self, coords: &[Coordinate]) -> Result<TravelMatrices, MatrixError>;
}

/// Great-circle distances with durations at a constant average speed.
#[derive(Debug, Clone, Copy)]
pub struct HaversineMatrixBuilder {
    avg_speed_kmh: f64,
}

impl HaversineMatrixBuilder {
    /// Urban delivery average speed in km/h.
    pub const DEFAULT_SPEED_KMH: f64 = 40.0;

    pub fn new() -> Self {
        Self {
            avg_speed_kmh: Self::DEFAULT_SPEED_KMH,
        }
    }

    /// Sets the average speed used to derive durations.
    /// Non-positive or non-finite values fall back to the default.
    pub fn with_speed_kmh(mut self, kmh: f64) -> Self {
        self.avg_speed_kmh = if kmh.is_finite() && kmh > 0.0 {
            kmh
        } else {
            Self::DEFAULT_SPEED_KMH
        };
        self
    }

    pub fn speed_kmh(&self) -> f64 {
        self.avg_speed_kmh
    }
}

impl Default for HaversineMatrixBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixBuilder for HaversineMatrixBuilder {
    fn build(&self, coords: &[Coordinate]) -> Result<TravelMatrices, MatrixError> {
        let n = coords.len();
        if n == 0 {
            return Err(MatrixError::Backend("no coordinates supplied".into()));
        }
        let mps = self.avg_speed_kmh * 1000.0 / 3600.0;
        let mut dist = vec![0.0; n * n];
        let mut dur = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let d = coords[i].haversine_m(&coords[j]);
                    dist[i * n + j] = d;
                    dur[i * n + j] = d / mps;
                }
            }
        }
        Ok(TravelMatrices {
            distances: DistanceMatrix::from_data(n, dist)?,
            durations: Some(DistanceMatrix::from_data(n, dur)?),
        })
    }
}

/// Consults a cache, then a primary backend, then the great-circle
/// estimate. Whatever is produced is written back to the cache.
pub struct FallbackMatrixBuilder<P, C> {
    primary: P,
    fallback: HaversineMatrixBuilder,
    cache: C,
}

impl<P: MatrixBuilder, C: Cache> FallbackMatrixBuilder<P, C> {
    pub fn new(primary: P, cache: C) -> Self {
        Self {
            primary,
            fallback: HaversineMatrixBuilder::new(),
            cache,
        }
    }

    pub fn with_fallback(mut self, fallback: HaversineMatrixBuilder) -> Self {
        self.fallback = fallback;
        self
    }

    /// Cache key: `distmat_` plus the first 16 hex digits of the SHA-256 of
    /// the coordinate list serialized as JSON.
    pub fn cache_key(coords: &[Coordinate]) -> Result<String, MatrixError> {
        let payload = serde_json::to_vec(coords)
            .map_err(|e| MatrixError::Backend(format!("cannot encode coordinates: {e}")))?;
        let digest = hex::encode(Sha256::digest(&payload));
        Ok(format!("distmat_{}", &digest[..16]))
    }
}

impl<P: MatrixBuilder, C: Cache> MatrixBuilder for FallbackMatrixBuilder<P, C> {
    fn build(&self, coords: &[Coordinate]) -> Result<TravelMatrices, MatrixError> {
        if coords.is_empty() {
            return Err(MatrixError::Backend("no coordinates supplied".into()));
        }
        if coords.len() == 1 {
            return Ok(TravelMatrices {
                distances: DistanceMatrix::from_data(1, vec![0.0])?,
                durations: None,
            });
        }

        let key = Self::cache_key(coords)?;
        if let Some(cached) = self
            .cache
            .get(&key)
            .and_then(|v| serde_json::from_value::<TravelMatrices>(v).ok())
            .filter(|m| m.distances.size() == coords.len())
        {
            debug!(%key, "matrix cache hit");
            return Ok(cached);
        }

        let matrices = match self.primary.build(coords) {
            Ok(m) if m.distances.size() == coords.len() => m,
            Ok(m) => {
                warn!(
                    expected = coords.len(),
                    got = m.distances.size(),
                    "primary matrix has wrong size, using great-circle estimate"
                );
                self.fallback.build(coords)?
            }
            Err(e) => {
                warn!(error = %e, "primary matrix backend failed, using great-circle estimate");
                self.fallback.build(coords)?
            }
        };
        info!(stops = coords.len(), "built travel matrices");

        match serde_json::to_value(&matrices) {
            Ok(value) => {
                if let Err(e) = self.cache.set(&key, &value) {
                    debug!(%key, error = %e, "failed to cache matrices");
                }
            }
            Err(e) => debug!(%key, error = %e, "failed to encode matrices"),
        }
        Ok(matrices)
    }
}
