//! Address geocoding contract.
//!
//! The crate ships no network gazetteer client. Callers plug one in by
//! implementing [`Geocoder`]; [`CachedGeocoder`] adds memoization to any
//! implementation, and [`resolve_locations`] turns mixed address/coordinate
//! input into labeled stops.

use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};

use super::cache::Cache;
use super::location::{Coordinate, InputLocation, Location};

/// Longest address fragment used in a cache key.
const MAX_KEY_ADDRESS_LEN: usize = 200;

/// Geocoding failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodeError {
    /// The gazetteer returned no match.
    #[error("geocoding failed for address: {0}")]
    NotFound(String),

    /// The gazetteer could not be reached or answered with an error.
    #[error("geocoder backend error for '{address}': {reason}")]
    Backend { address: String, reason: String },
}

/// Maps a free-text address to a coordinate.
///
/// Implementations own their retry and rate-limit policy.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError>;
}

/// Memoizes another geocoder's successful lookups in a [`Cache`].
pub struct CachedGeocoder<G, C> {
    inner: G,
    cache: C,
}

impl<G: Geocoder, C: Cache> CachedGeocoder<G, C> {
    pub fn new(inner: G, cache: C) -> Self {
        Self { inner, cache }
    }

    /// Cache key for an address: `geocode_` plus the address with `/` and
    /// spaces replaced by `_`, truncated to 200 characters.
    pub fn cache_key(address: &str) -> String {
        let sanitized: String = address
            .chars()
            .map(|c| if c == '/' || c == ' ' { '_' } else { c })
            .take(MAX_KEY_ADDRESS_LEN)
            .collect();
        format!("geocode_{sanitized}")
    }
}

impl<G: Geocoder, C: Cache> Geocoder for CachedGeocoder<G, C> {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let key = Self::cache_key(address);
        if let Some(coord) = self
            .cache
            .get(&key)
            .and_then(|v| serde_json::from_value::<Coordinate>(v).ok())
        {
            debug!(address, "geocode cache hit");
            return Ok(coord);
        }

        let coord = self.inner.geocode(address)?;
        if let Err(e) = self.cache.set(&key, &json!(coord)) {
            debug!(address, error = %e, "failed to cache geocode result");
        }
        Ok(coord)
    }
}

/// Resolves caller input into labeled stops.
///
/// Addresses are geocoded and default to the address as their label;
/// coordinates pass through and default to `pt_<index>`.
pub fn resolve_locations<G: Geocoder + ?Sized>(
    items: &[InputLocation],
    geocoder: &G,
) -> Result<Vec<Location>, GeocodeError> {
    let locations = items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            InputLocation::Address { address, label } => {
                let coord = geocoder.geocode(address)?;
                Ok(Location {
                    label: label.clone().unwrap_or_else(|| address.clone()),
                    lat: coord.lat,
                    lon: coord.lon,
                })
            }
            InputLocation::Point { lat, lon, label } => Ok(Location {
                label: label.clone().unwrap_or_else(|| format!("pt_{i}")),
                lat: *lat,
                lon: *lon,
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    info!(count = locations.len(), "resolved locations");
    Ok(locations)
}
