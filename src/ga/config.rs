//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use serde::{Deserialize, Serialize};

use crate::error::{SolveError, SolveResult};

/// Configuration for the route Genetic Algorithm.
///
/// Controls population size, selection pressure, operator rates and
/// termination conditions. Immutable for the duration of a run.
///
/// # Defaults
///
/// ```
/// use u_lastmile::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.pop_size, 200);
/// assert_eq!(config.generations, 500);
/// assert_eq!(config.early_stop_threshold, Some(50));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_lastmile::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_pop_size(50)
///     .with_generations(100)
///     .with_tournament_k(3)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of tours in every generation.
    pub pop_size: usize,

    /// Maximum number of generations before termination.
    pub generations: usize,

    /// Probability of producing offspring by ordered crossover (0.0–1.0).
    ///
    /// When crossover is not applied, a mutated copy of one tournament
    /// winner is used instead.
    pub crossover_rate: f64,

    /// Per-position swap probability (0.0–1.0).
    ///
    /// Inversion mutation fires once per offspring with half this rate.
    pub mutation_rate: f64,

    /// Number of best tours copied unchanged into the next generation.
    pub elite_size: usize,

    /// Number of distinct tours sampled per tournament.
    ///
    /// Higher values mean stronger selection pressure.
    pub tournament_k: usize,

    /// Generations without strict improvement before stopping.
    ///
    /// `None` disables early stopping.
    pub early_stop_threshold: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the start of each generation, so the actual runtime may
    /// exceed the limit by one generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            pop_size: 200,
            generations: 500,
            crossover_rate: 0.9,
            mutation_rate: 0.02,
            elite_size: 5,
            tournament_k: 5,
            early_stop_threshold: Some(50),
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_pop_size(mut self, n: usize) -> Self {
        self.pop_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_k(mut self, k: usize) -> Self {
        self.tournament_k = k;
        self
    }

    /// Sets the early-stop threshold (`None` to disable).
    pub fn with_early_stop(mut self, threshold: Option<usize>) -> Self {
        self.early_stop_threshold = threshold;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`SolveError::InvalidConfig`] describing the first invalid
    /// parameter.
    pub fn validate(&self) -> SolveResult<()> {
        if self.pop_size == 0 {
            return Err(invalid("pop_size must be at least 1"));
        }
        if self.generations == 0 {
            return Err(invalid("generations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(invalid("crossover_rate must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate must be within [0, 1]"));
        }
        if self.elite_size > self.pop_size {
            return Err(invalid("elite_size must not exceed pop_size"));
        }
        if self.tournament_k == 0 || self.tournament_k > self.pop_size {
            return Err(invalid("tournament_k must be between 1 and pop_size"));
        }
        if self.early_stop_threshold == Some(0) {
            return Err(invalid("early_stop_threshold must be positive or None"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(invalid("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> SolveError {
    SolveError::InvalidConfig(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.pop_size, 200);
        assert_eq!(config.generations, 500);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 0.02).abs() < 1e-10);
        assert_eq!(config.elite_size, 5);
        assert_eq!(config.tournament_k, 5);
        assert_eq!(config.early_stop_threshold, Some(50));
        assert!(config.seed.is_none());
        assert!(config.time_limit_ms.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_pop_size(60)
            .with_generations(1000)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.05)
            .with_elite_size(2)
            .with_tournament_k(4)
            .with_early_stop(None)
            .with_seed(42);

        assert_eq!(config.pop_size, 60);
        assert_eq!(config.generations, 1000);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.elite_size, 2);
        assert_eq!(config.tournament_k, 4);
        assert_eq!(config.early_stop_threshold, None);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::default()
            .with_crossover_rate(-0.5)
            .with_mutation_rate(2.0);
        assert!((config.crossover_rate - 0.0).abs() < 1e-10);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_zero_population() {
        assert!(GaConfig::default().with_pop_size(0).validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        assert!(GaConfig::default().with_generations(0).validate().is_err());
    }

    #[test]
    fn test_validate_elite_bounds() {
        let config = GaConfig::default()
            .with_pop_size(10)
            .with_tournament_k(3)
            .with_elite_size(10);
        assert!(config.validate().is_ok());
        assert!(config.with_elite_size(11).validate().is_err());
    }

    #[test]
    fn test_validate_tournament_bounds() {
        let base = GaConfig::default().with_pop_size(10).with_elite_size(1);
        assert!(base.clone().with_tournament_k(0).validate().is_err());
        assert!(base.clone().with_tournament_k(11).validate().is_err());
        assert!(base.with_tournament_k(10).validate().is_ok());
    }

    #[test]
    fn test_validate_rates_set_directly() {
        let config = GaConfig {
            mutation_rate: 1.5,
            ..GaConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("mutation_rate"), "{err}");

        let config = GaConfig {
            crossover_rate: f64::NAN,
            ..GaConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_early_stop() {
        let config = GaConfig::default().with_early_stop(Some(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_time_limit() {
        assert!(GaConfig::default().with_time_limit_ms(0).validate().is_err());
        assert!(GaConfig::default().with_time_limit_ms(1).validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: GaConfig =
            serde_json::from_str(r#"{"pop_size": 50, "early_stop_threshold": null}"#)
                .expect("valid json");
        assert_eq!(config.pop_size, 50);
        assert_eq!(config.generations, 500);
        assert_eq!(config.early_stop_threshold, None);
    }
}
