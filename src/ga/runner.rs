//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → sort → elitism → best tracking → early stop →
//! reproduction → repeat.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use super::config::GaConfig;
use super::operators::{mutate, order_crossover, random_permutation};
use super::selection::tournament;
use super::types::{Tour, TourProblem};
use crate::error::{SolveError, SolveResult};
use crate::random::rng_from;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best tour found during the entire run, in gene space.
    pub best: Tour,

    /// Best distance (same as `best.distance()`).
    pub best_distance: f64,

    /// Number of generations actually executed.
    pub generations: usize,

    /// Whether the run stopped because the best distance stagnated.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run hit its wall-clock limit.
    pub timed_out: bool,

    /// Best distance so far at the end of each executed generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_lastmile::distance::DistanceMatrix;
/// use u_lastmile::ga::{GaConfig, GaRunner};
/// use u_lastmile::route::OpenPath;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.0],
///     vec![2.0, 1.0, 0.0],
/// ]).unwrap();
/// let config = GaConfig::default().with_pop_size(20).with_seed(42);
/// let result = GaRunner::run(&OpenPath::new(&dm), &config).unwrap();
/// assert_eq!(result.best_distance, 2.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    pub fn run<P: TourProblem>(problem: &P, config: &GaConfig) -> SolveResult<GaResult> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag and the configured time limit are checked at the start of
    /// every generation. When either fires, the best tour found so far is
    /// returned and `generations` counts the generations completed.
    pub fn run_with_cancel<P: TourProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> SolveResult<GaResult> {
        config.validate()?;

        let genes = problem.genes();
        if genes.len() < 2 {
            let best = Tour::evaluated(genes.to_vec(), problem);
            return Ok(GaResult {
                best_distance: best.distance(),
                best,
                generations: 0,
                stagnated: false,
                cancelled: false,
                timed_out: false,
                fitness_history: Vec::new(),
            });
        }

        let mut rng = rng_from(config.seed);
        let deadline = config
            .time_limit_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));

        info!(
            stops = genes.len(),
            pop_size = config.pop_size,
            generations = config.generations,
            "starting GA"
        );

        // 1. Initialize and evaluate population
        let mut population = reserve_population(config.pop_size)?;
        population.extend(
            (0..config.pop_size)
                .map(|_| Tour::evaluated(random_permutation(genes, &mut rng), problem)),
        );

        let mut best: Option<Tour> = None;
        let mut best_distance = f64::INFINITY;
        let mut fitness_history = Vec::with_capacity(config.generations.min(1024));
        let mut no_improvement = 0usize;
        let mut completed = 0usize;
        let mut cancelled = false;
        let mut timed_out = false;

        // 2. Evolutionary loop
        for gen in 0..config.generations {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                info!(generation = gen, "GA cancelled");
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                timed_out = true;
                info!(generation = gen, "GA time limit reached");
                break;
            }

            // Stable sort: equal distances keep their order
            population.sort_by(|a, b| {
                a.distance()
                    .partial_cmp(&b.distance())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            // Elite preservation
            let mut next_gen = reserve_population(config.pop_size)?;
            next_gen.extend_from_slice(&population[..config.elite_size]);

            // Best tracking (strict improvement only)
            let gen_best = &population[0];
            if gen_best.distance() < best_distance {
                best_distance = gen_best.distance();
                best = Some(gen_best.clone());
                no_improvement = 0;
                debug!(generation = gen, distance = best_distance, "new best");
            } else {
                no_improvement += 1;
            }
            fitness_history.push(best_distance);
            completed = gen + 1;
            problem.on_generation(completed, best_distance);

            if config
                .early_stop_threshold
                .is_some_and(|limit| no_improvement >= limit)
            {
                info!(
                    generation = completed,
                    distance = best_distance,
                    "early stop: no improvement for {no_improvement} generations"
                );
                return Ok(GaResult {
                    best: best.unwrap_or_else(|| population[0].clone()),
                    best_distance,
                    generations: completed,
                    stagnated: true,
                    cancelled: false,
                    timed_out: false,
                    fitness_history,
                });
            }

            // Reproduction
            while next_gen.len() < config.pop_size {
                if rng.random_range(0.0..1.0) < config.crossover_rate {
                    let p1 = tournament(&population, config.tournament_k, &mut rng);
                    let p2 = tournament(&population, config.tournament_k, &mut rng);
                    let (mut c1, mut c2) =
                        order_crossover(population[p1].stops(), population[p2].stops(), &mut rng);

                    mutate(&mut c1, config.mutation_rate, &mut rng);
                    mutate(&mut c2, config.mutation_rate, &mut rng);

                    next_gen.push(Tour::evaluated(c1, problem));
                    if next_gen.len() < config.pop_size {
                        next_gen.push(Tour::evaluated(c2, problem));
                    }
                } else {
                    let p = tournament(&population, config.tournament_k, &mut rng);
                    let mut child = population[p].stops().to_vec();
                    mutate(&mut child, config.mutation_rate, &mut rng);
                    next_gen.push(Tour::evaluated(child, problem));
                }
            }

            population = next_gen;
        }

        // Cancelled before the first generation: fall back to the initial population.
        let best = best.unwrap_or_else(|| find_best(&population).clone());

        info!(
            generations = completed,
            distance = best.distance(),
            "GA completed"
        );

        Ok(GaResult {
            best_distance: best.distance(),
            best,
            generations: completed,
            stagnated: false,
            cancelled,
            timed_out,
            fitness_history,
        })
    }
}

/// Allocates room for one generation, reporting allocation failure.
fn reserve_population(pop_size: usize) -> SolveResult<Vec<Tour>> {
    let mut population = Vec::new();
    population.try_reserve_exact(pop_size).map_err(|e| {
        SolveError::ResourceExhausted(format!("population of {pop_size} tours: {e}"))
    })?;
    Ok(population)
}

/// Find the tour with the smallest distance.
fn find_best(population: &[Tour]) -> &Tour {
    population
        .iter()
        .min_by(|a, b| {
            a.distance()
                .partial_cmp(&b.distance())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("population must not be empty")
}

// ============================================================================
// Tests
// ============================================================================
