//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives the generation state machine:
//!
//! ```text
//! INITIALIZING ──> EVOLVING ──> CONVERGED            (best ≤ target)
//!                     │
//!                     └───────> EXHAUSTED(reason)    (cap, time, cancel, stagnation)
//! ```
//!
//! Each EVOLVING step evaluates the stale individuals, sorts ascending,
//! checks the stop conditions, and otherwise breeds the next generation:
//! elites are copied unchanged, the remaining slots are filled by
//! selection → crossover → mutation.

use super::config::{ConfigError, GaConfig};
use super::population::Population;
use super::types::{Fitness, GaProblem, Individual};
use crate::random::{create_rng, resolve_seed};
use log::{debug, info, warn};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a run stopped without reaching the target fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExhaustReason {
    /// `max_generations` generations were bred.
    GenerationCap,
    /// The wall-clock budget ran out.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
    /// The best fitness did not improve for `stagnation_limit` generations.
    Stagnation,
}

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunStatus {
    /// The best individual reached the target fitness.
    Converged,
    /// A limit was hit first; the result is best-effort.
    Exhausted(ExhaustReason),
}

impl RunStatus {
    /// Whether the run reached its target.
    pub fn is_converged(&self) -> bool {
        matches!(self, RunStatus::Converged)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Converged => write!(f, "converged"),
            RunStatus::Exhausted(reason) => write!(f, "exhausted ({reason:?})"),
        }
    }
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found. Always evaluated.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Number of generations bred after the initial population.
    pub generations: usize,

    /// How the run ended.
    pub status: RunStatus,

    /// Best fitness per generation; index 0 is the initial population.
    ///
    /// Non-increasing, since elites survive unchanged.
    pub fitness_history: Vec<f64>,

    /// Seed the run actually used (replays the run when fed back).
    pub seed: u64,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Executes the GA evolutionary loop.
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?} ({})", result.best_fitness, result.status);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// Fails only on an invalid configuration, before any generation runs.
    /// A poor final fitness is reported through [`RunStatus`], not an error.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Individual>, ConfigError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag is polled once per generation, after that generation is
    /// fully evaluated, so the returned best is never stale.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>, ConfigError> {
        config.validate()?;

        let seed = resolve_seed(config.seed);
        let mut rng = create_rng(seed);
        let start = Instant::now();
        let time_limit = config.time_limit_ms.map(Duration::from_millis);

        info!(
            "GA start: population {}, generation cap {}, seed {}",
            config.population_size, config.max_generations, seed
        );

        let mut population =
            Population::initialize(problem, config.population_size, &mut rng, config.parallel);

        let mut fitness_history = Vec::with_capacity(config.max_generations.min(4096) + 1);
        let mut generation = 0usize;
        let mut stagnation_counter = 0usize;

        let status = loop {
            debug_assert!(population.is_sorted());
            let best_fitness = population.best().rank_fitness().to_f64();

            match fitness_history.last() {
                Some(&previous) if best_fitness < previous => stagnation_counter = 0,
                Some(_) => stagnation_counter += 1,
                None => {}
            }
            fitness_history.push(best_fitness);
            problem.on_generation(generation, population.best().rank_fitness());
            debug!("generation {generation}: best fitness {best_fitness}");

            if config.target_fitness.is_some_and(|t| best_fitness <= t) {
                break RunStatus::Converged;
            }
            if generation >= config.max_generations {
                break RunStatus::Exhausted(ExhaustReason::GenerationCap);
            }
            if time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                break RunStatus::Exhausted(ExhaustReason::TimeLimit);
            }
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                break RunStatus::Exhausted(ExhaustReason::Cancelled);
            }
            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                break RunStatus::Exhausted(ExhaustReason::Stagnation);
            }

            population = next_generation(problem, config, &population, &mut rng);
            population.evaluate_pending(problem, config.parallel);
            population.sort();
            generation += 1;
        };

        let elapsed = start.elapsed();
        let best = population.into_best();
        let best_fitness = best
            .fitness()
            .expect("best individual must be evaluated");

        match status {
            RunStatus::Converged => info!(
                "GA converged after {generation} generations ({elapsed:?}): fitness {best_fitness:?}"
            ),
            RunStatus::Exhausted(reason) => warn!(
                "GA exhausted by {reason:?} after {generation} generations ({elapsed:?}): fitness {best_fitness:?}"
            ),
        }

        Ok(GaResult {
            best,
            best_fitness,
            generations: generation,
            status,
            fitness_history,
            seed,
            elapsed,
        })
    }
}

/// Breeds the next generation from a sorted, evaluated one.
///
/// The first `elite_count` slots are copies of the current leaders; every
/// other slot is a fresh, stale child.
fn next_generation<P: GaProblem, R: Rng>(
    problem: &P,
    config: &GaConfig,
    current: &Population<P::Individual>,
    rng: &mut R,
) -> Population<P::Individual> {
    let parents = current.individuals();
    let mut next: Vec<P::Individual> = Vec::with_capacity(config.population_size);
    next.extend_from_slice(&parents[..config.elite_count]);

    while next.len() < config.population_size {
        let a = config.selection.select(parents, rng);
        let b = config.selection.select(parents, rng);

        let mut child = if rng.random_bool(config.crossover_rate) {
            problem.crossover(&parents[a], &parents[b], rng)
        } else {
            parents[a].clone()
        };
        problem.mutate(&mut child, config.mutation_rate, rng);
        child.invalidate();
        next.push(child);
    }

    Population::from_individuals(next)
}

// ============================================================================
// Tests
// ============================================================================
