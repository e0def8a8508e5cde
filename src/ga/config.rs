//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::selection::Selection;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// assert_eq!(config.elite_count, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(5))
///     .with_mutation_rate(0.02)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Generation cap. The run ends as exhausted once this many
    /// generations have been bred without reaching the target.
    pub max_generations: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Number of top-ranked individuals copied unchanged into the next
    /// generation. At least one, so the best fitness never gets worse.
    pub elite_count: usize,

    /// Probability of recombining two parents (0.0–1.0).
    ///
    /// When crossover is skipped, the child is a copy of the first parent.
    pub crossover_rate: f64,

    /// Per-gene probability of re-drawing a gene during mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Convergence target: the run stops as soon as the best fitness is
    /// at or below this value. `None` runs until another limit is hit.
    pub target_fitness: Option<f64>,

    /// Number of generations without improvement of the best fitness
    /// before stopping. Set to 0 to disable.
    pub stagnation_limit: usize,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` draws one from entropy.
    pub seed: Option<u64>,

    /// Optional wall-clock budget in milliseconds.
    ///
    /// Checked after each fully evaluated generation, so the actual
    /// runtime may exceed this by one generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            selection: Selection::default(),
            elite_count: 1,
            crossover_rate: 1.0,
            mutation_rate: 0.05,
            target_fitness: Some(0.0),
            stagnation_limit: 0,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

/// Invalid GA configuration, reported before any generation runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("max_generations must be at least 1")]
    ZeroGenerations,
    #[error("elite_count must be in 1..population_size ({population_size}), got {elite_count}")]
    InvalidEliteCount {
        elite_count: usize,
        population_size: usize,
    },
    #[error("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("target_fitness must be non-negative, got {0}")]
    NegativeTarget(f64),
    #[error("time_limit_ms must be positive or None")]
    ZeroTimeLimit,
    #[error("tournament size must be at least 1")]
    EmptyTournament,
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the number of elites carried forward.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the convergence target (`None` to disable).
    pub fn with_target_fitness(mut self, target: Option<f64>) -> Self {
        self.target_fitness = target;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
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

    /// Convenience builder for setting tournament size.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Preset for quick feasibility checks.
    ///
    /// - Population: 50, Generations: 200, Time limit: 10s
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            max_generations: 200,
            time_limit_ms: Some(10_000),
            ..Self::default()
        }
    }

    /// Preset balancing solution quality and runtime.
    ///
    /// - Population: 100, Generations: 1000, Time limit: 30s
    pub fn balanced() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            time_limit_ms: Some(30_000),
            ..Self::default()
        }
    }

    /// Preset for large semesters.
    ///
    /// - Population: 200, Generations: 5000, Time limit: 120s
    /// - Tournament size 4, 2 elites
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            max_generations: 5000,
            selection: Selection::Tournament(4),
            elite_count: 2,
            time_limit_ms: Some(120_000),
            ..Self::default()
        }
    }

    /// Picks a preset from the number of genes (lectures) to place.
    ///
    /// - `gene_count < 50` → [`fast()`](Self::fast)
    /// - `50 ≤ gene_count < 200` → [`balanced()`](Self::balanced)
    /// - `gene_count ≥ 200` → [`quality()`](Self::quality)
    pub fn auto_select(gene_count: usize) -> Self {
        if gene_count < 50 {
            Self::fast()
        } else if gene_count < 200 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.elite_count == 0 || self.elite_count >= self.population_size {
            return Err(ConfigError::InvalidEliteCount {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        if let Some(target) = self.target_fitness {
            if target.is_nan() || target < 0.0 {
                return Err(ConfigError::NegativeTarget(target));
            }
        }
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::ZeroTimeLimit);
        }
        if self.selection == Selection::Tournament(0) {
            return Err(ConfigError::EmptyTournament);
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { name, value })
    }
}
