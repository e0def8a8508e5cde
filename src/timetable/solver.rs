//! High-level entry point: catalog + configuration in, best timetable out.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use super::conflict::{ConflictKind, PenaltyWeights};
use super::evaluator::Evaluation;
use super::problem::TimetableProblem;
use super::schedule::Schedule;
use crate::catalog::{Catalog, CatalogError};
use crate::ga::{ConfigError, GaConfig, GaRunner, RunStatus};

/// Everything the optimizer is tuned by.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Evolution parameters.
    pub ga: GaConfig,
    /// Penalty per violation kind.
    pub weights: PenaltyWeights,
}

impl SolverConfig {
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<(), TimetableError> {
        self.ga.validate()?;
        if self.weights.is_all_zero() {
            return Err(TimetableError::ZeroWeights);
        }
        Ok(())
    }
}

/// Errors that stop a solve before the first generation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimetableError {
    #[error("invalid GA configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("all penalty weights are zero; every schedule would score 0")]
    ZeroWeights,
}

/// Outcome of a solve.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Best timetable found, evaluated.
    pub schedule: Schedule,
    /// Its penalty total.
    pub fitness: u32,
    /// Converged, or exhausted with a best-effort schedule.
    pub status: RunStatus,
    /// Generations bred after the initial population.
    pub generations: usize,
    /// Best fitness per generation.
    pub fitness_history: Vec<f64>,
    /// Seed used; feed it back through [`GaConfig::seed`] to replay.
    pub seed: u64,
    pub elapsed: Duration,
}

impl Solution {
    /// Evaluation of the returned schedule.
    pub fn evaluation(&self) -> &Evaluation {
        self.schedule
            .evaluation()
            .expect("solver returns an evaluated schedule")
    }

    /// Whether the schedule has no conflicts at all.
    pub fn is_conflict_free(&self) -> bool {
        self.fitness == 0
    }
}

/// Runs the GA over a catalog.
///
/// # Example
///
/// ```
/// use u_timetable::catalog::{CatalogBuilder, Course, Room, Teacher, TimeGrid};
/// use u_timetable::ga::GaConfig;
/// use u_timetable::timetable::{SolverConfig, TimetableSolver};
///
/// let mut builder = CatalogBuilder::new(TimeGrid::weekdays(4));
/// let t = builder.add_teacher(Teacher::new("Ada"));
/// builder.add_room(Room::new("A101", 30));
/// builder.add_course(Course::new("Algebra", t, 3));
/// let catalog = builder.build().unwrap();
///
/// let config = SolverConfig::default()
///     .with_ga(GaConfig::default().with_population_size(20).with_seed(1));
/// let solution = TimetableSolver::solve(&catalog, &config).unwrap();
/// assert!(solution.status.is_converged());
/// ```
pub struct TimetableSolver;

impl TimetableSolver {
    pub fn solve(catalog: &Catalog, config: &SolverConfig) -> Result<Solution, TimetableError> {
        Self::solve_with_cancel(catalog, config, None)
    }

    /// Like [`solve`](Self::solve), stopping early once `cancel` is raised.
    pub fn solve_with_cancel(
        catalog: &Catalog,
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Solution, TimetableError> {
        config.validate()?;
        if catalog.lecture_count() == 0 {
            return Err(CatalogError::NoLectures.into());
        }

        info!(
            "scheduling {} lectures of {} courses into {} slots x {} rooms",
            catalog.lecture_count(),
            catalog.courses().len(),
            catalog.grid().slot_count(),
            catalog.rooms().len()
        );

        let problem = TimetableProblem::new(catalog, config.weights);
        let result = GaRunner::run_with_cancel(&problem, &config.ga, cancel)?;

        let solution = Solution {
            fitness: result.best_fitness,
            schedule: result.best,
            status: result.status,
            generations: result.generations,
            fitness_history: result.fitness_history,
            seed: result.seed,
            elapsed: result.elapsed,
        };

        if !solution.is_conflict_free() {
            let counts = solution.evaluation().counts;
            let summary: Vec<String> = ConflictKind::ALL
                .iter()
                .filter(|&&k| counts.get(k) > 0)
                .map(|&k| format!("{} x{}", k.label(), counts.get(k)))
                .collect();
            warn!(
                "best schedule ({}) still has conflicts: {}",
                solution.status,
                summary.join(", ")
            );
        }

        Ok(solution)
    }
}
