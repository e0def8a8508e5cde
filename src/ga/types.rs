//! Core trait definitions for the GA engine.
//!
//! The two central traits, [`Individual`] and [`GaProblem`], define the
//! contract between the evolutionary loop and a concrete problem such as
//! [`TimetableProblem`](crate::timetable::TimetableProblem).

use rand::Rng;

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// Lower fitness is considered better (minimization); penalty totals fit
/// naturally since `0` means "no violations".
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Returns a value representing the worst possible fitness.
    ///
    /// Used to rank individuals that have not been evaluated yet.
    fn worst() -> Self;

    /// Converts the fitness to `f64` for logging and statistics.
    fn to_f64(self) -> f64;
}

impl Fitness for u32 {
    fn worst() -> Self {
        u32::MAX
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Fitness for u64 {
    fn worst() -> Self {
        u64::MAX
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::INFINITY
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Fitness for f32 {
    fn worst() -> Self {
        f32::INFINITY
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A candidate solution in the GA population.
///
/// Individuals carry their own cached fitness. A cached value is only
/// trusted while the genes it was computed from are unchanged: any
/// operator that touches the genes must call [`invalidate`](Individual::invalidate),
/// after which [`fitness`](Individual::fitness) returns `None` until
/// [`GaProblem::evaluate`] runs again.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct MySolution {
///     genes: Vec<u8>,
///     fitness: Option<u32>,
/// }
///
/// impl Individual for MySolution {
///     type Fitness = u32;
///     fn fitness(&self) -> Option<u32> { self.fitness }
///     fn invalidate(&mut self) { self.fitness = None; }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the cached fitness, or `None` if the individual is stale.
    fn fitness(&self) -> Option<Self::Fitness>;

    /// Marks the cached fitness as stale.
    fn invalidate(&mut self);

    /// Whether a valid fitness is cached.
    fn is_evaluated(&self) -> bool {
        self.fitness().is_some()
    }

    /// Fitness used for ranking: stale individuals rank last.
    fn rank_fitness(&self) -> Self::Fitness {
        self.fitness().unwrap_or_else(Self::Fitness::worst)
    }
}

/// Defines a GA optimization problem.
///
/// 1. **Initialization**: How to create random individuals
/// 2. **Evaluation**: How to compute and record fitness
/// 3. **Crossover**: How to recombine two parents into one child
/// 4. **Mutation**: How to perturb an individual in place
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// individuals in parallel using rayon. Evaluation must therefore not
/// mutate shared state of the problem.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual.
    ///
    /// The result need not be good, only structurally valid. It may be
    /// returned unevaluated.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual and stores the result on it.
    ///
    /// After this call `individual.fitness()` must be `Some`. Must be
    /// deterministic: evaluating an unchanged individual again yields the
    /// same fitness.
    fn evaluate(&self, individual: &mut Self::Individual);

    /// Produces one child by recombining two parents.
    ///
    /// The default implementation clones `parent1` (no crossover). The
    /// returned child is expected to be stale.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Self::Individual {
        let mut child = parent1.clone();
        child.invalidate();
        child
    }

    /// Mutates an individual in place.
    ///
    /// `rate` is the per-gene mutation probability from
    /// [`GaConfig::mutation_rate`](super::GaConfig::mutation_rate).
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rate: f64, _rng: &mut R) {}

    /// Called after each generation has been evaluated and sorted.
    ///
    /// The default implementation is a no-op.
    fn on_generation(
        &self,
        _generation: usize,
        _best_fitness: <Self::Individual as Individual>::Fitness,
    ) {
    }
}
