//! Population (generation) model.
//!
//! A [`Population`] is an ordered collection of individuals owned by the
//! runner for one generation. After [`sort`](Population::sort) it is
//! ascending by fitness, so index 0 is the best individual.

use super::types::{GaProblem, Individual};
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One generation of candidate solutions.
#[derive(Debug, Clone)]
pub struct Population<I: Individual> {
    individuals: Vec<I>,
}

impl<I: Individual> Population<I> {
    /// Wraps existing individuals. Order is kept as given.
    pub fn from_individuals(individuals: Vec<I>) -> Self {
        Self { individuals }
    }

    /// Builds the first generation: `size` random individuals, each
    /// evaluated once, sorted ascending by fitness.
    pub fn initialize<P, R>(problem: &P, size: usize, rng: &mut R, parallel: bool) -> Self
    where
        P: GaProblem<Individual = I>,
        R: Rng,
    {
        let individuals = (0..size)
            .map(|_| problem.create_individual(&mut *rng))
            .collect();
        let mut population = Self { individuals };
        population.evaluate_pending(problem, parallel);
        population.sort();
        population
    }

    /// Evaluates every individual without a valid cached fitness.
    ///
    /// With `parallel` set (and the `parallel` feature enabled) the work
    /// fans out over rayon's pool; the call returns only once every
    /// evaluation is done. Returns the number of evaluations performed.
    ///
    /// # Panics
    /// Panics if the problem leaves an individual unevaluated.
    pub fn evaluate_pending<P>(&mut self, problem: &P, parallel: bool) -> usize
    where
        P: GaProblem<Individual = I>,
    {
        let pending = self.individuals.iter().filter(|i| !i.is_evaluated()).count();
        if pending == 0 {
            return 0;
        }

        if parallel {
            evaluate_parallel(problem, &mut self.individuals);
        } else {
            evaluate_sequential(problem, &mut self.individuals);
        }

        assert!(
            self.individuals.iter().all(Individual::is_evaluated),
            "GaProblem::evaluate left an individual without fitness"
        );
        pending
    }

    /// Sorts ascending by fitness (stable; unevaluated individuals last).
    pub fn sort(&mut self) {
        self.individuals.sort_by(|a, b| {
            a.rank_fitness()
                .partial_cmp(&b.rank_fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Whether the population is fully evaluated and ascending by fitness.
    pub fn is_sorted(&self) -> bool {
        self.individuals.iter().all(Individual::is_evaluated)
            && self
                .individuals
                .windows(2)
                .all(|w| w[0].rank_fitness() <= w[1].rank_fitness())
    }

    /// The individual at rank 0. Only meaningful after [`sort`](Self::sort).
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn best(&self) -> &I {
        self.individuals
            .first()
            .expect("population must not be empty")
    }

    /// Fitness of every individual, in population order.
    pub fn fitnesses(&self) -> Vec<Option<I::Fitness>> {
        self.individuals.iter().map(Individual::fitness).collect()
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Borrowed view of the individuals.
    pub fn individuals(&self) -> &[I] {
        &self.individuals
    }

    /// Consumes the population, returning the best individual.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn into_best(self) -> I {
        self.individuals
            .into_iter()
            .next()
            .expect("population must not be empty")
    }
}

fn evaluate_sequential<P: GaProblem>(problem: &P, individuals: &mut [P::Individual]) {
    for ind in individuals.iter_mut().filter(|ind| !ind.is_evaluated()) {
        problem.evaluate(ind);
    }
}

#[cfg(feature = "parallel")]
fn evaluate_parallel<P: GaProblem>(problem: &P, individuals: &mut [P::Individual]) {
    individuals
        .par_iter_mut()
        .filter(|ind| !ind.is_evaluated())
        .for_each(|ind| problem.evaluate(ind));
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel<P: GaProblem>(problem: &P, individuals: &mut [P::Individual]) {
    evaluate_sequential(problem, individuals);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct Counter {
        value: u32,
        fitness: Option<u32>,
    }

    impl Individual for Counter {
        type Fitness = u32;
        fn fitness(&self) -> Option<u32> {
            self.fitness
        }
        fn invalidate(&mut self) {
            self.fitness = None;
        }
    }

    struct DistanceTo7 {
        evaluations: AtomicUsize,
    }

    impl GaProblem for DistanceTo7 {
        type Individual = Counter;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Counter {
            Counter {
                value: rng.random_range(0..20),
                fitness: None,
            }
        }

        fn evaluate(&self, ind: &mut Counter) {
            self.evaluations.fetch_add(1, Ordering::Relaxed);
            ind.fitness = Some(ind.value.abs_diff(7));
        }
    }

    fn problem() -> DistanceTo7 {
        DistanceTo7 {
            evaluations: AtomicUsize::new(0),
        }
    }

    #[test]
    fn test_initialize_sorted_and_evaluated() {
        let problem = problem();
        let mut rng = create_rng(1);
        let pop = Population::initialize(&problem, 30, &mut rng, false);
        assert_eq!(pop.len(), 30);
        assert!(pop.is_sorted());
        assert_eq!(problem.evaluations.load(Ordering::Relaxed), 30);
    }

    #[test]
    fn test_evaluate_pending_skips_evaluated() {
        let problem = problem();
        let mut pop = Population::from_individuals(vec![
            Counter { value: 7, fitness: Some(0) },
            Counter { value: 9, fitness: None },
            Counter { value: 1, fitness: None },
        ]);
        assert_eq!(pop.evaluate_pending(&problem, false), 2);
        assert_eq!(pop.evaluate_pending(&problem, false), 0);
        assert_eq!(problem.evaluations.load(Ordering::Relaxed), 2);
        pop.sort();
        assert_eq!(pop.fitnesses(), vec![Some(0), Some(2), Some(6)]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let a = problem();
        let b = problem();
        let seq = Population::initialize(&a, 64, &mut create_rng(3), false);
        let par = Population::initialize(&b, 64, &mut create_rng(3), true);
        assert_eq!(seq.fitnesses(), par.fitnesses());
    }

    #[test]
    fn test_unevaluated_sort_last() {
        let mut pop = Population::from_individuals(vec![
            Counter { value: 0, fitness: None },
            Counter { value: 7, fitness: Some(0) },
        ]);
        pop.sort();
        assert_eq!(pop.best().value, 7);
        assert!(!pop.is_sorted());
    }

    #[test]
    fn test_into_best() {
        let mut pop = Population::from_individuals(vec![
            Counter { value: 3, fitness: Some(4) },
            Counter { value: 8, fitness: Some(1) },
        ]);
        pop.sort();
        assert_eq!(pop.into_best().value, 8);
    }
}
