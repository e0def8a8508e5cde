//! Parent selection strategies.
//!
//! All strategies assume **minimization** (lower fitness = better) and give
//! every individual a strictly positive chance of being picked, so the
//! population keeps some diversity and the elite is always a candidate.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use super::types::{Fitness, Individual};
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// ```
/// use u_timetable::ga::Selection;
///
/// let sel = Selection::Tournament(3);
/// assert_eq!(sel, Selection::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: draw `k` individuals with replacement, keep
    /// the best.
    ///
    /// Sampling with replacement means even the worst individual wins when
    /// it is drawn `k` times. Higher `k` = stronger selection pressure.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection on inverted penalty.
    ///
    /// `weight_i = (max - f_i) + floor`, where `floor` is the fitness spread
    /// divided by the population size, so the worst individual keeps a
    /// share comparable to one rank step.
    ///
    /// # Complexity
    /// O(n) per selection
    Roulette,

    /// Linear rank selection: the individual at rank `r` (0 = best) gets
    /// weight `n - r`.
    ///
    /// # Complexity
    /// O(n log n) per selection
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index from the population.
    ///
    /// Unevaluated individuals are treated as worst.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );
        if population.len() == 1 {
            return 0;
        }

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, rng),
        }
    }
}

fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    let n = population.len();
    let mut winner = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let challenger = rng.random_range(0..n);
        if population[challenger].rank_fitness() < population[winner].rank_fitness() {
            winner = challenger;
        }
    }
    winner
}

fn roulette<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    let n = population.len();
    let penalties: Vec<f64> = population
        .iter()
        .map(|ind| ind.rank_fitness().to_f64())
        .collect();

    // Unevaluated individuals map to worst(); keep them out of the spread.
    let finite = penalties.iter().copied().filter(|p| p.is_finite());
    let max = finite.clone().fold(f64::NEG_INFINITY, f64::max);
    let min = finite.fold(f64::INFINITY, f64::min);
    if !max.is_finite() || max <= min {
        return rng.random_range(0..n);
    }
    let floor = (max - min) / n as f64;

    let weights: Vec<f64> = penalties
        .iter()
        .map(|&p| if p.is_finite() { max - p + floor } else { floor })
        .collect();
    let total: f64 = weights.iter().sum();

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    n - 1
}

fn rank<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    let n = population.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        population[a]
            .rank_fitness()
            .partial_cmp(&population[b].rank_fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total = (n * (n + 1) / 2) as u64;
    let mut threshold = rng.random_range(0..total);
    for (r, &idx) in order.iter().enumerate() {
        let weight = (n - r) as u64;
        if threshold < weight {
            return idx;
        }
        threshold -= weight;
    }
    order[n - 1]
}
