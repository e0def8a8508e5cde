//! Timetabling as a GA problem.
//!
//! Implements [`GaProblem`] for [`Schedule`]s over a [`Catalog`]:
//!
//! - **Initialization / mutation**: uniform draw of a (day, period, room)
//!   from the full grid. Capacity and off-time are not filtered here; they
//!   are penalized by the evaluator so the search can cross infeasible
//!   regions.
//! - **Crossover**: uniform, each gene copied from either parent with
//!   probability ½. Both parents share the same layout, so only placements
//!   are mixed.
//! - **Mutation**: each gene re-drawn independently with probability `rate`.

use std::sync::Arc;

use rand::Rng;

use super::conflict::PenaltyWeights;
use super::evaluator::ConflictEvaluator;
use super::schedule::{GeneLayout, Placement, Schedule};
use crate::catalog::{Catalog, DayId, PeriodId, RoomId};
use crate::ga::{GaProblem, Individual};

/// The course timetabling problem for one catalog.
#[derive(Debug, Clone)]
pub struct TimetableProblem<'a> {
    catalog: &'a Catalog,
    layout: Arc<GeneLayout>,
    evaluator: ConflictEvaluator<'a>,
}

impl<'a> TimetableProblem<'a> {
    /// Builds the gene layout for `catalog` once.
    pub fn new(catalog: &'a Catalog, weights: PenaltyWeights) -> Self {
        Self {
            catalog,
            layout: Arc::new(GeneLayout::from_catalog(catalog)),
            evaluator: ConflictEvaluator::new(catalog, weights),
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn layout(&self) -> &Arc<GeneLayout> {
        &self.layout
    }

    pub fn evaluator(&self) -> &ConflictEvaluator<'a> {
        &self.evaluator
    }

    /// Draws a uniformly random placement inside the grid.
    pub fn random_placement<R: Rng>(&self, rng: &mut R) -> Placement {
        let grid = self.catalog.grid();
        Placement {
            day: DayId::from_index(rng.random_range(0..grid.days())),
            period: PeriodId::from_index(rng.random_range(0..grid.periods())),
            room: RoomId::from_index(rng.random_range(0..self.catalog.rooms().len())),
        }
    }

    /// Wraps explicit placements into a schedule sharing this layout.
    ///
    /// # Panics
    /// Panics if the length does not match the gene count.
    pub fn schedule_from(&self, placements: Vec<Placement>) -> Schedule {
        Schedule::new(Arc::clone(&self.layout), placements)
    }
}

impl GaProblem for TimetableProblem<'_> {
    type Individual = Schedule;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Schedule {
        let placements = (0..self.layout.len())
            .map(|_| self.random_placement(&mut *rng))
            .collect();
        self.schedule_from(placements)
    }

    fn evaluate(&self, individual: &mut Schedule) {
        individual.evaluate(&self.evaluator);
    }

    fn crossover<R: Rng>(&self, parent1: &Schedule, parent2: &Schedule, rng: &mut R) -> Schedule {
        assert!(
            Arc::ptr_eq(parent1.layout(), parent2.layout()) || parent1.layout() == parent2.layout(),
            "crossover parents must share a gene layout"
        );
        let placements = parent1
            .placements()
            .iter()
            .zip(parent2.placements())
            .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
            .collect();
        Schedule::new(Arc::clone(parent1.layout()), placements)
    }

    fn mutate<R: Rng>(&self, individual: &mut Schedule, rate: f64, rng: &mut R) {
        for gene in 0..individual.len() {
            if rng.random_bool(rate) {
                individual.set_placement(gene, self.random_placement(rng));
            }
        }
        individual.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogBuilder, Course, Room, Teacher, TimeGrid};
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn catalog() -> Catalog {
        let mut b = CatalogBuilder::new(TimeGrid::new(3, 4));
        let t0 = b.add_teacher(Teacher::new("A"));
        let t1 = b.add_teacher(Teacher::new("B"));
        b.add_room(Room::new("R0", 10));
        b.add_room(Room::new("R1", 10));
        b.add_course(Course::new("X", t0, 3));
        b.add_course(Course::new("Y", t1, 2));
        b.build().unwrap()
    }

    fn in_grid(catalog: &Catalog, p: Placement) -> bool {
        catalog.grid().contains(p.day, p.period) && p.room.index() < catalog.rooms().len()
    }

    #[test]
    fn test_create_individual_valid_and_unevaluated() {
        let catalog = catalog();
        let problem = TimetableProblem::new(&catalog, PenaltyWeights::default());
        let mut rng = create_rng(5);
        for _ in 0..50 {
            let s = problem.create_individual(&mut rng);
            assert_eq!(s.len(), 5);
            assert!(s.fitness().is_none());
            assert!(s.placements().iter().all(|&p| in_grid(&catalog, p)));
        }
    }

    #[test]
    fn test_random_placement_covers_grid() {
        let catalog = catalog();
        let problem = TimetableProblem::new(&catalog, PenaltyWeights::default());
        let mut rng = create_rng(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(problem.random_placement(&mut rng));
        }
        assert_eq!(seen.len(), 3 * 4 * 2);
    }

    #[test]
    fn test_mutation_rate_zero_keeps_placements() {
        let catalog = catalog();
        let problem = TimetableProblem::new(&catalog, PenaltyWeights::default());
        let mut rng = create_rng(3);
        let mut s = problem.create_individual(&mut rng);
        problem.evaluate(&mut s);
        let before = s.placements().to_vec();
        problem.mutate(&mut s, 0.0, &mut rng);
        assert_eq!(s.placements(), before.as_slice());
        assert!(s.fitness().is_none(), "mutation must invalidate fitness");
    }

    #[test]
    fn test_evaluate_matches_direct_evaluation() {
        let catalog = catalog();
        let problem = TimetableProblem::new(&catalog, PenaltyWeights::default());
        let mut rng = create_rng(8);
        let mut s = problem.create_individual(&mut rng);
        problem.evaluate(&mut s);
        let direct = problem.evaluator().evaluate(problem.layout(), s.placements());
        assert_eq!(s.evaluation(), Some(&direct));
    }

    #[test]
    #[should_panic(expected = "crossover parents must share a gene layout")]
    fn test_crossover_rejects_foreign_layout() {
        let a = catalog();
        let mut b = CatalogBuilder::new(TimeGrid::new(3, 4));
        let t = b.add_teacher(Teacher::new("Z"));
        b.add_room(Room::new("R", 1));
        b.add_course(Course::new("Other", t, 5));
        let b = b.build().unwrap();

        let pa = TimetableProblem::new(&a, PenaltyWeights::default());
        let pb = TimetableProblem::new(&b, PenaltyWeights::default());
        let mut rng = create_rng(1);
        let x = pa.create_individual(&mut rng);
        let y = pb.create_individual(&mut rng);
        pa.crossover(&x, &y, &mut rng);
    }

    proptest! {
        #[test]
        fn prop_crossover_preserves_gene_identity(seed in any::<u64>()) {
            let catalog = catalog();
            let problem = TimetableProblem::new(&catalog, PenaltyWeights::default());
            let mut rng = create_rng(seed);
            let a = problem.create_individual(&mut rng);
            let b = problem.create_individual(&mut rng);
            let child = problem.crossover(&a, &b, &mut rng);

            prop_assert_eq!(child.len(), a.len());
            prop_assert!(child.fitness().is_none());
            for i in 0..child.len() {
                prop_assert_eq!(child.lecture(i).course, a.lecture(i).course);
                prop_assert_eq!(child.lecture(i).course, b.lecture(i).course);
                let p = child.placement(i);
                prop_assert!(p == a.placement(i) || p == b.placement(i));
            }
        }

        #[test]
        fn prop_mutation_stays_in_grid(seed in any::<u64>(), rate in 0.0f64..=1.0) {
            let catalog = catalog();
            let problem = TimetableProblem::new(&catalog, PenaltyWeights::default());
            let mut rng = create_rng(seed);
            let original = problem.create_individual(&mut rng);
            let mut mutated = original.clone();
            problem.mutate(&mut mutated, rate, &mut rng);

            prop_assert_eq!(mutated.len(), original.len());
            for i in 0..mutated.len() {
                prop_assert_eq!(mutated.lecture(i).course, original.lecture(i).course);
                prop_assert!(in_grid(&catalog, mutated.placement(i)));
            }
        }
    }
}
