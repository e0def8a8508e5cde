//! Schedule (individual) model.
//!
//! # Encoding
//!
//! A schedule is a fixed-length vector of [`Placement`]s. Gene `i` always
//! stands for the same lecture instance of the same course: that mapping
//! lives in a [`GeneLayout`] built once from the catalog and shared by
//! every schedule of a run. Operators only ever rewrite placements, so
//! course identity cannot drift.

use std::sync::Arc;

use super::conflict::{Conflict, ConflictFlags};
use super::evaluator::{ConflictEvaluator, Evaluation};
use crate::catalog::{Catalog, CourseId, DayId, PeriodId, RoomId};
use crate::ga::Individual;

/// Immutable gene-position → course map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneLayout {
    courses: Vec<CourseId>,
}

impl GeneLayout {
    /// One gene per weekly lecture, courses in catalog order.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let courses = catalog
            .courses()
            .iter()
            .enumerate()
            .flat_map(|(i, course)| {
                std::iter::repeat(CourseId::from_index(i)).take(course.lectures as usize)
            })
            .collect();
        Self { courses }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Course taught at gene `gene`.
    pub fn course(&self, gene: usize) -> CourseId {
        self.courses[gene]
    }

    pub fn courses(&self) -> &[CourseId] {
        &self.courses
    }
}

/// The evolvable part of a gene: where and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub day: DayId,
    pub period: PeriodId,
    pub room: RoomId,
}

impl Placement {
    pub fn new(day: u32, period: u32, room: u32) -> Self {
        Self {
            day: DayId(day),
            period: PeriodId(period),
            room: RoomId(room),
        }
    }
}

/// A fully resolved gene: course plus placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lecture {
    pub course: CourseId,
    pub day: DayId,
    pub period: PeriodId,
    pub room: RoomId,
}

/// One candidate timetable.
///
/// Cloning is a full deep copy of the placements and the cached
/// evaluation; only the immutable layout is shared.
#[derive(Debug, Clone)]
pub struct Schedule {
    layout: Arc<GeneLayout>,
    placements: Vec<Placement>,
    evaluation: Option<Evaluation>,
}

impl Schedule {
    /// Creates an unevaluated schedule.
    ///
    /// # Panics
    /// Panics if `placements` does not have one entry per gene.
    pub fn new(layout: Arc<GeneLayout>, placements: Vec<Placement>) -> Self {
        assert_eq!(
            placements.len(),
            layout.len(),
            "schedule length must match the gene layout"
        );
        Self {
            layout,
            placements,
            evaluation: None,
        }
    }

    pub fn layout(&self) -> &Arc<GeneLayout> {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement(&self, gene: usize) -> Placement {
        self.placements[gene]
    }

    /// Re-places one gene and drops the cached evaluation.
    pub fn set_placement(&mut self, gene: usize, placement: Placement) {
        self.placements[gene] = placement;
        self.evaluation = None;
    }

    pub fn lecture(&self, gene: usize) -> Lecture {
        let p = self.placements[gene];
        Lecture {
            course: self.layout.course(gene),
            day: p.day,
            period: p.period,
            room: p.room,
        }
    }

    pub fn lectures(&self) -> impl Iterator<Item = Lecture> + '_ {
        (0..self.len()).map(|gene| self.lecture(gene))
    }

    /// Recomputes and caches the evaluation.
    pub fn evaluate(&mut self, evaluator: &ConflictEvaluator<'_>) -> &Evaluation {
        self.evaluation.insert(evaluator.evaluate(&self.layout, &self.placements))
    }

    /// Cached evaluation, `None` if stale.
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    /// Per-gene conflict flags, `None` if stale.
    pub fn conflict_flags(&self) -> Option<&[ConflictFlags]> {
        self.evaluation.as_ref().map(|e| e.flags.as_slice())
    }

    /// Whether gene `gene` took part in any conflict at the last
    /// evaluation. Always `false` while stale.
    pub fn is_conflicted(&self, gene: usize) -> bool {
        self.evaluation
            .as_ref()
            .is_some_and(|e| !e.flags[gene].is_empty())
    }

    /// Itemized conflicts of the last evaluation, empty while stale.
    pub fn conflicts(&self) -> &[Conflict] {
        self.evaluation
            .as_ref()
            .map(|e| e.conflicts.as_slice())
            .unwrap_or_default()
    }

    /// Conflicted gene indices, ascending. Empty while stale.
    pub fn conflict_genes(&self) -> Vec<usize> {
        self.evaluation
            .as_ref()
            .map(Evaluation::conflict_genes)
            .unwrap_or_default()
    }
}

impl Individual for Schedule {
    type Fitness = u32;

    fn fitness(&self) -> Option<u32> {
        self.evaluation.as_ref().map(|e| e.fitness)
    }

    fn invalidate(&mut self) {
        self.evaluation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogBuilder, Course, Room, Teacher, TimeGrid};
    use crate::timetable::PenaltyWeights;

    fn catalog() -> Catalog {
        let mut b = CatalogBuilder::new(TimeGrid::new(2, 2));
        let t = b.add_teacher(Teacher::new("T"));
        b.add_room(Room::new("R", 10));
        b.add_course(Course::new("A", t, 2));
        b.add_course(Course::new("B", t, 1));
        b.build().unwrap()
    }

    #[test]
    fn test_layout_from_catalog() {
        let layout = GeneLayout::from_catalog(&catalog());
        assert_eq!(layout.courses(), &[CourseId(0), CourseId(0), CourseId(1)]);
    }

    #[test]
    #[should_panic(expected = "schedule length must match the gene layout")]
    fn test_wrong_length_panics() {
        let layout = Arc::new(GeneLayout::from_catalog(&catalog()));
        Schedule::new(layout, vec![Placement::new(0, 0, 0)]);
    }

    #[test]
    fn test_set_placement_invalidates() {
        let catalog = catalog();
        let evaluator = ConflictEvaluator::new(&catalog, PenaltyWeights::uniform());
        let layout = Arc::new(GeneLayout::from_catalog(&catalog));
        let mut schedule = Schedule::new(
            layout,
            vec![
                Placement::new(0, 0, 0),
                Placement::new(0, 1, 0),
                Placement::new(1, 0, 0),
            ],
        );
        assert_eq!(schedule.fitness(), None);

        schedule.evaluate(&evaluator);
        assert_eq!(schedule.fitness(), Some(0));

        schedule.set_placement(2, Placement::new(0, 0, 0));
        assert_eq!(schedule.fitness(), None);
        assert!(schedule.conflict_flags().is_none());
        assert!(schedule.conflicts().is_empty());

        schedule.evaluate(&evaluator);
        // Genes 0 and 2 share (0, 0): one teacher clash, one room clash.
        assert_eq!(schedule.fitness(), Some(2));
        assert_eq!(schedule.conflict_genes(), vec![0, 2]);
        assert!(schedule.is_conflicted(2));
        assert!(!schedule.is_conflicted(1));
        assert_eq!(schedule.conflicts().len(), 2);
        assert_eq!(schedule.lecture(2).course, CourseId(1));
        assert_eq!(schedule.lecture(2).day, DayId(0));
    }

    #[test]
    fn test_clone_is_independent() {
        let catalog = catalog();
        let layout = Arc::new(GeneLayout::from_catalog(&catalog));
        let original = Schedule::new(layout, vec![Placement::new(0, 0, 0); 3]);
        let mut copy = original.clone();
        copy.set_placement(0, Placement::new(1, 1, 0));
        assert_eq!(original.placement(0), Placement::new(0, 0, 0));
        assert!(Arc::ptr_eq(original.layout(), copy.layout()));
    }
}
