//! Human-readable views of a schedule.

use std::collections::BTreeMap;
use std::fmt;

use super::conflict::{Conflict, ConflictKind};
use super::schedule::{Lecture, Schedule};
use crate::catalog::{Catalog, DayId, PeriodId, RoomId, SpecializationId};

/// A room holding more than one lecture in the same slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomBooking {
    pub room: RoomId,
    pub day: DayId,
    pub period: PeriodId,
    /// Genes sharing the slot, ascending.
    pub genes: Vec<usize>,
}

/// Every double-booked (room, day, period), ordered by day, period, room.
///
/// Works on the placements directly, so a stale schedule is fine.
pub fn double_booked_rooms(schedule: &Schedule) -> Vec<RoomBooking> {
    let mut slots: BTreeMap<(DayId, PeriodId, RoomId), Vec<usize>> = BTreeMap::new();
    for (gene, p) in schedule.placements().iter().enumerate() {
        slots.entry((p.day, p.period, p.room)).or_default().push(gene);
    }
    slots
        .into_iter()
        .filter(|(_, genes)| genes.len() > 1)
        .map(|((day, period, room), genes)| RoomBooking {
            room,
            day,
            period,
            genes,
        })
        .collect()
}

/// Lectures a specialization's students attend, ordered by day, period, room.
pub fn specialization_timetable(
    catalog: &Catalog,
    schedule: &Schedule,
    specialization: SpecializationId,
) -> Vec<Lecture> {
    let courses = &catalog.specialization(specialization).courses;
    let mut lectures: Vec<Lecture> = schedule
        .lectures()
        .filter(|l| courses.contains(&l.course))
        .collect();
    lectures.sort_by_key(|l| (l.day, l.period, l.room, l.course));
    lectures
}

/// Text summary of a schedule's conflicts.
///
/// ```text
/// fitness 120
///   teacher double-booked: 1
///   room over capacity: 1
/// teacher double-booked: Algebra (Ada) in A101, Monday Period 1 / Geometry (Ada) in B204, Monday Period 1
/// room over capacity: Physics (Alan) in A101, Tuesday Period 3 [45 students, 30 seats]
/// ```
pub struct ScheduleReport<'a> {
    catalog: &'a Catalog,
    schedule: &'a Schedule,
}

impl<'a> ScheduleReport<'a> {
    pub fn new(catalog: &'a Catalog, schedule: &'a Schedule) -> Self {
        Self { catalog, schedule }
    }

    fn write_gene(&self, f: &mut fmt::Formatter<'_>, gene: usize) -> fmt::Result {
        let lecture = self.schedule.lecture(gene);
        let course = self.catalog.course(lecture.course);
        let grid = self.catalog.grid();
        write!(
            f,
            "{} ({}) in {}, {} {}",
            course.name,
            self.catalog.teacher(course.teacher).name,
            self.catalog.room(lecture.room).name,
            grid.day_name(lecture.day),
            grid.period_name(lecture.period)
        )
    }
}

impl fmt::Display for ScheduleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(evaluation) = self.schedule.evaluation() else {
            return writeln!(f, "schedule not evaluated");
        };

        writeln!(f, "fitness {}", evaluation.fitness)?;
        for kind in ConflictKind::ALL {
            let n = evaluation.counts.get(kind);
            if n > 0 {
                writeln!(f, "  {}: {}", kind.label(), n)?;
            }
        }

        for conflict in &evaluation.conflicts {
            write!(f, "{}: ", conflict.kind().label())?;
            for (i, &gene) in conflict.genes().iter().enumerate() {
                if i > 0 {
                    write!(f, " / ")?;
                }
                self.write_gene(f, gene)?;
            }
            if let Conflict::RoomCapacity {
                students, capacity, ..
            } = conflict
            {
                write!(f, " [{students} students, {capacity} seats]")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
