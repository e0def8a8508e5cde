//! Reference entities: time grid, teachers, rooms, courses, specializations.
//!
//! These are plain data records. Cross references between them are typed
//! ids checked once by [`CatalogBuilder::build`](super::CatalogBuilder::build).

use super::ids::{CourseId, DayId, PeriodId, TeacherId};

const WEEKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// A weekly grid of days × periods.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeGrid {
    /// Display name of each day.
    pub day_names: Vec<String>,
    /// Display name of each period of a day.
    pub period_names: Vec<String>,
}

impl TimeGrid {
    /// Creates a grid with generated labels ("Day 1", "Period 1", ...).
    pub fn new(days: usize, periods: usize) -> Self {
        Self {
            day_names: (1..=days).map(|d| format!("Day {d}")).collect(),
            period_names: default_periods(periods),
        }
    }

    /// Creates a Monday–Friday grid with `periods` periods per day.
    pub fn weekdays(periods: usize) -> Self {
        Self {
            day_names: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
            period_names: default_periods(periods),
        }
    }

    /// Creates a grid with explicit labels.
    pub fn with_names(day_names: Vec<String>, period_names: Vec<String>) -> Self {
        Self {
            day_names,
            period_names,
        }
    }

    /// Number of days.
    pub fn days(&self) -> usize {
        self.day_names.len()
    }

    /// Number of periods per day.
    pub fn periods(&self) -> usize {
        self.period_names.len()
    }

    /// Number of (day, period) slots.
    pub fn slot_count(&self) -> usize {
        self.days() * self.periods()
    }

    /// Whether (day, period) lies inside the grid.
    pub fn contains(&self, day: DayId, period: PeriodId) -> bool {
        day.index() < self.days() && period.index() < self.periods()
    }

    /// Row-major index of a slot in `0..slot_count()`.
    pub fn slot_index(&self, day: DayId, period: PeriodId) -> usize {
        day.index() * self.periods() + period.index()
    }

    /// Display name of a day, or `"?"` when out of range.
    pub fn day_name(&self, day: DayId) -> &str {
        self.day_names.get(day.index()).map_or("?", String::as_str)
    }

    /// Display name of a period, or `"?"` when out of range.
    pub fn period_name(&self, period: PeriodId) -> &str {
        self.period_names
            .get(period.index())
            .map_or("?", String::as_str)
    }
}

fn default_periods(periods: usize) -> Vec<String> {
    (1..=periods).map(|p| format!("Period {p}")).collect()
}

/// A teacher and the slots they cannot teach in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Teacher {
    pub name: String,
    /// Declared unavailable (day, period) slots.
    pub offtimes: Vec<(DayId, PeriodId)>,
}

impl Teacher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offtimes: Vec::new(),
        }
    }

    /// Adds an unavailable slot.
    pub fn with_offtime(mut self, day: u32, period: u32) -> Self {
        self.offtimes.push((DayId(day), PeriodId(period)));
        self
    }

    /// Marks a whole day unavailable.
    pub fn with_offday(mut self, day: u32, periods: usize) -> Self {
        self.offtimes
            .extend((0..periods).map(|p| (DayId(day), PeriodId::from_index(p))));
        self
    }
}

/// A lecture room.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub name: String,
    /// Seats available.
    pub capacity: u32,
}

impl Room {
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// A course taught by one teacher a fixed number of times per week.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    pub name: String,
    pub teacher: TeacherId,
    /// Weekly lectures; each one becomes a gene.
    pub lectures: u32,
}

impl Course {
    pub fn new(name: impl Into<String>, teacher: TeacherId, lectures: u32) -> Self {
        Self {
            name: name.into(),
            teacher,
            lectures,
        }
    }
}

/// A student cohort and the courses it must attend.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Specialization {
    pub name: String,
    /// Number of enrolled students.
    pub students: u32,
    /// Required courses.
    pub courses: Vec<CourseId>,
}

impl Specialization {
    pub fn new(name: impl Into<String>, students: u32, courses: Vec<CourseId>) -> Self {
        Self {
            name: name.into(),
            students,
            courses,
        }
    }
}
