//! University course timetabling by genetic algorithm.
//!
//! Places every weekly lecture of every course into a (day, period, room)
//! slot so that no teacher, room or student cohort is double-booked,
//! teachers' unavailable slots are respected, and rooms seat everyone
//! enrolled.
//!
//! - [`catalog`]: read-only reference data (grid, teachers, rooms, courses,
//!   specializations) with precomputed enrollment and off-time lookups.
//! - [`ga`]: a generic, seeded GA engine: population, selection, elitism
//!   and a CONVERGED / EXHAUSTED run state machine.
//! - [`timetable`]: the timetabling problem plugged into the engine:
//!   schedule encoding, conflict evaluation, operators, solver and reports.
//! - [`random`]: the seeded generator shared by everything above.
//!
//! # Example
//!
//! ```
//! use u_timetable::catalog::{CatalogBuilder, Course, Room, Specialization, Teacher, TimeGrid};
//! use u_timetable::ga::GaConfig;
//! use u_timetable::timetable::{ScheduleReport, SolverConfig, TimetableSolver};
//!
//! let mut builder = CatalogBuilder::new(TimeGrid::weekdays(4));
//! let ada = builder.add_teacher(Teacher::new("Ada").with_offday(4, 4));
//! let alan = builder.add_teacher(Teacher::new("Alan"));
//! builder.add_room(Room::new("A101", 40));
//! builder.add_room(Room::new("B204", 25));
//! let algebra = builder.add_course(Course::new("Algebra", ada, 3));
//! let logic = builder.add_course(Course::new("Logic", alan, 2));
//! builder.add_specialization(Specialization::new("CS", 30, vec![algebra, logic]));
//! let catalog = builder.build()?;
//!
//! let config = SolverConfig::default().with_ga(GaConfig::fast().with_seed(42));
//! let solution = TimetableSolver::solve(&catalog, &config)?;
//! println!("{}", ScheduleReport::new(&catalog, &solution.schedule));
//! # Ok::<(), u_timetable::timetable::TimetableError>(())
//! ```

pub mod catalog;
pub mod ga;
pub mod random;
pub mod timetable;
