//! Course timetabling on top of the GA engine.
//!
//! # Model
//!
//! Every weekly lecture of every course is one gene. A [`Schedule`] assigns
//! each gene a (day, period, room) [`Placement`]; the course behind gene
//! `i` is fixed by the shared [`GeneLayout`]. The [`ConflictEvaluator`]
//! scores a schedule as a weighted count of hard-constraint violations
//! (lower is better, 0 is conflict-free):
//!
//! | Kind                      | Scope  | Default weight |
//! |---------------------------|--------|----------------|
//! | Teacher double-booking    | pair   | 100            |
//! | Teacher off-time          | single | 50             |
//! | Room double-booking       | pair   | 100            |
//! | Room capacity             | single | 20             |
//! | Specialization overlap    | pair   | 80             |
//!
//! # Usage
//!
//! [`TimetableSolver::solve`] wires a [`crate::catalog::Catalog`] and a
//! [`SolverConfig`] into [`crate::ga::GaRunner`]. For finer control, use
//! [`TimetableProblem`] directly as a [`crate::ga::GaProblem`].

mod conflict;
mod evaluator;
mod problem;
mod report;
mod schedule;
mod solver;

pub use conflict::{Conflict, ConflictFlags, ConflictKind, PenaltyWeights, ViolationCounts};
pub use evaluator::{ConflictEvaluator, Evaluation};
pub use problem::TimetableProblem;
pub use report::{double_booked_rooms, specialization_timetable, RoomBooking, ScheduleReport};
pub use schedule::{GeneLayout, Lecture, Placement, Schedule};
pub use solver::{Solution, SolverConfig, TimetableError, TimetableSolver};
