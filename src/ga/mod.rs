//! Genetic Algorithm engine.
//!
//! A generic GA built on trait-based abstractions. A problem plugs in by
//! implementing [`GaProblem`], which specifies how to create, evaluate,
//! crossover, and mutate individuals. The timetable domain in
//! [`crate::timetable`] is one such problem.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with a cached, invalidatable fitness
//! - [`GaProblem`]: Problem definition (initialization, evaluation, operators)
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, selection, limits)
//! - [`Population`]: One generation, sortable by fitness
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`] / [`RunStatus`]: Final best individual and how the run ended
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod config;
mod population;
mod runner;
mod selection;
mod types;

pub use config::{ConfigError, GaConfig};
pub use population::Population;
pub use runner::{ExhaustReason, GaResult, GaRunner, RunStatus};
pub use selection::Selection;
pub use types::{Fitness, GaProblem, Individual};
