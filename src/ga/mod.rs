//! GA-based roster optimization.
//!
//! # Encoding
//!
//! A [`ScheduleCandidate`] maps every employee to a date → shift schedule.
//! Crossover swaps whole employee schedules between two candidates in
//! place; mutation redraws a single (employee, date) gene.
//!
//! # Submodules
//!
//! - [`operators`]: Elitism, roulette selection, pairwise crossover, mutation
//!
//! # Reference
//! - Aickelin & Dowsland (2004), "An indirect genetic algorithm for a
//!   nurse-scheduling problem", Computers & OR 31(5): 761-778

mod chromosome;
pub mod operators;
mod runner;

pub use chromosome::ScheduleCandidate;
pub use runner::GeneticOptimizer;
