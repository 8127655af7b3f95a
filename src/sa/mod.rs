//! Simulated annealing for rosters.
//!
//! Single-candidate local search: the neighbour of a roster is a clone with
//! one gene redrawn. Worse neighbours are accepted by the Metropolis
//! criterion under a geometrically cooling temperature.
//!
//! # Reference
//! Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated
//! Annealing", Science 220(4598): 671-680

mod runner;

pub use runner::AnnealingOptimizer;
