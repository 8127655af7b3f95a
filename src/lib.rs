//! Multi-objective shift-roster optimization.
//!
//! Assigns one shift per employee per day over a date range, trading off
//! four soft objectives: workload fairness, overtime cost, staffing
//! efficiency and rest-rule satisfaction. Rosters are searched with a
//! genetic algorithm, simulated annealing, or a hybrid of both, selected
//! by problem size.
//!
//! # Modules
//!
//! - **`models`**: Problem input: `ProblemConfig`, `ObjectiveWeights`,
//!   `RosterConstraints`, `GeneticParams`, `AnnealingParams`, `WorkCalendar`
//! - **`validation`**: Input integrity checks (empty sets, date range, IDs, rates)
//! - **`fitness`**: Four-objective scoring of a candidate roster
//! - **`ga`**: Roster chromosome, generation operators, GA runner
//! - **`sa`**: Simulated annealing runner
//! - **`strategy`**: `Strategy`, `Optimizer` trait, progress reporting, hybrid,
//!   size-based selection
//! - **`metrics`**: Raw roster indicators for reporting
//! - **`result`**: `OptimizationResult`, `TerminationReason`
//!
//! # Architecture
//!
//! This crate is a library boundary only: a validated `ProblemConfig` goes
//! in, an `OptimizationResult` comes out. Resolving employees and shifts,
//! persisting the winning roster and notifying staff belong to the calling
//! service. Randomness is always injected, so a fixed seed reproduces a run.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rand::{rngs::SmallRng, SeedableRng};
//! use u_roster::models::ProblemConfig;
//! use u_roster::{GeneticOptimizer, Optimizer};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
//! let problem = ProblemConfig::new(vec![1, 2, 3, 4], vec![10, 20, 99], start, end)
//!     .with_rest_shifts([99])
//!     .with_population_size(20)
//!     .with_max_generations(25);
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let result = GeneticOptimizer::new().optimize(&problem, &mut rng).unwrap();
//!
//! assert!(result.best_fitness > 0.0);
//! assert_eq!(result.best_candidate.gene_count(), 4 * 14);
//! println!("{} after {} generations", result.termination, result.iterations);
//! ```
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review"
//! - Talbi (2009), "Metaheuristics: From Design to Implementation"

pub mod cancel;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod metrics;
pub mod models;
pub mod result;
pub mod sa;
pub mod strategy;
pub mod validation;

pub use cancel::CancellationToken;
pub use error::{Error, Result};
pub use fitness::{FitnessEvaluator, FitnessScores};
pub use ga::{GeneticOptimizer, ScheduleCandidate};
pub use metrics::ScheduleMetrics;
pub use result::{OptimizationResult, TerminationReason};
pub use sa::AnnealingOptimizer;
pub use strategy::{
    optimize, AlgorithmSelector, HybridOptimizer, Optimizer, ProgressCallback, ProgressInfo,
    Strategy,
};
