//! Optimization strategies.
//!
//! Three interchangeable optimizers share the [`Optimizer`] contract:
//!
//! | Strategy | Optimizer | Suited to |
//! |----------|-----------|-----------|
//! | Genetic | [`GeneticOptimizer`](crate::ga::GeneticOptimizer) | Large rosters (≥ 2000 genes) |
//! | Annealing | [`AnnealingOptimizer`](crate::sa::AnnealingOptimizer) | Small rosters (< 500 genes) |
//! | Hybrid | [`HybridOptimizer`] | Everything in between |
//!
//! [`AlgorithmSelector`] picks one from the problem size.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use rand::{rngs::SmallRng, SeedableRng};
//! use u_roster::models::ProblemConfig;
//! use u_roster::strategy::{AlgorithmSelector, Strategy};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
//! let problem = ProblemConfig::new(vec![1, 2, 3], vec![10, 20, 99], start, end)
//!     .with_rest_shifts([99])
//!     .with_max_generations(20);
//!
//! let strategy = AlgorithmSelector::select(&problem);
//! assert_eq!(strategy, Strategy::Annealing);
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let result = strategy.optimize(&problem, &mut rng).unwrap();
//! assert!(result.best_candidate.is_valid(&problem));
//! ```

mod hybrid;
mod selector;

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use hybrid::HybridOptimizer;
pub use selector::{AlgorithmSelector, LARGE_PROBLEM_SIZE, SMALL_PROBLEM_SIZE};

use crate::cancel::CancellationToken;
use crate::error::{Error, Result};
use crate::ga::GeneticOptimizer;
use crate::models::ProblemConfig;
use crate::result::OptimizationResult;
use crate::sa::AnnealingOptimizer;

/// Progress callback for long-running optimizations.
pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

/// Progress snapshot passed to a [`ProgressCallback`].
///
/// Reported once per generation or iteration, at the same point where
/// cancellation is polled, and once more with `running == false` when the
/// run stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressInfo {
    /// Generations (GA) or iterations (SA) completed so far.
    pub iteration: u64,
    /// Best-ever fitness so far.
    pub best_fitness: f64,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
    /// Whether the optimizer is still running.
    pub running: bool,
}

impl ProgressInfo {
    pub(crate) fn new(iteration: u64, best_fitness: f64, start: Instant, running: bool) -> Self {
        Self {
            iteration,
            best_fitness,
            elapsed_ms: start.elapsed().as_millis() as u64,
            running,
        }
    }
}

/// Common contract of all roster optimizers.
///
/// The RNG is supplied per call; a fixed seed and a fixed problem give the
/// same result on every run.
pub trait Optimizer {
    /// Strategy implemented by this optimizer.
    fn strategy(&self) -> Strategy;

    /// Validates the problem, then searches for the best roster.
    ///
    /// # Errors
    /// [`Error::InvalidProblem`] if validation fails. A started run always
    /// returns `Ok`.
    fn optimize<R: Rng + ?Sized>(
        &self,
        problem: &ProblemConfig,
        rng: &mut R,
    ) -> Result<OptimizationResult> {
        self.optimize_with_progress(problem, rng, Box::new(|_: ProgressInfo| {}))
    }

    /// Same as [`optimize`](Self::optimize), reporting progress to `callback`.
    fn optimize_with_progress<R: Rng + ?Sized>(
        &self,
        problem: &ProblemConfig,
        rng: &mut R,
        callback: ProgressCallback,
    ) -> Result<OptimizationResult>;
}

/// Search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Population-based genetic algorithm.
    Genetic,
    /// Single-candidate simulated annealing.
    Annealing,
    /// Genetic and annealing phases on half budgets; best result wins.
    Hybrid,
}

impl Strategy {
    /// All strategies.
    pub const ALL: [Strategy; 3] = [Self::Genetic, Self::Annealing, Self::Hybrid];

    /// Short identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Genetic => "genetic",
            Self::Annealing => "annealing",
            Self::Hybrid => "hybrid",
        }
    }

    /// One-line description for operator tooling.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Genetic => "Genetic algorithm: population diversity for large search spaces",
            Self::Annealing => "Simulated annealing: fast convergence on small search spaces",
            Self::Hybrid => "Hybrid: genetic and annealing on half budgets, best result kept",
        }
    }

    /// Runs this strategy with a fresh cancellation token.
    pub fn optimize<R: Rng + ?Sized>(
        &self,
        problem: &ProblemConfig,
        rng: &mut R,
    ) -> Result<OptimizationResult> {
        self.optimize_with_cancellation(problem, rng, CancellationToken::new())
    }

    /// Runs this strategy, stopping early when `cancel` is triggered.
    pub fn optimize_with_cancellation<R: Rng + ?Sized>(
        &self,
        problem: &ProblemConfig,
        rng: &mut R,
        cancel: CancellationToken,
    ) -> Result<OptimizationResult> {
        self.optimize_with_progress(problem, rng, cancel, Box::new(|_: ProgressInfo| {}))
    }

    /// Runs this strategy with cancellation and progress reporting.
    pub fn optimize_with_progress<R: Rng + ?Sized>(
        &self,
        problem: &ProblemConfig,
        rng: &mut R,
        cancel: CancellationToken,
        callback: ProgressCallback,
    ) -> Result<OptimizationResult> {
        match self {
            Self::Genetic => GeneticOptimizer::new()
                .with_cancellation(cancel)
                .optimize_with_progress(problem, rng, callback),
            Self::Annealing => AnnealingOptimizer::new()
                .with_cancellation(cancel)
                .optimize_with_progress(problem, rng, callback),
            Self::Hybrid => HybridOptimizer::new()
                .with_cancellation(cancel)
                .optimize_with_progress(problem, rng, callback),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    /// Parses a [`name`](Strategy::name), ignoring case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidParameter(format!("unknown strategy '{wanted}'")))
    }
}

/// Selects a strategy from the problem size and runs it.
pub fn optimize<R: Rng + ?Sized>(
    problem: &ProblemConfig,
    rng: &mut R,
) -> Result<OptimizationResult> {
    AlgorithmSelector::select(problem).optimize(problem, rng)
}
