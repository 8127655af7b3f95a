//! Optimization result representation.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fitness::{FitnessEvaluator, FitnessScores};
use crate::ga::ScheduleCandidate;
use crate::metrics::ScheduleMetrics;
use crate::models::ProblemConfig;
use crate::strategy::Strategy;

/// Why an optimizer run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Best-ever fitness reached the target.
    TargetReached,
    /// Best-ever fitness did not improve for the stagnation limit.
    Stagnated,
    /// Annealing temperature fell to 1.0 or below.
    Cooled,
    /// Generation or iteration budget used up.
    BudgetExhausted,
    /// Cancellation was requested.
    Cancelled,
    /// Wall-clock time limit exceeded.
    TimeLimit,
}

impl TerminationReason {
    /// Whether the stop counts as convergence rather than a cut-off.
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::TargetReached | Self::Stagnated | Self::Cooled)
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::TargetReached => "target reached",
            Self::Stagnated => "stagnated",
            Self::Cooled => "cooled",
            Self::BudgetExhausted => "budget exhausted",
            Self::Cancelled => "cancelled",
            Self::TimeLimit => "time limit",
        };
        f.write_str(s)
    }
}

/// Result of one optimizer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Strategy that produced this result.
    pub strategy: Strategy,
    /// Best-ever candidate, with its score cache populated.
    pub best_candidate: ScheduleCandidate,
    /// Combined fitness of `best_candidate`.
    pub best_fitness: f64,
    /// Sub-scores of `best_candidate`.
    pub scores: FitnessScores,
    /// Generations (GA) or iterations (SA) actually performed.
    pub iterations: u64,
    /// Wall-clock time of the run.
    pub execution_duration: Duration,
    /// Why the run stopped.
    pub termination: TerminationReason,
    /// Best-ever fitness before the first step, then after every generation
    /// (GA) or iteration (SA): `iterations + 1` entries.
    pub fitness_history: Vec<f64>,
    /// Raw roster indicators for `best_candidate`.
    pub metrics: ScheduleMetrics,
}

impl OptimizationResult {
    /// Assembles a result around the best-ever candidate of a run.
    pub(crate) fn from_search(
        strategy: Strategy,
        mut best_candidate: ScheduleCandidate,
        problem: &ProblemConfig,
        iterations: u64,
        execution_duration: Duration,
        termination: TerminationReason,
        fitness_history: Vec<f64>,
    ) -> Self {
        let scores = match best_candidate.scores().copied() {
            Some(scores) => scores,
            None => FitnessEvaluator::evaluate(&mut best_candidate, problem),
        };
        let metrics = ScheduleMetrics::calculate(&best_candidate, problem);
        Self {
            strategy,
            best_candidate,
            best_fitness: scores.total,
            scores,
            iterations,
            execution_duration,
            termination,
            fitness_history,
            metrics,
        }
    }

    /// Wall-clock time in whole milliseconds.
    pub fn execution_duration_ms(&self) -> u64 {
        self.execution_duration.as_millis() as u64
    }

    /// Whether the run converged instead of being cut off.
    pub fn converged(&self) -> bool {
        self.termination.is_converged()
    }

    /// Equality on everything except wall-clock time.
    pub fn same_outcome(&self, other: &Self) -> bool {
        self.strategy == other.strategy
            && self.best_candidate == other.best_candidate
            && self.best_fitness.to_bits() == other.best_fitness.to_bits()
            && self.scores == other.scores
            && self.iterations == other.iterations
            && self.termination == other.termination
            && self.fitness_history == other.fitness_history
            && self.metrics == other.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converged_reasons() {
        assert!(TerminationReason::TargetReached.is_converged());
        assert!(TerminationReason::Stagnated.is_converged());
        assert!(TerminationReason::Cooled.is_converged());
        assert!(!TerminationReason::BudgetExhausted.is_converged());
        assert!(!TerminationReason::Cancelled.is_converged());
        assert!(!TerminationReason::TimeLimit.is_converged());
    }

    #[test]
    fn test_display() {
        assert_eq!(TerminationReason::BudgetExhausted.to_string(), "budget exhausted");
        assert_eq!(TerminationReason::TimeLimit.to_string(), "time limit");
    }
}
