//! Hybrid strategy: independent genetic and annealing phases.
//!
//! Both phases run from scratch on clones of the problem whose generation
//! budget is halved (at least 1) and whose time limit, if any, is split in
//! half. The phase with the higher best fitness wins; a tie goes to the
//! genetic phase.
//!
//! Progress from both phases is reported on one iteration counter: annealing
//! iterations continue where the genetic generations stopped.

use std::time::Instant;

use rand::Rng;

use super::{Optimizer, ProgressCallback, ProgressInfo, Strategy};
use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::ga::GeneticOptimizer;
use crate::models::ProblemConfig;
use crate::result::OptimizationResult;
use crate::sa::AnnealingOptimizer;
use crate::validation::ensure_valid;

/// Runs GA then SA on half budgets and keeps the better result.
#[derive(Debug, Clone, Default)]
pub struct HybridOptimizer {
    cancel: CancellationToken,
}

impl HybridOptimizer {
    /// Creates an optimizer with its own cancellation token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an existing cancellation token (shared by both phases).
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns a handle to cancel running optimizations.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Problem clone used by each phase.
    pub fn phase_problem(problem: &ProblemConfig) -> ProblemConfig {
        let mut phase = problem.clone();
        phase.genetic.max_generations = (problem.genetic.max_generations / 2).max(1);
        phase.time_limit = problem.time_limit.map(|limit| limit / 2);
        phase
    }

    pub(crate) fn run<R: Rng + ?Sized>(
        &self,
        problem: &ProblemConfig,
        rng: &mut R,
        progress: &dyn Fn(ProgressInfo),
    ) -> OptimizationResult {
        let start = Instant::now();

        let genetic_problem = Self::phase_problem(problem);
        log::debug!(
            "hybrid: genetic phase, {} generations",
            genetic_problem.genetic.max_generations
        );
        let genetic = GeneticOptimizer::new()
            .with_cancellation(self.cancel.clone())
            .run(&genetic_problem, rng, &|info: ProgressInfo| {
                progress(ProgressInfo::new(info.iteration, info.best_fitness, start, true))
            });

        let annealing_problem = Self::phase_problem(problem);
        log::debug!(
            "hybrid: annealing phase, {} iterations",
            annealing_problem.annealing_iteration_budget()
        );
        let annealing = AnnealingOptimizer::new()
            .with_cancellation(self.cancel.clone())
            .run(&annealing_problem, rng, &|info: ProgressInfo| {
                let iteration = genetic.iterations.saturating_add(info.iteration);
                let best = info.best_fitness.max(genetic.best_fitness);
                progress(ProgressInfo::new(iteration, best, start, true))
            });

        let iterations = genetic.iterations.saturating_add(annealing.iterations);
        let execution_duration = genetic.execution_duration + annealing.execution_duration;
        let (winner, loser) = if annealing.best_fitness > genetic.best_fitness {
            (annealing, genetic)
        } else {
            (genetic, annealing)
        };
        log::info!(
            "hybrid: {} phase wins ({:.6} vs {:.6}), {} ms",
            winner.strategy,
            winner.best_fitness,
            loser.best_fitness,
            start.elapsed().as_millis()
        );
        progress(ProgressInfo::new(iterations, winner.best_fitness, start, false));

        OptimizationResult {
            strategy: Strategy::Hybrid,
            iterations,
            execution_duration,
            ..winner
        }
    }
}

impl Optimizer for HybridOptimizer {
    fn strategy(&self) -> Strategy {
        Strategy::Hybrid
    }

    fn optimize_with_progress<R: Rng + ?Sized>(
        &self,
        problem: &ProblemConfig,
        rng: &mut R,
        callback: ProgressCallback,
    ) -> Result<OptimizationResult> {
        ensure_valid(problem)?;
        Ok(self.run(problem, rng, callback.as_ref()))
    }
}
