//! Generational GA runner for rosters.
//!
//! # Algorithm
//!
//! 1. Initialize `population_size` random candidates.
//! 2. Evaluate, stable-sort best-first.
//! 3. Build the next generation (see [`operators::next_generation`]).
//! 4. Repeat until a stop condition holds.
//!
//! Stop conditions, checked before every generation:
//! best-ever ≥ `target_fitness`, `max_generations` reached,
//! `stagnation_limit` generations without best-ever improvement,
//! cancellation, time limit. Progress is reported just before the checks.
//!
//! The population is not monotonic; the best-ever candidate is kept apart
//! from it and is what the result reports.

use std::time::Instant;

use rand::Rng;

use super::chromosome::ScheduleCandidate;
use super::operators;
use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::fitness::FitnessEvaluator;
use crate::models::ProblemConfig;
use crate::result::{OptimizationResult, TerminationReason};
use crate::strategy::{Optimizer, ProgressCallback, ProgressInfo, Strategy};
use crate::validation::ensure_valid;

/// Genetic algorithm optimizer.
///
/// Holds no RNG and no run state, so one instance can serve concurrent
/// runs on different threads, each with its own RNG.
#[derive(Debug, Clone, Default)]
pub struct GeneticOptimizer {
    cancel: CancellationToken,
}

impl GeneticOptimizer {
    /// Creates an optimizer with its own cancellation token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an existing cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns a handle to cancel running optimizations.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs the GA on an already validated problem.
    pub(crate) fn run<R: Rng + ?Sized>(
        &self,
        problem: &ProblemConfig,
        rng: &mut R,
        progress: &dyn Fn(ProgressInfo),
    ) -> OptimizationResult {
        let start = Instant::now();
        let params = &problem.genetic;
        log::info!(
            "genetic: {} employees × {} days, population {}, max {} generations",
            problem.employee_ids.len(),
            problem.period_days(),
            params.population_size,
            params.max_generations
        );

        let mut population: Vec<ScheduleCandidate> = (0..params.population_size)
            .map(|_| ScheduleCandidate::random(problem, rng))
            .collect();
        evaluate_and_sort(&mut population, problem);

        let mut best = population
            .first()
            .cloned()
            .unwrap_or_else(ScheduleCandidate::empty);
        let mut best_fitness = best.fitness();
        let mut history = vec![best_fitness];
        let mut generation = 0usize;
        let mut stagnant = 0usize;

        let termination = loop {
            progress(ProgressInfo::new(generation as u64, best_fitness, start, true));
            if best_fitness >= params.target_fitness {
                break TerminationReason::TargetReached;
            }
            if generation >= params.max_generations {
                break TerminationReason::BudgetExhausted;
            }
            if stagnant >= params.stagnation_limit {
                break TerminationReason::Stagnated;
            }
            if self.cancel.is_cancelled() {
                log::warn!("genetic: cancelled at generation {generation}");
                break TerminationReason::Cancelled;
            }
            if problem.time_limit.is_some_and(|limit| start.elapsed() > limit) {
                log::warn!("genetic: time limit hit at generation {generation}");
                break TerminationReason::TimeLimit;
            }

            population = operators::next_generation(&population, params, &problem.shift_ids, rng);
            evaluate_and_sort(&mut population, problem);
            generation += 1;

            match population.first() {
                Some(leader) if leader.fitness() > best_fitness => {
                    best = leader.clone();
                    best_fitness = leader.fitness();
                    stagnant = 0;
                    log::debug!("genetic: generation {generation} best {best_fitness:.6}");
                }
                _ => stagnant += 1,
            }
            history.push(best_fitness);
        };

        progress(ProgressInfo::new(generation as u64, best_fitness, start, false));
        let elapsed = start.elapsed();
        log::info!(
            "genetic: {termination} after {generation} generations, fitness {best_fitness:.6}, \
             {} ms",
            elapsed.as_millis()
        );

        OptimizationResult::from_search(
            Strategy::Genetic,
            best,
            problem,
            generation as u64,
            elapsed,
            termination,
            history,
        )
    }
}

impl Optimizer for GeneticOptimizer {
    fn strategy(&self) -> Strategy {
        Strategy::Genetic
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

/// Evaluates stale candidates and sorts best-first (stable).
fn evaluate_and_sort(population: &mut [ScheduleCandidate], problem: &ProblemConfig) {
    for candidate in population.iter_mut() {
        if !candidate.is_evaluated() {
            FitnessEvaluator::evaluate(candidate, problem);
        }
    }
    population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
}
