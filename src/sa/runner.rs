//! Annealing runner.
//!
//! # Algorithm
//!
//! ```text
//! current ← random, T ← initial_temperature
//! loop:
//!     neighbour ← clone(current) + one mutation
//!     Δ ← f(neighbour) - f(current)
//!     accept if Δ > 0, else with probability exp(Δ / T)
//!     T ← T × cooling_rate
//! until T ≤ 1.0 or iterations = max_generations × 10
//! ```

use std::time::Instant;

use rand::Rng;

use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::fitness::FitnessEvaluator;
use crate::ga::ScheduleCandidate;
use crate::models::ProblemConfig;
use crate::result::{OptimizationResult, TerminationReason};
use crate::strategy::{Optimizer, ProgressCallback, ProgressInfo, Strategy};
use crate::validation::ensure_valid;

/// Temperature at or below which the search counts as cooled.
const FREEZING_TEMPERATURE: f64 = 1.0;

/// Simulated annealing optimizer.
#[derive(Debug, Clone, Default)]
pub struct AnnealingOptimizer {
    cancel: CancellationToken,
}

impl AnnealingOptimizer {
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

    pub(crate) fn run<R: Rng + ?Sized>(
        &self,
        problem: &ProblemConfig,
        rng: &mut R,
        progress: &dyn Fn(ProgressInfo),
    ) -> OptimizationResult {
        let start = Instant::now();
        let params = &problem.annealing;
        let budget = problem.annealing_iteration_budget();
        log::info!(
            "annealing: {} employees × {} days, T0 {}, cooling {}, max {} iterations",
            problem.employee_ids.len(),
            problem.period_days(),
            params.initial_temperature,
            params.cooling_rate,
            budget
        );

        let mut current = ScheduleCandidate::random(problem, rng);
        FitnessEvaluator::evaluate(&mut current, problem);
        let mut best = current.clone();
        let mut best_fitness = best.fitness();

        let mut temperature = params.initial_temperature;
        let mut iteration = 0u64;
        let mut history = vec![best_fitness];

        let termination = loop {
            progress(ProgressInfo::new(iteration, best_fitness, start, true));
            if temperature <= FREEZING_TEMPERATURE {
                break TerminationReason::Cooled;
            }
            if iteration >= budget {
                break TerminationReason::BudgetExhausted;
            }
            if self.cancel.is_cancelled() {
                log::warn!("annealing: cancelled at iteration {iteration}");
                break TerminationReason::Cancelled;
            }
            if problem.time_limit.is_some_and(|limit| start.elapsed() > limit) {
                log::warn!("annealing: time limit hit at iteration {iteration}");
                break TerminationReason::TimeLimit;
            }

            let mut neighbor = current.clone();
            neighbor.mutate(&problem.shift_ids, rng);
            FitnessEvaluator::evaluate(&mut neighbor, problem);

            let delta = neighbor.fitness() - current.fitness();
            let accept = delta > 0.0 || rng.random::<f64>() < (delta / temperature).exp();
            if accept {
                current = neighbor;
                if current.fitness() > best_fitness {
                    best = current.clone();
                    best_fitness = current.fitness();
                    log::debug!(
                        "annealing: iteration {iteration} T {temperature:.4} best {best_fitness:.6}"
                    );
                }
            }

            temperature *= params.cooling_rate;
            iteration += 1;
            history.push(best_fitness);
        };

        progress(ProgressInfo::new(iteration, best_fitness, start, false));
        let elapsed = start.elapsed();
        log::info!(
            "annealing: {termination} after {iteration} iterations, fitness {best_fitness:.6}, \
             {} ms",
            elapsed.as_millis()
        );

        OptimizationResult::from_search(
            Strategy::Annealing,
            best,
            problem,
            iteration,
            elapsed,
            termination,
            history,
        )
    }
}

impl Optimizer for AnnealingOptimizer {
    fn strategy(&self) -> Strategy {
        Strategy::Annealing
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn two_by_two() -> ProblemConfig {
        ProblemConfig::new(vec![1, 2], vec![10, 20], date(1), date(2))
            .with_max_consecutive_work_days(7)
            .with_temperature(100.0, 0.9)
    }

    #[test]
    fn test_two_by_two_cools() {
        let p = two_by_two();
        let mut rng = SmallRng::seed_from_u64(42);
        let result = AnnealingOptimizer::new().optimize(&p, &mut rng).unwrap();

        // 100 × 0.9^44 < 1.0 < 100 × 0.9^43
        assert_eq!(result.iterations, 44);
        assert!(result.iterations <= p.annealing_iteration_budget());
        assert_eq!(result.termination, TerminationReason::Cooled);
        assert!(result.converged());

        for e in [1, 2] {
            for d in [date(1), date(2)] {
                assert!(result.best_candidate.shift_on(e, d).is_some());
            }
        }
    }

    #[test]
    fn test_budget_caps_iterations() {
        let p = two_by_two()
            .with_temperature(1e9, 0.999)
            .with_max_generations(3);
        let mut rng = SmallRng::seed_from_u64(42);
        let result = AnnealingOptimizer::new().optimize(&p, &mut rng).unwrap();
        assert_eq!(result.iterations, 30);
        assert_eq!(result.termination, TerminationReason::BudgetExhausted);
    }

    #[test]
    fn test_best_ever_non_decreasing() {
        let p = ProblemConfig::new(vec![1, 2, 3], vec![10, 20, 99], date(1), date(14))
            .with_rest_shifts([99])
            .with_temperature(50.0, 0.99);
        let mut rng = SmallRng::seed_from_u64(9);
        let result = AnnealingOptimizer::new().optimize(&p, &mut rng).unwrap();

        assert_eq!(result.fitness_history.len() as u64, result.iterations + 1);
        for w in result.fitness_history.windows(2) {
            assert!(w[1] >= w[0]);
        }
        assert!(result.best_fitness >= result.fitness_history[0]);
    }

    #[test]
    fn test_cancelled() {
        let optimizer = AnnealingOptimizer::new();
        optimizer.cancel_handle().cancel();
        let mut rng = SmallRng::seed_from_u64(42);
        let result = optimizer.optimize(&two_by_two(), &mut rng).unwrap();
        assert_eq!(result.termination, TerminationReason::Cancelled);
        assert_eq!(result.iterations, 0);
        assert!(!result.converged());
    }

    #[test]
    fn test_zero_time_limit() {
        let p = two_by_two()
            .with_temperature(1e6, 0.999)
            .with_time_limit(std::time::Duration::ZERO);
        let mut rng = SmallRng::seed_from_u64(42);
        let result = AnnealingOptimizer::new().optimize(&p, &mut rng).unwrap();
        assert_eq!(result.termination, TerminationReason::TimeLimit);
        assert!(!result.converged());
        assert!(result.iterations < p.annealing_iteration_budget());
        assert!(result.best_candidate.is_valid(&p));
    }

    #[test]
    fn test_huge_generation_budget_still_cools() {
        let p = two_by_two().with_max_generations(usize::MAX);
        let mut rng = SmallRng::seed_from_u64(42);
        let result = AnnealingOptimizer::new().optimize(&p, &mut rng).unwrap();
        assert_eq!(result.iterations, 44);
        assert_eq!(result.termination, TerminationReason::Cooled);
    }

    #[test]
    fn test_progress_matches_history() {
        use std::sync::{Arc, Mutex};

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut rng = SmallRng::seed_from_u64(42);
        let result = AnnealingOptimizer::new()
            .optimize_with_progress(
                &two_by_two(),
                &mut rng,
                Box::new(move |info: ProgressInfo| sink.lock().unwrap().push(info)),
            )
            .unwrap();

        let seen = seen.lock().unwrap();
        // one report per loop check plus the final one
        assert_eq!(seen.len() as u64, result.iterations + 2);
        for (i, (info, &h)) in seen.iter().zip(&result.fitness_history).enumerate() {
            assert_eq!(info.iteration, i as u64);
            assert_eq!(info.best_fitness, h);
            assert!(info.running);
        }
        assert!(!seen[seen.len() - 1].running);
    }

    #[test]
    fn test_seed_determinism() {
        let p = two_by_two().with_temperature(500.0, 0.98);
        let a = AnnealingOptimizer::new()
            .optimize(&p, &mut SmallRng::seed_from_u64(5))
            .unwrap();
        let b = AnnealingOptimizer::new()
            .optimize(&p, &mut SmallRng::seed_from_u64(5))
            .unwrap();
        assert!(a.same_outcome(&b));
    }

    #[test]
    fn test_invalid_cooling_rejected() {
        let p = two_by_two().with_temperature(100.0, 1.5);
        let mut rng = SmallRng::seed_from_u64(42);
        assert!(AnnealingOptimizer::new().optimize(&p, &mut rng).is_err());
    }
}
