//! Size-based strategy selection.
//!
//! `problem_size = employees × period_days` is the number of genes in a
//! candidate:
//!
//! | problem_size | Strategy |
//! |--------------|----------|
//! | < 500 | Annealing |
//! | 500 ..< 2000 | Hybrid |
//! | ≥ 2000 | Genetic |

use super::{HybridOptimizer, Strategy};
use crate::models::ProblemConfig;

/// Below this size annealing is selected.
pub const SMALL_PROBLEM_SIZE: usize = 500;

/// From this size on the genetic algorithm is selected.
pub const LARGE_PROBLEM_SIZE: usize = 2000;

/// Pure strategy selection over problem size.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlgorithmSelector;

impl AlgorithmSelector {
    /// Strategy for a problem.
    pub fn select(problem: &ProblemConfig) -> Strategy {
        Self::select_for_size(problem.problem_size())
    }

    /// Strategy for a given number of genes.
    pub fn select_for_size(problem_size: usize) -> Strategy {
        if problem_size < SMALL_PROBLEM_SIZE {
            Strategy::Annealing
        } else if problem_size >= LARGE_PROBLEM_SIZE {
            Strategy::Genetic
        } else {
            Strategy::Hybrid
        }
    }

    /// Operator-facing explanation of the selection.
    pub fn recommendation(problem: &ProblemConfig) -> String {
        let size = problem.problem_size();
        let strategy = Self::select_for_size(size);
        let reason = match strategy {
            Strategy::Annealing => format!(
                "small search space (< {SMALL_PROBLEM_SIZE}), annealing converges fastest"
            ),
            Strategy::Genetic => format!(
                "large search space (>= {LARGE_PROBLEM_SIZE}), population diversity needed"
            ),
            Strategy::Hybrid => format!(
                "medium search space ({SMALL_PROBLEM_SIZE}..{LARGE_PROBLEM_SIZE}), \
                 running both and keeping the better result"
            ),
        };
        format!(
            "{} employees × {} days = {size} assignments: {strategy} recommended ({reason}); \
             up to {} fitness evaluations",
            problem.employee_ids.len(),
            problem.period_days(),
            Self::estimated_evaluations(problem, strategy)
        )
    }

    /// Upper bound on fitness evaluations of one run.
    ///
    /// - Genetic: `population_size × (max_generations + 1)`
    /// - Annealing: `1 + min(iteration budget, cooling steps to T ≤ 1)`
    /// - Hybrid: both of the above on the halved budget
    ///
    /// Saturates at `u64::MAX`.
    pub fn estimated_evaluations(problem: &ProblemConfig, strategy: Strategy) -> u64 {
        match strategy {
            Strategy::Genetic => {
                let g = &problem.genetic;
                let generations = (g.max_generations as u64).saturating_add(1);
                (g.population_size as u64).saturating_mul(generations)
            }
            Strategy::Annealing => {
                let a = &problem.annealing;
                let steps = cooling_steps(a.initial_temperature, a.cooling_rate);
                problem.annealing_iteration_budget().min(steps).saturating_add(1)
            }
            Strategy::Hybrid => {
                let phase = HybridOptimizer::phase_problem(problem);
                Self::estimated_evaluations(&phase, Strategy::Genetic)
                    .saturating_add(Self::estimated_evaluations(&phase, Strategy::Annealing))
            }
        }
    }
}

/// Iterations until `t0 × rate^k ≤ 1.0`.
fn cooling_steps(t0: f64, rate: f64) -> u64 {
    if t0 <= 1.0 {
        return 0;
    }
    if !(rate > 0.0 && rate < 1.0) {
        return u64::MAX;
    }
    (t0.ln() / -rate.ln()).ceil() as u64
}
