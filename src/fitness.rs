//! Multi-objective roster fitness.
//!
//! Scores a [`ScheduleCandidate`] against a [`ProblemConfig`] on four
//! independent objectives, each in `[0, 1]` (higher is better), and combines
//! them with the problem's [`ObjectiveWeights`](crate::models::ObjectiveWeights).
//!
//! # Objectives
//!
//! | Objective | Definition | Neutral value |
//! |-----------|-----------|---------------|
//! | Fairness | `1 - (max - min) / max` over worked days per employee | 1.0 if all equal, 0.5 if no employees |
//! | Cost | `1 - overtime_cost / max_possible_cost`, clamped | 1.0 if max cost is 0 |
//! | Efficiency | mean of `clamp(actual / required, 0.8, 1.2)` over staffed days, capped at 1.0 | 1.0 if no day needs staff |
//! | Satisfaction | `1 - violation_days / (employees × days)`, clamped | 1.0 if the denominator is 0 |
//!
//! Combined fitness is the plain weighted sum; weights that do not sum to
//! 1.0 are passed through unchanged.
//!
//! # Reference
//! Burke et al. (2004), "The State of the Art of Nurse Rostering",
//! J. Scheduling 7(6): 441-499

use serde::{Deserialize, Serialize};

use crate::ga::ScheduleCandidate;
use crate::models::ProblemConfig;

/// Sub-scores and combined fitness of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessScores {
    /// Workload fairness (0.0..1.0).
    pub fairness: f64,
    /// Overtime cost score (0.0..1.0).
    pub cost: f64,
    /// Staffing efficiency (0.0..1.0).
    pub efficiency: f64,
    /// Rest-rule satisfaction (0.0..1.0).
    pub satisfaction: f64,
    /// Weighted sum of the four sub-scores.
    pub total: f64,
}

impl FitnessScores {
    /// The four sub-scores in weight order.
    pub fn objectives(&self) -> [f64; 4] {
        [self.fairness, self.cost, self.efficiency, self.satisfaction]
    }
}

/// Stateless fitness evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FitnessEvaluator;

impl FitnessEvaluator {
    /// Scores a candidate and writes the scores into its cache.
    pub fn evaluate(candidate: &mut ScheduleCandidate, problem: &ProblemConfig) -> FitnessScores {
        let scores = Self::score(candidate, problem);
        candidate.set_scores(scores);
        scores
    }

    /// Scores a candidate without touching its cache.
    pub fn score(candidate: &ScheduleCandidate, problem: &ProblemConfig) -> FitnessScores {
        let fairness = Self::fairness(candidate, problem);
        let cost = Self::cost(candidate, problem);
        let efficiency = Self::efficiency(candidate, problem);
        let satisfaction = Self::satisfaction(candidate, problem);

        let total: f64 = [fairness, cost, efficiency, satisfaction]
            .iter()
            .zip(problem.weights.as_array())
            .map(|(score, weight)| score * weight)
            .sum();

        FitnessScores {
            fairness,
            cost,
            efficiency,
            satisfaction,
            total,
        }
    }

    /// Range-based workload fairness.
    pub fn fairness(candidate: &ScheduleCandidate, problem: &ProblemConfig) -> f64 {
        let counts: Vec<usize> = problem
            .employee_ids
            .iter()
            .map(|&e| candidate.count_employee_work_days(e, &problem.rest_shift_ids))
            .collect();

        let (Some(&max), Some(&min)) = (counts.iter().max(), counts.iter().min()) else {
            return 0.5;
        };
        if max == min {
            return 1.0;
        }
        1.0 - (max - min) as f64 / max as f64
    }

    /// Overtime cost score.
    pub fn cost(candidate: &ScheduleCandidate, problem: &ProblemConfig) -> f64 {
        let per_shift = problem.constraints.overtime_cost_per_shift;
        let max_cost =
            problem.employee_ids.len() as f64 * problem.period_days() as f64 * per_shift;
        if max_cost <= 0.0 {
            return 1.0;
        }
        let overtime = candidate.count_overtime_shifts(&problem.calendar, &problem.rest_shift_ids)
            as f64
            * per_shift;
        (1.0 - overtime / max_cost).clamp(0.0, 1.0)
    }

    /// Staffing efficiency.
    pub fn efficiency(candidate: &ScheduleCandidate, problem: &ProblemConfig) -> f64 {
        let mut sum = 0.0;
        let mut days = 0usize;
        for date in problem.dates() {
            let required = problem.constraints.required_staff(date);
            if required == 0 {
                continue;
            }
            let actual = candidate.count_staff_on_day(date, &problem.rest_shift_ids);
            sum += (actual as f64 / required as f64).clamp(0.8, 1.2);
            days += 1;
        }
        if days == 0 {
            return 1.0;
        }
        (sum / days as f64).min(1.0)
    }

    /// Consecutive-work satisfaction.
    pub fn satisfaction(candidate: &ScheduleCandidate, problem: &ProblemConfig) -> f64 {
        let max_violations = problem.employee_ids.len() * problem.period_days();
        if max_violations == 0 {
            return 1.0;
        }
        let violations = candidate.count_consecutive_work_violations(
            problem.constraints.max_consecutive_work_days,
            &problem.rest_shift_ids,
        );
        (1.0 - violations as f64 / max_violations as f64).clamp(0.0, 1.0)
    }
}
