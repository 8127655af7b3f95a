//! Roster quality metrics.
//!
//! Computes operator-facing indicators for a finished roster. Unlike the
//! fitness sub-scores these are raw counts and statistics, suitable for
//! reports and acceptance thresholds.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total worked shifts | Genes not holding a rest shift |
//! | Avg worked days | Mean worked days per employee |
//! | Work-day std dev | Population standard deviation of worked days |
//! | Overtime shifts | Worked shifts on weekends or holidays |
//! | Overtime cost | Overtime shifts × cost per shift |
//! | Consecutive violations | Violation-days beyond the consecutive-work limit |
//! | Rest shortfall | Sum of max(0, min_rest_days - rest days) per employee |
//! | Understaffed days | Days with fewer staff than required |
//!
//! # Reference
//! Ernst et al. (2004), "Staff scheduling and rostering: A review of
//! applications, methods and models", EJOR 153(1): 3-27

use serde::{Deserialize, Serialize};

use crate::ga::ScheduleCandidate;
use crate::models::ProblemConfig;

/// Roster performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Worked shifts across all employees.
    pub total_worked_shifts: usize,
    /// Mean worked days per employee.
    pub avg_worked_days: f64,
    /// Standard deviation of worked days per employee.
    pub worked_days_std_dev: f64,
    /// Worked shifts on premium days.
    pub overtime_shifts: usize,
    /// Overtime shifts × cost per shift.
    pub overtime_cost: f64,
    /// Violation-days of the consecutive-work rule.
    pub consecutive_violations: usize,
    /// Rest days missing against `min_rest_days`, summed over employees.
    pub rest_shortfall: usize,
    /// Days staffed below requirement.
    pub understaffed_days: usize,
}

impl ScheduleMetrics {
    /// Computes metrics for a candidate.
    ///
    /// # Arguments
    /// * `candidate` - The roster to measure.
    /// * `problem` - The problem it was built for (rules, calendar, period).
    pub fn calculate(candidate: &ScheduleCandidate, problem: &ProblemConfig) -> Self {
        let rest = &problem.rest_shift_ids;
        let dates = problem.dates();

        let worked: Vec<usize> = problem
            .employee_ids
            .iter()
            .map(|&e| candidate.count_employee_work_days(e, rest))
            .collect();
        let total_worked_shifts: usize = worked.iter().sum();

        let (avg_worked_days, worked_days_std_dev) = if worked.is_empty() {
            (0.0, 0.0)
        } else {
            let n = worked.len() as f64;
            let mean = total_worked_shifts as f64 / n;
            let var = worked
                .iter()
                .map(|&w| (w as f64 - mean).powi(2))
                .sum::<f64>()
                / n;
            (mean, var.sqrt())
        };

        let overtime_shifts = candidate.count_overtime_shifts(&problem.calendar, rest);
        let overtime_cost =
            overtime_shifts as f64 * problem.constraints.overtime_cost_per_shift;

        let consecutive_violations = candidate
            .count_consecutive_work_violations(problem.constraints.max_consecutive_work_days, rest);

        let min_rest = problem.constraints.min_rest_days as usize;
        let rest_shortfall: usize = problem
            .employee_ids
            .iter()
            .map(|&e| min_rest.saturating_sub(candidate.count_rest_days(e, &dates, rest)))
            .sum();

        let understaffed_days = dates
            .iter()
            .filter(|&&d| {
                candidate.count_staff_on_day(d, rest)
                    < problem.constraints.required_staff(d) as usize
            })
            .count();

        Self {
            total_worked_shifts,
            avg_worked_days,
            worked_days_std_dev,
            overtime_shifts,
            overtime_cost,
            consecutive_violations,
            rest_shortfall,
            understaffed_days,
        }
    }

    /// Whether the roster meets the given acceptance thresholds.
    pub fn meets_thresholds(&self, max_violations: usize, max_understaffed: usize) -> bool {
        self.consecutive_violations + self.rest_shortfall <= max_violations
            && self.understaffed_days <= max_understaffed
    }
}
