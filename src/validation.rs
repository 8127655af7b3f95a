//! Input validation for roster problems.
//!
//! Checks structural integrity of a [`ProblemConfig`] before any search
//! starts. Detects:
//! - Empty employee or shift sets
//! - Inverted date ranges
//! - Duplicate IDs
//! - Rest shifts missing from the catalogue
//! - Out-of-range probabilities, weights and tuning parameters
//!
//! All problems are collected; validation never stops at the first one.
//! Degenerate but solvable inputs (one employee, one day, weights not
//! summing to 1) pass and are reported through `log::warn!` instead.

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::models::ProblemConfig;

/// Validation result.
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No employees to roster.
    EmptyEmployees,
    /// Empty shift catalogue.
    EmptyShifts,
    /// End date precedes start date.
    InvalidDateRange,
    /// Two employees or two shifts share the same ID.
    DuplicateId,
    /// A rest shift is not part of the shift catalogue.
    UnknownRestShift,
    /// A staffing override falls outside the period.
    RequirementOutOfRange,
    /// A probability or rate is outside its allowed interval.
    InvalidRate,
    /// An objective weight or cost is negative or not finite.
    InvalidWeight,
    /// A search tuning parameter is out of range.
    InvalidParameter,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster problem.
///
/// Checks:
/// 1. At least one employee and one shift
/// 2. `start_date <= end_date`
/// 3. No duplicate employee or shift IDs
/// 4. Every rest shift is in the catalogue
/// 5. Staffing overrides lie inside the period
/// 6. Weights and overtime cost are finite and non-negative
/// 7. GA rates lie in their intervals, population ≥ 2
/// 8. Annealing temperature > 0, cooling rate in (0, 1)
/// 9. Consecutive-work limit ≥ 1
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &ProblemConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if problem.employee_ids.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyEmployees,
            "Employee set is empty",
        ));
    }
    if problem.shift_ids.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyShifts,
            "Shift catalogue is empty",
        ));
    }
    if problem.end_date < problem.start_date {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidDateRange,
            format!(
                "End date {} precedes start date {}",
                problem.end_date, problem.start_date
            ),
        ));
    }

    check_duplicates(&problem.employee_ids, "employee", &mut errors);
    check_duplicates(&problem.shift_ids, "shift", &mut errors);

    for rest in &problem.rest_shift_ids {
        if !problem.shift_ids.contains(rest) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRestShift,
                format!("Rest shift {rest} is not in the shift catalogue"),
            ));
        }
    }

    for date in problem.constraints.staff_requirements.keys() {
        if !problem.contains_date(*date) {
            errors.push(ValidationError::new(
                ValidationErrorKind::RequirementOutOfRange,
                format!("Staff requirement for {date} is outside the roster period"),
            ));
        }
    }

    let w = &problem.weights;
    for (name, value) in [
        ("fairness", w.fairness),
        ("cost", w.cost),
        ("efficiency", w.efficiency),
        ("satisfaction", w.satisfaction),
        ("overtime_cost_per_shift", problem.constraints.overtime_cost_per_shift),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeight,
                format!("{name} must be finite and non-negative, got {value}"),
            ));
        }
    }

    let g = &problem.genetic;
    check_rate("crossover_rate", g.crossover_rate, true, &mut errors);
    check_rate("mutation_rate", g.mutation_rate, true, &mut errors);
    check_rate("elitism_rate", g.elitism_rate, true, &mut errors);
    check_rate("selection_rate", g.selection_rate, false, &mut errors);

    if g.population_size < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidParameter,
            format!("population_size must be at least 2, got {}", g.population_size),
        ));
    }
    if !g.target_fitness.is_finite() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidParameter,
            "target_fitness must be finite",
        ));
    }

    let a = &problem.annealing;
    if !(a.initial_temperature.is_finite() && a.initial_temperature > 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidParameter,
            format!(
                "initial_temperature must be positive, got {}",
                a.initial_temperature
            ),
        ));
    }
    if !(a.cooling_rate > 0.0 && a.cooling_rate < 1.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidRate,
            format!("cooling_rate must be in (0, 1), got {}", a.cooling_rate),
        ));
    }

    if problem.constraints.max_consecutive_work_days < 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidParameter,
            "max_consecutive_work_days must be at least 1",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a problem for an optimizer run.
///
/// Wraps [`validate_problem`] into the crate error type and logs warnings
/// for inputs that are legal but degenerate.
pub fn ensure_valid(problem: &ProblemConfig) -> Result<()> {
    validate_problem(problem).map_err(Error::InvalidProblem)?;

    if problem.employee_ids.len() == 1 {
        log::warn!("single employee: fairness is trivially 1.0 and crossover is a no-op");
    }
    if problem.period_days() == 1 {
        log::warn!("single-day roster: consecutive-work rules cannot be violated");
    }
    if !problem.weights.is_normalized() {
        log::warn!(
            "objective weights sum to {:.4}, combined fitness is not bounded by 1.0",
            problem.weights.sum()
        );
    }
    Ok(())
}

fn check_duplicates<T>(ids: &[T], label: &str, errors: &mut Vec<ValidationError>)
where
    T: Eq + Hash + std::fmt::Display,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {label} ID: {id}"),
            ));
        }
    }
}

/// `closed_low`: interval is `[0, 1]`; otherwise `(0, 1]`.
fn check_rate(name: &str, value: f64, closed_low: bool, errors: &mut Vec<ValidationError>) {
    let ok = if closed_low {
        (0.0..=1.0).contains(&value)
    } else {
        value > 0.0 && value <= 1.0
    };
    if !ok {
        let interval = if closed_low { "[0, 1]" } else { "(0, 1]" };
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidRate,
            format!("{name} must be in {interval}, got {value}"),
        ));
    }
}
