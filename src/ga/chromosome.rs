//! Roster chromosome: employee → date → shift.
//!
//! # Encoding
//!
//! A candidate is a nested ordered map. Each (employee, date) entry is one
//! gene holding a shift ID from the catalogue. A missing date key means the
//! employee is off that day; a gene holding a rest shift counts as off too.
//!
//! Employees iterate in ascending ID order, which fixes the axis used by
//! single-point crossover and keeps every operator deterministic for a
//! given RNG state.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::fitness::FitnessScores;
use crate::models::{EmployeeId, ProblemConfig, ShiftId, WorkCalendar};

/// One candidate roster and its cached fitness.
///
/// The score cache is written by
/// [`FitnessEvaluator::evaluate`](crate::fitness::FitnessEvaluator::evaluate)
/// and cleared by every operator that changes genes, so a stale score is
/// never observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleCandidate {
    assignments: BTreeMap<EmployeeId, BTreeMap<NaiveDate, ShiftId>>,
    scores: Option<FitnessScores>,
}

impl ScheduleCandidate {
    /// Creates an empty candidate (everyone off every day).
    pub fn empty() -> Self {
        Self {
            assignments: BTreeMap::new(),
            scores: None,
        }
    }

    /// Draws a uniformly random shift for every (employee, date) pair.
    ///
    /// No constraint checking: constraints are scored, not enforced.
    pub fn initialize<R: Rng + ?Sized>(
        employee_ids: &[EmployeeId],
        dates: &[NaiveDate],
        shift_ids: &[ShiftId],
        rng: &mut R,
    ) -> Self {
        let mut assignments = BTreeMap::new();
        for &employee in employee_ids {
            let schedule: BTreeMap<NaiveDate, ShiftId> = dates
                .iter()
                .filter_map(|&date| shift_ids.choose(rng).map(|&shift| (date, shift)))
                .collect();
            assignments.insert(employee, schedule);
        }
        Self {
            assignments,
            scores: None,
        }
    }

    /// Random candidate covering the whole problem.
    pub fn random<R: Rng + ?Sized>(problem: &ProblemConfig, rng: &mut R) -> Self {
        Self::initialize(
            &problem.employee_ids,
            &problem.dates(),
            &problem.shift_ids,
            rng,
        )
    }

    /// Assigns a shift, replacing any existing gene. Clears cached scores.
    pub fn assign(&mut self, employee: EmployeeId, date: NaiveDate, shift: ShiftId) {
        self.assignments
            .entry(employee)
            .or_default()
            .insert(date, shift);
        self.scores = None;
    }

    /// Single-point crossover over the employee axis, in place on both.
    ///
    /// Picks a cut `k` in `[1, n)` over the ascending employee list and
    /// swaps the entire per-date schedule of every employee at index ≥ k
    /// between `self` and `other`. Fewer than two employees is a no-op.
    ///
    /// Callers that need an untouched parent must clone first.
    pub fn crossover<R: Rng + ?Sized>(&mut self, other: &mut Self, rng: &mut R) {
        let employees: Vec<EmployeeId> = self.assignments.keys().copied().collect();
        if employees.len() < 2 {
            return;
        }
        let cut = rng.random_range(1..employees.len());
        for employee in &employees[cut..] {
            let mine = self.assignments.remove(employee).unwrap_or_default();
            let theirs = other.assignments.remove(employee).unwrap_or_default();
            self.assignments.insert(*employee, theirs);
            other.assignments.insert(*employee, mine);
        }
        self.scores = None;
        other.scores = None;
    }

    /// Reassigns one random gene to a freshly drawn shift.
    ///
    /// Picks a random employee, then a random date already present in that
    /// employee's schedule. The new shift may equal the old one, so at most
    /// one gene changes. Employees with an empty schedule make this a no-op.
    pub fn mutate<R: Rng + ?Sized>(&mut self, shift_ids: &[ShiftId], rng: &mut R) {
        if self.assignments.is_empty() || shift_ids.is_empty() {
            return;
        }
        let idx = rng.random_range(0..self.assignments.len());
        let Some(schedule) = self.assignments.values_mut().nth(idx) else {
            return;
        };
        if schedule.is_empty() {
            return;
        }
        let day = rng.random_range(0..schedule.len());
        let picked = (schedule.values_mut().nth(day), shift_ids.choose(rng));
        if let (Some(gene), Some(&shift)) = picked {
            *gene = shift;
            self.scores = None;
        }
    }

    // ======================== Queries ========================

    /// Date → shift map of one employee.
    pub fn schedule(&self, employee: EmployeeId) -> Option<&BTreeMap<NaiveDate, ShiftId>> {
        self.assignments.get(&employee)
    }

    /// Shift assigned to an employee on a date.
    pub fn shift_on(&self, employee: EmployeeId, date: NaiveDate) -> Option<ShiftId> {
        self.assignments.get(&employee)?.get(&date).copied()
    }

    /// Employees present in this candidate, ascending.
    pub fn employee_ids(&self) -> impl Iterator<Item = EmployeeId> + '_ {
        self.assignments.keys().copied()
    }

    /// Number of employees present.
    pub fn employee_count(&self) -> usize {
        self.assignments.len()
    }

    /// Total number of genes.
    pub fn gene_count(&self) -> usize {
        self.assignments.values().map(BTreeMap::len).sum()
    }

    /// Days an employee works (genes not holding a rest shift).
    pub fn count_employee_work_days(
        &self,
        employee: EmployeeId,
        rest_shifts: &BTreeSet<ShiftId>,
    ) -> usize {
        self.assignments
            .get(&employee)
            .map(|s| s.values().filter(|shift| !rest_shifts.contains(*shift)).count())
            .unwrap_or(0)
    }

    /// Days in `dates` on which an employee does not work.
    pub fn count_rest_days(
        &self,
        employee: EmployeeId,
        dates: &[NaiveDate],
        rest_shifts: &BTreeSet<ShiftId>,
    ) -> usize {
        dates
            .iter()
            .filter(|&&date| !self.is_working(employee, date, rest_shifts))
            .count()
    }

    /// Worked shifts falling on a weekend or holiday.
    pub fn count_overtime_shifts(
        &self,
        calendar: &WorkCalendar,
        rest_shifts: &BTreeSet<ShiftId>,
    ) -> usize {
        self.assignments
            .values()
            .flat_map(|s| s.iter())
            .filter(|(date, shift)| {
                !rest_shifts.contains(*shift) && calendar.is_premium_day(**date)
            })
            .count()
    }

    /// Employees working on a date.
    pub fn count_staff_on_day(&self, date: NaiveDate, rest_shifts: &BTreeSet<ShiftId>) -> usize {
        self.assignments
            .keys()
            .filter(|&&employee| self.is_working(employee, date, rest_shifts))
            .count()
    }

    /// Total violation-days of the consecutive-work rule.
    ///
    /// Every maximal run of `L` consecutive worked calendar days contributes
    /// `L - max_consecutive` when `L > max_consecutive`. Gaps in the date
    /// keys and rest shifts both break a run.
    pub fn count_consecutive_work_violations(
        &self,
        max_consecutive: u32,
        rest_shifts: &BTreeSet<ShiftId>,
    ) -> usize {
        let max = max_consecutive as usize;
        let mut violations = 0;
        for schedule in self.assignments.values() {
            let mut run = 0usize;
            let mut prev: Option<NaiveDate> = None;
            for (&date, shift) in schedule {
                if rest_shifts.contains(shift) {
                    violations += run.saturating_sub(max);
                    run = 0;
                    prev = None;
                    continue;
                }
                let continues = prev.and_then(|p| p.succ_opt()) == Some(date);
                if !continues {
                    violations += run.saturating_sub(max);
                    run = 0;
                }
                run += 1;
                prev = Some(date);
            }
            violations += run.saturating_sub(max);
        }
        violations
    }

    /// Number of (employee, date) genes whose shift differs from `other`,
    /// counting genes present in only one of the two.
    pub fn differing_genes(&self, other: &Self) -> usize {
        let mut count = 0;
        let employees: BTreeSet<EmployeeId> = self
            .assignments
            .keys()
            .chain(other.assignments.keys())
            .copied()
            .collect();
        for employee in employees {
            let empty = BTreeMap::new();
            let a = self.assignments.get(&employee).unwrap_or(&empty);
            let b = other.assignments.get(&employee).unwrap_or(&empty);
            let dates: BTreeSet<&NaiveDate> = a.keys().chain(b.keys()).collect();
            count += dates.into_iter().filter(|d| a.get(*d) != b.get(*d)).count();
        }
        count
    }

    /// Set of (employee, date) keys.
    pub fn gene_keys(&self) -> BTreeSet<(EmployeeId, NaiveDate)> {
        self.assignments
            .iter()
            .flat_map(|(&e, s)| s.keys().map(move |&d| (e, d)))
            .collect()
    }

    /// Checks that every gene uses an in-range date and a catalogue shift,
    /// and that only known employees appear.
    pub fn is_valid(&self, problem: &ProblemConfig) -> bool {
        self.assignments.iter().all(|(employee, schedule)| {
            problem.employee_ids.contains(employee)
                && schedule.iter().all(|(date, shift)| {
                    problem.contains_date(*date) && problem.shift_ids.contains(shift)
                })
        })
    }

    // ======================== Score cache ========================

    /// Cached scores from the last evaluation, if still valid.
    pub fn scores(&self) -> Option<&FitnessScores> {
        self.scores.as_ref()
    }

    /// Combined fitness from the last evaluation.
    ///
    /// Returns `f64::NEG_INFINITY` for an unevaluated candidate so it never
    /// outranks an evaluated one.
    pub fn fitness(&self) -> f64 {
        self.scores.map_or(f64::NEG_INFINITY, |s| s.total)
    }

    /// Whether the score cache is populated.
    pub fn is_evaluated(&self) -> bool {
        self.scores.is_some()
    }

    pub(crate) fn set_scores(&mut self, scores: FitnessScores) {
        self.scores = Some(scores);
    }

    fn is_working(
        &self,
        employee: EmployeeId,
        date: NaiveDate,
        rest_shifts: &BTreeSet<ShiftId>,
    ) -> bool {
        self.shift_on(employee, date)
            .is_some_and(|shift| !rest_shifts.contains(&shift))
    }
}
