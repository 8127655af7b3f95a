//! Roster problem description.
//!
//! A [`ProblemConfig`] is the immutable input to every optimizer run: who
//! can be rostered, over which dates, with which shift catalogue, how the
//! four objectives are weighted, and how the search is tuned.
//!
//! Built by the calling service, validated by
//! [`validate_problem`](crate::validation::validate_problem) and never
//! modified by an optimizer (the hybrid strategy works on clones).

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::WorkCalendar;

/// Employee identifier.
pub type EmployeeId = u64;

/// Shift-type identifier.
pub type ShiftId = u64;

/// Weights of the four soft objectives.
///
/// Combined fitness is the plain weighted sum of the sub-scores. Weights are
/// expected to sum to 1.0 but are not renormalized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ObjectiveWeights {
    /// Weight of workload fairness.
    pub fairness: f64,
    /// Weight of overtime cost.
    pub cost: f64,
    /// Weight of staffing efficiency.
    pub efficiency: f64,
    /// Weight of employee satisfaction (rest rules).
    pub satisfaction: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self::new(0.25, 0.25, 0.25, 0.25)
    }
}

impl ObjectiveWeights {
    /// Creates a weight set.
    pub fn new(fairness: f64, cost: f64, efficiency: f64, satisfaction: f64) -> Self {
        Self {
            fairness,
            cost,
            efficiency,
            satisfaction,
        }
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.fairness + self.cost + self.efficiency + self.satisfaction
    }

    /// Whether the weights sum to 1.0 (within 1e-6).
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-6
    }

    pub(crate) fn as_array(&self) -> [f64; 4] {
        [self.fairness, self.cost, self.efficiency, self.satisfaction]
    }
}

/// Domain rules scored by the fitness model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RosterConstraints {
    /// Longest allowed run of consecutive worked days.
    pub max_consecutive_work_days: u32,
    /// Minimum rest days per employee over the period (reported by metrics).
    pub min_rest_days: u32,
    /// Required staff per day unless overridden in `staff_requirements`.
    pub min_daily_staff: u32,
    /// Cost of one shift worked on a weekend or holiday.
    pub overtime_cost_per_shift: f64,
    /// Per-date staffing overrides.
    pub staff_requirements: BTreeMap<NaiveDate, u32>,
}

impl Default for RosterConstraints {
    fn default() -> Self {
        Self {
            max_consecutive_work_days: 6,
            min_rest_days: 1,
            min_daily_staff: 1,
            overtime_cost_per_shift: 1.0,
            staff_requirements: BTreeMap::new(),
        }
    }
}

impl RosterConstraints {
    /// Staff required on a given date.
    pub fn required_staff(&self, date: NaiveDate) -> u32 {
        self.staff_requirements
            .get(&date)
            .copied()
            .unwrap_or(self.min_daily_staff)
    }
}

/// Genetic algorithm tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneticParams {
    /// Candidates per generation.
    pub population_size: usize,
    /// Generation budget.
    pub max_generations: usize,
    /// Probability that a selected pair is crossed over.
    pub crossover_rate: f64,
    /// Probability that a candidate receives one mutation.
    pub mutation_rate: f64,
    /// Fraction of the sorted population eligible for roulette selection.
    pub selection_rate: f64,
    /// Fraction of the population carried over unchanged. Never fewer than
    /// 2 candidates, see [`elite_count`](crate::ga::operators::elite_count).
    pub elitism_rate: f64,
    /// Generations without best-ever improvement before stopping.
    pub stagnation_limit: usize,
    /// Best-ever fitness at which the search stops.
    pub target_fitness: f64,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            selection_rate: 1.0,
            elitism_rate: 0.1,
            stagnation_limit: 50,
            target_fitness: 0.95,
        }
    }
}

/// Simulated annealing tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnealingParams {
    /// Starting temperature.
    pub initial_temperature: f64,
    /// Geometric cooling factor applied every iteration.
    pub cooling_rate: f64,
}

impl Default for AnnealingParams {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.95,
        }
    }
}

/// A complete roster optimization problem.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_roster::models::{ObjectiveWeights, ProblemConfig};
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// let problem = ProblemConfig::new(vec![1, 2, 3], vec![10, 20, 99], start, end)
///     .with_rest_shifts([99])
///     .with_weights(ObjectiveWeights::new(0.4, 0.2, 0.2, 0.2))
///     .with_population_size(30);
///
/// assert_eq!(problem.period_days(), 7);
/// assert_eq!(problem.problem_size(), 21);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProblemConfig {
    /// Employees to roster (ordered, unique).
    pub employee_ids: Vec<EmployeeId>,
    /// Shift catalogue (ordered, unique).
    pub shift_ids: Vec<ShiftId>,
    /// Catalogue entries that mean "day off".
    pub rest_shift_ids: BTreeSet<ShiftId>,
    /// First rostered date (inclusive).
    pub start_date: NaiveDate,
    /// Last rostered date (inclusive).
    pub end_date: NaiveDate,
    /// Weekend/holiday calendar.
    pub calendar: WorkCalendar,
    /// Objective weights.
    pub weights: ObjectiveWeights,
    /// Scored domain rules.
    pub constraints: RosterConstraints,
    /// Genetic algorithm tuning.
    pub genetic: GeneticParams,
    /// Simulated annealing tuning.
    pub annealing: AnnealingParams,
    /// Wall-clock budget per run. `None` = unlimited.
    pub time_limit: Option<Duration>,
}

impl ProblemConfig {
    /// Creates a problem with default weights, constraints and tuning.
    pub fn new(
        employee_ids: Vec<EmployeeId>,
        shift_ids: Vec<ShiftId>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            employee_ids,
            shift_ids,
            rest_shift_ids: BTreeSet::new(),
            start_date,
            end_date,
            calendar: WorkCalendar::default(),
            weights: ObjectiveWeights::default(),
            constraints: RosterConstraints::default(),
            genetic: GeneticParams::default(),
            annealing: AnnealingParams::default(),
            time_limit: None,
        }
    }

    /// Marks catalogue shifts as rest (day-off) shifts.
    pub fn with_rest_shifts(mut self, shifts: impl IntoIterator<Item = ShiftId>) -> Self {
        self.rest_shift_ids.extend(shifts);
        self
    }

    /// Sets the work calendar.
    pub fn with_calendar(mut self, calendar: WorkCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the objective weights.
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the scored domain rules.
    pub fn with_constraints(mut self, constraints: RosterConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets the maximum run of consecutive worked days.
    pub fn with_max_consecutive_work_days(mut self, days: u32) -> Self {
        self.constraints.max_consecutive_work_days = days;
        self
    }

    /// Sets the required daily staff.
    pub fn with_min_daily_staff(mut self, staff: u32) -> Self {
        self.constraints.min_daily_staff = staff;
        self
    }

    /// Overrides the staff requirement for one date.
    pub fn with_staff_requirement(mut self, date: NaiveDate, staff: u32) -> Self {
        self.constraints.staff_requirements.insert(date, staff);
        self
    }

    /// Sets the overtime cost per premium-day shift.
    pub fn with_overtime_cost(mut self, cost: f64) -> Self {
        self.constraints.overtime_cost_per_shift = cost;
        self
    }

    /// Sets all genetic tuning at once.
    pub fn with_genetic(mut self, params: GeneticParams) -> Self {
        self.genetic = params;
        self
    }

    /// Sets the GA population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.genetic.population_size = n;
        self
    }

    /// Sets the generation budget (also scales the annealing budget).
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.genetic.max_generations = n;
        self
    }

    /// Sets crossover and mutation probabilities.
    pub fn with_rates(mut self, crossover_rate: f64, mutation_rate: f64) -> Self {
        self.genetic.crossover_rate = crossover_rate;
        self.genetic.mutation_rate = mutation_rate;
        self
    }

    /// Sets all annealing tuning at once.
    pub fn with_annealing(mut self, params: AnnealingParams) -> Self {
        self.annealing = params;
        self
    }

    /// Sets initial temperature and cooling rate.
    pub fn with_temperature(mut self, initial_temperature: f64, cooling_rate: f64) -> Self {
        self.annealing.initial_temperature = initial_temperature;
        self.annealing.cooling_rate = cooling_rate;
        self
    }

    /// Sets the wall-clock budget per run.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// All dates in the period, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        if self.end_date < self.start_date {
            return Vec::new();
        }
        self.start_date
            .iter_days()
            .take_while(|d| *d <= self.end_date)
            .collect()
    }

    /// Number of days in the period (0 if the range is inverted).
    pub fn period_days(&self) -> usize {
        if self.end_date < self.start_date {
            return 0;
        }
        (self.end_date - self.start_date).num_days() as usize + 1
    }

    /// Whether a date lies inside the period.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Search-space size used for strategy selection: employees × days.
    pub fn problem_size(&self) -> usize {
        self.employee_ids.len() * self.period_days()
    }

    /// Annealing iteration budget: `max_generations × 10`, saturating.
    pub fn annealing_iteration_budget(&self) -> u64 {
        (self.genetic.max_generations as u64).saturating_mul(10)
    }
}
