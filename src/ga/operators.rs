//! Generation operators for the roster GA.
//!
//! One generation step is elitism, roulette-wheel selection, pairwise
//! crossover and per-candidate mutation, in that order:
//!
//! ```text
//! sorted population ──► [elite clones] ─────────────────────────────┐
//!                  └──► roulette over top pool ─► crossover (i,i+1) ─► mutate ─► next
//! ```
//!
//! Elites never receive crossover or mutation. The population size is the
//! same before and after every step.
//!
//! # Usage
//!
//! ```
//! use u_roster::ga::operators::{elite_count, selection_pool_size};
//!
//! assert_eq!(elite_count(100, 0.1), 10);
//! assert_eq!(elite_count(4, 0.1), 2);
//! assert_eq!(selection_pool_size(100, 0.5), 50);
//! ```
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//! Machine Learning", Ch. 1.4 (reproduction)

use rand::prelude::IndexedRandom;
use rand::Rng;

use super::chromosome::ScheduleCandidate;
use crate::models::{GeneticParams, ShiftId};

/// Number of elites carried over: `max(2, floor(N × rate))`, capped at `N`.
///
/// The elite block is sized by `elitism_rate`; the two best candidates
/// always survive even when the rate rounds to fewer. Every other slot is
/// filled by roulette selection. There is no random-refill step.
///
/// With the defaults (`N = 100`, rate `0.1`) this keeps 10 elites.
pub fn elite_count(population_size: usize, elitism_rate: f64) -> usize {
    let by_rate = (population_size as f64 * elitism_rate).floor() as usize;
    by_rate.max(2).min(population_size)
}

/// Size of the roulette pool: `ceil(N × rate)`, clamped to `[1, N]`.
pub fn selection_pool_size(population_size: usize, selection_rate: f64) -> usize {
    let by_rate = (population_size as f64 * selection_rate).ceil() as usize;
    by_rate.clamp(1, population_size.max(1))
}

/// Fitness-proportionate pick from a population.
///
/// Draws a point in `[0, total)` and returns the first candidate whose
/// cumulative fitness meets or exceeds it. Falls back to a uniform pick
/// when the total is not positive. `None` only for an empty slice.
pub fn roulette_select<'a, R: Rng + ?Sized>(
    population: &'a [ScheduleCandidate],
    rng: &mut R,
) -> Option<&'a ScheduleCandidate> {
    let total: f64 = population.iter().map(|c| c.fitness().max(0.0)).sum();
    if !(total.is_finite() && total > 0.0) {
        return population.choose(rng);
    }

    let point = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for candidate in population {
        cumulative += candidate.fitness().max(0.0);
        if cumulative >= point {
            return Some(candidate);
        }
    }
    population.last()
}

/// Crosses consecutive pairs `(0,1), (2,3), …` in place, each with
/// probability `rate`. An odd trailing candidate passes through.
pub fn crossover_pairs<R: Rng + ?Sized>(
    candidates: &mut [ScheduleCandidate],
    rate: f64,
    rng: &mut R,
) {
    for pair in candidates.chunks_exact_mut(2) {
        if rng.random_bool(rate) {
            let (left, right) = pair.split_at_mut(1);
            left[0].crossover(&mut right[0], rng);
        }
    }
}

/// Mutates each candidate once with probability `rate`.
pub fn mutate_population<R: Rng + ?Sized>(
    candidates: &mut [ScheduleCandidate],
    rate: f64,
    shift_ids: &[ShiftId],
    rng: &mut R,
) {
    for candidate in candidates {
        if rng.random_bool(rate) {
            candidate.mutate(shift_ids, rng);
        }
    }
}

/// Builds the next generation from a population sorted best-first.
///
/// Returns exactly `sorted.len()` candidates: the elites first, then the
/// crossed and mutated offspring.
pub fn next_generation<R: Rng + ?Sized>(
    sorted: &[ScheduleCandidate],
    params: &GeneticParams,
    shift_ids: &[ShiftId],
    rng: &mut R,
) -> Vec<ScheduleCandidate> {
    let n = sorted.len();
    let elites = elite_count(n, params.elitism_rate);
    let pool = &sorted[..selection_pool_size(n, params.selection_rate).min(n)];

    let mut offspring: Vec<ScheduleCandidate> = (elites..n)
        .filter_map(|_| roulette_select(pool, rng).cloned())
        .collect();
    crossover_pairs(&mut offspring, params.crossover_rate, rng);
    mutate_population(&mut offspring, params.mutation_rate, shift_ids, rng);

    let mut next = Vec::with_capacity(n);
    next.extend_from_slice(&sorted[..elites]);
    next.extend(offspring);
    next
}
