//! Integration tests for u-roster.

use chrono::NaiveDate;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use u_roster::fitness::FitnessEvaluator;
use u_roster::ga::operators;
use u_roster::models::{ObjectiveWeights, ProblemConfig, WorkCalendar};
use u_roster::{
    AlgorithmSelector, AnnealingOptimizer, CancellationToken, Error, GeneticOptimizer,
    HybridOptimizer, Optimizer, ScheduleCandidate, Strategy, TerminationReason,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Two-week ward roster: 6 nurses, day/night/off.
fn ward_problem() -> ProblemConfig {
    ProblemConfig::new(
        vec![101, 102, 103, 104, 105, 106],
        vec![1, 2, 0],
        date(2024, 4, 1),
        date(2024, 4, 14),
    )
    .with_rest_shifts([0])
    .with_calendar(WorkCalendar::new().with_holiday(date(2024, 4, 10)))
    .with_min_daily_staff(3)
    .with_max_consecutive_work_days(5)
    .with_overtime_cost(150.0)
    .with_population_size(16)
    .with_max_generations(20)
}

mod candidate_tests {
    use super::*;

    #[test]
    fn test_mutation_touches_at_most_one_gene() {
        let p = ward_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let before = ScheduleCandidate::random(&p, &mut rng);
            let mut after = before.clone();
            after.mutate(&p.shift_ids, &mut rng);
            assert!(after.differing_genes(&before) <= 1);
        }
    }

    #[test]
    fn test_crossover_keeps_gene_keys() {
        let p = ward_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let mut a = ScheduleCandidate::random(&p, &mut rng);
            let mut b = ScheduleCandidate::random(&p, &mut rng);
            let (ka, kb) = (a.gene_keys(), b.gene_keys());
            a.crossover(&mut b, &mut rng);
            assert_eq!(a.gene_keys(), ka);
            assert_eq!(b.gene_keys(), kb);
            assert!(a.is_valid(&p) && b.is_valid(&p));
        }
    }

    #[test]
    fn test_sub_scores_bounded() {
        let p = ward_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let mut c = ScheduleCandidate::random(&p, &mut rng);
            let s = FitnessEvaluator::evaluate(&mut c, &p);
            for v in s.objectives() {
                assert!((0.0..=1.0).contains(&v));
            }
            assert!((0.0..=1.0).contains(&s.total));
        }
    }

    #[test]
    fn test_fairness_only_weights() {
        let p = ward_problem().with_weights(ObjectiveWeights::new(1.0, 0.0, 0.0, 0.0));
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let mut c = ScheduleCandidate::random(&p, &mut rng);
            let s = FitnessEvaluator::evaluate(&mut c, &p);
            assert_eq!(s.total, s.fairness);
            assert_eq!(c.fitness(), s.fairness);
        }
    }
}

mod genetic_tests {
    use super::*;

    #[test]
    fn test_population_size_constant() {
        let p = ward_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut population: Vec<ScheduleCandidate> = (0..p.genetic.population_size)
            .map(|_| {
                let mut c = ScheduleCandidate::random(&p, &mut rng);
                FitnessEvaluator::evaluate(&mut c, &p);
                c
            })
            .collect();

        for _ in 0..10 {
            population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
            population =
                operators::next_generation(&population, &p.genetic, &p.shift_ids, &mut rng);
            assert_eq!(population.len(), p.genetic.population_size);
            for c in population.iter_mut() {
                FitnessEvaluator::evaluate(c, &p);
            }
        }
    }

    #[test]
    fn test_four_candidates_one_generation_elitism() {
        let mut p = ward_problem()
            .with_population_size(4)
            .with_max_generations(1)
            .with_rates(1.0, 0.0);
        p.genetic.target_fitness = 2.0;

        // Reproduce the initial population from the same seed.
        let mut replay = SmallRng::seed_from_u64(11);
        let mut initial: Vec<ScheduleCandidate> = (0..4)
            .map(|_| {
                let mut c = ScheduleCandidate::random(&p, &mut replay);
                FitnessEvaluator::evaluate(&mut c, &p);
                c
            })
            .collect();
        initial.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
        let next = operators::next_generation(&initial, &p.genetic, &p.shift_ids, &mut replay);
        assert_eq!(next[0], initial[0]);
        assert_eq!(next[1], initial[1]);

        let mut rng = SmallRng::seed_from_u64(11);
        let result = GeneticOptimizer::new().optimize(&p, &mut rng).unwrap();
        assert_eq!(result.iterations, 1);
        assert_eq!(result.termination, TerminationReason::BudgetExhausted);
        assert!(result.best_fitness >= initial[0].fitness());
    }

    #[test]
    fn test_genetic_best_ever_monotone() {
        let p = ward_problem().with_rates(0.8, 0.3);
        let mut rng = SmallRng::seed_from_u64(3);
        let result = GeneticOptimizer::new().optimize(&p, &mut rng).unwrap();
        for w in result.fitness_history.windows(2) {
            assert!(w[1] >= w[0]);
        }
        assert!(result.best_candidate.is_valid(&p));
    }
}

mod annealing_tests {
    use super::*;

    #[test]
    fn test_two_employees_two_days() {
        let p = ProblemConfig::new(vec![1, 2], vec![10, 20], date(2024, 1, 1), date(2024, 1, 2))
            .with_max_consecutive_work_days(7)
            .with_temperature(100.0, 0.9);
        let mut rng = SmallRng::seed_from_u64(42);
        let result = AnnealingOptimizer::new().optimize(&p, &mut rng).unwrap();

        assert!(result.iterations <= p.genetic.max_generations as u64 * 10);
        assert_eq!(result.best_candidate.employee_count(), 2);
        for e in [1, 2] {
            let schedule = result.best_candidate.schedule(e).unwrap();
            assert_eq!(schedule.len(), 2);
        }
    }

    #[test]
    fn test_annealing_best_ever_monotone() {
        let p = ward_problem().with_temperature(20.0, 0.995);
        let mut rng = SmallRng::seed_from_u64(8);
        let result = AnnealingOptimizer::new().optimize(&p, &mut rng).unwrap();
        for w in result.fitness_history.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }
}

mod strategy_tests {
    use super::*;

    #[test]
    fn test_selector_ten_by_hundred() {
        let start = date(2024, 1, 1);
        let end = date(2024, 4, 9);
        let p = ProblemConfig::new((1..=10).collect(), vec![1, 2], start, end);
        assert_eq!(p.period_days(), 100);
        assert_eq!(AlgorithmSelector::select(&p), Strategy::Hybrid);
        assert!(AlgorithmSelector::recommendation(&p).contains("hybrid"));
    }

    #[test]
    fn test_seed_determinism_all_strategies() {
        let p = ward_problem();
        for s in Strategy::ALL {
            let a = s.optimize(&p, &mut SmallRng::seed_from_u64(2024)).unwrap();
            let b = s.optimize(&p, &mut SmallRng::seed_from_u64(2024)).unwrap();
            assert!(a.same_outcome(&b), "{s} is not deterministic");
        }
    }

    #[test]
    fn test_hybrid_reports_combined_work() {
        let p = ward_problem();
        let mut rng = SmallRng::seed_from_u64(5);
        let result = HybridOptimizer::new().optimize(&p, &mut rng).unwrap();
        assert_eq!(result.strategy, Strategy::Hybrid);
        assert!(result.best_candidate.is_valid(&p));
        assert!((result.best_fitness - result.scores.total).abs() < 1e-10);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_optimizers_are_send_sync() {
        assert_send_sync::<GeneticOptimizer>();
        assert_send_sync::<AnnealingOptimizer>();
        assert_send_sync::<HybridOptimizer>();
        assert_send_sync::<CancellationToken>();
    }

    #[test]
    fn test_shared_optimizer_across_threads() {
        let p = ward_problem();
        let genetic = GeneticOptimizer::new();
        let annealing = AnnealingOptimizer::new();
        let seeds = [1u64, 2, 3, 4];

        let sequential: Vec<_> = seeds
            .iter()
            .map(|&seed| {
                let ga = genetic.optimize(&p, &mut SmallRng::seed_from_u64(seed)).unwrap();
                let sa = annealing.optimize(&p, &mut SmallRng::seed_from_u64(seed)).unwrap();
                (ga, sa)
            })
            .collect();

        let parallel: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = seeds
                .iter()
                .map(|&seed| {
                    let (p, genetic, annealing) = (&p, &genetic, &annealing);
                    scope.spawn(move || {
                        let mut rng = SmallRng::seed_from_u64(seed);
                        let ga = genetic.optimize(p, &mut rng).unwrap();
                        let mut rng = SmallRng::seed_from_u64(seed);
                        let sa = annealing.optimize(p, &mut rng).unwrap();
                        (ga, sa)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for ((ga, sa), (pga, psa)) in sequential.iter().zip(&parallel) {
            assert!(ga.same_outcome(pga));
            assert!(sa.same_outcome(psa));
        }
    }

    #[test]
    fn test_time_limit_stops_every_strategy() {
        let mut p = ward_problem().with_time_limit(std::time::Duration::ZERO);
        p.genetic.target_fitness = 2.0;
        for s in Strategy::ALL {
            let result = s.optimize(&p, &mut SmallRng::seed_from_u64(9)).unwrap();
            assert_eq!(result.termination, TerminationReason::TimeLimit, "{s}");
            assert!(!result.converged());
            assert!(result.best_candidate.is_valid(&p));
        }
    }

    #[test]
    fn test_strategy_from_config_name() {
        let s: Strategy = "Hybrid".parse().unwrap();
        assert_eq!(s, Strategy::Hybrid);
        assert!(matches!("greedy".parse::<Strategy>(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_shared_cancellation_token() {
        let mut p = ward_problem();
        p.genetic.target_fitness = 2.0;
        let token = CancellationToken::new();
        token.cancel();
        for s in Strategy::ALL {
            let mut rng = SmallRng::seed_from_u64(1);
            let result = s
                .optimize_with_cancellation(&p, &mut rng, token.clone())
                .unwrap();
            assert_eq!(result.termination, TerminationReason::Cancelled);
            assert!(!result.converged());
            assert!(result.best_candidate.is_valid(&p));
        }
    }
}

mod error_tests {
    use super::*;
    use u_roster::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_problems_rejected_before_run() {
        let cases = [
            (
                ProblemConfig::new(vec![], vec![1], date(2024, 1, 1), date(2024, 1, 2)),
                ValidationErrorKind::EmptyEmployees,
            ),
            (
                ProblemConfig::new(vec![1], vec![], date(2024, 1, 1), date(2024, 1, 2)),
                ValidationErrorKind::EmptyShifts,
            ),
            (
                ProblemConfig::new(vec![1], vec![1], date(2024, 1, 2), date(2024, 1, 1)),
                ValidationErrorKind::InvalidDateRange,
            ),
        ];
        for (p, kind) in cases {
            for s in Strategy::ALL {
                let err = s.optimize(&p, &mut SmallRng::seed_from_u64(42)).unwrap_err();
                assert!(matches!(err, Error::InvalidProblem(_)));
                assert!(err.validation_errors().iter().any(|e| e.kind == kind));
            }
        }
    }

    #[test]
    fn test_single_employee_single_day_is_neutral() {
        let p = ProblemConfig::new(vec![7], vec![1, 0], date(2024, 1, 6), date(2024, 1, 6))
            .with_rest_shifts([0])
            .with_population_size(4)
            .with_max_generations(3);
        let mut rng = SmallRng::seed_from_u64(42);
        let result = GeneticOptimizer::new().optimize(&p, &mut rng).unwrap();
        assert!(result.best_fitness.is_finite());
        assert!((result.scores.fairness - 1.0).abs() < 1e-10);
        assert!((result.scores.satisfaction - 1.0).abs() < 1e-10);
    }
}
