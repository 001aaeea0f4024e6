//! Behavioral properties of the simulated annealing point search.

use proptest::prelude::*;
use u_stochopt::sa::{
    acceptance_probability, InverseParaboloid, PointObjective, PointSearch, SaConfig,
};

#[test]
fn default_schedule_terminates_in_unit_interval() {
    let config = SaConfig::default().with_seed(42);
    let result = PointSearch::new(config.clone())
        .expect("valid config")
        .optimize();

    assert_eq!(result.temperature_steps, 1375);
    assert_eq!(result.iterations, 1375 * 1000);
    assert!(result.final_temperature <= config.min_temperature);

    for point in [result.best, result.last_accepted] {
        assert!(point.value > 0.0 && point.value <= 1.0, "{point:?}");
        assert_eq!(point.value, InverseParaboloid.evaluate(point.x, point.y));
    }
    assert!(result.best.value <= result.last_accepted.value);
}

#[test]
fn seeded_runs_are_reproducible() {
    let config = SaConfig::default()
        .with_iterations_per_temperature(100)
        .with_seed(7);
    let a = PointSearch::new(config.clone()).expect("valid config").optimize();
    let b = PointSearch::new(config).expect("valid config").optimize();

    assert_eq!(a.best, b.best);
    assert_eq!(a.last_accepted, b.last_accepted);
    assert_eq!(a.accepted_moves, b.accepted_moves);
    assert_eq!(a.value_history, b.value_history);
}

#[test]
fn different_seeds_diverge() {
    let config = SaConfig::default().with_iterations_per_temperature(50);
    let a = PointSearch::new(config.clone().with_seed(1))
        .expect("valid config")
        .optimize();
    let b = PointSearch::new(config.with_seed(2))
        .expect("valid config")
        .optimize();
    assert_ne!(a.last_accepted, b.last_accepted);
}

#[test]
fn custom_objective_finds_shifted_minimum() {
    let shifted = |x: f64, y: f64| (x - 1.5).powi(2) + (y + 2.0).powi(2);
    let config = SaConfig::default()
        .with_initial_temperature(10.0)
        .with_min_temperature(1e-3)
        .with_cooling_rate(0.95)
        .with_iterations_per_temperature(200)
        .with_seed(3);
    let best = PointSearch::with_objective(shifted, config)
        .expect("valid config")
        .optimize()
        .best;

    assert!((best.x - 1.5).abs() < 0.1, "x = {}", best.x);
    assert!((best.y + 2.0).abs() < 0.1, "y = {}", best.y);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn improvement_is_always_accepted(
        current in 0.0f64..1.0,
        drop in 1e-9f64..1.0,
        temperature in 1e-3f64..1e3,
    ) {
        let candidate = current - drop;
        prop_assume!(candidate < current);
        prop_assert_eq!(acceptance_probability(current, candidate, temperature), 1.0);
    }

    #[test]
    fn worsening_probability_is_metropolis(
        current in 0.0f64..1.0,
        rise in 0.0f64..1.0,
        temperature in 1e-6f64..1e3,
    ) {
        let candidate = current + rise;
        let p = acceptance_probability(current, candidate, temperature);
        let expected = ((current - candidate) / temperature).exp().max(f64::MIN_POSITIVE);
        prop_assert_eq!(p, expected);
        prop_assert!(p > 0.0 && p <= 1.0);
    }

    #[test]
    fn short_runs_stay_in_unit_interval(seed in any::<u64>()) {
        let config = SaConfig::default()
            .with_initial_temperature(20.0)
            .with_cooling_rate(0.9)
            .with_iterations_per_temperature(20)
            .with_seed(seed);
        let result = PointSearch::new(config).expect("valid config").optimize();

        prop_assert!(result.best.value > 0.0 && result.best.value <= 1.0);
        prop_assert!(result.best.value <= result.last_accepted.value);
    }
}
