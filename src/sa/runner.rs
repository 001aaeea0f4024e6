//! SA execution loop.

use super::config::SaConfig;
use super::types::{InverseParaboloid, Point, PointObjective};
use crate::error::InvalidInput;
use crate::random::rng_from_seed;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaResult {
    /// Lowest-value point the search ever held.
    pub best: Point,

    /// The point held when the run stopped (the most recently accepted
    /// candidate). Not necessarily as good as `best`.
    pub last_accepted: Point,

    /// Total number of candidate evaluations.
    pub iterations: usize,

    /// Number of completed temperature levels.
    pub temperature_steps: usize,

    /// Final temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best value at the start and after each temperature level.
    pub value_history: Vec<f64>,
}

/// Metropolis acceptance probability for moving from a point with value
/// `current` to one with value `candidate` at `temperature`.
///
/// Exactly `1.0` for a strict improvement, otherwise
/// `exp((current - candidate) / temperature)`. Where that exponential
/// underflows to zero the result is clamped to `f64::MIN_POSITIVE`, so a
/// worsening move always has a probability in (0, 1].
///
/// # Examples
///
/// ```
/// use u_stochopt::sa::acceptance_probability;
///
/// assert_eq!(acceptance_probability(1.0, 0.5, 10.0), 1.0);
/// assert!((acceptance_probability(0.5, 1.0, 1.0) - (-0.5f64).exp()).abs() < 1e-15);
/// ```
pub fn acceptance_probability(current: f64, candidate: f64, temperature: f64) -> f64 {
    if candidate < current {
        return 1.0;
    }
    ((current - candidate) / temperature)
        .exp()
        .max(f64::MIN_POSITIVE)
}

/// Simulated Annealing over the plane.
///
/// Each move perturbs both coordinates of the current point by a uniform
/// offset in `[-T, T]`, so the step size shrinks as the temperature
/// falls.
///
/// # Examples
///
/// ```
/// use u_stochopt::sa::{PointSearch, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(10.0)
///     .with_iterations_per_temperature(50)
///     .with_seed(42);
/// let result = PointSearch::new(config).unwrap().optimize();
/// assert!(result.best.value > 0.0 && result.best.value <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct PointSearch<O = InverseParaboloid, R = StdRng> {
    objective: O,
    config: SaConfig,
    rng: R,
}

impl PointSearch<InverseParaboloid, StdRng> {
    /// Minimizes `1 / (1 + x^2 + y^2)`, seeded from `config.seed`.
    pub fn new(config: SaConfig) -> Result<Self, InvalidInput> {
        Self::with_objective(InverseParaboloid, config)
    }
}

impl<O: PointObjective> PointSearch<O, StdRng> {
    /// Minimizes a caller-supplied objective, seeded from `config.seed`
    /// (OS entropy when unset).
    pub fn with_objective(objective: O, config: SaConfig) -> Result<Self, InvalidInput> {
        let rng = rng_from_seed(config.seed);
        PointSearch::with_rng(objective, config, rng)
    }

    /// Runs one independently seeded search per seed and returns the
    /// result with the lowest best value. Ties go to the earliest seed.
    ///
    /// With the `parallel` feature the searches run on the rayon pool;
    /// the outcome is identical either way.
    pub fn multi_start(
        objective: &O,
        config: &SaConfig,
        seeds: &[u64],
    ) -> Result<SaResult, InvalidInput>
    where
        O: Clone + Send + Sync,
    {
        if seeds.is_empty() {
            return Err(InvalidInput::InvalidConfig(
                "multi_start requires at least one seed".into(),
            ));
        }
        config.validate().map_err(InvalidInput::InvalidConfig)?;

        let run = |&seed: &u64| -> Result<SaResult, InvalidInput> {
            let config = config.clone().with_seed(seed);
            Ok(PointSearch::with_objective(objective.clone(), config)?.optimize())
        };

        #[cfg(feature = "parallel")]
        let results: Vec<SaResult> = {
            use rayon::prelude::*;
            seeds.par_iter().map(run).collect::<Result<_, _>>()?
        };
        #[cfg(not(feature = "parallel"))]
        let results: Vec<SaResult> = seeds.iter().map(run).collect::<Result<_, _>>()?;

        results
            .into_iter()
            .reduce(|best, r| if r.best.value < best.best.value { r } else { best })
            .ok_or_else(|| InvalidInput::InvalidConfig("no search completed".into()))
    }
}

impl<O: PointObjective, R: Rng> PointSearch<O, R> {
    /// Creates an engine with an injected random source.
    pub fn with_rng(objective: O, config: SaConfig, rng: R) -> Result<Self, InvalidInput> {
        config.validate().map_err(InvalidInput::InvalidConfig)?;
        Ok(Self {
            objective,
            config,
            rng,
        })
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    pub fn config(&self) -> &SaConfig {
        &self.config
    }

    /// Anneals from a random start until the temperature reaches
    /// `min_temperature`.
    pub fn optimize(&mut self) -> SaResult {
        self.optimize_with_cancel(None)
    }

    /// Anneals with an optional cancellation token, checked before every
    /// temperature level.
    pub fn optimize_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> SaResult {
        let config = &self.config;
        let range = config.initial_range;

        let x = self.rng.random_range(-range..range);
        let y = self.rng.random_range(-range..range);
        let mut current = Point::evaluate(&self.objective, x, y);
        let mut best = current;

        debug!(
            x,
            y,
            value = current.value,
            initial_temperature = config.initial_temperature,
            "starting simulated annealing"
        );

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut temperature_steps = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;

        let mut value_history = Vec::new();
        value_history.push(best.value);

        while temperature > config.min_temperature {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    debug!(temperature, "simulated annealing cancelled");
                    cancelled = true;
                    break;
                }
            }

            for _ in 0..config.iterations_per_temperature {
                let nx = current.x + self.rng.random_range(-1.0..1.0) * temperature;
                let ny = current.y + self.rng.random_range(-1.0..1.0) * temperature;
                let candidate = Point::evaluate(&self.objective, nx, ny);

                let probability =
                    acceptance_probability(current.value, candidate.value, temperature);
                if probability > self.rng.random::<f64>() {
                    if candidate.value < current.value {
                        improving_moves += 1;
                    }
                    current = candidate;
                    accepted_moves += 1;

                    if current.value < best.value {
                        best = current;
                    }
                }

                iterations += 1;
            }

            temperature *= config.cooling_rate;
            temperature_steps += 1;
            value_history.push(best.value);
            trace!(temperature, current = current.value, best = best.value, "temperature level");
        }

        debug!(
            best = best.value,
            last_accepted = current.value,
            iterations,
            cancelled,
            "simulated annealing finished"
        );

        SaResult {
            best,
            last_accepted: current,
            iterations,
            temperature_steps,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            value_history,
        }
    }
}
