//! ACO execution loop.

use super::config::AcoConfig;
use super::types::{tour_length, DistanceMatrix, PheromoneMatrix};
use crate::error::InvalidInput;
use crate::random::rng_from_seed;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Result of an ACO run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// Shortest tour found, a permutation of `0..n`.
    ///
    /// `None` only when the run was cancelled before its first iteration.
    pub best_tour: Option<Vec<usize>>,

    /// Closed length of `best_tour` (`f64::INFINITY` when there is none).
    pub best_length: f64,

    /// Number of completed outer iterations.
    pub iterations: usize,

    /// Iteration (0-based) in which `best_tour` was found.
    pub best_iteration: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best length after each completed iteration. Non-increasing.
    pub length_history: Vec<f64>,
}

/// Ant Colony Optimization over a fixed distance matrix.
///
/// The engine owns its pheromone matrix and random source. Trails persist
/// across calls to [`solve`](Self::solve), so a second call continues
/// learning from where the first one stopped.
///
/// # Examples
///
/// ```
/// use u_stochopt::aco::{AcoConfig, DistanceMatrix, TourSearch};
///
/// let distances = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 15.0, 20.0],
///     vec![10.0, 0.0, 35.0, 25.0],
///     vec![15.0, 35.0, 0.0, 30.0],
///     vec![20.0, 25.0, 30.0, 0.0],
/// ]).unwrap();
///
/// let mut search = TourSearch::new(distances, AcoConfig::default().with_seed(42)).unwrap();
/// let result = search.solve();
/// assert_eq!(result.best_tour.unwrap().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct TourSearch<R = StdRng> {
    distances: DistanceMatrix,
    pheromones: PheromoneMatrix,
    config: AcoConfig,
    rng: R,
}

impl TourSearch<StdRng> {
    /// Creates an engine seeded from `config.seed` (OS entropy when unset).
    pub fn new(distances: DistanceMatrix, config: AcoConfig) -> Result<Self, InvalidInput> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(distances, config, rng)
    }

    /// Validates raw rows and creates an engine.
    pub fn from_rows(rows: Vec<Vec<f64>>, config: AcoConfig) -> Result<Self, InvalidInput> {
        Self::new(DistanceMatrix::from_rows(rows)?, config)
    }

    /// Runs one independently seeded search per seed and returns the
    /// shortest result. Ties go to the earliest seed.
    ///
    /// With the `parallel` feature the searches run on the rayon pool;
    /// the outcome is identical either way.
    pub fn multi_start(
        distances: &DistanceMatrix,
        config: &AcoConfig,
        seeds: &[u64],
    ) -> Result<AcoResult, InvalidInput> {
        if seeds.is_empty() {
            return Err(InvalidInput::InvalidConfig(
                "multi_start requires at least one seed".into(),
            ));
        }
        config.validate().map_err(InvalidInput::InvalidConfig)?;

        let run = |&seed: &u64| -> Result<AcoResult, InvalidInput> {
            let config = config.clone().with_seed(seed);
            Ok(TourSearch::new(distances.clone(), config)?.solve())
        };

        #[cfg(feature = "parallel")]
        let results: Vec<AcoResult> = {
            use rayon::prelude::*;
            seeds.par_iter().map(run).collect::<Result<_, _>>()?
        };
        #[cfg(not(feature = "parallel"))]
        let results: Vec<AcoResult> = seeds.iter().map(run).collect::<Result<_, _>>()?;

        results
            .into_iter()
            .reduce(|best, r| if r.best_length < best.best_length { r } else { best })
            .ok_or_else(|| InvalidInput::InvalidConfig("no search completed".into()))
    }
}

impl<R: Rng> TourSearch<R> {
    /// Creates an engine with an injected random source.
    pub fn with_rng(
        distances: DistanceMatrix,
        config: AcoConfig,
        rng: R,
    ) -> Result<Self, InvalidInput> {
        config.validate().map_err(InvalidInput::InvalidConfig)?;
        let pheromones = PheromoneMatrix::new(distances.len(), config.initial_pheromone);
        Ok(Self {
            distances,
            pheromones,
            config,
            rng,
        })
    }

    pub fn num_cities(&self) -> usize {
        self.distances.len()
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Current pheromone trails.
    pub fn pheromones(&self) -> &PheromoneMatrix {
        &self.pheromones
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Runs the colony for `max_iterations` iterations.
    pub fn solve(&mut self) -> AcoResult {
        self.solve_with_cancel(None)
    }

    /// Runs the colony with an optional cancellation token, checked before
    /// every iteration.
    pub fn solve_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> AcoResult {
        let n = self.distances.len();
        let num_ants = self.config.num_ants;
        debug!(
            cities = n,
            ants = num_ants,
            iterations = self.config.max_iterations,
            "starting ant colony search"
        );

        let mut best_tour: Option<Vec<usize>> = None;
        let mut best_length = f64::INFINITY;
        let mut best_iteration = 0usize;
        let mut iterations = 0usize;
        let mut cancelled = false;
        let mut length_history = Vec::with_capacity(self.config.max_iterations);

        let mut tours: Vec<Vec<usize>> = Vec::with_capacity(num_ants);
        let mut lengths: Vec<f64> = Vec::with_capacity(num_ants);
        let mut weights = vec![0.0; n];

        for iteration in 0..self.config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    debug!(iteration, "ant colony search cancelled");
                    cancelled = true;
                    break;
                }
            }

            tours.clear();
            lengths.clear();
            let mut iteration_best = f64::INFINITY;

            for _ in 0..num_ants {
                let tour = construct_tour(
                    &self.distances,
                    &self.pheromones,
                    self.config.alpha,
                    self.config.beta,
                    &mut weights,
                    &mut self.rng,
                );
                let length = tour_length(&self.distances, &tour);
                iteration_best = iteration_best.min(length);

                if length < best_length {
                    best_length = length;
                    best_tour = Some(tour.clone());
                    best_iteration = iteration;
                }

                tours.push(tour);
                lengths.push(length);
            }

            self.pheromones
                .update(&tours, &lengths, self.config.evaporation, self.config.q);

            iterations += 1;
            length_history.push(best_length);
            trace!(iteration, iteration_best, best_length, "ant colony iteration");
        }

        debug!(best_length, iterations, cancelled, "ant colony search finished");

        AcoResult {
            best_tour,
            best_length,
            iterations,
            best_iteration,
            cancelled,
            length_history,
        }
    }
}

/// Builds one ant's tour: random start, then roulette-wheel moves until
/// every city has been visited.
///
/// `weights` is scratch space of length `n`.
fn construct_tour<R: Rng>(
    distances: &DistanceMatrix,
    pheromones: &PheromoneMatrix,
    alpha: f64,
    beta: f64,
    weights: &mut [f64],
    rng: &mut R,
) -> Vec<usize> {
    let n = distances.len();
    let mut tour = Vec::with_capacity(n);
    let mut visited = vec![false; n];

    let mut current = rng.random_range(0..n);
    tour.push(current);
    visited[current] = true;

    for _ in 1..n {
        let next = select_next_city(
            distances, pheromones, alpha, beta, current, &visited, weights, rng,
        );
        tour.push(next);
        visited[next] = true;
        current = next;
    }
    tour
}

/// Roulette-wheel choice of the next unvisited city.
///
/// Draws `u` in `[0, sum)` and returns the first unvisited city, in index
/// order, whose cumulative desirability reaches `u`. A city whose weight
/// overflows to infinity wins outright. Falls back to the last unvisited
/// city when no city reaches `u` or the weights are degenerate (zero or
/// NaN sum).
#[allow(clippy::too_many_arguments)]
fn select_next_city<R: Rng>(
    distances: &DistanceMatrix,
    pheromones: &PheromoneMatrix,
    alpha: f64,
    beta: f64,
    current: usize,
    visited: &[bool],
    weights: &mut [f64],
    rng: &mut R,
) -> usize {
    let mut sum = 0.0;
    for (city, w) in weights.iter_mut().enumerate() {
        *w = if visited[city] {
            0.0
        } else {
            desirability(
                pheromones.get(current, city),
                distances.get(current, city),
                alpha,
                beta,
            )
        };
        sum += *w;
    }

    if sum == f64::INFINITY {
        // An overflowed weight dominates every finite one.
        if let Some(city) = weights.iter().position(|&w| w == f64::INFINITY) {
            return city;
        }
        // Finite weights whose total overflows: rescale by the largest.
        let max = weights.iter().copied().fold(0.0, f64::max);
        sum = 0.0;
        for w in weights.iter_mut() {
            *w /= max;
            sum += *w;
        }
    }

    if sum > 0.0 && sum.is_finite() {
        let roll = rng.random_range(0.0..sum);
        let mut cumulative = 0.0;
        for (city, &w) in weights.iter().enumerate() {
            if visited[city] {
                continue;
            }
            cumulative += w;
            if cumulative >= roll {
                return city;
            }
        }
    }

    // Unreachable for a partial tour: at least one city is unvisited.
    visited.iter().rposition(|&v| !v).unwrap_or(current)
}

/// `tau^alpha * (1/d)^beta`.
#[inline]
fn desirability(tau: f64, distance: f64, alpha: f64, beta: f64) -> f64 {
    tau.powf(alpha) * (1.0 / distance).powf(beta)
}
