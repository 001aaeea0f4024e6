//! ACO configuration.

/// Configuration for the Ant Colony Optimization tour search.
///
/// # Transition rule
///
/// An ant standing on city `i` moves to an unvisited city `j` with
/// probability proportional to `tau(i,j)^alpha * (1 / d(i,j))^beta`.
///
/// # Pheromone update
///
/// Once per iteration every trail is multiplied by `1 - evaporation`, then
/// each ant deposits `q / L` on both directions of every edge of its tour,
/// where `L` is the closed tour length.
///
/// # References
///
/// Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
/// Colony of Cooperating Agents"
///
/// # Examples
///
/// ```
/// use u_stochopt::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_num_ants(20)
///     .with_max_iterations(200)
///     .with_exponents(1.0, 3.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Number of ants constructing a tour in every iteration.
    pub num_ants: usize,

    /// Number of outer iterations.
    pub max_iterations: usize,

    /// Pheromone influence exponent.
    pub alpha: f64,

    /// Heuristic (inverse distance) influence exponent.
    pub beta: f64,

    /// Evaporation rate in (0, 1).
    pub evaporation: f64,

    /// Deposit constant. An ant deposits `q / tour_length` per edge.
    pub q: f64,

    /// Pheromone level every trail starts with.
    pub initial_pheromone: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl AcoConfig {
    /// Reference problem size the defaults were tuned for.
    ///
    /// The actual city count always comes from the distance matrix.
    pub const DEFAULT_CITIES: usize = 5;
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 10,
            max_iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            evaporation: 0.5,
            q: 100.0,
            initial_pheromone: 1.0,
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the pheromone (`alpha`) and heuristic (`beta`) exponents.
    pub fn with_exponents(mut self, alpha: f64, beta: f64) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    pub fn with_evaporation(mut self, rate: f64) -> Self {
        self.evaporation = rate;
        self
    }

    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    pub fn with_initial_pheromone(mut self, level: f64) -> Self {
        self.initial_pheromone = level;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_ants == 0 {
            return Err("num_ants must be positive".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be positive".into());
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(format!("alpha must be finite and >= 0, got {}", self.alpha));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(format!("beta must be finite and >= 0, got {}", self.beta));
        }
        if !(self.evaporation > 0.0 && self.evaporation < 1.0) {
            return Err(format!(
                "evaporation must be in (0, 1), got {}",
                self.evaporation
            ));
        }
        if !self.q.is_finite() || self.q <= 0.0 {
            return Err(format!("q must be finite and positive, got {}", self.q));
        }
        if !self.initial_pheromone.is_finite() || self.initial_pheromone <= 0.0 {
            return Err(format!(
                "initial_pheromone must be finite and positive, got {}",
                self.initial_pheromone
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::default();
        assert_eq!(config.num_ants, 10);
        assert_eq!(config.max_iterations, 100);
        assert!((config.alpha - 1.0).abs() < 1e-10);
        assert!((config.beta - 2.0).abs() < 1e-10);
        assert!((config.evaporation - 0.5).abs() < 1e-10);
        assert!((config.q - 100.0).abs() < 1e-10);
        assert!((config.initial_pheromone - 1.0).abs() < 1e-10);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_validate_ok() {
        assert!(AcoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_ants() {
        let config = AcoConfig::default().with_num_ants(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = AcoConfig::default().with_max_iterations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_evaporation() {
        assert!(AcoConfig::default().with_evaporation(0.0).validate().is_err());
        assert!(AcoConfig::default().with_evaporation(1.0).validate().is_err());
        assert!(AcoConfig::default()
            .with_evaporation(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_exponents() {
        let config = AcoConfig::default().with_exponents(-1.0, 2.0);
        assert!(config.validate().is_err());

        let config = AcoConfig::default().with_exponents(1.0, f64::INFINITY);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_deposit() {
        assert!(AcoConfig::default().with_q(0.0).validate().is_err());
        assert!(AcoConfig::default()
            .with_initial_pheromone(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_builder_chain() {
        let config = AcoConfig::default()
            .with_num_ants(4)
            .with_max_iterations(25)
            .with_exponents(2.0, 5.0)
            .with_evaporation(0.1)
            .with_q(1.0)
            .with_initial_pheromone(0.5)
            .with_seed(9);

        assert_eq!(config.num_ants, 4);
        assert_eq!(config.max_iterations, 25);
        assert!((config.alpha - 2.0).abs() < 1e-10);
        assert!((config.beta - 5.0).abs() < 1e-10);
        assert!((config.evaporation - 0.1).abs() < 1e-10);
        assert!((config.q - 1.0).abs() < 1e-10);
        assert!((config.initial_pheromone - 0.5).abs() < 1e-10);
        assert_eq!(config.seed, Some(9));
    }
}
