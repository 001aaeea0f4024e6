//! SA configuration and cooling schedule.

/// Configuration for the Simulated Annealing point search.
///
/// Cooling is geometric: after every `iterations_per_temperature` moves the
/// temperature is multiplied by `cooling_rate`. The run stops once the
/// temperature is at or below `min_temperature`, so the number of
/// temperature levels is `ceil(ln(min / initial) / ln(cooling_rate))`.
///
/// # Examples
///
/// ```
/// use u_stochopt::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(0.01)
///     .with_cooling_rate(0.95)
///     .with_iterations_per_temperature(200)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Also the initial perturbation half-width.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// Number of moves attempted at each temperature level.
    pub iterations_per_temperature: usize,

    /// The algorithm stops when T drops to or below this.
    pub min_temperature: f64,

    /// The starting point is drawn uniformly from `[-r, r] x [-r, r]`.
    pub initial_range: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.99,
            iterations_per_temperature: 1000,
            min_temperature: 1e-3,
            initial_range: 5.0,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_initial_range(mut self, r: f64) -> Self {
        self.initial_range = r;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of temperature levels a full run goes through.
    ///
    /// Fails for an invalid configuration, since a cooling rate of 1 or
    /// more would never reach `min_temperature`.
    pub fn temperature_steps(&self) -> Result<usize, String> {
        self.validate()?;
        let mut t = self.initial_temperature;
        let mut steps = 0;
        while t > self.min_temperature {
            t *= self.cooling_rate;
            steps += 1;
        }
        Ok(steps)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err("initial_temperature must be finite and positive".into());
        }
        // Subnormal temperatures can stall under multiplication.
        if !self.min_temperature.is_finite() || self.min_temperature < f64::MIN_POSITIVE {
            return Err("min_temperature must be finite, positive and normal".into());
        }
        if self.min_temperature >= self.initial_temperature {
            return Err("min_temperature must be less than initial_temperature".into());
        }
        // Above 1 - EPSILON, `t * cooling_rate` can round back to `t`.
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0 - f64::EPSILON) {
            return Err(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            ));
        }
        if self.iterations_per_temperature == 0 {
            return Err("iterations_per_temperature must be positive".into());
        }
        if !self.initial_range.is_finite() || self.initial_range <= 0.0 {
            return Err(format!(
                "initial_range must be finite and positive, got {}",
                self.initial_range
            ));
        }
        Ok(())
    }
}
