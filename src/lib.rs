//! Stochastic metaheuristic optimizers.
//!
//! Two independent engines:
//!
//! - **Ant Colony Optimization (ACO)**: [`aco::TourSearch`] builds
//!   Traveling Salesman tours with a colony of simulated ants that share
//!   a pheromone matrix, reinforcing edges of short tours.
//! - **Simulated Annealing (SA)**: [`sa::PointSearch`] minimizes a scalar
//!   function of a 2D point with a geometric cooling schedule and the
//!   Metropolis acceptance rule.
//!
//! Both engines are synchronous and single-threaded, own their random
//! source, and are fully reproducible when seeded. Invalid input is
//! reported at construction as [`InvalidInput`]; a constructed engine
//! cannot fail.
//!
//! # Example
//!
//! ```
//! use u_stochopt::aco::{AcoConfig, TourSearch};
//! use u_stochopt::sa::{PointSearch, SaConfig};
//!
//! let mut tours = TourSearch::from_rows(
//!     vec![
//!         vec![0.0, 1.0, 1.0],
//!         vec![1.0, 0.0, 1.0],
//!         vec![1.0, 1.0, 0.0],
//!     ],
//!     AcoConfig::default().with_seed(1),
//! )?;
//! assert_eq!(tours.solve().best_length, 3.0);
//!
//! let config = SaConfig::default()
//!     .with_initial_temperature(10.0)
//!     .with_iterations_per_temperature(10)
//!     .with_seed(1);
//! let (_x, _y, value) = PointSearch::new(config)?.optimize().best.as_tuple();
//! assert!(value > 0.0 && value <= 1.0);
//! # Ok::<(), u_stochopt::InvalidInput>(())
//! ```

pub mod aco;
mod error;
pub mod random;
pub mod sa;

pub use error::InvalidInput;
