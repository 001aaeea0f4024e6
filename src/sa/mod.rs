//! Simulated Annealing (SA) over the plane.
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Worsening moves are accepted with a probability
//! that decreases as the temperature falls, which lets the search escape
//! local optima early and settle later.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

mod config;
mod runner;
mod types;

pub use config::SaConfig;
pub use runner::{acceptance_probability, PointSearch, SaResult};
pub use types::{InverseParaboloid, Point, PointObjective};
