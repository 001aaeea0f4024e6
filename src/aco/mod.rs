//! Ant Colony Optimization (ACO) for the Traveling Salesman Problem.
//!
//! A colony of simulated ants repeatedly builds tours over a fixed
//! distance matrix. Each move is sampled from a distribution that favors
//! short edges and edges carrying strong pheromone trails. After every
//! iteration the trails evaporate and each ant reinforces the edges of its
//! own tour in proportion to the tour's quality, biasing later ants toward
//! short tours.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*, MIT Press

mod config;
mod runner;
mod types;

pub use config::AcoConfig;
pub use runner::{AcoResult, TourSearch};
pub use types::{tour_length, DistanceMatrix, PheromoneMatrix};
