//! Cascade Core - Lattice, proximity graph and cascade propagation
//!
//! This crate holds everything the visualization does that is not rendering:
//! - Jittered cubic lattice generation
//! - Proximity graph of cubes within a distance threshold
//! - Trigger-and-propagate cascade state machine
//! - Time-based transition scheduler that signals completions
//! - Ray picking and TOML configuration

pub mod cascade;
pub mod config;
pub mod cube;
pub mod lattice;
pub mod pick;
pub mod proximity;
pub mod tween;
pub mod world;

pub use cascade::{Animator, CascadeController, CubeState};
pub use config::{load_config, CascadeConfig, ConfigError};
pub use cube::{Cube, CubeId};
pub use lattice::Lattice;
pub use pick::{pick, PickHit, Ray};
pub use proximity::ProximityGraph;
pub use tween::{Easing, TweenScheduler};
pub use world::{CascadeError, CascadeWorld, TickReport};
