//! Core game module - states, events, config, and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod error;
mod events;
mod plugin;
mod rng;
mod states;

pub use config::*;
pub use error::ConfigError;
pub use events::*;
pub use plugin::{CorePlugin, ResultsTimer, SIMULATION_HZ};
pub use rng::GameRng;
pub use states::*;
