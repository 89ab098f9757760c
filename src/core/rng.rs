//! Shared random source for the simulation.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Random number generator used by the AI and particle effects.
///
/// Seeded from entropy unless the config pins a seed, in which case the
/// same inputs replay the same match.
#[derive(Resource)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    pub fn from_config(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
