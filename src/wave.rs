//! Wave spawning.
//!
//! A new wave starts whenever the screen is clear: the level goes up, the wave
//! grows by [`WAVE_LENGTH_STEP`] and that many enemies are scattered above the
//! top edge so they drift in with staggered delays.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::assets::Assets;
use crate::config::{SPAWN_X, SPAWN_Y, START_WAVE_LENGTH, WAVE_LENGTH_STEP};
use crate::entities::{EnemyColour, EnemyCraft};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveDirector {
    level: u32,
    wave_length: u32,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self {
            level: 0,
            wave_length: START_WAVE_LENGTH,
        }
    }
}

impl WaveDirector {
    /// Current level; 0 until the first wave spawns.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Size of the most recent wave (or the starting size before any wave).
    pub fn wave_length(&self) -> u32 {
        self.wave_length
    }

    /// Advance to the next level and spawn its enemies.
    pub fn next_wave(&mut self, rng: &mut impl Rng, assets: &Assets) -> Vec<EnemyCraft> {
        self.level += 1;
        self.wave_length += WAVE_LENGTH_STEP;

        let enemies: Vec<EnemyCraft> = (0..self.wave_length)
            .map(|_| {
                let x = rng.gen_range(SPAWN_X.0..SPAWN_X.1);
                let y = rng.gen_range(SPAWN_Y.0..SPAWN_Y.1);
                let colour = *EnemyColour::ALL
                    .choose(rng)
                    .unwrap_or(&EnemyColour::Red);
                EnemyCraft::new(x, y, colour, assets)
            })
            .collect();

        log::info!("level {}: spawned {} enemies", self.level, enemies.len());
        enemies
    }
}
