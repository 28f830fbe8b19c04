//! Timer-driven enemy spawning and off-screen enemy reclamation.

use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{Entity, Rect, TextureId};
use crate::roster::Roster;

#[derive(Clone, Debug)]
pub struct SpawnController {
    delay: u32,
    counter: u32,
}

impl SpawnController {
    pub fn new(delay: u32) -> Self {
        SpawnController {
            delay,
            counter: delay,
        }
    }

    /// Frames left until the next spawn pass.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn reset(&mut self) {
        self.counter = self.delay;
    }

    /// Call once per frame.  When the counter has run out, drops enemies
    /// that left the screen and spawns new ones, then rewinds the counter.
    /// Returns the number of enemies spawned this frame.
    pub fn tick(&mut self, roster: &mut Roster, rng: &mut impl Rng, config: &GameConfig) -> usize {
        let mut spawned = 0;
        if self.counter == 0 {
            roster.reclaim_offscreen(config.screen_height);
            spawned = spawn_enemies(roster, rng, config);
            self.counter = self.delay;
        }
        self.counter = self.counter.saturating_sub(1);
        spawned
    }
}

/// Spawn up to `max_spawn` enemies just above the top of the screen,
/// never exceeding `enemies_count` enemies alive.
pub fn spawn_enemies(roster: &mut Roster, rng: &mut impl Rng, config: &GameConfig) -> usize {
    let alive = roster.enemy_count();
    let cap = config.enemies_count as usize;
    if alive >= cap {
        return 0;
    }

    let to_spawn = (cap - alive).min(config.max_spawn as usize);
    let w = config.enemy_width();
    let h = config.enemy_height();
    for _ in 0..to_spawn {
        let x = rng.gen_range(0..(config.screen_width - w).max(1));
        let rect = Rect::new(x, -h, w, h);
        // Rotated to face the player, drifting straight down.
        let entity = Entity::new(180.0, 0.0, config.enemy_speed, rect, TextureId::Spaceship);
        roster.append_enemy(entity, config.enemy_health);
    }
    debug!(spawned = to_spawn, alive = roster.enemy_count(), "spawned enemies");
    to_spawn
}
