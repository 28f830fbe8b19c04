//! One game session: the roster, the bullet pool and everything else that
//! changes from frame to frame, plus the per-frame driver.

use rand::Rng;
use tracing::info;

use crate::ai::make_enemies_shoot;
use crate::collision::{prune_dead, resolve_bullet_hits, resolve_ship_collisions};
use crate::config::GameConfig;
use crate::entities::{Direction, Entity, Rect, Spaceship, TextureId};
use crate::events::GameEvent;
use crate::explosion::Explosions;
use crate::pool::BulletPool;
use crate::roster::Roster;
use crate::spawn::SpawnController;
use crate::stars::Starfield;
use crate::surface::Surface;

/// What the player is asking for this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub quit: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Player ship at its starting position: centred, four fifths down.
pub fn new_player(config: &GameConfig) -> Spaceship {
    let rect = Rect::new(
        (config.screen_width - config.ship_width) / 2,
        config.screen_height / 5 * 4,
        config.ship_width,
        config.ship_height,
    );
    Spaceship::new(
        Entity::new(0.0, 0.0, 0.0, rect, TextureId::Spaceship),
        config.player_health,
    )
}

pub struct GameSession {
    pub config: GameConfig,
    pub roster: Roster,
    pub bullets: BulletPool,
    pub spawner: SpawnController,
    pub explosions: Explosions,
    pub stars: Starfield,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
}

impl GameSession {
    pub fn new(config: GameConfig, rng: &mut impl Rng) -> Self {
        let stars = Starfield::new(
            config.stars_count,
            config.screen_width,
            config.screen_height,
            config.stars_max_speed,
            rng,
        );
        GameSession {
            roster: Roster::new(new_player(&config)),
            bullets: BulletPool::from_config(&config),
            spawner: SpawnController::new(config.spawn_delay),
            explosions: Explosions::new(config.explosion_size),
            stars,
            score: 0,
            status: GameStatus::Playing,
            frame: 0,
            config,
        }
    }

    /// Start a new round: fresh player, no enemies, no bullets, zero score.
    pub fn restart(&mut self) {
        info!(score = self.score, "restarting session");
        self.roster.reset(new_player(&self.config));
        self.bullets.clear();
        self.spawner.reset();
        self.explosions.clear();
        self.score = 0;
        self.status = GameStatus::Playing;
        self.frame = 0;
    }

    /// Run one frame and return what happened in it.  Once the player is
    /// dead the session stays in `GameOver` and ticks do nothing.
    pub fn tick(&mut self, input: &InputIntent, rng: &mut impl Rng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.status == GameStatus::GameOver {
            return events;
        }
        self.frame += 1;

        self.apply_input(input);
        self.spawner.tick(&mut self.roster, rng, &self.config);

        for id in self.roster.ids() {
            if let Some(ship) = self.roster.get_mut(id) {
                ship.entity.move_once();
            }
        }
        self.roster
            .clamp_player_bounds(self.config.screen_width, self.config.screen_height);
        self.bullets.advance(self.config.screen_height);

        if self
            .roster
            .player_mut()
            .try_fire(&mut self.bullets, Direction::Forward, self.config.reload_time)
        {
            events.push(GameEvent::BulletFired {
                direction: Direction::Forward,
            });
        }
        make_enemies_shoot(&mut self.roster, &mut self.bullets, rng, &self.config, &mut events);

        resolve_bullet_hits(&mut self.bullets, &mut self.roster, rng, self.config.bullet_damage);
        if self.config.ship_collisions {
            resolve_ship_collisions(&mut self.roster);
        }

        let first_new = events.len();
        self.score += prune_dead(&mut self.roster, &mut events);
        for event in &events[first_new..] {
            if let GameEvent::ShipDestroyed { x, y } = *event {
                self.explosions.add_at(x, y, &self.config);
            }
        }

        self.explosions.step();
        self.stars.step(rng);

        if self.roster.player().is_dead() {
            info!(score = self.score, frame = self.frame, "player destroyed");
            self.status = GameStatus::GameOver;
            events.push(GameEvent::PlayerDestroyed);
        }
        events
    }

    fn apply_input(&mut self, input: &InputIntent) {
        let speed = self.config.player_speed;
        let axis = |neg: bool, pos: bool| (i8::from(pos) - i8::from(neg)) as f32 * speed;
        let player = self.roster.player_mut();
        player.entity.dx = axis(input.move_left, input.move_right);
        player.entity.dy = axis(input.move_up, input.move_down);
        player.fire = input.fire;
    }

    pub fn render(&self, surface: &mut impl Surface) {
        self.stars.render(surface);
        for (_, ship) in self.roster.iter() {
            ship.render(surface);
        }
        self.explosions.render(surface);
        self.bullets.render_all(surface);
    }
}
