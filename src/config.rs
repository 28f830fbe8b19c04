//! Game tunables.
//!
//! The defaults reproduce the classic arcade feel at 60 FPS.  The game
//! mechanics are frame dependent, so changing `fps` means retuning most of
//! the speeds and delays as well.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Bullet pool capacity.  Fixed at compile time so the pool never allocates.
pub const MAX_BULLETS: usize = 50;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    /// Target frame rate for the frame cap.
    pub fps: u32,

    pub ship_width: i32,
    pub ship_height: i32,
    /// Player speed in pixels per frame while a direction is held.
    pub player_speed: f32,
    pub player_health: u32,
    /// Frames between two shots of the same ship.
    pub reload_time: u32,

    pub bullet_damage: u32,
    pub bullet_speed: f32,
    pub bullet_width: i32,
    pub bullet_height: i32,

    /// Frames between two spawn passes.
    pub spawn_delay: u32,
    /// Maximum number of enemies created in one spawn pass.
    pub max_spawn: u32,
    /// Maximum number of enemies alive at once.
    pub enemies_count: u32,
    pub enemy_health: u32,
    /// Enemy ships are the player's size divided by this.
    pub enemy_scale_divisor: f32,
    pub enemy_speed: f32,
    /// An enemy considers shooting with probability `1 / enemy_fire_chance`.
    pub enemy_fire_chance: u32,
    /// Damage exchange between overlapping ships.
    pub ship_collisions: bool,

    pub stars_count: usize,
    pub stars_max_speed: i32,

    pub explosion_size: i32,
    pub explosion_start_scale: f32,
    pub explosion_peak_scale: f32,
    pub explosion_peak_step: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_width: 480,
            screen_height: 960,
            fps: 60,
            ship_width: 55,
            ship_height: 57, // 55 * 1.05
            player_speed: 2.0,
            player_health: 500,
            reload_time: 30,
            bullet_damage: 35,
            bullet_speed: 10.0,
            bullet_width: 8,
            bullet_height: 26, // 8 * 3.3
            spawn_delay: 30,
            max_spawn: 1,
            enemies_count: 8,
            enemy_health: 100,
            enemy_scale_divisor: 1.5,
            enemy_speed: 1.0,
            enemy_fire_chance: 500,
            ship_collisions: true,
            stars_count: 50,
            stars_max_speed: 3,
            explosion_size: 64,
            explosion_start_scale: 0.1,
            explosion_peak_scale: 1.5,
            explosion_peak_step: 30,
        }
    }
}

impl GameConfig {
    /// Load overrides from a JSON file.  Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("explosion_size", self.explosion_size),
        ];
        for (name, value) in positive {
            if value <= 0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive".into()));
        }
        if self.player_health == 0 || self.enemy_health == 0 {
            return Err(ConfigError::Invalid("ship health must be positive".into()));
        }
        if self.enemy_fire_chance == 0 {
            return Err(ConfigError::Invalid("enemy_fire_chance must be positive".into()));
        }
        if self.enemy_scale_divisor <= 0.0 {
            return Err(ConfigError::Invalid("enemy_scale_divisor must be positive".into()));
        }
        if self.stars_max_speed <= 0 {
            return Err(ConfigError::Invalid("stars_max_speed must be positive".into()));
        }
        if self.enemy_width() <= 0 || self.enemy_height() <= 0 {
            return Err(ConfigError::Invalid(format!(
                "enemy ships shrink to {}x{}, enlarge the ship or lower enemy_scale_divisor",
                self.enemy_width(),
                self.enemy_height()
            )));
        }
        if self.enemy_width() >= self.screen_width {
            return Err(ConfigError::Invalid("enemy ships do not fit on screen".into()));
        }
        Ok(())
    }

    pub fn enemy_width(&self) -> i32 {
        (self.ship_width as f32 / self.enemy_scale_divisor) as i32
    }

    pub fn enemy_height(&self) -> i32 {
        (self.ship_height as f32 / self.enemy_scale_divisor) as i32
    }

    /// Duration of one frame at the target frame rate.
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }
}
