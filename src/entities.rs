//! Game entity types: rectangles, movable entities and spaceships.
//!
//! Everything here is plain data plus the handful of methods that only
//! touch a single value.  Anything that needs to look at more than one
//! actor lives in `collision`, `roster` or `game`.

use crate::surface::{Rgba, Surface};

// ── Asset identifiers ────────────────────────────────────────────────────────

/// Logical texture id.  The frontend's asset cache resolves these to
/// something drawable; the core never sees the real handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TextureId {
    #[default]
    Spaceship,
    Laser,
    Explosion,
}

/// Logical sound id, played by the frontend in response to `GameEvent`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundId {
    Laser,
    Explosion,
    GameOver,
}

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned integer rectangle in logical screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// True when the two rectangles share at least one pixel.
    /// Touching edges do not count, and empty rectangles never intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Which way a ship fires.  Forward is up the screen (the player),
/// reverse is down (enemies).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

// ── Entity ───────────────────────────────────────────────────────────────────

/// A movable, renderable rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Entity {
    /// Rotation in degrees about the rectangle centre.
    pub rotation: f64,
    pub dx: f32,
    pub dy: f32,
    pub rect: Rect,
    pub texture: TextureId,
}

impl Entity {
    pub fn new(rotation: f64, dx: f32, dy: f32, rect: Rect, texture: TextureId) -> Self {
        debug_assert!(!rect.is_empty(), "entity bounds must be non-empty");
        Entity {
            rotation,
            dx,
            dy,
            rect,
            texture,
        }
    }

    /// Translate by one frame's worth of velocity.
    pub fn move_once(&mut self) {
        self.rect.x = (self.rect.x as f32 + self.dx) as i32;
        self.rect.y = (self.rect.y as f32 + self.dy) as i32;
    }

    pub fn render(&self, surface: &mut impl Surface) {
        surface.draw_textured_rect(self.texture, None, self.rect, self.rotation);
    }
}

// ── Spaceship ────────────────────────────────────────────────────────────────

const C_HEALTH_FRAME: Rgba = Rgba::rgb(255, 255, 255);
const C_HEALTH_HIGH: Rgba = Rgba::rgb(0, 255, 0);
const C_HEALTH_MID: Rgba = Rgba::rgb(255, 255, 0);
const C_HEALTH_LOW: Rgba = Rgba::rgb(255, 0, 0);

/// Player or enemy ship.
#[derive(Clone, Debug, PartialEq)]
pub struct Spaceship {
    pub entity: Entity,
    /// Frames left before the next shot is allowed; 0 means ready.
    pub reload: u32,
    /// Whether the pilot (keyboard or AI) wants to shoot this frame.
    pub fire: bool,
    pub health: u32,
    pub max_health: u32,
}

impl Spaceship {
    pub fn new(entity: Entity, health: u32) -> Self {
        debug_assert!(health > 0, "ships start alive");
        Spaceship {
            entity,
            reload: 0,
            fire: false,
            health,
            max_health: health,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.entity.rect
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// `health' = max(0, health - damage)`.
    pub fn take_damage(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }

    /// Call once per frame.  Counts the reload timer down and, if the
    /// pilot is holding fire and the gun is ready, puts a bullet in `pool`.
    /// Returns whether a bullet was fired.
    pub fn try_fire<const N: usize>(
        &mut self,
        pool: &mut crate::pool::BulletPool<N>,
        direction: Direction,
        reload_time: u32,
    ) -> bool {
        self.reload = self.reload.saturating_sub(1);
        if self.fire && self.reload == 0 {
            pool.spawn(&self.entity.rect, direction);
            self.reload = reload_time;
            return true;
        }
        false
    }

    pub fn render(&self, surface: &mut impl Surface) {
        self.entity.render(surface);
        self.render_healthbar(surface);
    }

    fn render_healthbar(&self, surface: &mut impl Surface) {
        let sr = self.entity.rect;
        let bar_x = sr.x + (sr.w as f32 * 0.05) as i32;
        let bar_y = if self.entity.rotation == 0.0 {
            sr.bottom() + 10
        } else {
            sr.y - 10
        };
        let bar_w = (sr.w as f32 * 0.9) as i32;
        surface.draw_rect(Rect::new(bar_x, bar_y, bar_w, 6), C_HEALTH_FRAME);

        let color = if self.health > 50 {
            C_HEALTH_HIGH
        } else if self.health > 30 {
            C_HEALTH_MID
        } else {
            C_HEALTH_LOW
        };
        let ratio = self.health as f32 / self.max_health.max(1) as f32;
        let fill_w = (bar_w as f32 * ratio) as i32 - 2;
        if fill_w > 0 {
            surface.fill_rect(Rect::new(bar_x + 1, bar_y + 1, fill_w, 4), color);
        }
    }
}
