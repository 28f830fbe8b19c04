//! Fixed-capacity ring buffer of bullets.
//!
//! Live bullets always sit in the circular window `[head, head + len)`.
//! Firing appends at the tail; once the window covers every slot the next
//! shot silently overwrites the oldest bullet.  Bullets that expire or hit
//! something are only flagged dead; the head skips over dead leading slots
//! lazily at the start of the next `advance`.

use tracing::trace;

use crate::config::{GameConfig, MAX_BULLETS};
use crate::entities::{Direction, Entity, Rect, TextureId};
use crate::surface::Surface;

/// Handle to a fired bullet.  Stays valid until the slot is reused, after
/// which `is_live` reports it dead even if the slot holds a new bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulletId {
    pub slot: usize,
    serial: u64,
}

#[derive(Clone, Debug)]
pub struct BulletPool<const N: usize = MAX_BULLETS> {
    slots: [Entity; N],
    serials: [u64; N],
    live: [bool; N],
    head: usize,
    len: usize,
    next_serial: u64,
    bullet_width: i32,
    bullet_height: i32,
    speed: f32,
}

impl<const N: usize> BulletPool<N> {
    pub fn new(bullet_width: i32, bullet_height: i32, speed: f32) -> Self {
        assert!(N > 0, "bullet pool needs at least one slot");
        BulletPool {
            slots: [Entity::default(); N],
            serials: [0; N],
            live: [false; N],
            head: 0,
            len: 0,
            next_serial: 0,
            bullet_width,
            bullet_height,
            speed,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.bullet_width, config.bullet_height, config.bullet_speed)
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Index of the oldest slot in the window.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Index one past the newest slot (where the next bullet goes).
    pub fn tail(&self) -> usize {
        (self.head + self.len) % N
    }

    /// Number of slots in the window, live or not.
    pub fn window_len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn live_count(&self) -> usize {
        self.window().filter(|&slot| self.live[slot]).count()
    }

    /// Slot indices of the window, oldest first.
    pub fn window(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).map(move |k| (self.head + k) % N)
    }

    /// Slot indices of live bullets, oldest first.
    pub fn live_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.window().filter(move |&slot| self.live[slot])
    }

    pub fn bullet(&self, slot: usize) -> &Entity {
        &self.slots[slot]
    }

    pub fn is_slot_live(&self, slot: usize) -> bool {
        slot < N && self.live[slot]
    }

    pub fn is_live(&self, id: BulletId) -> bool {
        self.is_slot_live(id.slot) && self.serials[id.slot] == id.serial
    }

    /// Mark a bullet consumed.  Dead slots are reclaimed by the next `advance`.
    pub fn kill(&mut self, slot: usize) {
        if slot < N {
            self.live[slot] = false;
        }
    }

    pub fn clear(&mut self) {
        self.live = [false; N];
        self.head = 0;
        self.len = 0;
    }

    /// Fire a bullet from `origin`: centred horizontally, just past the top
    /// edge for `Forward` and just past the bottom edge for `Reverse`.
    pub fn spawn(&mut self, origin: &Rect, direction: Direction) -> BulletId {
        let x = origin.x as f32 + origin.w as f32 / 2.0 - self.bullet_width as f32 / 2.0;
        let (y, dy) = match direction {
            Direction::Forward => (origin.y - self.bullet_height, -self.speed),
            Direction::Reverse => (origin.bottom(), self.speed),
        };
        let rect = Rect::new(x as i32, y, self.bullet_width, self.bullet_height);

        let slot = self.tail();
        if self.len == N {
            // Window covers every slot: the tail is the head, drop the oldest.
            trace!(slot, "bullet pool full, evicting oldest bullet");
            self.head = (self.head + 1) % N;
        } else {
            self.len += 1;
        }

        let serial = self.next_serial;
        self.next_serial += 1;
        self.slots[slot] = Entity::new(0.0, 0.0, dy, rect, TextureId::Laser);
        self.serials[slot] = serial;
        self.live[slot] = true;
        BulletId { slot, serial }
    }

    /// Per-frame pass: drop dead leading slots from the window, then move
    /// every live bullet and kill the ones that left the screen.
    pub fn advance(&mut self, screen_height: i32) {
        while self.len > 0 && !self.live[self.head] {
            self.head = (self.head + 1) % N;
            self.len -= 1;
        }

        for k in 0..self.len {
            let slot = (self.head + k) % N;
            if !self.live[slot] {
                continue;
            }
            let bullet = &mut self.slots[slot];
            bullet.move_once();
            if bullet.rect.bottom() < 0 || bullet.rect.y > screen_height {
                self.live[slot] = false;
            }
        }
    }

    pub fn render_all(&self, surface: &mut impl Surface) {
        for slot in self.live_slots() {
            self.slots[slot].render(surface);
        }
    }
}
