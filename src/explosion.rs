//! Explosion effects: grow from a small scale to a peak, then shrink back.

use crate::config::GameConfig;
use crate::entities::{Rect, TextureId};
use crate::surface::Surface;

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: i32,
    pub y: i32,
    pub start_scale: f32,
    pub peak_scale: f32,
    pub current_step: u32,
    pub peak_step: u32,
}

impl Explosion {
    pub fn new(x: i32, y: i32, start_scale: f32, peak_scale: f32, peak_step: u32) -> Self {
        Explosion {
            x,
            y,
            start_scale,
            peak_scale,
            current_step: 0,
            peak_step: peak_step.max(1),
        }
    }

    /// Scale for the current step: linear ramp up to the peak, then back down.
    pub fn scale(&self) -> f32 {
        let span = self.peak_scale - self.start_scale;
        let step = self.current_step as f32;
        let peak = self.peak_step as f32;
        if self.current_step <= self.peak_step {
            self.start_scale + step * span / peak
        } else {
            self.peak_scale - (step - peak) * span / peak
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current_step > self.peak_step
    }
}

/// Every explosion currently on screen.
#[derive(Clone, Debug, Default)]
pub struct Explosions {
    items: Vec<Explosion>,
    size: i32,
}

impl Explosions {
    pub fn new(size: i32) -> Self {
        Explosions {
            items: Vec::new(),
            size,
        }
    }

    pub fn add_at(&mut self, x: i32, y: i32, config: &GameConfig) {
        self.items.push(Explosion::new(
            x,
            y,
            config.explosion_start_scale,
            config.explosion_peak_scale,
            config.explosion_peak_step,
        ));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Explosion> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Advance every explosion by one step and drop the finished ones.
    pub fn step(&mut self) {
        for explosion in &mut self.items {
            explosion.current_step += 1;
        }
        self.items.retain(|e| !e.is_finished());
    }

    pub fn render(&self, surface: &mut impl Surface) {
        for explosion in &self.items {
            let side = (self.size as f32 * explosion.scale()) as i32;
            if side <= 0 {
                continue;
            }
            let dst = Rect::new(explosion.x - side / 2, explosion.y - side / 2, side, side);
            surface.draw_textured_rect(TextureId::Explosion, None, dst, 0.0);
        }
    }
}
