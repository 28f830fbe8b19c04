//! Scrolling star-field backdrop.

use rand::Rng;

use crate::surface::{Rgba, Surface};

const C_STAR: Rgba = Rgba::rgb(255, 255, 255);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
}

#[derive(Clone, Debug)]
pub struct Starfield {
    stars: Vec<Star>,
    width: i32,
    height: i32,
    max_speed: i32,
}

impl Starfield {
    pub fn new(count: usize, width: i32, height: i32, max_speed: i32, rng: &mut impl Rng) -> Self {
        let max_speed = max_speed.max(1);
        let stars = (0..count)
            .map(|_| Star {
                x: rng.gen_range(0..width.max(1)),
                y: rng.gen_range(0..height.max(1)),
                speed: rng.gen_range(1..=max_speed),
            })
            .collect();
        Starfield {
            stars,
            width,
            height,
            max_speed,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Move every star down by its speed; stars that fall off the bottom
    /// come back at the top with a fresh column and speed.
    pub fn step(&mut self, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.y += star.speed;
            if star.y - star.speed > self.height {
                star.y = 0;
                star.x = rng.gen_range(0..self.width.max(1));
                star.speed = rng.gen_range(1..=self.max_speed);
            }
        }
    }

    pub fn render(&self, surface: &mut impl Surface) {
        for star in &self.stars {
            surface.draw_line((star.x, star.y), (star.x, star.y - star.speed), C_STAR);
        }
    }
}
