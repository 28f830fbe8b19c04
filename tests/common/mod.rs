//! Shared test helpers.

#![allow(dead_code)]

use spaceships::entities::{Entity, Rect, TextureId};
use spaceships::surface::{Rgba, Surface};

/// Everything a frame asked to draw, in call order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Rect(Rect, Rgba),
    Fill(Rect, Rgba),
    Textured(TextureId, Rect, f64),
    Line((i32, i32), (i32, i32), Rgba),
}

#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn textured(&self, texture: TextureId) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Textured(id, rect, _) if *id == texture => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn fills(&self) -> Vec<(Rect, Rgba)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Fill(rect, color) => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn draw_rect(&mut self, rect: Rect, color: Rgba) {
        self.calls.push(DrawCall::Rect(rect, color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.calls.push(DrawCall::Fill(rect, color));
    }

    fn draw_textured_rect(&mut self, texture: TextureId, _src: Option<Rect>, dst: Rect, rotation: f64) {
        self.calls.push(DrawCall::Textured(texture, dst, rotation));
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgba) {
        self.calls.push(DrawCall::Line(from, to, color));
    }
}

/// A motionless enemy-sized entity at `(x, y)`.
pub fn still_enemy(x: i32, y: i32) -> Entity {
    Entity::new(180.0, 0.0, 0.0, Rect::new(x, y, 36, 38), TextureId::Spaceship)
}
