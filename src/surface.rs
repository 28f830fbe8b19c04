//! The drawing capability the game core renders through.
//!
//! The core never talks to a terminal or GPU directly; frontends implement
//! `Surface` and resolve `TextureId`s through their own asset cache.

use crate::entities::{Rect, TextureId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }
}

pub trait Surface {
    /// Rectangle outline.
    fn draw_rect(&mut self, rect: Rect, color: Rgba);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Draw `texture` (or the `src` part of it) stretched over `dst`,
    /// rotated by `rotation` degrees about the centre of `dst`.
    fn draw_textured_rect(&mut self, texture: TextureId, src: Option<Rect>, dst: Rect, rotation: f64);

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgba);
}
