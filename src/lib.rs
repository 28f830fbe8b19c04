//! Vertical space shooter core: a fixed-capacity bullet pool, an
//! arena-backed ship roster and the per-frame collision and spawn logic
//! that ties them together.  Rendering goes through the `Surface` trait;
//! no terminal or window code lives in the library.

pub mod ai;
pub mod collision;
pub mod config;
pub mod entities;
pub mod error;
pub mod events;
pub mod explosion;
pub mod game;
pub mod pool;
pub mod roster;
pub mod spawn;
pub mod stars;
pub mod surface;
pub mod tilemap;
