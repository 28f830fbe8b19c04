use crate::entities::{Direction, SoundId};

/// Something that happened during a frame, for the frontend to react to
/// (sounds, effects).  Collected in order of occurrence.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    BulletFired { direction: Direction },
    /// An enemy was destroyed; `x`/`y` is the centre of its last position.
    ShipDestroyed { x: i32, y: i32 },
    PlayerDestroyed,
}

impl GameEvent {
    pub fn sound(&self) -> SoundId {
        match self {
            GameEvent::BulletFired { .. } => SoundId::Laser,
            GameEvent::ShipDestroyed { .. } => SoundId::Explosion,
            GameEvent::PlayerDestroyed => SoundId::GameOver,
        }
    }
}
