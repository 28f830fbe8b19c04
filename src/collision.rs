//! Per-frame combat resolution.
//!
//! Two independent sweeps run every frame: bullets against ships, then
//! ships against ships.  Neither removes anything from the roster; dead
//! enemies are unlinked afterwards by `prune_dead`, which also does the
//! kill accounting.  Nothing here can fail: no target means no effect.

use rand::Rng;
use tracing::debug;

use crate::entities::{Direction, Rect};
use crate::events::GameEvent;
use crate::pool::BulletPool;
use crate::roster::Roster;

/// Randomised bullet damage: `base ± rand(0..=base/3)`, sign by coin flip.
pub fn roll_damage(rng: &mut impl Rng, base: u32) -> u32 {
    let positive = rng.gen_bool(0.5);
    let spread = rng.gen_range(0..=base / 3);
    if positive {
        base + spread
    } else {
        base - spread
    }
}

/// Apply every live bullet to the first ship it overlaps, in roster order
/// (the player first).  A bullet is consumed by that first hit even if it
/// also overlaps ships further down the list.  Returns the number of hits.
pub fn resolve_bullet_hits<const N: usize>(
    pool: &mut BulletPool<N>,
    roster: &mut Roster,
    rng: &mut impl Rng,
    base_damage: u32,
) -> usize {
    let mut hits = 0;
    for k in 0..pool.window_len() {
        let slot = (pool.head() + k) % pool.capacity();
        if !pool.is_slot_live(slot) {
            continue;
        }
        let bullet_rect = pool.bullet(slot).rect;
        let target = roster
            .iter()
            .find(|(_, ship)| ship.rect().intersects(&bullet_rect))
            .map(|(id, _)| id);
        let Some(id) = target else {
            continue;
        };
        let damage = roll_damage(rng, base_damage);
        if let Some(ship) = roster.get_mut(id) {
            ship.take_damage(damage);
        }
        pool.kill(slot);
        hits += 1;
    }
    hits
}

/// Every pair of live, overlapping ships loses `min(health_a, health_b)`,
/// so at least one of the two ends up at zero health.
pub fn resolve_ship_collisions(roster: &mut Roster) {
    let ids = roster.ids();
    for &a in &ids {
        if roster.get(a).map_or(true, |ship| ship.is_dead()) {
            continue;
        }
        for &b in &ids {
            if a == b {
                continue;
            }
            let Some((ship_a, ship_b)) = roster.get_pair_mut(a, b) else {
                continue;
            };
            if ship_b.is_dead() || !ship_a.rect().intersects(ship_b.rect()) {
                continue;
            }
            let damage = ship_a.health.min(ship_b.health);
            ship_a.take_damage(damage);
            ship_b.take_damage(damage);
        }
    }
}

/// Unlink every dead enemy.  The player stays in the roster even at zero
/// health.  Emits one `ShipDestroyed` per kill and returns the kill count.
pub fn prune_dead(roster: &mut Roster, events: &mut Vec<GameEvent>) -> u32 {
    let mut killed = 0;
    let mut predecessor = roster.player_id();
    let mut cursor = roster.next_of(predecessor);
    while let Some(id) = cursor {
        let dead_center = roster
            .get(id)
            .filter(|ship| ship.is_dead())
            .map(|ship| ship.rect().center());
        match dead_center {
            Some((x, y)) => {
                debug!(x, y, "enemy destroyed");
                events.push(GameEvent::ShipDestroyed { x, y });
                killed += 1;
                cursor = roster.remove(predecessor, id);
            }
            None => {
                predecessor = id;
                cursor = roster.next_of(id);
            }
        }
    }
    killed
}

/// True when a bullet-wide lane from the shooter's firing edge to the
/// screen edge it faces overlaps `victim`.
pub fn in_firing_range(
    shooter: &Rect,
    victim: &Rect,
    direction: Direction,
    bullet_width: i32,
    screen_height: i32,
) -> bool {
    let x = (shooter.x as f32 + shooter.w as f32 / 2.0 - bullet_width as f32 / 2.0) as i32;
    let lane = match direction {
        Direction::Reverse => {
            let top = shooter.bottom();
            Rect::new(x, top, bullet_width, screen_height - top)
        }
        Direction::Forward => Rect::new(x, 0, bullet_width, shooter.y),
    };
    lane.intersects(victim)
}
