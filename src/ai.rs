//! Enemy fire decisions.

use rand::Rng;

use crate::collision::in_firing_range;
use crate::config::GameConfig;
use crate::entities::Direction;
use crate::events::GameEvent;
use crate::pool::BulletPool;
use crate::roster::Roster;

/// Each enemy randomly decides to shoot, but holds fire while another
/// enemy sits in its firing lane.  Returns the number of bullets fired.
pub fn make_enemies_shoot<const N: usize>(
    roster: &mut Roster,
    pool: &mut BulletPool<N>,
    rng: &mut impl Rng,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) -> usize {
    let mut fired = 0;
    let enemies: Vec<_> = roster.ids().into_iter().filter(|id| !id.is_player()).collect();

    for &shooter in &enemies {
        let mut wants_fire = rng.gen_ratio(1, config.enemy_fire_chance);
        if wants_fire {
            if let Some(shooter_rect) = roster.get(shooter).map(|s| *s.rect()) {
                let lane_blocked = roster.iter().any(|(other, ship)| {
                    !other.is_player()
                        && other != shooter
                        && in_firing_range(
                            &shooter_rect,
                            ship.rect(),
                            Direction::Reverse,
                            config.bullet_width,
                            config.screen_height,
                        )
                });
                wants_fire = !lane_blocked;
            }
        }

        let Some(ship) = roster.get_mut(shooter) else {
            continue;
        };
        ship.fire = wants_fire;
        if ship.try_fire(pool, Direction::Reverse, config.reload_time) {
            events.push(GameEvent::BulletFired {
                direction: Direction::Reverse,
            });
            fired += 1;
        }
    }
    fired
}
