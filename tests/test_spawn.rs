mod common;

use common::still_enemy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spaceships::config::GameConfig;
use spaceships::game::new_player;
use spaceships::roster::Roster;
use spaceships::spawn::{spawn_enemies, SpawnController};

fn setup() -> (Roster, StdRng, GameConfig) {
    let config = GameConfig::default();
    (Roster::new(new_player(&config)), StdRng::seed_from_u64(42), config)
}

#[test]
fn first_spawn_waits_out_the_delay() {
    let (mut roster, mut rng, config) = setup();
    let mut spawner = SpawnController::new(config.spawn_delay);

    for _ in 0..30 {
        assert_eq!(spawner.tick(&mut roster, &mut rng, &config), 0);
    }
    assert_eq!(spawner.tick(&mut roster, &mut rng, &config), 1);
    assert_eq!(roster.enemy_count(), 1);
    assert_eq!(spawner.counter(), 29);
}

#[test]
fn spawns_repeat_every_delay_frames() {
    let (mut roster, mut rng, config) = setup();
    let mut spawner = SpawnController::new(config.spawn_delay);

    let spawn_frames: Vec<u32> = (1..=100)
        .filter(|_| spawner.tick(&mut roster, &mut rng, &config) > 0)
        .collect();
    assert_eq!(spawn_frames, vec![31, 61, 91]);
}

#[test]
fn spawned_enemy_starts_above_screen_facing_down() {
    let (mut roster, mut rng, config) = setup();
    assert_eq!(spawn_enemies(&mut roster, &mut rng, &config), 1);

    let (_, enemy) = roster.iter().nth(1).unwrap();
    let rect = enemy.rect();
    assert_eq!((rect.w, rect.h), (36, 38));
    assert_eq!(rect.y, -38);
    assert!((0..480 - 36).contains(&rect.x));
    assert_eq!(enemy.entity.rotation, 180.0);
    assert_eq!(enemy.entity.dy, 1.0);
    assert_eq!(enemy.health, 100);
}

#[test]
fn full_roster_spawns_nothing() {
    let (mut roster, mut rng, config) = setup();
    for i in 0..8 {
        roster.append_enemy(still_enemy(i * 50, 200), 100);
    }
    let mut spawner = SpawnController::new(config.spawn_delay);

    let spawned: usize = (0..300)
        .map(|_| spawner.tick(&mut roster, &mut rng, &config))
        .sum();
    assert_eq!(spawned, 0);
    assert_eq!(roster.enemy_count(), 8);
}

#[test]
fn spawn_batch_is_bounded_by_max_spawn_and_cap() {
    let (mut roster, mut rng, mut config) = setup();
    config.max_spawn = 3;
    assert_eq!(spawn_enemies(&mut roster, &mut rng, &config), 3);

    for i in 0..4 {
        roster.append_enemy(still_enemy(i * 50, 200), 100);
    }
    // 7 alive, cap 8.
    assert_eq!(spawn_enemies(&mut roster, &mut rng, &config), 1);
    assert_eq!(roster.enemy_count(), 8);
}

#[test]
fn spawn_pass_reclaims_enemies_that_left_the_screen() {
    let (mut roster, mut rng, config) = setup();
    for i in 0..8 {
        roster.append_enemy(still_enemy(i * 50, 2000), 100);
    }
    let mut spawner = SpawnController::new(0);

    assert_eq!(spawner.tick(&mut roster, &mut rng, &config), 1);
    assert_eq!(roster.enemy_count(), 1);
}
