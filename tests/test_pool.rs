mod common;

use common::RecordingSurface;
use spaceships::config::MAX_BULLETS;
use spaceships::entities::{Direction, Rect, TextureId};
use spaceships::pool::BulletPool;

const SCREEN_H: i32 = 960;

fn pool() -> BulletPool {
    BulletPool::new(8, 26, 10.0)
}

fn small_pool() -> BulletPool<4> {
    BulletPool::new(8, 26, 10.0)
}

fn ship_at(y: i32) -> Rect {
    Rect::new(100, y, 55, 57)
}

// ── spawn ─────────────────────────────────────────────────────────────────────

#[test]
fn forward_bullet_spawns_centred_above_ship() {
    let mut pool = pool();
    let id = pool.spawn(&ship_at(500), Direction::Forward);
    let b = pool.bullet(id.slot);
    assert_eq!(b.rect, Rect::new(123, 474, 8, 26)); // 100 + 27.5 - 4
    assert_eq!(b.dy, -10.0);
    assert_eq!(b.texture, TextureId::Laser);
}

#[test]
fn reverse_bullet_spawns_below_ship_moving_down() {
    let mut pool = pool();
    let id = pool.spawn(&ship_at(500), Direction::Reverse);
    let b = pool.bullet(id.slot);
    assert_eq!(b.rect.y, 557);
    assert_eq!(b.dy, 10.0);
}

#[test]
fn default_capacity_is_fifty() {
    assert_eq!(pool().capacity(), MAX_BULLETS);
    assert_eq!(MAX_BULLETS, 50);
}

#[test]
fn fifty_one_shots_evict_only_the_first() {
    let mut pool = pool();
    let ids: Vec<_> = (0..51)
        .map(|_| pool.spawn(&ship_at(500), Direction::Forward))
        .collect();

    assert_eq!(pool.live_count(), 50);
    assert!(!pool.is_live(ids[0]));
    assert!(ids[1..].iter().all(|&id| pool.is_live(id)));
}

#[test]
fn live_bullets_never_exceed_capacity() {
    let mut pool = small_pool();
    for n in 1..=20 {
        pool.spawn(&ship_at(500), Direction::Forward);
        assert!(pool.live_count() <= 4);
        assert_eq!(pool.live_count(), n.min(4));
        assert!(pool.window_len() <= 4);
    }
}

// ── advance ───────────────────────────────────────────────────────────────────

#[test]
fn advance_moves_live_bullets() {
    let mut pool = pool();
    let id = pool.spawn(&ship_at(500), Direction::Forward);
    pool.advance(SCREEN_H);
    assert_eq!(pool.bullet(id.slot).rect.y, 464);
}

#[test]
fn bullet_dies_once_fully_above_screen() {
    let mut pool = pool();
    // Bullet starts at y = 4, height 26.
    let id = pool.spawn(&ship_at(30), Direction::Forward);

    for _ in 0..3 {
        pool.advance(SCREEN_H);
        assert!(pool.is_live(id), "bottom edge still on or below row 0");
    }
    pool.advance(SCREEN_H); // y = -36, bottom = -10
    assert!(!pool.is_live(id));

    // The dead slot leaves the window on the following pass.
    assert_eq!(pool.window_len(), 1);
    pool.advance(SCREEN_H);
    assert!(pool.is_empty());
}

#[test]
fn reverse_bullet_dies_below_screen() {
    let mut pool = pool();
    let id = pool.spawn(&ship_at(900), Direction::Reverse); // y = 957
    pool.advance(SCREEN_H);
    assert!(!pool.is_live(id));
}

#[test]
fn head_skips_dead_leading_slots_lazily() {
    let mut pool = small_pool();
    let a = pool.spawn(&ship_at(500), Direction::Forward);
    let b = pool.spawn(&ship_at(500), Direction::Forward);
    let c = pool.spawn(&ship_at(500), Direction::Forward);

    pool.kill(a.slot);
    pool.kill(b.slot);
    assert_eq!(pool.head(), 0, "kill never moves the head");
    assert_eq!(pool.window_len(), 3);

    pool.advance(SCREEN_H);
    assert_eq!(pool.head(), c.slot);
    assert_eq!(pool.window_len(), 1);
}

#[test]
fn dead_slot_behind_a_live_head_stays_in_window() {
    let mut pool = small_pool();
    pool.spawn(&ship_at(500), Direction::Forward);
    let b = pool.spawn(&ship_at(500), Direction::Forward);
    pool.spawn(&ship_at(500), Direction::Forward);

    pool.kill(b.slot);
    pool.advance(SCREEN_H);
    assert_eq!(pool.head(), 0);
    assert_eq!(pool.window_len(), 3);
    assert_eq!(pool.live_count(), 2);
}

#[test]
fn window_wraps_around_the_end() {
    let mut pool = small_pool();
    for _ in 0..3 {
        let id = pool.spawn(&ship_at(500), Direction::Forward);
        pool.kill(id.slot);
    }
    pool.advance(SCREEN_H);
    assert_eq!((pool.head(), pool.window_len()), (3, 0));

    let x = pool.spawn(&ship_at(500), Direction::Forward);
    let y = pool.spawn(&ship_at(500), Direction::Forward);
    assert_eq!((x.slot, y.slot), (3, 0));
    assert_eq!(pool.window().collect::<Vec<_>>(), vec![3, 0]);
    assert_eq!(pool.tail(), 1);
}

#[test]
fn window_only_visits_slots_in_range() {
    let mut pool = small_pool();
    for i in 0..11 {
        let id = pool.spawn(&ship_at(500), Direction::Forward);
        if i % 3 == 0 {
            pool.kill(id.slot);
        }
        pool.advance(SCREEN_H);

        let slots: Vec<_> = pool.window().collect();
        assert_eq!(slots.len(), pool.window_len());
        for (k, slot) in slots.iter().enumerate() {
            assert_eq!(*slot, (pool.head() + k) % 4);
        }
        // After a pass the head never rests on a dead slot.
        if let Some(&first) = slots.first() {
            assert!(pool.is_slot_live(first));
        }
    }
}

#[test]
fn clear_empties_the_pool() {
    let mut pool = small_pool();
    let id = pool.spawn(&ship_at(500), Direction::Forward);
    pool.clear();
    assert!(pool.is_empty());
    assert!(!pool.is_live(id));
}

// ── render ────────────────────────────────────────────────────────────────────

#[test]
fn render_all_draws_only_live_bullets() {
    let mut pool = small_pool();
    let a = pool.spawn(&ship_at(500), Direction::Forward);
    pool.spawn(&ship_at(600), Direction::Forward);
    pool.kill(a.slot);

    let mut surface = RecordingSurface::default();
    pool.render_all(&mut surface);
    let drawn = surface.textured(TextureId::Laser);
    assert_eq!(drawn.len(), 1);
    assert_eq!(drawn[0].y, 574);
}
