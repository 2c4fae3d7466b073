mod support;

use space_shooter::assets::AssetName;
use space_shooter::config::{COOLDOWN, HEIGHT};
use space_shooter::entities::*;
use space_shooter::platform::Rect;

use support::{assets, block_projectile};

// ── Cooldown ──────────────────────────────────────────────────────────────────

#[test]
fn cooldown_counts_up_then_wraps_to_ready() {
    let mut cd = Cooldown::default();
    assert!(cd.is_ready());

    cd.trigger();
    assert_eq!(cd.counter(), 1);
    for expected in 2..=COOLDOWN {
        cd.tick();
        assert_eq!(cd.counter(), expected);
        assert!(!cd.is_ready());
    }
    cd.tick();
    assert!(cd.is_ready());
}

#[test]
fn idle_cooldown_stays_ready() {
    let mut cd = Cooldown::default();
    for _ in 0..100 {
        cd.tick();
    }
    assert_eq!(cd.counter(), 0);
}

#[test]
fn firing_every_tick_yields_one_shot_per_cooldown() {
    let a = assets();
    for attempts in 1..=200u32 {
        let mut player = PlayerCraft::new(300, 630, &a);
        for _ in 0..attempts {
            player.fire();
            player.craft.cooldown.tick();
            assert!(player.craft.cooldown.counter() <= COOLDOWN);
        }
        let expected = attempts.div_ceil(COOLDOWN) as usize;
        assert_eq!(player.craft.projectiles.len(), expected, "after {} attempts", attempts);
    }
}

#[test]
fn fire_while_cooling_is_dropped() {
    let a = assets();
    let mut player = PlayerCraft::new(300, 630, &a);
    assert!(player.fire());
    assert!(!player.fire());
    assert!(!player.fire());
    assert_eq!(player.craft.projectiles.len(), 1);
}

// ── Firing geometry ───────────────────────────────────────────────────────────

#[test]
fn player_fires_from_its_own_position() {
    let a = assets();
    let mut player = PlayerCraft::new(300, 630, &a);
    player.fire();
    let p = &player.craft.projectiles[0];
    assert_eq!((p.x, p.y), (300, 630));
    assert!(std::ptr::eq(p.sprite(), &**a.get(AssetName::YellowLaser)));
}

#[test]
fn enemy_fires_twenty_pixels_left() {
    let a = assets();
    let mut enemy = EnemyCraft::new(400, -200, EnemyColour::Green, &a);
    enemy.fire();
    let p = &enemy.craft.projectiles[0];
    assert_eq!((p.x, p.y), (380, -200));
    assert!(std::ptr::eq(p.sprite(), &**a.get(AssetName::GreenLaser)));
}

#[test]
fn colour_picks_matching_hull_and_laser() {
    let a = assets();
    for colour in EnemyColour::ALL {
        let enemy = EnemyCraft::new(0, 0, colour, &a);
        let (hull, _) = colour.sprites();
        assert_eq!(enemy.colour(), colour);
        assert!(std::ptr::eq(enemy.craft.sprite(), &**a.get(hull)));
        assert_eq!((enemy.craft.width(), enemy.craft.height()), (125, 125));
    }
    assert_ne!(EnemyColour::Red.sprites(), EnemyColour::Blue.sprites());
}

#[test]
fn enemies_only_descend() {
    let a = assets();
    let mut enemy = EnemyCraft::new(120, -300, EnemyColour::Red, &a);
    enemy.descend(1);
    enemy.descend(1);
    assert_eq!((enemy.craft.x, enemy.craft.y), (120, -298));
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[test]
fn projectile_bounds_are_inclusive() {
    assert!(!block_projectile(0, 0, 4).off_screen(HEIGHT));
    assert!(!block_projectile(0, HEIGHT, 4).off_screen(HEIGHT));
    assert!(block_projectile(0, -1, 4).off_screen(HEIGHT));
    assert!(block_projectile(0, HEIGHT + 1, 4).off_screen(HEIGHT));
}

#[test]
fn projectile_moves_vertically_only() {
    let mut p = block_projectile(10, 100, 4);
    p.advance(-6);
    assert_eq!((p.x, p.y), (10, 94));
    p.advance(6);
    p.advance(6);
    assert_eq!((p.x, p.y), (10, 106));
}

// ── Health bar ────────────────────────────────────────────────────────────────

#[test]
fn health_bar_shrinks_with_health() {
    let a = assets();
    let mut player = PlayerCraft::new(300, 630, &a);
    assert_eq!(player.max_health(), 100);

    let (full, remaining) = player.health_bar();
    assert_eq!(full, Rect { x: 305, y: 740, w: 90, h: 7 });
    assert_eq!(remaining, full);

    player.craft.health = 50;
    assert_eq!(player.health_bar().1.w, 45);

    player.craft.health = -20;
    assert_eq!(player.health_bar().1.w, 0);
}
