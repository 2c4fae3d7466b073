//! Per-tick entity updates.
//!
//! Functions here mutate the entities they are handed and touch nothing else;
//! the simulation loop decides the order they run in.

use crate::config::{HEIGHT, HIT_DAMAGE, PLAYER_BOTTOM_MARGIN, WIDTH};
use crate::entities::{EnemyCraft, PlayerCraft, Ship};
use crate::platform::HeldKeys;

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Tick the enemy's cooldown, move its projectiles by `vel` and resolve them
/// against the player. Each hit costs the player [`HIT_DAMAGE`]; the player is
/// never removed here. Returns the number of hits.
pub fn update_enemy_projectiles(enemy: &mut EnemyCraft, vel: i32, player: &mut PlayerCraft) -> u32 {
    let craft = enemy.craft_mut();
    craft.cooldown.tick();

    let mut hits = 0;
    craft.projectiles.retain_mut(|p| {
        p.advance(vel);
        if p.off_screen(HEIGHT) {
            return false;
        }
        if p.hits(&*player) {
            player.craft.health -= HIT_DAMAGE;
            hits += 1;
            return false;
        }
        true
    });
    hits
}

/// Tick the player's cooldown, move its projectiles by `vel` and resolve them
/// against every enemy.
///
/// Mark-and-sweep: a projectile destroys every live enemy it overlaps and is
/// then spent; an enemy destroyed earlier in the sweep can't be hit again.
/// Both collections are compacted once the sweep is done. Returns the number
/// of enemies destroyed.
pub fn update_player_projectiles(player: &mut PlayerCraft, vel: i32, enemies: &mut Vec<EnemyCraft>) -> usize {
    let craft = player.craft_mut();
    craft.cooldown.tick();

    let mut destroyed = vec![false; enemies.len()];
    let mut spent = vec![false; craft.projectiles.len()];

    for (pi, p) in craft.projectiles.iter_mut().enumerate() {
        p.advance(vel);
        if p.off_screen(HEIGHT) {
            spent[pi] = true;
            continue;
        }
        for (ei, enemy) in enemies.iter().enumerate() {
            if !destroyed[ei] && p.hits(enemy) {
                destroyed[ei] = true;
                spent[pi] = true;
            }
        }
    }

    let mut spent = spent.into_iter();
    craft.projectiles.retain(|_| !spent.next().unwrap_or(false));

    let kills = destroyed.iter().filter(|&&d| d).count();
    if kills > 0 {
        log::debug!("player shot down {} enemies", kills);
        let mut destroyed = destroyed.into_iter();
        enemies.retain(|_| !destroyed.next().unwrap_or(false));
    }
    kills
}

// ── Steering ──────────────────────────────────────────────────────────────────

/// Largest top-left position that keeps the player hull (and its health bar
/// margin) inside the play area.
pub fn player_limits(player: &PlayerCraft) -> (i32, i32) {
    let c = player.craft();
    (
        (WIDTH - c.width()).max(0),
        (HEIGHT - c.height() - PLAYER_BOTTOM_MARGIN).max(0),
    )
}

/// Move the player by `speed` along each held axis, clamping each axis on
/// its own so the hull never leaves the play area.
pub fn steer_player(player: &mut PlayerCraft, keys: HeldKeys, speed: i32) {
    let (max_x, max_y) = player_limits(player);
    let c = player.craft_mut();

    if keys.left {
        c.x -= speed;
    }
    if keys.right {
        c.x += speed;
    }
    if keys.up {
        c.y -= speed;
    }
    if keys.down {
        c.y += speed;
    }

    c.x = c.x.clamp(0, max_x);
    c.y = c.y.clamp(0, max_y);
}
