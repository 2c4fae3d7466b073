//! Gameplay tuning. All distances are play-area pixels, all times are ticks.

// ── Play area & timing ────────────────────────────────────────────────────────

pub const WIDTH: i32 = 1000;
pub const HEIGHT: i32 = 1000;

/// Simulation rate. Every per-tick velocity below is tied to it.
pub const FPS: u32 = 144;

/// Frames rendered after a loss before the playthrough ends.
pub const LOSS_GRACE_FRAMES: u32 = FPS * 3;

// ── Craft ─────────────────────────────────────────────────────────────────────

/// Ticks between two shots of the same craft.
pub const COOLDOWN: u32 = 30;

pub const MAX_HEALTH: i32 = 100;

/// Health lost per enemy laser hit or enemy ramming.
pub const HIT_DAMAGE: i32 = 10;

pub const PLAYER_START: (i32, i32) = (300, 630);
pub const PLAYER_VEL: i32 = 5;

/// Gap kept between the player hull and the bottom edge (room for the health bar).
pub const PLAYER_BOTTOM_MARGIN: i32 = 15;

pub const ENEMY_VEL: i32 = 1;

/// Enemies fire from this far left of their own x.
pub const ENEMY_MUZZLE_OFFSET: i32 = -20;

/// Enemy fire roll: one chance in `ENEMY_FIRE_ODDS` per enemy per tick.
pub const ENEMY_FIRE_ODDS: u32 = FPS * 2;

pub const LASER_VEL: i32 = 6;

// ── Waves ─────────────────────────────────────────────────────────────────────

pub const START_LIVES: i32 = 5;
pub const START_WAVE_LENGTH: u32 = 5;
pub const WAVE_LENGTH_STEP: u32 = 5;

/// Horizontal spawn band (half-open), keeps a 125 px hull on screen.
pub const SPAWN_X: (i32, i32) = (50, WIDTH - 100);

/// Vertical spawn band (half-open), above the visible area.
pub const SPAWN_Y: (i32, i32) = (-1500, -100);

// ── Sprite sizes ──────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: (u32, u32) = (125, 125);
pub const PLAYER_SIZE: (u32, u32) = (100, 100);
pub const LASER_SIZE: (u32, u32) = (100, 90);
pub const BACKGROUND_SIZE: (u32, u32) = (WIDTH as u32, HEIGHT as u32);
