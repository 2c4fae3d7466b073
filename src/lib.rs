//! Space Shooter — survive escalating waves of enemy ships.
//!
//! The library holds everything that does not touch the terminal:
//! - `assets`: pixel-art decoding into sprites and collision masks
//! - `collision`: pixel-mask overlap
//! - `entities`: projectiles, cooldowns and the two craft variants
//! - `compute`: per-tick projectile updates and player steering
//! - `wave`: enemy wave spawning
//! - `sim`: the frame-locked simulation loop
//! - `platform`: the renderer / input / clock seams the binary implements

pub mod assets;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod platform;
pub mod sim;
pub mod wave;
