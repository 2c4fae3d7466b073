//! Game entities: projectiles, the firing cooldown and the two craft variants.
//!
//! Player and enemy ships share their state through a composed [`Craft`] and
//! their behaviour through the [`Ship`] trait; only firing geometry and the
//! health bar differ.

use std::io;
use std::rc::Rc;

use crate::assets::{AssetName, Assets, Rgb, Sprite};
use crate::collision::{collide, Collidable, Mask};
use crate::config::{COOLDOWN, ENEMY_MUZZLE_OFFSET, MAX_HEALTH};
use crate::platform::{Rect, Renderer};

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    sprite: Rc<Sprite>,
}

impl Projectile {
    pub fn new(x: i32, y: i32, sprite: Rc<Sprite>) -> Self {
        Self { x, y, sprite }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Move vertically; negative is up-screen.
    pub fn advance(&mut self, vel: i32) {
        self.y += vel;
    }

    /// Outside the vertical play bounds `[0, height]`.
    pub fn off_screen(&self, height: i32) -> bool {
        !(0..=height).contains(&self.y)
    }

    pub fn hits<T: Collidable + ?Sized>(&self, target: &T) -> bool {
        collide(self, target)
    }

    pub fn draw<R: Renderer + ?Sized>(&self, out: &mut R) -> io::Result<()> {
        out.blit(&self.sprite, self.x, self.y)
    }
}

impl Collidable for Projectile {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        self.sprite.mask()
    }
}

// ── Cooldown ──────────────────────────────────────────────────────────────────

/// Shot timer. Zero means ready; after a shot it counts up once per tick and
/// drops back to zero the tick after it reaches [`COOLDOWN`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cooldown {
    counter: u32,
}

impl Cooldown {
    pub fn counter(self) -> u32 {
        self.counter
    }

    pub fn is_ready(self) -> bool {
        self.counter == 0
    }

    /// Start cooling. Only meaningful when ready.
    pub fn trigger(&mut self) {
        self.counter = 1;
    }

    pub fn tick(&mut self) {
        if self.counter >= COOLDOWN {
            self.counter = 0;
        } else if self.counter > 0 {
            self.counter += 1;
        }
    }
}

// ── Shared craft state ────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Craft {
    pub x: i32,
    pub y: i32,
    pub health: i32,
    pub projectiles: Vec<Projectile>,
    pub cooldown: Cooldown,
    sprite: Rc<Sprite>,
    projectile_sprite: Rc<Sprite>,
}

impl Craft {
    pub fn new(x: i32, y: i32, health: i32, sprite: Rc<Sprite>, projectile_sprite: Rc<Sprite>) -> Self {
        Self {
            x,
            y,
            health,
            projectiles: Vec::new(),
            cooldown: Cooldown::default(),
            sprite,
            projectile_sprite,
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn width(&self) -> i32 {
        self.sprite.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.sprite.height() as i32
    }

    /// Spawn a projectile at (x + muzzle_offset, y) if the cooldown allows.
    /// Returns whether a shot was fired; requests while cooling are dropped.
    pub fn fire(&mut self, muzzle_offset: i32) -> bool {
        if !self.cooldown.is_ready() {
            return false;
        }
        self.projectiles.push(Projectile::new(
            self.x + muzzle_offset,
            self.y,
            Rc::clone(&self.projectile_sprite),
        ));
        self.cooldown.trigger();
        true
    }

    fn draw<R: Renderer + ?Sized>(&self, out: &mut R) -> io::Result<()> {
        out.blit(&self.sprite, self.x, self.y)?;
        for p in &self.projectiles {
            p.draw(out)?;
        }
        Ok(())
    }
}

/// What every ship can do. Implementors only expose their [`Craft`] and,
/// where it differs, their muzzle offset and extra decorations.
pub trait Ship: Collidable {
    fn craft(&self) -> &Craft;
    fn craft_mut(&mut self) -> &mut Craft;

    /// Horizontal offset of spawned projectiles from the craft's x.
    fn muzzle_offset(&self) -> i32 {
        0
    }

    fn fire(&mut self) -> bool {
        let offset = self.muzzle_offset();
        self.craft_mut().fire(offset)
    }

    fn health(&self) -> i32 {
        self.craft().health
    }

    fn draw<R: Renderer + ?Sized>(&self, out: &mut R) -> io::Result<()> {
        self.craft().draw(out)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct PlayerCraft {
    pub craft: Craft,
    max_health: i32,
}

impl PlayerCraft {
    pub fn new(x: i32, y: i32, assets: &Assets) -> Self {
        Self::with_health(x, y, MAX_HEALTH, assets)
    }

    pub fn with_health(x: i32, y: i32, health: i32, assets: &Assets) -> Self {
        Self {
            craft: Craft::new(
                x,
                y,
                health,
                Rc::clone(assets.get(AssetName::YellowShip)),
                Rc::clone(assets.get(AssetName::YellowLaser)),
            ),
            max_health: health,
        }
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Red background bar and the green remaining-health portion, just below the hull.
    pub fn health_bar(&self) -> (Rect, Rect) {
        let c = &self.craft;
        let full = Rect {
            x: c.x + 5,
            y: c.y + c.height() + 10,
            w: c.width() - 10,
            h: 7,
        };
        let ratio = if self.max_health > 0 {
            (c.health.max(0) as f32 / self.max_health as f32).min(1.0)
        } else {
            0.0
        };
        let remaining = Rect {
            w: (full.w as f32 * ratio) as i32,
            ..full
        };
        (full, remaining)
    }
}

impl Collidable for PlayerCraft {
    fn position(&self) -> (i32, i32) {
        (self.craft.x, self.craft.y)
    }

    fn mask(&self) -> &Mask {
        self.craft.sprite().mask()
    }
}

impl Ship for PlayerCraft {
    fn craft(&self) -> &Craft {
        &self.craft
    }

    fn craft_mut(&mut self) -> &mut Craft {
        &mut self.craft
    }

    fn draw<R: Renderer + ?Sized>(&self, out: &mut R) -> io::Result<()> {
        self.craft.draw(out)?;
        let (full, remaining) = self.health_bar();
        out.fill_rect(Rgb::RED, full)?;
        out.fill_rect(Rgb::GREEN, remaining)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyColour {
    Red,
    Green,
    Blue,
}

impl EnemyColour {
    pub const ALL: [EnemyColour; 3] = [EnemyColour::Red, EnemyColour::Green, EnemyColour::Blue];

    /// Hull and projectile art for this colour.
    pub fn sprites(self) -> (AssetName, AssetName) {
        match self {
            EnemyColour::Red => (AssetName::RedShip, AssetName::RedLaser),
            EnemyColour::Green => (AssetName::GreenShip, AssetName::GreenLaser),
            EnemyColour::Blue => (AssetName::BlueShip, AssetName::BlueLaser),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EnemyCraft {
    pub craft: Craft,
    colour: EnemyColour,
}

impl EnemyCraft {
    pub fn new(x: i32, y: i32, colour: EnemyColour, assets: &Assets) -> Self {
        let (hull, laser) = colour.sprites();
        Self {
            craft: Craft::new(
                x,
                y,
                MAX_HEALTH,
                Rc::clone(assets.get(hull)),
                Rc::clone(assets.get(laser)),
            ),
            colour,
        }
    }

    pub fn colour(&self) -> EnemyColour {
        self.colour
    }

    /// Enemies only ever move straight down.
    pub fn descend(&mut self, vel: i32) {
        self.craft.y += vel;
    }
}

impl Collidable for EnemyCraft {
    fn position(&self) -> (i32, i32) {
        (self.craft.x, self.craft.y)
    }

    fn mask(&self) -> &Mask {
        self.craft.sprite().mask()
    }
}

impl Ship for EnemyCraft {
    fn craft(&self) -> &Craft {
        &self.craft
    }

    fn craft_mut(&mut self) -> &mut Craft {
        &mut self.craft
    }

    fn muzzle_offset(&self) -> i32 {
        ENEMY_MUZZLE_OFFSET
    }
}
