//! The frame-locked simulation loop for one playthrough.
//!
//! [`Simulation`] owns every piece of playthrough state. Each call to
//! [`Simulation::tick`] renders the current frame and then advances the world
//! by one step; [`run_playthrough`] drives it against a clock until it ends.

use std::io;

use rand::Rng;

use crate::assets::{AssetName, Assets, Rgb};
use crate::collision::collide;
use crate::compute::{steer_player, update_enemy_projectiles, update_player_projectiles};
use crate::config::{
    ENEMY_FIRE_ODDS, ENEMY_VEL, HEIGHT, HIT_DAMAGE, LASER_VEL, LOSS_GRACE_FRAMES, PLAYER_START,
    PLAYER_VEL, START_LIVES, WIDTH,
};
use crate::entities::{EnemyCraft, PlayerCraft, Ship};
use crate::platform::{Clock, InputEvent, InputSource, Renderer, TextStyle};
use crate::wave::WaveDirector;

/// Why a playthrough ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The player asked to quit.
    WindowClosed,
    /// Out of lives or health, after the grace period.
    Defeated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Lost; only rendering until `frames` passes the grace period.
    LostGrace { frames: u32 },
    Terminated(Termination),
}

pub struct Simulation<R: Rng> {
    phase: Phase,
    lives: i32,
    director: WaveDirector,
    player: PlayerCraft,
    enemies: Vec<EnemyCraft>,
    assets: Assets,
    rng: R,
    ticks: u64,
}

impl<R: Rng> Simulation<R> {
    /// Fresh playthrough: five lives, level 0, player at its start position.
    pub fn new(assets: Assets, rng: R) -> Self {
        let player = PlayerCraft::new(PLAYER_START.0, PLAYER_START.1, &assets);
        Self {
            phase: Phase::Running,
            lives: START_LIVES,
            director: WaveDirector::default(),
            player,
            enemies: Vec::new(),
            assets,
            rng,
            ticks: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn set_lives(&mut self, lives: i32) {
        self.lives = lives;
    }

    pub fn level(&self) -> u32 {
        self.director.level()
    }

    pub fn player(&self) -> &PlayerCraft {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerCraft {
        &mut self.player
    }

    pub fn enemies(&self) -> &[EnemyCraft] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut Vec<EnemyCraft> {
        &mut self.enemies
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Ticks run so far, grace frames included.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_lost(&self) -> bool {
        self.lives <= 0 || self.player.health() <= 0
    }

    /// Render, then advance one step. Returns the phase after the step.
    pub fn tick<I, D>(&mut self, input: &mut I, out: &mut D) -> io::Result<Phase>
    where
        I: InputSource + ?Sized,
        D: Renderer + ?Sized,
    {
        if let Phase::Terminated(_) = self.phase {
            return Ok(self.phase);
        }
        self.ticks += 1;

        self.draw(out)?;

        if self.phase == Phase::Running && self.is_lost() {
            log::info!(
                "playthrough lost at level {} (lives {}, health {})",
                self.level(),
                self.lives,
                self.player.health()
            );
            self.phase = Phase::LostGrace { frames: 0 };
        }

        if let Phase::LostGrace { frames } = &mut self.phase {
            *frames += 1;
            if *frames > LOSS_GRACE_FRAMES {
                self.phase = Phase::Terminated(Termination::Defeated);
            }
            return Ok(self.phase);
        }

        if self.enemies.is_empty() {
            self.enemies = self.director.next_wave(&mut self.rng, &self.assets);
        }

        if input.poll_events().contains(&InputEvent::Close) {
            log::info!("quit requested at level {}", self.level());
            self.phase = Phase::Terminated(Termination::WindowClosed);
            return Ok(self.phase);
        }

        let keys = input.held_keys();
        steer_player(&mut self.player, keys, PLAYER_VEL);
        if keys.fire {
            self.player.fire();
        }

        self.update_enemies();
        update_player_projectiles(&mut self.player, -LASER_VEL, &mut self.enemies);

        Ok(self.phase)
    }

    /// Move, fire and resolve every enemy. The collection is rebuilt from the
    /// survivors rather than edited while it is being walked.
    fn update_enemies(&mut self) {
        let mut survivors = Vec::with_capacity(self.enemies.len());

        for mut enemy in std::mem::take(&mut self.enemies) {
            enemy.descend(ENEMY_VEL);
            update_enemy_projectiles(&mut enemy, LASER_VEL, &mut self.player);

            if self.rng.gen_range(0..ENEMY_FIRE_ODDS) == 1 {
                enemy.fire();
            }

            if collide(&enemy, &self.player) {
                self.player.craft.health -= HIT_DAMAGE;
                log::debug!("rammed by a {:?} enemy, health {}", enemy.colour(), self.player.health());
            } else if enemy.craft.y + enemy.craft.height() > HEIGHT {
                self.lives -= 1;
                log::debug!("enemy slipped past, {} lives left", self.lives);
            } else {
                survivors.push(enemy);
            }
        }

        self.enemies = survivors;
    }

    /// Draw the whole scene and present it.
    pub fn draw<D: Renderer + ?Sized>(&self, out: &mut D) -> io::Result<()> {
        out.blit(self.assets.get(AssetName::Background), 0, 0)?;

        let lives = format!("Lives: {}", self.lives);
        out.draw_text(&lives, 10, 10, TextStyle::Hud, Rgb::WHITE)?;
        let label = "Level: ";
        let level = self.level().to_string();
        let label_x = WIDTH - out.text_width(label, TextStyle::Hud) - 40;
        let level_x = WIDTH - out.text_width(&level, TextStyle::Hud) - 15;
        out.draw_text(label, label_x, 10, TextStyle::Hud, Rgb::WHITE)?;
        out.draw_text(&level, level_x, 10, TextStyle::Hud, Rgb::WHITE)?;

        for enemy in &self.enemies {
            enemy.draw(out)?;
        }
        self.player.draw(out)?;

        if let Phase::LostGrace { .. } = self.phase {
            let banner = "You Lost!!";
            let x = WIDTH / 2 - out.text_width(banner, TextStyle::Banner) / 2;
            out.draw_text(banner, x, 450, TextStyle::Banner, Rgb::WHITE)?;
        }

        out.present()
    }
}

/// Run one playthrough to completion, waiting on `clock` before every tick.
pub fn run_playthrough<R, I, D, C>(
    sim: &mut Simulation<R>,
    input: &mut I,
    out: &mut D,
    clock: &mut C,
) -> io::Result<Termination>
where
    R: Rng,
    I: InputSource + ?Sized,
    D: Renderer + ?Sized,
    C: Clock + ?Sized,
{
    log::info!("playthrough started");
    loop {
        clock.wait();
        if let Phase::Terminated(how) = sim.tick(input, out)? {
            log::info!("playthrough over: {:?} after {} ticks", how, sim.ticks());
            return Ok(how);
        }
    }
}
