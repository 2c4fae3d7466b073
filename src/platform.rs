//! Seams between the simulation and the outside world.
//!
//! The binary implements these on top of crossterm; tests implement them
//! with recorders and scripted input.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crate::assets::{Rgb, Sprite};

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in play-area pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Text sizes used by the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    /// Lives / level counters.
    Hud,
    /// "You Lost!!"
    Banner,
    /// Menu title.
    Title,
    /// Menu prompt.
    Caption,
}

pub trait Renderer {
    /// Draw `sprite` with its top-left corner at (x, y). Transparent pixels
    /// leave the frame untouched; anything off the frame is clipped.
    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) -> io::Result<()>;

    fn fill_rect(&mut self, colour: Rgb, rect: Rect) -> io::Result<()>;

    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle, colour: Rgb) -> io::Result<()>;

    /// Width in play-area pixels `text` occupies when drawn.
    fn text_width(&self, text: &str, style: TextStyle) -> i32;

    /// Show the finished frame.
    fn present(&mut self) -> io::Result<()>;
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Discrete events drained once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close / quit request.
    Close,
    MouseDown,
    /// Enter; starts a game from the menu.
    Confirm,
}

/// Keys currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

pub trait InputSource {
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn held_keys(&self) -> HeldKeys;
}

// ── Frame clock ───────────────────────────────────────────────────────────────

pub trait Clock {
    /// Block until the next frame is due.
    fn wait(&mut self);
}

/// Caps the loop at a fixed frame rate by sleeping away the rest of each frame.
pub struct FrameClock {
    frame: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            last: Instant::now(),
        }
    }
}

impl Clock for FrameClock {
    fn wait(&mut self) {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        self.last = Instant::now();
    }
}
