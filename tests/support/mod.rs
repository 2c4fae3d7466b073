// Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use space_shooter::assets::{Assets, Rgb, Sprite};
use space_shooter::entities::Projectile;
use space_shooter::platform::{Clock, HeldKeys, InputEvent, InputSource, Rect, Renderer, TextStyle};

pub fn assets() -> Assets {
    Assets::builtin().expect("built-in art decodes")
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A fully opaque square projectile, independent of the shipped art.
pub fn block_projectile(x: i32, y: i32, size: u32) -> Projectile {
    Projectile::new(x, y, Rc::new(Sprite::solid(size, size, Rgb::WHITE)))
}

// ── Renderer ──────────────────────────────────────────────────────────────────

/// Counts frames and remembers the text of the most recent one.
#[derive(Default)]
pub struct Recorder {
    pub presented: usize,
    pub blits: usize,
    pub rects: Vec<(Rgb, Rect)>,
    pub texts: Vec<String>,
    pub frame_texts: Vec<String>,
}

impl Renderer for Recorder {
    fn blit(&mut self, _: &Sprite, _: i32, _: i32) -> io::Result<()> {
        self.blits += 1;
        Ok(())
    }

    fn fill_rect(&mut self, colour: Rgb, rect: Rect) -> io::Result<()> {
        self.rects.push((colour, rect));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, _: i32, _: i32, _: TextStyle, _: Rgb) -> io::Result<()> {
        self.texts.push(text.to_string());
        self.frame_texts.push(text.to_string());
        Ok(())
    }

    fn text_width(&self, text: &str, _: TextStyle) -> i32 {
        text.chars().count() as i32 * 20
    }

    fn present(&mut self) -> io::Result<()> {
        self.presented += 1;
        Ok(())
    }
}

impl Recorder {
    /// Forget the text of the previous frame.
    pub fn next_frame(&mut self) {
        self.frame_texts.clear();
        self.rects.clear();
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Hands out one queued batch of events per poll; held keys stay as set.
#[derive(Default)]
pub struct Script {
    pub batches: VecDeque<Vec<InputEvent>>,
    pub held: HeldKeys,
    pub polls: usize,
}

impl Script {
    pub fn holding(held: HeldKeys) -> Self {
        Self {
            held,
            ..Self::default()
        }
    }

    pub fn then(mut self, events: Vec<InputEvent>) -> Self {
        self.batches.push_back(events);
        self
    }
}

impl InputSource for Script {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.polls += 1;
        self.batches.pop_front().unwrap_or_default()
    }

    fn held_keys(&self) -> HeldKeys {
        self.held
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct CountingClock {
    pub waits: usize,
}

impl Clock for CountingClock {
    fn wait(&mut self) {
        self.waits += 1;
    }
}
