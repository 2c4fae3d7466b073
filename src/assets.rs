//! Image assets.
//!
//! Every image is a small pixel-art text file decoded once at startup and
//! scaled (nearest neighbour) to the size the game draws it at. The shipped
//! art is compiled in; a directory passed to [`Assets::load`] may override any
//! file by name.
//!
//! File format:
//!
//! ```text
//! # comment
//! H #e03030        <- palette entry: one char, one #rrggbb colour
//! ---
//! ..HH..           <- grid rows, '.' is transparent
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::collision::Mask;
use crate::config::{BACKGROUND_SIZE, ENEMY_SIZE, LASER_SIZE, PLAYER_SIZE};

// ── Pixels & sprites ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

/// An immutable decoded image plus the collision mask of its opaque pixels.
#[derive(Clone, Debug)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<Option<Rgb>>,
    mask: Mask,
}

impl Sprite {
    /// `pixels` is row-major, `None` marks a transparent pixel.
    pub fn new(width: u32, height: u32, pixels: Vec<Option<Rgb>>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        let mask = Mask::from_fn(width, height, |x, y| {
            pixels[(y * width + x) as usize].is_some()
        });
        Self { width, height, pixels, mask }
    }

    /// A solid single-colour rectangle.
    pub fn solid(width: u32, height: u32, colour: Rgb) -> Self {
        Self::new(width, height, vec![Some(colour); (width * height) as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Nearest-neighbour resize.
    pub fn scaled(&self, width: u32, height: u32) -> Sprite {
        if (width, height) == (self.width, self.height) {
            return self.clone();
        }
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height as u64) as u32;
            for x in 0..width {
                let sx = (x as u64 * self.width as u64 / width as u64) as u32;
                pixels.push(self.pixel(sx, sy));
            }
        }
        Sprite::new(width, height, pixels)
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum AssetError {
    Io {
        name: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    Malformed {
        name: String,
        line: usize,
        reason: String,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io { name, path, source } => {
                write!(f, "failed to read asset `{}` from {}: {}", name, path.display(), source)
            }
            AssetError::Malformed { name, line, reason } => {
                write!(f, "asset `{}` line {}: {}", name, line, reason)
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io { source, .. } => Some(source),
            AssetError::Malformed { .. } => None,
        }
    }
}

// ── Decoding ──────────────────────────────────────────────────────────────────

const SEPARATOR: &str = "---";

/// Decode one pixel-art file. `name` is only used in error messages.
pub fn parse_pixel_art(name: &str, text: &str) -> Result<Sprite, AssetError> {
    let malformed = |line: usize, reason: String| AssetError::Malformed {
        name: name.to_string(),
        line,
        reason,
    };

    let mut palette: Vec<(char, Rgb)> = Vec::new();
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    // Header: palette entries up to the separator.
    let mut separated = false;
    for (no, raw) in lines.by_ref() {
        let line = raw.trim();
        if line == SEPARATOR {
            separated = true;
            break;
        }
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let (Some(key), Some(colour), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed(no, format!("expected `<char> #rrggbb`, got `{}`", line)));
        };
        let mut chars = key.chars();
        let (Some(key), None) = (chars.next(), chars.next()) else {
            return Err(malformed(no, format!("palette key `{}` must be one character", key)));
        };
        if key == '.' {
            return Err(malformed(no, "`.` is reserved for transparency".to_string()));
        }
        let colour = parse_hex_colour(colour)
            .ok_or_else(|| malformed(no, format!("bad colour `{}`", colour)))?;
        palette.push((key, colour));
    }
    if !separated {
        return Err(malformed(text.lines().count(), format!("missing `{}` separator", SEPARATOR)));
    }

    // Grid.
    let mut width: Option<usize> = None;
    let mut height = 0u32;
    let mut pixels = Vec::new();
    for (no, raw) in lines {
        let row = raw.trim_end();
        if row.is_empty() {
            continue;
        }
        let row_len = row.chars().count();
        match width {
            None => width = Some(row_len),
            Some(w) if w != row_len => {
                return Err(malformed(no, format!("row is {} pixels wide, expected {}", row_len, w)));
            }
            Some(_) => {}
        }
        for c in row.chars() {
            if c == '.' {
                pixels.push(None);
                continue;
            }
            let colour = palette
                .iter()
                .find(|(k, _)| *k == c)
                .map(|(_, rgb)| *rgb)
                .ok_or_else(|| malformed(no, format!("`{}` is not in the palette", c)))?;
            pixels.push(Some(colour));
        }
        height += 1;
    }

    match width {
        Some(w) if w > 0 => Ok(Sprite::new(w as u32, height, pixels)),
        _ => Err(malformed(text.lines().count(), "image has no pixels".to_string())),
    }
}

fn parse_hex_colour(s: &str) -> Option<Rgb> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
}

// ── Named assets ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetName {
    RedShip,
    GreenShip,
    BlueShip,
    YellowShip,
    RedLaser,
    GreenLaser,
    BlueLaser,
    YellowLaser,
    Background,
}

impl AssetName {
    pub const ALL: [AssetName; 9] = [
        AssetName::RedShip,
        AssetName::GreenShip,
        AssetName::BlueShip,
        AssetName::YellowShip,
        AssetName::RedLaser,
        AssetName::GreenLaser,
        AssetName::BlueLaser,
        AssetName::YellowLaser,
        AssetName::Background,
    ];

    /// File name without the `.txt` extension.
    pub fn file_stem(self) -> &'static str {
        match self {
            AssetName::RedShip => "ship_red",
            AssetName::GreenShip => "ship_green",
            AssetName::BlueShip => "ship_blue",
            AssetName::YellowShip => "ship_yellow",
            AssetName::RedLaser => "laser_red",
            AssetName::GreenLaser => "laser_green",
            AssetName::BlueLaser => "laser_blue",
            AssetName::YellowLaser => "laser_yellow",
            AssetName::Background => "background",
        }
    }

    /// Size the image is scaled to after decoding.
    pub fn size(self) -> (u32, u32) {
        match self {
            AssetName::RedShip | AssetName::GreenShip | AssetName::BlueShip => ENEMY_SIZE,
            AssetName::YellowShip => PLAYER_SIZE,
            AssetName::RedLaser
            | AssetName::GreenLaser
            | AssetName::BlueLaser
            | AssetName::YellowLaser => LASER_SIZE,
            AssetName::Background => BACKGROUND_SIZE,
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            AssetName::RedShip => include_str!("../assets/ship_red.txt"),
            AssetName::GreenShip => include_str!("../assets/ship_green.txt"),
            AssetName::BlueShip => include_str!("../assets/ship_blue.txt"),
            AssetName::YellowShip => include_str!("../assets/ship_yellow.txt"),
            AssetName::RedLaser => include_str!("../assets/laser_red.txt"),
            AssetName::GreenLaser => include_str!("../assets/laser_green.txt"),
            AssetName::BlueLaser => include_str!("../assets/laser_blue.txt"),
            AssetName::YellowLaser => include_str!("../assets/laser_yellow.txt"),
            AssetName::Background => include_str!("../assets/background.txt"),
        }
    }
}

/// Every image the game draws, decoded and scaled. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Assets {
    red_ship: Rc<Sprite>,
    green_ship: Rc<Sprite>,
    blue_ship: Rc<Sprite>,
    yellow_ship: Rc<Sprite>,
    red_laser: Rc<Sprite>,
    green_laser: Rc<Sprite>,
    blue_laser: Rc<Sprite>,
    yellow_laser: Rc<Sprite>,
    background: Rc<Sprite>,
}

impl Assets {
    /// Decode the compiled-in art.
    pub fn builtin() -> Result<Self, AssetError> {
        Self::load(None)
    }

    /// Decode every asset. A `<stem>.txt` file inside `dir` replaces the
    /// compiled-in art of the same name.
    pub fn load(dir: Option<&Path>) -> Result<Self, AssetError> {
        let load = |name: AssetName| load_one(name, dir);
        Ok(Self {
            red_ship: load(AssetName::RedShip)?,
            green_ship: load(AssetName::GreenShip)?,
            blue_ship: load(AssetName::BlueShip)?,
            yellow_ship: load(AssetName::YellowShip)?,
            red_laser: load(AssetName::RedLaser)?,
            green_laser: load(AssetName::GreenLaser)?,
            blue_laser: load(AssetName::BlueLaser)?,
            yellow_laser: load(AssetName::YellowLaser)?,
            background: load(AssetName::Background)?,
        })
    }

    pub fn get(&self, name: AssetName) -> &Rc<Sprite> {
        match name {
            AssetName::RedShip => &self.red_ship,
            AssetName::GreenShip => &self.green_ship,
            AssetName::BlueShip => &self.blue_ship,
            AssetName::YellowShip => &self.yellow_ship,
            AssetName::RedLaser => &self.red_laser,
            AssetName::GreenLaser => &self.green_laser,
            AssetName::BlueLaser => &self.blue_laser,
            AssetName::YellowLaser => &self.yellow_laser,
            AssetName::Background => &self.background,
        }
    }
}

fn load_one(name: AssetName, dir: Option<&Path>) -> Result<Rc<Sprite>, AssetError> {
    let override_path = dir
        .map(|d| d.join(format!("{}.txt", name.file_stem())))
        .filter(|p| p.is_file());

    let sprite = match override_path {
        Some(path) => {
            log::debug!("loading {} from {}", name.file_stem(), path.display());
            let text = std::fs::read_to_string(&path).map_err(|source| AssetError::Io {
                name: name.file_stem(),
                path: path.clone(),
                source,
            })?;
            parse_pixel_art(name.file_stem(), &text)?
        }
        None => parse_pixel_art(name.file_stem(), name.builtin())?,
    };

    let (w, h) = name.size();
    Ok(Rc::new(sprite.scaled(w, h)))
}
