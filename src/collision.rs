//! Pixel-accurate collision.
//!
//! Sprites carry transparent padding around the hull, so two entities only
//! collide when an opaque pixel of one lands on an opaque pixel of the other.

/// One bit per sprite pixel: `true` where the sprite is opaque.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Build a mask by asking `solid(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut solid: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(solid(x, y));
            }
        }
        Self { width, height, bits }
    }

    /// A fully solid rectangle.
    pub fn filled(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the bit at (x, y) is set. Out-of-range reads are `false`.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Whether `other`, placed at `offset` relative to this mask's top-left
    /// corner, shares at least one set bit with this mask.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;

        // Intersection of the two extents, in this mask's coordinates.
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (self.width as i32).min(dx + other.width as i32);
        let y1 = (self.height as i32).min(dy + other.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        (y0..y1).any(|y| (x0..x1).any(|x| self.get(x, y) && other.get(x - dx, y - dy)))
    }
}

/// Anything with a top-left position and a coverage mask.
pub trait Collidable {
    fn position(&self) -> (i32, i32);
    fn mask(&self) -> &Mask;
}

/// Pixel-mask collision between two positioned entities.
pub fn collide<A, B>(a: &A, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    let (ax, ay) = a.position();
    let (bx, by) = b.position();
    a.mask().overlap(b.mask(), (bx - ax, by - ay))
}
