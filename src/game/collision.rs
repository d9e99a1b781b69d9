//! # Collision Primitives
//!
//! Axis-aligned rectangles and per-pixel occupancy masks. These are the only
//! shapes the engine tests against each other.

use crate::{LevelMoverError, LevelMoverResult, Position};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel coordinates.
///
/// Overlap is strict: rectangles that merely share an edge do not collide,
/// so two neighbouring tiles never touch.
///
/// # Examples
///
/// ```
/// use level_mover::Rect;
///
/// let a = Rect::new(0, 0, 60, 60);
/// let b = Rect::new(60, 0, 60, 60);
/// assert!(!a.overlaps(&b));
/// assert!(a.overlaps(&Rect::new(59, 59, 60, 60)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a square tile rectangle at the given grid cell.
    pub fn tile(col: i32, row: i32, tile_size: i32) -> Self {
        Self::new(col * tile_size, row * tile_size, tile_size, tile_size)
    }

    /// Top-left corner.
    pub fn origin(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Returns this rectangle moved by `delta`.
    pub fn translated(self, delta: Position) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Moves this rectangle in place.
    pub fn translate(&mut self, delta: Position) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Whether the two rectangles share any interior area.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Per-pixel occupancy mask used for precise hazard contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// A mask with every pixel set.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// A mask with no pixel set.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// A filled disc centred in the mask, `inset` pixels in from the
    /// shorter side. A pixel is set when its centre lies inside the disc.
    ///
    /// # Examples
    ///
    /// ```
    /// use level_mover::Mask;
    ///
    /// let disc = Mask::disc(60, 60, 6);
    /// assert!(disc.get(30, 30));
    /// assert!(disc.get(6, 29));
    /// assert!(!disc.get(5, 29));
    /// assert!(!disc.get(0, 0));
    /// ```
    pub fn disc(width: u32, height: u32, inset: u32) -> Self {
        let radius = (width.min(height) as f32 / 2.0 - inset as f32).max(0.0);
        let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
        let mut mask = Self::empty(width, height);
        for y in 0..height {
            for x in 0..width {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    mask.bits[(y * width + x) as usize] = true;
                }
            }
        }
        mask
    }

    /// Builds a mask from row-major alpha values. Pixels whose alpha is
    /// strictly above `threshold` are set.
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8], threshold: u8) -> LevelMoverResult<Self> {
        let expected = (width * height) as usize;
        if alpha.len() != expected {
            return Err(LevelMoverError::InvalidState(format!(
                "mask alpha has {} values, expected {}",
                alpha.len(),
                expected
            )));
        }

        Ok(Self {
            width,
            height,
            bits: alpha.iter().map(|&a| a > threshold).collect(),
        })
    }

    /// Builds a mask from text rows where `#` marks a set pixel.
    ///
    /// Short rows are padded with unset pixels.
    ///
    /// # Examples
    ///
    /// ```
    /// use level_mover::Mask;
    ///
    /// let mask = Mask::from_rows(&["#.", ".#"]);
    /// assert!(mask.get(0, 0));
    /// assert!(!mask.get(1, 0));
    /// assert_eq!(mask.count(), 2);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut mask = Self::empty(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    mask.bits[y * width as usize + x] = true;
                }
            }
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel is set. Out-of-range pixels are unset.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Whether any set pixel of `other`, placed at `offset` relative to this
    /// mask's top-left corner, coincides with a set pixel of this mask.
    pub fn overlaps(&self, other: &Mask, offset: Position) -> bool {
        let x_start = offset.x.max(0);
        let y_start = offset.y.max(0);
        let x_end = (offset.x + other.width as i32).min(self.width as i32);
        let y_end = (offset.y + other.height as i32).min(self.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return true;
                }
            }
        }
        false
    }
}

/// Pixel-precise contact between two masked rectangles.
///
/// Bounding boxes are checked first; masks are only consulted when they
/// overlap.
pub fn masks_collide(a_rect: &Rect, a_mask: &Mask, b_rect: &Rect, b_mask: &Mask) -> bool {
    if !a_rect.overlaps(b_rect) {
        return false;
    }
    let offset = Position::new(b_rect.x - a_rect.x, b_rect.y - a_rect.y);
    a_mask.overlaps(b_mask, offset)
}
