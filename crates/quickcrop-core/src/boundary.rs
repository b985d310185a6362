//! Edge saturation checks for keyboard panning.
//!
//! Moving the crop transform in one direction moves the visible viewport the
//! other way. A pan in direction `D` is therefore blocked by the edge
//! *opposite* to `D`: a leftward key press is rejected once the crop touches
//! the image's right edge.

use crate::geometry::{ImageMeta, PixelBox};
use serde::{Deserialize, Serialize};

/// Default saturation tolerance in source pixels.
pub const DEFAULT_TOLERANCE: f64 = 2.0;

/// One side of a rectangle, also used to name pan directions
/// (`Top` = up, `Bottom` = down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    /// Unit step of the transform offset for a pan in this direction.
    pub fn unit(self) -> (f64, f64) {
        match self {
            Side::Left => (-1.0, 0.0),
            Side::Right => (1.0, 0.0),
            Side::Top => (0.0, -1.0),
            Side::Bottom => (0.0, 1.0),
        }
    }
}

/// A set of sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sides {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Sides {
    pub const NONE: Sides = Sides {
        left: false,
        right: false,
        top: false,
        bottom: false,
    };

    pub fn contains(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    pub fn insert(&mut self, side: Side) {
        match side {
            Side::Left => self.left = true,
            Side::Right => self.right = true,
            Side::Top => self.top = true,
            Side::Bottom => self.bottom = true,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Sides::NONE
    }

    /// Each contained side replaced by its opposite.
    pub fn inverted(&self) -> Sides {
        Sides {
            left: self.right,
            right: self.left,
            top: self.bottom,
            bottom: self.top,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Side> + '_ {
        Side::ALL.into_iter().filter(|s| self.contains(*s))
    }
}

impl FromIterator<Side> for Sides {
    fn from_iter<I: IntoIterator<Item = Side>>(iter: I) -> Self {
        let mut sides = Sides::NONE;
        for side in iter {
            sides.insert(side);
        }
        sides
    }
}

/// Classify which edges of the crop touch the image bounds.
///
/// An edge is saturated when the box is within `tolerance` pixels of it.
pub fn boundaries(pixel_box: &PixelBox, image: ImageMeta, tolerance: f64) -> Sides {
    let w = f64::from(image.width);
    let h = f64::from(image.height);
    Sides {
        left: pixel_box.x <= tolerance,
        right: pixel_box.right() >= w - tolerance,
        top: pixel_box.y <= tolerance,
        bottom: pixel_box.bottom() >= h - tolerance,
    }
}

/// True when panning in `direction` would push past an already-saturated edge.
pub fn blocks_pan(saturated: Sides, direction: Side) -> bool {
    saturated.contains(direction.opposite())
}
