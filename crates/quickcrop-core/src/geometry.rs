//! Plain geometry types shared by every part of the session engine.
//!
//! # Coordinate System
//!
//! - Pixel coordinates are in source-image pixels, origin at the top-left corner
//! - Offsets are percentages of the visible (zoomed) viewport, centered at zero

use serde::{Deserialize, Serialize};

/// Tolerance used when checking that a box lies inside the image.
pub const BOUNDS_EPSILON: f64 = 1e-6;

/// Dimensions of the loaded source image, as reported by the image loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageMeta {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl ImageMeta {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Image center in pixels.
    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Pan offset of a crop transform, in percent of the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle in source-image pixels.
///
/// Used both for detector suggestions and for the crop rectangle emitted to
/// the preview and export collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the box.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when every component is finite and both sides are positive.
    pub fn has_area(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Check that the box lies within `[0, W] x [0, H]`, allowing `epsilon` of slack.
    pub fn fits_within(&self, image: ImageMeta, epsilon: f64) -> bool {
        let w = f64::from(image.width);
        let h = f64::from(image.height);
        self.x >= -epsilon
            && self.y >= -epsilon
            && self.right() <= w + epsilon
            && self.bottom() <= h + epsilon
    }

    /// Shift the box so it fits inside the image, shrinking only when it is
    /// larger than the image itself.
    pub fn adjust_to_bounds(&self, image: ImageMeta) -> PixelBox {
        let w = f64::from(image.width);
        let h = f64::from(image.height);
        let width = self.width.min(w);
        let height = self.height.min(h);
        PixelBox {
            x: self.x.clamp(0.0, w - width),
            y: self.y.clamp(0.0, h - height),
            width,
            height,
        }
    }

    /// Round to whole pixels for the export pipeline, keeping the result inside
    /// the image and at least 1x1.
    pub fn rounded(&self, image: ImageMeta) -> PixelBox {
        let w = f64::from(image.width);
        let h = f64::from(image.height);
        let width = self.width.round().clamp(1.0, w.max(1.0));
        let height = self.height.round().clamp(1.0, h.max(1.0));
        PixelBox {
            x: self.x.round().clamp(0.0, (w - width).max(0.0)),
            y: self.y.round().clamp(0.0, (h - height).max(0.0)),
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_meta_empty() {
        assert!(ImageMeta::new(0, 100).is_empty());
        assert!(ImageMeta::new(100, 0).is_empty());
        assert!(!ImageMeta::new(1, 1).is_empty());
    }

    #[test]
    fn test_pixel_box_edges() {
        let b = PixelBox::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(b.right(), 40.0);
        assert_eq!(b.bottom(), 60.0);
        assert_eq!(b.center(), (25.0, 40.0));
    }

    #[test]
    fn test_has_area() {
        assert!(PixelBox::new(0.0, 0.0, 1.0, 1.0).has_area());
        assert!(!PixelBox::new(0.0, 0.0, 0.0, 1.0).has_area());
        assert!(!PixelBox::new(0.0, 0.0, 1.0, -5.0).has_area());
        assert!(!PixelBox::new(f64::NAN, 0.0, 1.0, 1.0).has_area());
        assert!(!PixelBox::new(0.0, 0.0, f64::INFINITY, 1.0).has_area());
    }

    #[test]
    fn test_fits_within() {
        let image = ImageMeta::new(100, 50);
        assert!(PixelBox::new(0.0, 0.0, 100.0, 50.0).fits_within(image, BOUNDS_EPSILON));
        assert!(!PixelBox::new(1.0, 0.0, 100.0, 50.0).fits_within(image, BOUNDS_EPSILON));
        assert!(PixelBox::new(-1e-9, 0.0, 10.0, 10.0).fits_within(image, BOUNDS_EPSILON));
    }

    #[test]
    fn test_adjust_to_bounds_shifts_instead_of_shrinking() {
        let image = ImageMeta::new(100, 100);
        let adjusted = PixelBox::new(80.0, -10.0, 40.0, 40.0).adjust_to_bounds(image);
        assert_eq!(adjusted, PixelBox::new(60.0, 0.0, 40.0, 40.0));
    }

    #[test]
    fn test_adjust_to_bounds_oversized() {
        let image = ImageMeta::new(100, 100);
        let adjusted = PixelBox::new(-5.0, -5.0, 150.0, 80.0).adjust_to_bounds(image);
        assert_eq!(adjusted, PixelBox::new(0.0, 0.0, 100.0, 80.0));
    }

    #[test]
    fn test_rounded_stays_inside() {
        let image = ImageMeta::new(1920, 1080);
        let r = PixelBox::new(419.6, 0.2, 1080.4, 1080.4).rounded(image);
        assert_eq!(r, PixelBox::new(420.0, 0.0, 1080.0, 1080.0));
        assert!(r.fits_within(image, 0.0));
    }

    #[test]
    fn test_rounded_minimum_dimension() {
        let image = ImageMeta::new(10, 10);
        let r = PixelBox::new(9.9, 9.9, 0.01, 0.01).rounded(image);
        assert!(r.width >= 1.0);
        assert!(r.height >= 1.0);
        assert!(r.fits_within(image, 0.0));
    }
}
