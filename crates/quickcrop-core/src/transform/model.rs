//! The per-preset crop transform value type.

use crate::geometry::{Offset, PixelBox};
use serde::{Deserialize, Serialize};

/// View state of one preset: pan offset, zoom, and the last emitted crop.
///
/// `zoom` never drops below 1, so the visible region is never smaller than the
/// native resolution allows. `last_pixel_box` is `None` until the transform has
/// been projected onto a loaded image for the first time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropTransform {
    pub offset: Offset,
    pub zoom: f64,
    /// Rotation in degrees (placeholder, always 0).
    pub rotation: f64,
    pub last_pixel_box: Option<PixelBox>,
}

impl Default for CropTransform {
    fn default() -> Self {
        Self {
            offset: Offset::ZERO,
            zoom: 1.0,
            rotation: 0.0,
            last_pixel_box: None,
        }
    }
}

impl CropTransform {
    /// Identity transform: centered, unzoomed, no cached pixel box.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Copy of this transform with a new offset.
    pub fn with_offset(&self, offset: Offset) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }

    /// Copy of this transform with a new zoom, floored at 1.
    pub fn with_zoom(&self, zoom: f64) -> Self {
        Self {
            zoom: clamp_zoom(zoom, f64::INFINITY),
            ..self.clone()
        }
    }

    /// Check the view state (offset, zoom, rotation) against another
    /// transform, ignoring the cached pixel box.
    pub fn same_view(&self, other: &CropTransform) -> bool {
        self.offset == other.offset && self.zoom == other.zoom && self.rotation == other.rotation
    }
}

/// Clamp a zoom value into `[1, max_zoom]`. Non-finite input maps to 1.
pub(crate) fn clamp_zoom(zoom: f64, max_zoom: f64) -> f64 {
    if !zoom.is_finite() {
        return 1.0;
    }
    zoom.min(max_zoom).max(1.0)
}
