//! Crop transforms and their projection onto source-image pixels.
//!
//! A crop transform describes which part of the source image is visible for
//! one preset: a pan offset, a zoom factor, and a rotation placeholder.
//!
//! # Coordinate System
//!
//! - Offsets are percentages of the visible (zoomed) viewport, zero = centered
//! - A positive offset moves the viewport *opposite* to the pixel delta it
//!   encodes, so `offset.x > 0` shows a region left of the image center
//! - Zoom is `>= 1`; the visible viewport is `(W / zoom) x (H / zoom)`
//! - Rotation angles are in degrees and are always 0 for now

mod model;
mod pixel;

pub(crate) use model::clamp_zoom;
pub use model::CropTransform;
pub use pixel::{crop_box, offset_for_center, pinned_offset, viewport_center};
