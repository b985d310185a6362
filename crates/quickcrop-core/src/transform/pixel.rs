//! Projection of a crop transform onto source-image pixels.
//!
//! The projection is the inverse of the suggestion conversion: a viewport of
//! `(W / zoom) x (H / zoom)` is centered at the image center shifted by the
//! (sign-inverted) offset, and the crop is the largest rectangle with the
//! preset's aspect ratio that fits inside that viewport.

use super::model::CropTransform;
use crate::geometry::{ImageMeta, Offset, PixelBox, BOUNDS_EPSILON};

/// Center of the visible viewport in source pixels.
pub fn viewport_center(transform: &CropTransform, image: ImageMeta) -> (f64, f64) {
    let zoom = transform.zoom.max(1.0);
    let vis_w = f64::from(image.width) / zoom;
    let vis_h = f64::from(image.height) / zoom;
    let (cx, cy) = image.center();
    (
        cx - (transform.offset.x / 100.0) * vis_w,
        cy - (transform.offset.y / 100.0) * vis_h,
    )
}

/// Offset that centers a viewport of the given zoom on `center`.
///
/// The pixel delta from the image center is expressed as a percentage of the
/// visible viewport and negated.
pub fn offset_for_center(image: ImageMeta, zoom: f64, center: (f64, f64)) -> Offset {
    let vis_w = f64::from(image.width) / zoom;
    let vis_h = f64::from(image.height) / zoom;
    let (cx, cy) = image.center();
    let dx = center.0 - cx;
    let dy = center.1 - cy;
    Offset {
        x: -(dx / vis_w) * 100.0,
        y: -(dy / vis_h) * 100.0,
    }
}

/// Compute the crop rectangle a transform selects for a preset.
///
/// # Arguments
///
/// * `transform` - Current view state of the preset
/// * `image` - Source image dimensions
/// * `aspect` - Preset aspect ratio as `width / height`
///
/// # Returns
///
/// `None` when the image has no area or the aspect ratio is unusable.
/// Otherwise a box that always lies inside the image: a viewport that has
/// been panned past an edge yields a box pinned against that edge.
pub fn crop_box(transform: &CropTransform, image: ImageMeta, aspect: f64) -> Option<PixelBox> {
    if image.is_empty() || !aspect.is_finite() || aspect <= 0.0 {
        return None;
    }

    let zoom = transform.zoom.max(1.0);
    let vis_w = f64::from(image.width) / zoom;
    let vis_h = f64::from(image.height) / zoom;

    // Largest rectangle of the preset's aspect inside the viewport
    let (width, height) = if vis_w / vis_h < aspect {
        (vis_w, vis_w / aspect)
    } else {
        (vis_h * aspect, vis_h)
    };

    let (cx, cy) = viewport_center(transform, image);
    let unclamped = PixelBox::new(cx - width / 2.0, cy - height / 2.0, width, height);
    Some(unclamped.adjust_to_bounds(image))
}

/// Offset that actually produces `pixel_box` once `adjust_to_bounds` has
/// pinned it against an image edge.
///
/// Axes on which the viewport was not pinned keep the transform's offset
/// unchanged, so in-bounds edits round-trip exactly.
pub fn pinned_offset(transform: &CropTransform, image: ImageMeta, pixel_box: &PixelBox) -> Offset {
    let (vx, vy) = viewport_center(transform, image);
    let (bx, by) = pixel_box.center();
    let pinned = offset_for_center(image, transform.zoom.max(1.0), (bx, by));
    Offset {
        x: if (vx - bx).abs() > BOUNDS_EPSILON {
            pinned.x
        } else {
            transform.offset.x
        },
        y: if (vy - by).abs() > BOUNDS_EPSILON {
            pinned.y
        } else {
            transform.offset.y
        },
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
