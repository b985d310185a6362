//! Zoom ceiling computation.
//!
//! Zooming in on the source image shrinks the crop region. Once the region is
//! smaller than the preset's output size, the export has to upscale. The
//! ceiling computed here stops that from happening silently: without an
//! explicit opt-in the user can only zoom as far as the source resolution
//! allows.

use crate::config::SessionConfig;

/// Limits used by [`max_zoom_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    /// Returned when any dimension is unknown.
    pub fallback: f64,
    /// Floor of the ceiling once upscaling is allowed.
    pub upscale_ceiling: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            fallback: 3.0,
            upscale_ceiling: 10.0,
        }
    }
}

impl From<&SessionConfig> for ZoomLimits {
    fn from(config: &SessionConfig) -> Self {
        Self {
            fallback: config.fallback_max_zoom,
            upscale_ceiling: config.upscale_max_zoom,
        }
    }
}

/// Maximum permissible zoom for a preset, with the default limits.
///
/// # Arguments
///
/// * `image_w`, `image_h` - Source image size (0 = unknown)
/// * `output_w`, `output_h` - Preset output size (0 = unknown)
/// * `upscale_allowed` - Whether the user opted into upscaling
///
/// # Behavior
///
/// - Any unknown dimension returns the fallback (3)
/// - `limit = min(image_w / output_w, image_h / output_h)`
/// - Without upscaling: `max(1, limit)`. This is 1 when the source is smaller
///   than the output; callers surface that through [`needs_upscale`]
/// - With upscaling: `max(limit, 10)`
pub fn max_zoom(image_w: u32, image_h: u32, output_w: u32, output_h: u32, upscale_allowed: bool) -> f64 {
    max_zoom_with(
        ZoomLimits::default(),
        image_w,
        image_h,
        output_w,
        output_h,
        upscale_allowed,
    )
}

/// [`max_zoom`] with configurable limits.
pub fn max_zoom_with(
    limits: ZoomLimits,
    image_w: u32,
    image_h: u32,
    output_w: u32,
    output_h: u32,
    upscale_allowed: bool,
) -> f64 {
    if image_w == 0 || image_h == 0 || output_w == 0 || output_h == 0 {
        return limits.fallback;
    }

    let limit = native_limit(image_w, image_h, output_w, output_h);
    if upscale_allowed {
        limit.max(limits.upscale_ceiling)
    } else {
        limit.max(1.0)
    }
}

/// True when even the unzoomed crop is below the output resolution, so the
/// export cannot avoid upscaling.
pub fn needs_upscale(image_w: u32, image_h: u32, output_w: u32, output_h: u32) -> bool {
    if image_w == 0 || image_h == 0 || output_w == 0 || output_h == 0 {
        return false;
    }
    native_limit(image_w, image_h, output_w, output_h) < 1.0
}

#[inline]
fn native_limit(image_w: u32, image_h: u32, output_w: u32, output_h: u32) -> f64 {
    let by_width = f64::from(image_w) / f64::from(output_w);
    let by_height = f64::from(image_h) / f64::from(output_h);
    by_width.min(by_height)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
