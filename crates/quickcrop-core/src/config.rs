//! Session tunables.

use serde::{Deserialize, Serialize};

/// Timing and step constants for a [`crate::CropSession`].
///
/// All durations are in milliseconds of the host clock passed to every call.
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Debounce window for coalesced history commits.
    pub coalesce_window_ms: u64,
    /// How long pointer-driven edits are ignored after a suggestion lands.
    pub suggestion_guard_ms: u64,
    /// How long the boundary-reached signal stays raised.
    pub boundary_signal_ms: u64,
    /// Edge saturation tolerance in source pixels.
    pub boundary_tolerance: f64,
    /// Zoom ceiling used when image or output dimensions are unknown.
    pub fallback_max_zoom: f64,
    /// Zoom ceiling when upscaling has been explicitly allowed.
    pub upscale_max_zoom: f64,
    /// Zoom increment for zoom buttons and Ctrl/Cmd+Arrow.
    pub zoom_step: f64,
    /// Pan increment in percent of the visible viewport for an arrow key.
    pub pan_step: f64,
    /// Pan increment with Shift held.
    pub coarse_pan_step: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            coalesce_window_ms: 500,
            suggestion_guard_ms: 100,
            boundary_signal_ms: 300,
            boundary_tolerance: 2.0,
            fallback_max_zoom: 3.0,
            upscale_max_zoom: 10.0,
            zoom_step: 0.1,
            pan_step: 1.0,
            coarse_pan_step: 10.0,
        }
    }
}
