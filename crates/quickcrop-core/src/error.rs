//! Error types for crop session operations.

use crate::preset::PresetId;
use thiserror::Error;

/// Errors reported by [`crate::CropSession`].
///
/// Rejections that are part of normal interaction (a suggestion arriving
/// twice, a pan blocked at the image edge, a stale drag) are not errors; they
/// surface as outcome values instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A caller referenced a preset id that was not configured for this session.
    #[error("Unknown preset: {0}")]
    UnknownPreset(PresetId),

    /// A preset configuration failed validation.
    #[error("Invalid preset {id}: {reason}")]
    InvalidPreset { id: PresetId, reason: String },

    /// The same preset id was configured twice.
    #[error("Duplicate preset: {0}")]
    DuplicatePreset(PresetId),

    /// A session needs at least one preset.
    #[error("No presets configured")]
    NoPresets,

    /// Image dimensions were zero.
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidImage { width: u32, height: u32 },

    /// The operation needs a loaded image.
    #[error("No image loaded")]
    NoImage,
}
