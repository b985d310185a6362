//! One-shot application of detector suggestions.
//!
//! The external detector proposes at most one pixel rectangle per preset for
//! each loaded image. The first usable proposal becomes that preset's new
//! baseline; anything after it is ignored.
//!
//! # Conversion
//!
//! Given image `(W, H)` and suggestion `(sx, sy, sw, sh)`:
//!
//! 1. `zoom = H / sh`. The suggestion's height fills the viewport vertically,
//!    whatever its own aspect ratio
//! 2. `visW = W / zoom`, `visH = H / zoom`
//! 3. Pixel offset = suggestion center - image center
//! 4. `offset = -(pixelOffset / vis) * 100` per axis
//! 5. `last_pixel_box` is the suggestion itself

use crate::geometry::{ImageMeta, PixelBox, BOUNDS_EPSILON};
use crate::preset::PresetId;
use crate::transform::{clamp_zoom, offset_for_center, CropTransform};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Why a suggestion was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuggestionRejection {
    /// No image dimensions are known yet.
    NoImage,
    /// The preset already received its suggestion for this image.
    AlreadyApplied,
    /// The box spans the full image width: the detector found nothing usable.
    FullFrame,
    /// Zero-area, non-finite, or out-of-bounds box.
    Malformed,
}

/// Result of [`SuggestionReconciler::reconcile`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    Applied(CropTransform),
    Rejected(SuggestionRejection),
}

impl ReconcileOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ReconcileOutcome::Applied(_))
    }
}

/// Convert a suggestion rectangle into a crop transform.
///
/// The zoom is floored at 1: a box that overhangs the image by rounding
/// slack still maps to the full-height view.
pub fn suggestion_transform(image: ImageMeta, suggestion: &PixelBox) -> CropTransform {
    let zoom = clamp_zoom(f64::from(image.height) / suggestion.height, f64::INFINITY);
    CropTransform {
        offset: offset_for_center(image, zoom, suggestion.center()),
        zoom,
        rotation: 0.0,
        last_pixel_box: Some(*suggestion),
    }
}

/// Tracks which presets already received a suggestion and guards freshly
/// reconciled presets against in-flight pointer edits.
#[derive(Debug, Clone, Default)]
pub struct SuggestionReconciler {
    applied: HashSet<PresetId>,
    guards: HashMap<PresetId, u64>,
    guard_ms: u64,
}

impl SuggestionReconciler {
    pub fn new(guard_ms: u64) -> Self {
        Self {
            applied: HashSet::new(),
            guards: HashMap::new(),
            guard_ms,
        }
    }

    pub fn is_applied(&self, id: &PresetId) -> bool {
        self.applied.contains(id)
    }

    /// Check whether a suggestion would be accepted, without recording it.
    pub fn check(
        &self,
        id: &PresetId,
        suggestion: &PixelBox,
        image: Option<ImageMeta>,
    ) -> Result<ImageMeta, SuggestionRejection> {
        let image = match image {
            Some(image) if !image.is_empty() => image,
            _ => return Err(SuggestionRejection::NoImage),
        };
        if self.applied.contains(id) {
            return Err(SuggestionRejection::AlreadyApplied);
        }
        if !suggestion.has_area() || !suggestion.fits_within(image, BOUNDS_EPSILON) {
            return Err(SuggestionRejection::Malformed);
        }
        if suggestion.width >= f64::from(image.width) {
            return Err(SuggestionRejection::FullFrame);
        }
        Ok(image)
    }

    /// Accept a suggestion for `id` if it is the first usable one.
    ///
    /// On success the preset is marked as applied and guarded until
    /// `now_ms + guard_ms`. The caller writes the returned transform into the
    /// store and resets the preset's history to it.
    pub fn reconcile(
        &mut self,
        id: &PresetId,
        suggestion: &PixelBox,
        image: Option<ImageMeta>,
        now_ms: u64,
    ) -> ReconcileOutcome {
        match self.check(id, suggestion, image) {
            Ok(image) => {
                self.applied.insert(id.clone());
                self.guards
                    .insert(id.clone(), now_ms.saturating_add(self.guard_ms));
                ReconcileOutcome::Applied(suggestion_transform(image, suggestion))
            }
            Err(rejection) => ReconcileOutcome::Rejected(rejection),
        }
    }

    /// True while pointer-driven edits to `id` must be dropped.
    pub fn is_guarded(&self, id: &PresetId, now_ms: u64) -> bool {
        self.guards.get(id).is_some_and(|&until| now_ms < until)
    }

    /// Forget expired guards.
    pub fn expire(&mut self, now_ms: u64) {
        self.guards.retain(|_, until| now_ms < *until);
    }

    /// Forget everything (new image loaded).
    pub fn clear(&mut self) {
        self.applied.clear();
        self.guards.clear();
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: an accepted suggestion never zooms out past the full image.
        #[test]
        fn prop_suggestion_zoom_at_least_one(
            (width, height) in (100u32..6000, 100u32..6000),
            fx in 0.0f64..0.9,
            fy in 0.0f64..0.9,
            fw in 0.01f64..0.99,
            fh in 0.01f64..1.0,
        ) {
            let image = ImageMeta::new(width, height);
            let w = f64::from(width) * fw * (1.0 - fx);
            let h = f64::from(height) * fh * (1.0 - fy);
            let suggestion = PixelBox::new(f64::from(width) * fx, f64::from(height) * fy, w, h);
            let r = SuggestionReconciler::new(100);
            prop_assume!(r.check(&PresetId::new("p"), &suggestion, Some(image)).is_ok());

            let t = suggestion_transform(image, &suggestion);
            prop_assert!(t.zoom >= 1.0);
            prop_assert!(t.offset.is_finite());
        }

        /// Property: full-height boxes that overhang by less than the bounds
        /// epsilon are accepted and still keep zoom at 1 or above.
        #[test]
        fn prop_overhanging_suggestion_zoom_at_least_one(
            (width, height) in (100u32..6000, 100u32..6000),
            fx in 0.0f64..0.5,
            fw in 0.01f64..0.49,
            slack in 0.0f64..1.0,
        ) {
            let image = ImageMeta::new(width, height);
            let overhang = BOUNDS_EPSILON * slack;
            let suggestion = PixelBox::new(
                f64::from(width) * fx,
                -overhang / 2.0,
                f64::from(width) * fw,
                f64::from(height) + overhang,
            );
            let r = SuggestionReconciler::new(100);
            prop_assume!(r.check(&PresetId::new("p"), &suggestion, Some(image)).is_ok());

            let t = suggestion_transform(image, &suggestion);
            prop_assert!(t.zoom >= 1.0);
            prop_assert_eq!(t.last_pixel_box, Some(suggestion));
        }
    }
}
