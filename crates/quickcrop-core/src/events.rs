//! Notifications emitted by a session for preview and export consumers.

use crate::boundary::Sides;
use crate::geometry::PixelBox;
use crate::preset::PresetId;
use crate::transform::CropTransform;
use serde::{Deserialize, Serialize};

/// One entry of the session's outbox, in the order the causing events were
/// processed. Drained with [`crate::CropSession::take_events`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    /// A preset's transform changed. Emitted for every change, including the
    /// intermediate steps of a drag, so live previews stay current.
    #[serde(rename_all = "camelCase")]
    CropChanged {
        preset: PresetId,
        pixel_box: PixelBox,
        transform: CropTransform,
        /// Store revision after the change; pointer edits echo it back.
        revision: u64,
    },
    /// A keyboard pan was rejected at the image edge. `directions` are the
    /// pan directions that are currently blocked.
    BoundaryReached { preset: PresetId, directions: Sides },
    /// The boundary signal expired.
    BoundaryCleared,
    /// The active preset changed.
    ActivePresetChanged { preset: PresetId },
    /// A detector suggestion became the preset's new baseline.
    #[serde(rename_all = "camelCase")]
    SuggestionApplied { preset: PresetId, pixel_box: PixelBox },
    /// The active preset's undo/redo availability may have changed.
    #[serde(rename_all = "camelCase")]
    HistoryChanged {
        preset: PresetId,
        can_undo: bool,
        can_redo: bool,
    },
}
