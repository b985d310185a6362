//! Interactive input: events, router states, and their outcomes.
//!
//! The router is a synchronous state machine. Every event is handled to
//! completion inside [`crate::CropSession::handle`]; the only deferred work is
//! the history controller's coalescing timer.
//!
//! | Event                       | State                  | History commit |
//! |-----------------------------|------------------------|----------------|
//! | drag motion                 | `Dragging`             | coalesced      |
//! | drag release                | `Idle`                 | flush          |
//! | slider motion               | `SliderZoom`           | coalesced      |
//! | zoom button, Ctrl/Cmd+Arrow | `ButtonOrKeyboardZoom` | immediate      |
//! | arrow key                   | `KeyboardPan`          | coalesced      |
//! | Tab, preset selection       | `PresetSwitch`         | drop pending   |
//! | undo / redo shortcut        | `UndoRedo`             | step           |

mod keys;
mod router;

pub use keys::{action_for, Action, Key, Modifiers, ZoomDirection};

use crate::boundary::Sides;
use crate::geometry::{Offset, PixelBox};
use crate::preset::PresetId;
use serde::{Deserialize, Serialize};

/// An input event targeting the active preset.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer drag moved the crop to `offset`. `revision` is the store
    /// revision the drag surface last saw; `None` skips the staleness check.
    DragMove { offset: Offset, revision: Option<u64> },
    /// Pointer released.
    DragEnd,
    /// Zoom slider moved to an absolute zoom.
    SliderZoom { zoom: f64 },
    /// On-screen zoom button.
    ZoomButton(ZoomDirection),
    /// Key press with modifier state.
    Key { key: Key, modifiers: Modifiers },
    /// Direct preset selection (e.g. clicking a preset tab).
    SelectPreset(PresetId),
    Undo,
    Redo,
    /// Return the active preset to the identity transform.
    ResetPreset,
}

/// Router state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RouterState {
    #[default]
    Idle,
    Dragging,
    SliderZoom,
    ButtonOrKeyboardZoom,
    KeyboardPan,
    PresetSwitch,
    UndoRedo,
}

impl RouterState {
    /// Continuous states last until their coalesced frame is recorded.
    pub fn is_continuous(self) -> bool {
        matches!(
            self,
            RouterState::Dragging | RouterState::SliderZoom | RouterState::KeyboardPan
        )
    }
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    /// The active transform changed; the new crop was emitted.
    Changed(PixelBox),
    /// Nothing to do: same value, empty stack, unmapped key, or no image.
    Unchanged,
    /// A keyboard pan hit the image edge. Carries the blocked directions.
    Blocked(Sides),
    /// A pointer edit was dropped because a newer write landed first.
    Stale,
    /// The active preset changed.
    Switched(PresetId),
}

impl InputOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, InputOutcome::Changed(_))
    }
}
