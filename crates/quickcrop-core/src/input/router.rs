//! Event handling for the active preset.

use super::keys::{action_for, Action, ZoomDirection};
use super::{InputEvent, InputOutcome, RouterState};
use crate::boundary::{self, Side};
use crate::error::SessionError;
use crate::events::SessionEvent;
use crate::geometry::Offset;
use crate::history::CommitMode;
use crate::preset::PresetId;
use crate::session::CropSession;
use crate::transform::{clamp_zoom, crop_box};
use tracing::debug;

impl CropSession {
    /// Handle one input event at host time `now_ms`.
    ///
    /// Returns an error only for configuration problems (selecting a preset
    /// id that does not exist). Everything else degrades to an outcome.
    pub fn handle(&mut self, event: InputEvent, now_ms: u64) -> Result<InputOutcome, SessionError> {
        let outcome = match event {
            InputEvent::DragMove { offset, revision } => self.drag_move(offset, revision, now_ms),
            InputEvent::DragEnd => self.drag_end(),
            InputEvent::SliderZoom { zoom } => self.slider_zoom(zoom, now_ms),
            InputEvent::ZoomButton(direction) => self.step_zoom(direction, now_ms),
            InputEvent::Key { key, modifiers } => match action_for(key, modifiers) {
                Some(action) => self.perform(action, now_ms),
                None => InputOutcome::Unchanged,
            },
            InputEvent::SelectPreset(id) => {
                self.require_preset(&id)?;
                self.switch_preset(id)
            }
            InputEvent::Undo => self.step_history(false),
            InputEvent::Redo => self.step_history(true),
            InputEvent::ResetPreset => self.reset_active(now_ms),
        };
        Ok(outcome)
    }

    fn perform(&mut self, action: Action, now_ms: u64) -> InputOutcome {
        match action {
            Action::Pan { direction, coarse } => self.key_pan(direction, coarse, now_ms),
            Action::Zoom(direction) => self.step_zoom(direction, now_ms),
            Action::CyclePreset { reverse } => {
                let next = self.store.cycle(self.history.active(), reverse).clone();
                self.switch_preset(next)
            }
            Action::Undo => self.step_history(false),
            Action::Redo => self.step_history(true),
        }
    }

    fn enter(&mut self, state: RouterState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "router transition");
            self.state = state;
        }
    }

    fn drag_move(&mut self, offset: Offset, revision: Option<u64>, now_ms: u64) -> InputOutcome {
        let id = self.history.active().clone();
        if !offset.is_finite() {
            return InputOutcome::Unchanged;
        }
        if self.suggestions.is_guarded(&id, now_ms) {
            debug!(preset = %id, "drag dropped inside suggestion guard");
            return InputOutcome::Stale;
        }
        let Some(slot) = self.store.get(&id) else {
            return InputOutcome::Unchanged;
        };
        if revision.is_some_and(|r| r != slot.revision) {
            debug!(preset = %id, ?revision, current = slot.revision, "stale drag dropped");
            return InputOutcome::Stale;
        }

        let next = slot.transform.with_offset(offset);
        self.enter(RouterState::Dragging);
        self.apply_change(&id, next, CommitMode::Coalesced, now_ms)
    }

    fn drag_end(&mut self) -> InputOutcome {
        if self.history.flush() {
            self.emit_history();
        }
        self.enter(RouterState::Idle);
        InputOutcome::Unchanged
    }

    fn slider_zoom(&mut self, zoom: f64, now_ms: u64) -> InputOutcome {
        let id = self.history.active().clone();
        let Ok(max) = self.max_zoom(&id) else {
            return InputOutcome::Unchanged;
        };
        let Some(slot) = self.store.get(&id) else {
            return InputOutcome::Unchanged;
        };

        let next = slot.transform.with_zoom(clamp_zoom(zoom, max));
        self.enter(RouterState::SliderZoom);
        self.apply_change(&id, next, CommitMode::Coalesced, now_ms)
    }

    fn step_zoom(&mut self, direction: ZoomDirection, now_ms: u64) -> InputOutcome {
        let id = self.history.active().clone();
        let Ok(max) = self.max_zoom(&id) else {
            return InputOutcome::Unchanged;
        };
        let Some(slot) = self.store.get(&id) else {
            return InputOutcome::Unchanged;
        };

        let zoom = slot.transform.zoom;
        let target = match direction {
            // Never zoom "in" to a lower value when already past the ceiling
            ZoomDirection::In if zoom >= max => zoom,
            ZoomDirection::In => (zoom + self.config.zoom_step).min(max),
            ZoomDirection::Out => (zoom - self.config.zoom_step).max(1.0),
        };
        let next = slot.transform.with_zoom(target);

        self.enter(RouterState::ButtonOrKeyboardZoom);
        let outcome = self.apply_change(&id, next, CommitMode::Immediate, now_ms);
        self.enter(RouterState::Idle);
        outcome
    }

    fn key_pan(&mut self, direction: Side, coarse: bool, now_ms: u64) -> InputOutcome {
        let id = self.history.active().clone();
        let (Some(image), Some(slot)) = (self.image, self.store.get(&id)) else {
            return InputOutcome::Unchanged;
        };
        let Some(current) = slot
            .transform
            .last_pixel_box
            .or_else(|| crop_box(&slot.transform, image, slot.config.aspect()))
        else {
            return InputOutcome::Unchanged;
        };

        let saturated = boundary::boundaries(&current, image, self.config.boundary_tolerance);
        if boundary::blocks_pan(saturated, direction) {
            let blocked = saturated.inverted();
            debug!(preset = %id, ?direction, "pan blocked at image edge");
            self.raise_boundary(blocked, now_ms);
            return InputOutcome::Blocked(blocked);
        }

        let step = if coarse {
            self.config.coarse_pan_step
        } else {
            self.config.pan_step
        };
        let (ux, uy) = direction.unit();
        let offset = Offset::new(
            slot.transform.offset.x + ux * step,
            slot.transform.offset.y + uy * step,
        );
        let next = slot.transform.with_offset(offset);

        self.enter(RouterState::KeyboardPan);
        self.apply_change(&id, next, CommitMode::Coalesced, now_ms)
    }

    /// Make `id` active. A pending coalesced edit of the previous preset is
    /// dropped, not recorded.
    fn switch_preset(&mut self, id: PresetId) -> InputOutcome {
        if id == *self.history.active() {
            return InputOutcome::Unchanged;
        }

        self.enter(RouterState::PresetSwitch);
        if let Some(dropped) = self.history.switch_to(&id) {
            debug!(preset = %dropped.preset, "unfinished edit dropped on preset switch");
        }
        self.emit(SessionEvent::ActivePresetChanged { preset: id.clone() });
        self.emit_crop(&id);
        self.emit_history();
        self.enter(RouterState::Idle);
        InputOutcome::Switched(id)
    }

    fn step_history(&mut self, forward: bool) -> InputOutcome {
        self.enter(RouterState::UndoRedo);
        let restored = if forward {
            self.history.redo().cloned()
        } else {
            self.history.undo().cloned()
        };
        let outcome = match restored {
            Some(transform) => self.restore(transform),
            None => InputOutcome::Unchanged,
        };
        self.enter(RouterState::Idle);
        outcome
    }

    fn reset_active(&mut self, now_ms: u64) -> InputOutcome {
        let id = self.history.active().clone();
        self.apply_change(&id, Default::default(), CommitMode::Immediate, now_ms)
    }
}
