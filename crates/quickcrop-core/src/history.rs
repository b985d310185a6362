//! Per-preset undo/redo with coalescing of continuous edits.
//!
//! Every preset owns its own [`History`]. Only the active preset's history is
//! edited; switching presets swaps which history the controller points at,
//! and histories never exchange entries.
//!
//! # Commit Modes
//!
//! - **Immediate**: discrete edits (zoom buttons, keyboard zoom, reset). The
//!   previous `present` is pushed onto `past` unless nothing changed.
//! - **Coalesced**: continuous edits (drag, slider, arrow-key pan). The first
//!   call captures a baseline and arms a single-shot timer; later calls only
//!   move `present` and re-arm the timer. When the timer fires, or the
//!   interaction ends, the baseline becomes one `past` frame.
//!
//! Time is supplied by the caller in milliseconds; [`HistoryController::tick`]
//! is the timer-fire callback.

use crate::preset::PresetId;
use crate::transform::CropTransform;
use std::collections::HashMap;
use tracing::debug;

/// How a snapshot should be recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    Immediate,
    Coalesced,
}

/// Result of a [`HistoryController::commit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitResult {
    /// A new frame was pushed onto `past`.
    Recorded,
    /// `present` was updated; the frame will be recorded when the timer fires.
    Deferred,
    /// The snapshot matched `present`; nothing was recorded.
    Unchanged,
}

/// Undo/redo stacks for one preset.
///
/// `future` is stored with the next redo target last.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    past: Vec<CropTransform>,
    present: CropTransform,
    future: Vec<CropTransform>,
}

impl History {
    /// A history with no past or future.
    pub fn new(present: CropTransform) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
        }
    }

    pub fn present(&self) -> &CropTransform {
        &self.present
    }

    /// Past frames, oldest first.
    pub fn past(&self) -> &[CropTransform] {
        &self.past
    }

    /// Future frames in redo order.
    pub fn future(&self) -> impl Iterator<Item = &CropTransform> {
        self.future.iter().rev()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    fn push(&mut self, previous: CropTransform, present: CropTransform) {
        self.past.push(previous);
        self.present = present;
        self.future.clear();
    }

    fn undo(&mut self) -> bool {
        match self.past.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.present, previous);
                self.future.push(current);
                true
            }
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.present, next);
                self.past.push(current);
                true
            }
            None => false,
        }
    }
}

/// Pending coalesced commit: the explicit single-shot timer handle.
#[derive(Debug, Clone, PartialEq)]
pub struct CoalesceTimer {
    pub preset: PresetId,
    /// `present` as it was before the continuous interaction started.
    pub baseline: CropTransform,
    pub deadline_ms: u64,
}

/// Owns every preset's history and the coalescing timer.
#[derive(Debug, Clone)]
pub struct HistoryController {
    histories: HashMap<PresetId, History>,
    active: PresetId,
    pending: Option<CoalesceTimer>,
    window_ms: u64,
}

impl HistoryController {
    /// Create empty histories (present = identity) for every preset.
    pub fn new<'a>(
        presets: impl IntoIterator<Item = &'a PresetId>,
        active: PresetId,
        window_ms: u64,
    ) -> Self {
        let histories = presets
            .into_iter()
            .map(|id| (id.clone(), History::new(CropTransform::identity())))
            .collect();
        Self {
            histories,
            active,
            pending: None,
            window_ms,
        }
    }

    pub fn active(&self) -> &PresetId {
        &self.active
    }

    pub fn history(&self, id: &PresetId) -> Option<&History> {
        self.histories.get(id)
    }

    pub fn active_history(&self) -> Option<&History> {
        self.histories.get(&self.active)
    }

    pub fn present(&self) -> Option<&CropTransform> {
        self.active_history().map(History::present)
    }

    pub fn pending(&self) -> Option<&CoalesceTimer> {
        self.pending.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.active_history().is_some_and(|h| h.can_undo())
            || self
                .pending
                .as_ref()
                .zip(self.present())
                .is_some_and(|(timer, present)| !timer.baseline.same_view(present))
    }

    pub fn can_redo(&self) -> bool {
        self.pending.is_none() && self.active_history().is_some_and(|h| h.can_redo())
    }

    /// Record a snapshot of the active preset.
    pub fn commit(&mut self, snapshot: CropTransform, mode: CommitMode, now_ms: u64) -> CommitResult {
        match mode {
            CommitMode::Immediate => {
                self.flush();
                self.commit_immediate(snapshot)
            }
            CommitMode::Coalesced => self.commit_coalesced(snapshot, now_ms),
        }
    }

    /// Immediate commit onto a preset that is not necessarily active.
    pub fn commit_to(&mut self, id: &PresetId, snapshot: CropTransform, now_ms: u64) -> CommitResult {
        if *id == self.active {
            return self.commit(snapshot, CommitMode::Immediate, now_ms);
        }
        match self.histories.get_mut(id) {
            Some(history) => record(history, snapshot),
            None => CommitResult::Unchanged,
        }
    }

    fn commit_immediate(&mut self, snapshot: CropTransform) -> CommitResult {
        match self.histories.get_mut(&self.active) {
            Some(history) => {
                let result = record(history, snapshot);
                debug!(preset = %self.active, ?result, "immediate commit");
                result
            }
            None => CommitResult::Unchanged,
        }
    }

    fn commit_coalesced(&mut self, snapshot: CropTransform, now_ms: u64) -> CommitResult {
        let Some(history) = self.histories.get_mut(&self.active) else {
            return CommitResult::Unchanged;
        };

        let deadline_ms = now_ms.saturating_add(self.window_ms);
        match &mut self.pending {
            Some(timer) => timer.deadline_ms = deadline_ms,
            None => {
                self.pending = Some(CoalesceTimer {
                    preset: self.active.clone(),
                    baseline: history.present.clone(),
                    deadline_ms,
                });
            }
        }
        history.present = snapshot;
        CommitResult::Deferred
    }

    /// Timer-fire callback. Records the pending frame once its deadline passed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|timer| now_ms >= timer.deadline_ms);
        due && self.flush()
    }

    /// Record the pending coalesced frame right away (interaction ended).
    ///
    /// Returns true when a frame was pushed. A burst that ended where it
    /// started leaves no frame behind.
    pub fn flush(&mut self) -> bool {
        let Some(timer) = self.pending.take() else {
            return false;
        };
        let Some(history) = self.histories.get_mut(&timer.preset) else {
            return false;
        };
        if timer.baseline.same_view(&history.present) {
            return false;
        }

        history.past.push(timer.baseline);
        history.future.clear();
        debug!(preset = %timer.preset, depth = history.past.len(), "coalesced commit");
        true
    }

    /// Drop the pending frame without recording it. `present` keeps the latest
    /// edit, but the edit can no longer be undone as a separate step.
    pub fn cancel(&mut self) -> Option<CoalesceTimer> {
        let timer = self.pending.take();
        if let Some(timer) = &timer {
            debug!(preset = %timer.preset, "pending coalesced commit dropped");
        }
        timer
    }

    /// Make another preset's history active, dropping any pending frame of
    /// the previous one.
    pub fn switch_to(&mut self, id: &PresetId) -> Option<CoalesceTimer> {
        let dropped = self.cancel();
        self.active = id.clone();
        dropped
    }

    /// Step back. Pending work is recorded first so the burst is undoable.
    pub fn undo(&mut self) -> Option<&CropTransform> {
        self.flush();
        let history = self.histories.get_mut(&self.active)?;
        if history.undo() {
            Some(&history.present)
        } else {
            None
        }
    }

    /// Step forward.
    pub fn redo(&mut self) -> Option<&CropTransform> {
        self.flush();
        let history = self.histories.get_mut(&self.active)?;
        if history.redo() {
            Some(&history.present)
        } else {
            None
        }
    }

    /// Replace a preset's history with `{[], baseline, []}`.
    pub fn reset(&mut self, id: &PresetId, baseline: CropTransform) {
        if self.pending.as_ref().is_some_and(|t| t.preset == *id) {
            self.pending = None;
        }
        if let Some(history) = self.histories.get_mut(id) {
            *history = History::new(baseline);
        }
    }

    /// Discard every history and any pending frame (new image loaded).
    pub fn reset_all(&mut self) {
        self.pending = None;
        for history in self.histories.values_mut() {
            *history = History::new(CropTransform::identity());
        }
    }

    /// Overwrite `present` without touching the stacks, keeping it in step
    /// with the store when only derived data (the cached pixel box) changed.
    pub(crate) fn sync_present(&mut self, id: &PresetId, snapshot: CropTransform) {
        if let Some(history) = self.histories.get_mut(id) {
            history.present = snapshot;
        }
    }
}

fn record(history: &mut History, snapshot: CropTransform) -> CommitResult {
    if history.present.same_view(&snapshot) {
        history.present = snapshot;
        return CommitResult::Unchanged;
    }
    let previous = std::mem::replace(&mut history.present, snapshot.clone());
    history.push(previous, snapshot);
    CommitResult::Recorded
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::Offset;
    use proptest::prelude::*;

    fn edit_strategy() -> impl Strategy<Value = CropTransform> {
        (-50.0f64..50.0, -50.0f64..50.0, 1.0f64..5.0).prop_map(|(x, y, zoom)| {
            CropTransform::identity()
                .with_offset(Offset::new(x, y))
                .with_zoom(zoom)
        })
    }

    fn controller() -> HistoryController {
        let id = PresetId::new("p");
        HistoryController::new([&id], id.clone(), 500)
    }

    proptest! {
        /// Property: N immediate edits undo back to the start and redo to the end.
        #[test]
        fn prop_undo_redo_round_trip(edits in prop::collection::vec(edit_strategy(), 1..20)) {
            let mut h = controller();
            let mut recorded = 0;
            for edit in &edits {
                if h.commit(edit.clone(), CommitMode::Immediate, 0) == CommitResult::Recorded {
                    recorded += 1;
                }
            }
            let last = h.present().unwrap().clone();

            for _ in 0..recorded {
                prop_assert!(h.undo().is_some());
            }
            prop_assert!(h.undo().is_none());
            prop_assert_eq!(h.present().unwrap(), &CropTransform::identity());

            for _ in 0..recorded {
                prop_assert!(h.redo().is_some());
            }
            prop_assert!(h.redo().is_none());
            prop_assert_eq!(h.present().unwrap(), &last);
        }

        /// Property: a burst inside the window yields exactly one frame.
        #[test]
        fn prop_burst_is_single_frame(
            edits in prop::collection::vec(edit_strategy(), 1..30),
            gap in 1u64..499,
        ) {
            let mut h = controller();
            let mut now = 0;
            for edit in &edits {
                h.commit(edit.clone(), CommitMode::Coalesced, now);
                now += gap;
            }
            h.tick(now + 500);

            let history = h.active_history().unwrap();
            let last = edits.last().unwrap();
            prop_assert_eq!(history.present(), last);
            if last.same_view(&CropTransform::identity()) {
                prop_assert!(history.past().is_empty());
            } else {
                prop_assert_eq!(history.past(), &[CropTransform::identity()][..]);
            }
        }
    }
}
