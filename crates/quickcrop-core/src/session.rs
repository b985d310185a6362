//! The crop session: one loaded image, many presets.
//!
//! `CropSession` owns the preset store, every preset's history, the set of
//! presets that already received a detector suggestion, and the outbox of
//! events for preview/export consumers. Nothing else mutates that state.
//!
//! All calls take the host clock in milliseconds. The host must call
//! [`CropSession::tick`] when timers are due (any time is fine; early ticks are
//! no-ops) so coalesced edits land in history.

use crate::boundary::Sides;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::events::SessionEvent;
use crate::geometry::{ImageMeta, PixelBox};
use crate::history::{CommitMode, CommitResult, HistoryController};
use crate::input::{InputOutcome, RouterState};
use crate::preset::{PresetConfig, PresetId};
use crate::store::PresetTransformStore;
use crate::suggestion::{ReconcileOutcome, SuggestionReconciler, SuggestionRejection};
use crate::transform::{crop_box, pinned_offset, CropTransform};
use crate::zoom::{self, ZoomLimits};
use tracing::{debug, info, warn};

/// Transient boundary-reached signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BoundaryFlash {
    pub directions: Sides,
    pub until_ms: u64,
}

/// Interactive crop session engine.
#[derive(Debug, Clone)]
pub struct CropSession {
    pub(crate) config: SessionConfig,
    pub(crate) image: Option<ImageMeta>,
    pub(crate) store: PresetTransformStore,
    pub(crate) history: HistoryController,
    pub(crate) suggestions: SuggestionReconciler,
    pub(crate) state: RouterState,
    pub(crate) boundary: Option<BoundaryFlash>,
    events: Vec<SessionEvent>,
}

impl CropSession {
    /// Create a session for a fixed set of presets. The first preset is active.
    pub fn new(presets: Vec<PresetConfig>, config: SessionConfig) -> Result<Self, SessionError> {
        let store = PresetTransformStore::new(presets)?;
        let active = store.first_id().clone();
        let history = HistoryController::new(store.ids(), active, config.coalesce_window_ms);
        let suggestions = SuggestionReconciler::new(config.suggestion_guard_ms);
        debug!(presets = store.len(), "crop session created");

        Ok(Self {
            config,
            image: None,
            store,
            history,
            suggestions,
            state: RouterState::Idle,
            boundary: None,
            events: Vec::new(),
        })
    }

    /// Session over the standard preset catalogue with default tunables.
    pub fn with_defaults() -> Result<Self, SessionError> {
        Self::new(PresetConfig::defaults(), SessionConfig::default())
    }

    // ------------------------------------------------------------------
    // Image lifecycle
    // ------------------------------------------------------------------

    /// Replace the current image.
    ///
    /// Cancels pending timers, discards every history, forgets applied
    /// suggestions, and resets every transform to identity. The initial crop
    /// of each preset is emitted.
    pub fn load_image(&mut self, image: ImageMeta) -> Result<(), SessionError> {
        if image.is_empty() {
            warn!(width = image.width, height = image.height, "rejected image with no area");
            return Err(SessionError::InvalidImage {
                width: image.width,
                height: image.height,
            });
        }

        self.image = Some(image);
        self.store.reinitialize();
        self.history.reset_all();
        self.suggestions.clear();
        self.state = RouterState::Idle;
        if self.boundary.take().is_some() {
            self.events.push(SessionEvent::BoundaryCleared);
        }
        info!(width = image.width, height = image.height, "image loaded");

        let ids: Vec<PresetId> = self.store.ids().cloned().collect();
        for id in &ids {
            self.emit_crop(id);
        }
        self.emit_history();
        Ok(())
    }

    pub fn image(&self) -> Option<ImageMeta> {
        self.image
    }

    // ------------------------------------------------------------------
    // Detector suggestions
    // ------------------------------------------------------------------

    /// Apply a detector suggestion to a preset.
    ///
    /// Only the first usable suggestion per preset and image is applied. It
    /// replaces the transform and becomes the preset's new history baseline
    /// (it cannot be undone past). Pointer edits to the preset are dropped for
    /// a short guard window afterwards.
    pub fn apply_suggestion(
        &mut self,
        id: &PresetId,
        suggestion: PixelBox,
        now_ms: u64,
    ) -> Result<ReconcileOutcome, SessionError> {
        self.require_preset(id)?;

        let outcome = self.suggestions.reconcile(id, &suggestion, self.image, now_ms);
        let transform = match &outcome {
            ReconcileOutcome::Applied(transform) => transform.clone(),
            ReconcileOutcome::Rejected(SuggestionRejection::NoImage) => {
                warn!(preset = %id, "suggestion arrived before image dimensions; skipped");
                return Ok(outcome);
            }
            ReconcileOutcome::Rejected(reason) => {
                debug!(preset = %id, ?reason, "suggestion ignored");
                return Ok(outcome);
            }
        };

        self.store.write(id, transform.clone());
        self.history.reset(id, transform.clone());
        if *id == *self.history.active() && self.state.is_continuous() {
            self.state = RouterState::Idle;
        }
        info!(preset = %id, zoom = transform.zoom, "suggestion applied");

        self.events.push(SessionEvent::SuggestionApplied {
            preset: id.clone(),
            pixel_box: suggestion,
        });
        self.emit_crop(id);
        if *id == *self.history.active() {
            self.emit_history();
        }
        Ok(outcome)
    }

    pub fn is_suggestion_applied(&self, id: &PresetId) -> bool {
        self.suggestions.is_applied(id)
    }

    // ------------------------------------------------------------------
    // Zoom ceiling
    // ------------------------------------------------------------------

    /// Maximum zoom for a preset on the current image.
    pub fn max_zoom(&self, id: &PresetId) -> Result<f64, SessionError> {
        let slot = self.require_preset(id)?;
        let image = self.image.unwrap_or_default();
        Ok(zoom::max_zoom_with(
            ZoomLimits::from(&self.config),
            image.width,
            image.height,
            slot.config.output_width(),
            slot.config.output_height(),
            slot.upscale_allowed,
        ))
    }

    /// True when the source is too small for the preset's output even at
    /// zoom 1, so the export will upscale regardless.
    pub fn needs_upscale(&self, id: &PresetId) -> Result<bool, SessionError> {
        let slot = self.require_preset(id)?;
        let image = self.image.unwrap_or_default();
        Ok(zoom::needs_upscale(
            image.width,
            image.height,
            slot.config.output_width(),
            slot.config.output_height(),
        ))
    }

    /// Change a preset's output size. The aspect ratio stays fixed, so the new
    /// size must match it. The zoom is clamped to the new ceiling right away.
    pub fn set_output_size(
        &mut self,
        id: &PresetId,
        output_size: [u32; 2],
        now_ms: u64,
    ) -> Result<(), SessionError> {
        let mut config = self.require_preset(id)?.config.clone();
        config.output_size = output_size;
        config.validate()?;

        if let Some(slot) = self.store.get_mut(id) {
            slot.config = config;
        }
        debug!(preset = %id, width = output_size[0], height = output_size[1], "output size changed");
        self.enforce_zoom_ceiling(id, now_ms)
    }

    /// Toggle whether a preset may zoom past native resolution. Turning it off
    /// clamps the zoom right away.
    pub fn set_upscale_allowed(
        &mut self,
        id: &PresetId,
        allowed: bool,
        now_ms: u64,
    ) -> Result<(), SessionError> {
        self.require_preset(id)?;
        if let Some(slot) = self.store.get_mut(id) {
            slot.upscale_allowed = allowed;
        }
        debug!(preset = %id, allowed, "upscale toggled");
        self.enforce_zoom_ceiling(id, now_ms)
    }

    pub fn upscale_allowed(&self, id: &PresetId) -> Result<bool, SessionError> {
        Ok(self.require_preset(id)?.upscale_allowed)
    }

    fn enforce_zoom_ceiling(&mut self, id: &PresetId, now_ms: u64) -> Result<(), SessionError> {
        let max = self.max_zoom(id)?;
        let current = self.require_preset(id)?.transform.clone();
        if current.zoom <= max {
            return Ok(());
        }

        debug!(preset = %id, from = current.zoom, to = max, "zoom clamped to ceiling");
        let clamped = current.with_zoom(max);
        self.apply_change(id, clamped, CommitMode::Immediate, now_ms);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Timers and outbox
    // ------------------------------------------------------------------

    /// Fire due timers: the coalescing timer, the suggestion guard, and the
    /// boundary signal.
    pub fn tick(&mut self, now_ms: u64) {
        if self.history.tick(now_ms) {
            self.emit_history();
            if matches!(self.state, RouterState::SliderZoom | RouterState::KeyboardPan) {
                self.state = RouterState::Idle;
            }
        }
        self.suggestions.expire(now_ms);
        if self.boundary.is_some_and(|flash| now_ms >= flash.until_ms) {
            self.boundary = None;
            self.events.push(SessionEvent::BoundaryCleared);
        }
    }

    /// Earliest time at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        let coalesce = self.history.pending().map(|t| t.deadline_ms);
        let boundary = self.boundary.map(|flash| flash.until_ms);
        match (coalesce, boundary) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Drain the outbox in emission order.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn active_preset(&self) -> &PresetId {
        self.history.active()
    }

    pub fn presets(&self) -> impl Iterator<Item = &PresetConfig> {
        self.store.ids().filter_map(move |id| self.store.get(id).map(|s| &s.config))
    }

    pub fn transform(&self, id: &PresetId) -> Result<&CropTransform, SessionError> {
        Ok(&self.require_preset(id)?.transform)
    }

    pub fn revision(&self, id: &PresetId) -> Result<u64, SessionError> {
        Ok(self.require_preset(id)?.revision)
    }

    /// Current crop rectangle of a preset, or `None` before an image is loaded.
    pub fn crop_box(&self, id: &PresetId) -> Result<Option<PixelBox>, SessionError> {
        let slot = self.require_preset(id)?;
        Ok(self
            .image
            .and_then(|image| crop_box(&slot.transform, image, slot.config.aspect())))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &HistoryController {
        &self.history
    }

    pub fn router_state(&self) -> RouterState {
        self.state
    }

    /// Blocked pan directions while the boundary signal is raised.
    pub fn boundary_signal(&self, now_ms: u64) -> Option<Sides> {
        self.boundary
            .filter(|flash| now_ms < flash.until_ms)
            .map(|flash| flash.directions)
    }

    // ------------------------------------------------------------------
    // Internals shared with the router
    // ------------------------------------------------------------------

    pub(crate) fn require_preset(
        &self,
        id: &PresetId,
    ) -> Result<&crate::store::PresetSlot, SessionError> {
        self.store.require(id).inspect_err(|_| {
            warn!(preset = %id, "unknown preset id referenced");
        })
    }

    /// Write a new transform for `id`, record it, and emit the crop.
    pub(crate) fn apply_change(
        &mut self,
        id: &PresetId,
        transform: CropTransform,
        mode: CommitMode,
        now_ms: u64,
    ) -> InputOutcome {
        let (Some(image), Some(slot)) = (self.image, self.store.get(id)) else {
            return InputOutcome::Unchanged;
        };
        let Some(pixel_box) = crop_box(&transform, image, slot.config.aspect()) else {
            return InputOutcome::Unchanged;
        };
        // Store the offset the pinned box actually shows, not the overpan
        let offset = pinned_offset(&transform, image, &pixel_box);
        let snapshot = CropTransform {
            offset,
            last_pixel_box: Some(pixel_box),
            ..transform
        };
        if slot.transform.same_view(&snapshot) {
            return InputOutcome::Unchanged;
        }

        self.store.write(id, snapshot.clone());
        let result = if *id == *self.history.active() {
            self.history.commit(snapshot, mode, now_ms)
        } else {
            self.history.commit_to(id, snapshot, now_ms)
        };

        self.emit_crop(id);
        if result == CommitResult::Recorded || result == CommitResult::Deferred {
            self.emit_history();
        }
        InputOutcome::Changed(pixel_box)
    }

    /// Write a transform restored from history into the store.
    pub(crate) fn restore(&mut self, transform: CropTransform) -> InputOutcome {
        let id = self.history.active().clone();
        let mut snapshot = transform;
        if let (Some(image), Some(slot)) = (self.image, self.store.get(&id)) {
            if snapshot.last_pixel_box.is_none() {
                snapshot.last_pixel_box = crop_box(&snapshot, image, slot.config.aspect());
                self.history.sync_present(&id, snapshot.clone());
            }
        }
        let pixel_box = snapshot.last_pixel_box;
        self.store.write(&id, snapshot);
        self.emit_crop(&id);
        self.emit_history();
        match pixel_box {
            Some(pixel_box) => InputOutcome::Changed(pixel_box),
            None => InputOutcome::Unchanged,
        }
    }

    pub(crate) fn raise_boundary(&mut self, directions: Sides, now_ms: u64) {
        self.boundary = Some(BoundaryFlash {
            directions,
            until_ms: now_ms.saturating_add(self.config.boundary_signal_ms),
        });
        self.events.push(SessionEvent::BoundaryReached {
            preset: self.history.active().clone(),
            directions,
        });
    }

    pub(crate) fn emit(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    pub(crate) fn emit_crop(&mut self, id: &PresetId) {
        let (Some(image), Some(slot)) = (self.image, self.store.get(id)) else {
            return;
        };
        let pixel_box = slot
            .transform
            .last_pixel_box
            .or_else(|| crop_box(&slot.transform, image, slot.config.aspect()));
        if let Some(pixel_box) = pixel_box {
            self.events.push(SessionEvent::CropChanged {
                preset: id.clone(),
                pixel_box,
                transform: slot.transform.clone(),
                revision: slot.revision,
            });
        }
    }

    pub(crate) fn emit_history(&mut self) {
        self.events.push(SessionEvent::HistoryChanged {
            preset: self.history.active().clone(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Offset;

    fn session() -> CropSession {
        let mut s = CropSession::with_defaults().unwrap();
        s.load_image(ImageMeta::new(4000, 3000)).unwrap();
        s.take_events();
        s
    }

    fn id(name: &str) -> PresetId {
        PresetId::new(name)
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert_eq!(
            CropSession::new(vec![], SessionConfig::default()).unwrap_err(),
            SessionError::NoPresets
        );
    }

    #[test]
    fn test_with_defaults_uses_catalogue() {
        let s = CropSession::with_defaults().unwrap();
        let ids: Vec<&str> = s.presets().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["headshot", "avatar", "thumbnail", "website", "full_body"]);
        assert_eq!(s.config(), &SessionConfig::default());
    }

    #[test]
    fn test_first_preset_active() {
        let s = CropSession::with_defaults().unwrap();
        assert_eq!(s.active_preset().as_str(), "headshot");
        assert!(s.image().is_none());
    }

    #[test]
    fn test_load_image_rejects_empty() {
        let mut s = CropSession::with_defaults().unwrap();
        assert_eq!(
            s.load_image(ImageMeta::new(0, 10)).unwrap_err(),
            SessionError::InvalidImage {
                width: 0,
                height: 10
            }
        );
    }

    #[test]
    fn test_load_image_emits_initial_crops() {
        let mut s = CropSession::with_defaults().unwrap();
        s.load_image(ImageMeta::new(1920, 1080)).unwrap();
        let events = s.take_events();
        let crops = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::CropChanged { .. }))
            .count();
        assert_eq!(crops, 5);
        assert_eq!(
            s.crop_box(&id("headshot")).unwrap(),
            Some(PixelBox::new(420.0, 0.0, 1080.0, 1080.0))
        );
        // Store keeps the untouched identity
        assert_eq!(s.transform(&id("headshot")).unwrap(), &CropTransform::identity());
    }

    #[test]
    fn test_load_image_resets_everything() {
        let mut s = session();
        let headshot = id("headshot");
        s.apply_suggestion(&headshot, PixelBox::new(1000.0, 500.0, 1000.0, 1000.0), 0)
            .unwrap();
        s.apply_change(
            &headshot,
            CropTransform::identity().with_zoom(1.5),
            CommitMode::Coalesced,
            10,
        );
        assert!(s.history().pending().is_some());

        s.load_image(ImageMeta::new(3000, 2000)).unwrap();
        assert!(!s.is_suggestion_applied(&headshot));
        assert!(s.history().pending().is_none());
        assert!(!s.can_undo());
        assert_eq!(s.transform(&headshot).unwrap(), &CropTransform::identity());
    }

    #[test]
    fn test_suggestion_before_image_is_skipped() {
        let mut s = CropSession::with_defaults().unwrap();
        let outcome = s
            .apply_suggestion(&id("avatar"), PixelBox::new(0.0, 0.0, 10.0, 10.0), 0)
            .unwrap();
        assert_eq!(outcome, ReconcileOutcome::Rejected(SuggestionRejection::NoImage));
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn test_suggestion_unknown_preset_is_config_error() {
        let mut s = session();
        assert_eq!(
            s.apply_suggestion(&id("poster"), PixelBox::new(0.0, 0.0, 10.0, 10.0), 0)
                .unwrap_err(),
            SessionError::UnknownPreset(id("poster"))
        );
    }

    #[test]
    fn test_suggestion_is_idempotent() {
        let mut s = session();
        let avatar = id("avatar");
        let first = PixelBox::new(1000.0, 500.0, 1000.0, 1000.0);
        let second = PixelBox::new(0.0, 0.0, 500.0, 500.0);

        assert!(s.apply_suggestion(&avatar, first, 0).unwrap().is_applied());
        let after_first = s.transform(&avatar).unwrap().clone();
        assert_eq!(after_first.last_pixel_box, Some(first));
        assert!((after_first.zoom - 3.0).abs() < 1e-9);

        let outcome = s.apply_suggestion(&avatar, second, 10).unwrap();
        assert_eq!(
            outcome,
            ReconcileOutcome::Rejected(SuggestionRejection::AlreadyApplied)
        );
        assert_eq!(s.transform(&avatar).unwrap(), &after_first);
    }

    #[test]
    fn test_suggestion_becomes_history_baseline() {
        let mut s = session();
        let headshot = id("headshot");
        s.apply_change(
            &headshot,
            CropTransform::identity().with_offset(Offset::new(5.0, 0.0)),
            CommitMode::Immediate,
            0,
        );
        assert!(s.can_undo());

        s.apply_suggestion(&headshot, PixelBox::new(1000.0, 500.0, 1000.0, 1000.0), 10)
            .unwrap();
        assert!(!s.can_undo());
        assert!(!s.can_redo());
        let history = s.history().history(&headshot).unwrap();
        assert_eq!(history.present(), s.transform(&headshot).unwrap());
    }

    #[test]
    fn test_overhanging_suggestion_keeps_zoom_floor() {
        let mut s = session();
        let avatar = id("avatar");
        let overhang = PixelBox::new(100.0, -5e-7, 1000.0, 3000.0 + 1e-6);
        let outcome = s.apply_suggestion(&avatar, overhang, 0).unwrap();
        assert!(outcome.is_applied());

        assert_eq!(s.transform(&avatar).unwrap().zoom, 1.0);
        let baseline = s.history().history(&avatar).unwrap().present();
        assert_eq!(baseline.zoom, 1.0);
        assert_eq!(baseline.last_pixel_box, Some(overhang));
    }

    #[test]
    fn test_suggestion_for_inactive_preset_keeps_active_history() {
        let mut s = session();
        s.apply_change(
            &id("headshot"),
            CropTransform::identity().with_zoom(1.2),
            CommitMode::Immediate,
            0,
        );
        s.apply_suggestion(&id("website"), PixelBox::new(1000.0, 500.0, 800.0, 1000.0), 10)
            .unwrap();
        assert!(s.can_undo());
        assert_eq!(s.active_preset().as_str(), "headshot");
    }

    #[test]
    fn test_max_zoom_uses_preset_output() {
        let s = session();
        // 4000x3000 vs 300x300: min(13.3, 10)
        assert!((s.max_zoom(&id("avatar")).unwrap() - 10.0).abs() < 1e-9);
        // 4000x3000 vs 2000x2000
        assert!((s.max_zoom(&id("headshot")).unwrap() - 1.5).abs() < 1e-9);
        assert_eq!(
            s.max_zoom(&id("poster")).unwrap_err(),
            SessionError::UnknownPreset(id("poster"))
        );
    }

    #[test]
    fn test_max_zoom_without_image_falls_back() {
        let s = CropSession::with_defaults().unwrap();
        assert_eq!(s.max_zoom(&id("avatar")).unwrap(), 3.0);
    }

    #[test]
    fn test_needs_upscale() {
        let mut s = CropSession::with_defaults().unwrap();
        s.load_image(ImageMeta::new(1920, 1080)).unwrap();
        assert!(s.needs_upscale(&id("headshot")).unwrap());
        assert!(!s.needs_upscale(&id("avatar")).unwrap());
        assert_eq!(s.max_zoom(&id("headshot")).unwrap(), 1.0);
    }

    #[test]
    fn test_output_size_change_clamps_zoom_immediately() {
        let mut s = session();
        let avatar = id("avatar");
        s.apply_change(&avatar, CropTransform::identity().with_zoom(8.0), CommitMode::Immediate, 0);
        let undo_depth = s.history().history(&avatar).unwrap().past().len();

        // 4000x3000 vs 1000x1000 allows 3x
        s.set_output_size(&avatar, [1000, 1000], 10).unwrap();
        assert!((s.transform(&avatar).unwrap().zoom - 3.0).abs() < 1e-9);
        assert_eq!(
            s.history().history(&avatar).unwrap().past().len(),
            undo_depth + 1
        );
    }

    #[test]
    fn test_output_size_must_match_aspect() {
        let mut s = session();
        assert!(matches!(
            s.set_output_size(&id("avatar"), [400, 300], 0),
            Err(SessionError::InvalidPreset { .. })
        ));
    }

    #[test]
    fn test_disabling_upscale_clamps_zoom() {
        let mut s = session();
        let headshot = id("headshot");
        s.set_upscale_allowed(&headshot, true, 0).unwrap();
        assert_eq!(s.max_zoom(&headshot).unwrap(), 10.0);
        s.apply_change(&headshot, CropTransform::identity().with_zoom(6.0), CommitMode::Immediate, 0);

        s.set_upscale_allowed(&headshot, false, 10).unwrap();
        assert!((s.transform(&headshot).unwrap().zoom - 1.5).abs() < 1e-9);
        assert!(!s.upscale_allowed(&headshot).unwrap());
    }

    #[test]
    fn test_tick_records_coalesced_and_emits_history() {
        let mut s = session();
        let headshot = id("headshot");
        s.apply_change(&headshot, CropTransform::identity().with_zoom(1.2), CommitMode::Coalesced, 0);
        assert_eq!(s.next_deadline(), Some(500));
        s.take_events();

        s.tick(499);
        assert!(s.take_events().is_empty());
        s.tick(500);
        let events = s.take_events();
        assert!(matches!(
            events.as_slice(),
            [SessionEvent::HistoryChanged { can_undo: true, .. }]
        ));
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn test_apply_change_emits_revision() {
        let mut s = session();
        let headshot = id("headshot");
        let before = s.revision(&headshot).unwrap();
        s.apply_change(&headshot, CropTransform::identity().with_zoom(1.1), CommitMode::Immediate, 0);
        let events = s.take_events();
        let revision = events.iter().find_map(|e| match e {
            SessionEvent::CropChanged { revision, .. } => Some(*revision),
            _ => None,
        });
        assert_eq!(revision, Some(before + 1));
    }

    #[test]
    fn test_presets_in_order() {
        let s = CropSession::with_defaults().unwrap();
        let ids: Vec<&str> = s.presets().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["headshot", "avatar", "thumbnail", "website", "full_body"]);
    }
}
