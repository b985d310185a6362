//! WASM bindings for the crop session.
//!
//! `JsCropSession` wraps the core `CropSession` and exposes it to the
//! TypeScript UI. Structured values (presets, config, events, boxes) cross
//! the boundary through `serde-wasm-bindgen`; the host clock is passed in as
//! `performance.now()` milliseconds.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsCropSession(defaultPresets(), {});
//! session.loadImage(img.naturalWidth, img.naturalHeight);
//! session.keyDown(e.key, e.ctrlKey, e.metaKey, e.shiftKey, performance.now());
//! for (const event of session.takeEvents()) {
//!   if (event.type === 'cropChanged') preview.draw(event.pixelBox);
//! }
//! ```

use quickcrop_core::{
    CropSession, ImageMeta, InputEvent, InputOutcome, Key, Modifiers, Offset, PixelBox,
    PresetConfig, PresetId, ReconcileOutcome, SessionConfig, SessionError, ZoomDirection,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Crop session wrapper for JavaScript.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session from a preset array and a (possibly empty) config object.
    #[wasm_bindgen(constructor)]
    pub fn new(presets: JsValue, config: JsValue) -> Result<JsCropSession, JsValue> {
        let presets: Vec<PresetConfig> = serde_wasm_bindgen::from_value(presets)
            .map_err(|e| JsValue::from_str(&format!("Invalid presets: {}", e)))?;
        let config: SessionConfig = if config.is_undefined() || config.is_null() {
            SessionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        let inner = CropSession::new(presets, config).map_err(to_js_error)?;
        Ok(JsCropSession { inner })
    }

    #[wasm_bindgen(js_name = loadImage)]
    pub fn load_image(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.inner
            .load_image(ImageMeta::new(width, height))
            .map_err(to_js_error)
    }

    /// Apply a detector suggestion. Returns true if it was applied.
    #[wasm_bindgen(js_name = applySuggestion)]
    pub fn apply_suggestion(
        &mut self,
        preset: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        now_ms: f64,
    ) -> Result<bool, JsValue> {
        let outcome = self
            .inner
            .apply_suggestion(
                &PresetId::new(preset),
                PixelBox::new(x, y, width, height),
                to_millis(now_ms),
            )
            .map_err(to_js_error)?;
        Ok(matches!(outcome, ReconcileOutcome::Applied(_)))
    }

    /// Pointer drag moved the crop. Pass the last `revision` seen in a
    /// `cropChanged` event, or `undefined` to skip the staleness check.
    #[wasm_bindgen(js_name = dragMove)]
    pub fn drag_move(&mut self, x: f64, y: f64, revision: Option<f64>, now_ms: f64) -> Result<String, JsValue> {
        let event = InputEvent::DragMove {
            offset: Offset::new(x, y),
            revision: revision.map(|r| r as u64),
        };
        self.dispatch(event, now_ms)
    }

    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self, now_ms: f64) -> Result<String, JsValue> {
        self.dispatch(InputEvent::DragEnd, now_ms)
    }

    #[wasm_bindgen(js_name = sliderZoom)]
    pub fn slider_zoom(&mut self, zoom: f64, now_ms: f64) -> Result<String, JsValue> {
        self.dispatch(InputEvent::SliderZoom { zoom }, now_ms)
    }

    /// Zoom button press (`zoomIn = false` for zoom out).
    #[wasm_bindgen(js_name = zoomButton)]
    pub fn zoom_button(&mut self, zoom_in: bool, now_ms: f64) -> Result<String, JsValue> {
        let direction = if zoom_in {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        };
        self.dispatch(InputEvent::ZoomButton(direction), now_ms)
    }

    /// Key press from a DOM `KeyboardEvent`.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(
        &mut self,
        key: &str,
        ctrl: bool,
        meta: bool,
        shift: bool,
        now_ms: f64,
    ) -> Result<String, JsValue> {
        let event = InputEvent::Key {
            key: Key::parse(key),
            modifiers: Modifiers { ctrl, meta, shift },
        };
        self.dispatch(event, now_ms)
    }

    #[wasm_bindgen(js_name = selectPreset)]
    pub fn select_preset(&mut self, preset: &str, now_ms: f64) -> Result<String, JsValue> {
        self.dispatch(InputEvent::SelectPreset(PresetId::new(preset)), now_ms)
    }

    pub fn undo(&mut self, now_ms: f64) -> Result<String, JsValue> {
        self.dispatch(InputEvent::Undo, now_ms)
    }

    pub fn redo(&mut self, now_ms: f64) -> Result<String, JsValue> {
        self.dispatch(InputEvent::Redo, now_ms)
    }

    #[wasm_bindgen(js_name = resetPreset)]
    pub fn reset_preset(&mut self, now_ms: f64) -> Result<String, JsValue> {
        self.dispatch(InputEvent::ResetPreset, now_ms)
    }

    #[wasm_bindgen(js_name = setOutputSize)]
    pub fn set_output_size(&mut self, preset: &str, width: u32, height: u32, now_ms: f64) -> Result<(), JsValue> {
        self.inner
            .set_output_size(&PresetId::new(preset), [width, height], to_millis(now_ms))
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setUpscaleAllowed)]
    pub fn set_upscale_allowed(&mut self, preset: &str, allowed: bool, now_ms: f64) -> Result<(), JsValue> {
        self.inner
            .set_upscale_allowed(&PresetId::new(preset), allowed, to_millis(now_ms))
            .map_err(to_js_error)
    }

    /// Fire due timers. Call from `setTimeout` at `nextDeadline()`, or from
    /// a `requestAnimationFrame` loop.
    pub fn tick(&mut self, now_ms: f64) {
        self.inner.tick(to_millis(now_ms));
    }

    #[wasm_bindgen(js_name = nextDeadline)]
    pub fn next_deadline(&self) -> Option<f64> {
        self.inner.next_deadline().map(|ms| ms as f64)
    }

    /// Drain pending events as an array of tagged objects.
    #[wasm_bindgen(js_name = takeEvents)]
    pub fn take_events(&mut self) -> Result<js_sys::Array, JsValue> {
        let events = js_sys::Array::new();
        for event in self.inner.take_events() {
            events.push(&to_js(&event)?);
        }
        Ok(events)
    }

    #[wasm_bindgen(js_name = activePreset)]
    pub fn active_preset(&self) -> String {
        self.inner.active_preset().to_string()
    }

    /// Current crop box of a preset, or `null` before an image is loaded.
    #[wasm_bindgen(js_name = cropBox)]
    pub fn crop_box(&self, preset: &str) -> Result<JsValue, JsValue> {
        let crop = self
            .inner
            .crop_box(&PresetId::new(preset))
            .map_err(to_js_error)?;
        to_js(&crop)
    }

    /// Crop box rounded to whole pixels for the export pipeline.
    #[wasm_bindgen(js_name = exportBox)]
    pub fn export_box(&self, preset: &str) -> Result<JsValue, JsValue> {
        let crop = export_box(&self.inner, &PresetId::new(preset)).map_err(to_js_error)?;
        to_js(&crop)
    }

    pub fn transform(&self, preset: &str) -> Result<JsValue, JsValue> {
        let transform = self
            .inner
            .transform(&PresetId::new(preset))
            .map_err(to_js_error)?;
        to_js(transform)
    }

    #[wasm_bindgen(js_name = maxZoom)]
    pub fn max_zoom(&self, preset: &str) -> Result<f64, JsValue> {
        self.inner
            .max_zoom(&PresetId::new(preset))
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = needsUpscale)]
    pub fn needs_upscale(&self, preset: &str) -> Result<bool, JsValue> {
        self.inner
            .needs_upscale(&PresetId::new(preset))
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// Blocked pan directions while the boundary signal is raised, else `null`.
    #[wasm_bindgen(js_name = boundarySignal)]
    pub fn boundary_signal(&self, now_ms: f64) -> Result<JsValue, JsValue> {
        to_js(&self.inner.boundary_signal(to_millis(now_ms)))
    }

    /// Current router state name (`"idle"`, `"dragging"`, ...).
    #[wasm_bindgen(js_name = routerState)]
    pub fn router_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.router_state())
    }
}

impl JsCropSession {
    fn dispatch(&mut self, event: InputEvent, now_ms: f64) -> Result<String, JsValue> {
        self.inner
            .handle(event, to_millis(now_ms))
            .map(|outcome| outcome_name(&outcome).to_string())
            .map_err(to_js_error)
    }
}

/// The preset catalogue as a JS array, for building a session.
#[wasm_bindgen(js_name = defaultPresets)]
pub fn default_presets() -> Result<JsValue, JsValue> {
    to_js(&PresetConfig::defaults())
}

/// Short outcome label returned to JavaScript.
pub(crate) fn outcome_name(outcome: &InputOutcome) -> &'static str {
    match outcome {
        InputOutcome::Changed(_) => "changed",
        InputOutcome::Unchanged => "unchanged",
        InputOutcome::Blocked(_) => "blocked",
        InputOutcome::Stale => "stale",
        InputOutcome::Switched(_) => "switched",
    }
}

/// Convert `performance.now()` into whole milliseconds. Negative and
/// non-finite values map to 0.
pub(crate) fn to_millis(now_ms: f64) -> u64 {
    if now_ms.is_finite() && now_ms > 0.0 {
        now_ms.floor() as u64
    } else {
        0
    }
}

pub(crate) fn export_box(session: &CropSession, id: &PresetId) -> Result<Option<PixelBox>, SessionError> {
    let crop = session.crop_box(id)?;
    Ok(crop.zip(session.image()).map(|(crop, image)| crop.rounded(image)))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(err: SessionError) -> JsValue {
    JsValue::from_str(&err.to_string())
}


/// WASM-specific tests that require JsValue.
///
/// These tests go through the `JsValue` constructor and can only run on
/// wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn session() -> JsCropSession {
        let presets = default_presets().unwrap();
        let mut session = JsCropSession::new(presets, JsValue::UNDEFINED).unwrap();
        session.load_image(4000, 3000).unwrap();
        session
    }

    #[wasm_bindgen_test]
    fn test_create_with_defaults() {
        let session = session();
        assert_eq!(session.active_preset(), "headshot");
        assert!(!session.can_undo());
    }

    #[wasm_bindgen_test]
    fn test_invalid_presets_rejected() {
        let invalid = serde_wasm_bindgen::to_value(&42).unwrap();
        assert!(JsCropSession::new(invalid, JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_zoom_then_undo() {
        let mut session = session();
        assert_eq!(session.zoom_button(true, 0.0).unwrap(), "changed");
        assert!(session.can_undo());
        assert_eq!(session.key_down("z", true, false, false, 10.0).unwrap(), "changed");
        assert!(!session.can_undo());
    }

    #[wasm_bindgen_test]
    fn test_take_events_drains() {
        let mut session = session();
        let events = session.take_events().unwrap();
        assert!(events.length() > 0);
        assert_eq!(session.take_events().unwrap().length(), 0);
    }

    #[wasm_bindgen_test]
    fn test_unknown_preset_errors() {
        let mut session = session();
        assert!(session.select_preset("poster", 0.0).is_err());
        assert!(session.max_zoom("poster").is_err());
    }
}
