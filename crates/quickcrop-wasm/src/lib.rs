//! QuickCrop WASM - WebAssembly bindings for the QuickCrop session engine
//!
//! This crate exposes the quickcrop-core crop session to the browser UI.
//!
//! # Module Structure
//!
//! - `session` - `JsCropSession` wrapper and the preset catalogue
//! - `console` - Forwards the core's `tracing` events to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession, defaultPresets } from '@quickcrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsCropSession(defaultPresets(), { coalesceWindowMs: 500 });
//! session.loadImage(4000, 3000);
//! session.applySuggestion('headshot', 1500, 700, 1000, 1000, performance.now());
//! ```

use wasm_bindgen::prelude::*;

mod console;
mod session;

pub use console::set_log_level;
pub use session::{default_presets, JsCropSession};

/// Initialize the WASM module (called automatically on load)
///
/// Routes core log events to the browser console at INFO and above.
#[wasm_bindgen(start)]
pub fn init() {
    console::install();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
