//! QuickCrop Core - interactive crop session engine
//!
//! This crate owns the state behind QuickCrop's multi-preset cropping UI: one
//! loaded image, one crop transform per output preset, detector suggestions
//! applied once, coalesced undo/redo, a zoom ceiling that prevents silent
//! upscaling, and boundary handling for keyboard panning.
//!
//! Decoding, detection, rendering and export are done elsewhere; this crate
//! consumes image dimensions and suggestion rectangles, and emits crop
//! rectangles.
//!
//! # Usage
//!
//! ```ignore
//! use quickcrop_core::{CropSession, ImageMeta, InputEvent, ZoomDirection};
//!
//! let mut session = CropSession::with_defaults()?;
//! session.load_image(ImageMeta::new(4000, 3000))?;
//! session.handle(InputEvent::ZoomButton(ZoomDirection::In), now_ms)?;
//! for event in session.take_events() {
//!     // forward CropChanged to the preview renderer
//! }
//! ```

pub mod boundary;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod history;
pub mod input;
pub mod preset;
pub mod session;
pub mod store;
pub mod suggestion;
pub mod transform;
pub mod zoom;

pub use boundary::{Side, Sides};
pub use config::SessionConfig;
pub use error::SessionError;
pub use events::SessionEvent;
pub use geometry::{ImageMeta, Offset, PixelBox};
pub use history::{CommitMode, History, HistoryController};
pub use input::{InputEvent, InputOutcome, Key, Modifiers, RouterState, ZoomDirection};
pub use preset::{PresetConfig, PresetId};
pub use session::CropSession;
pub use suggestion::{ReconcileOutcome, SuggestionRejection};
pub use transform::CropTransform;
pub use zoom::max_zoom;
