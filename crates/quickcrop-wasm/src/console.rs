//! Browser console output for the core's `tracing` events.
//!
//! The core crate only emits events; this layer formats them as one line each
//! and forwards them to the matching `console.*` method. Installed once from
//! [`crate::init`]; the verbosity can be changed later with `setLogLevel`.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;
use wasm_bindgen::prelude::*;

/// Most verbose level still forwarded, as ranked by [`rank`]. Defaults to INFO.
static MAX_LEVEL: AtomicU8 = AtomicU8::new(3);

fn rank(level: Level) -> u8 {
    if level == Level::ERROR {
        1
    } else if level == Level::WARN {
        2
    } else if level == Level::INFO {
        3
    } else if level == Level::DEBUG {
        4
    } else {
        5
    }
}

/// Message and structured fields of one event.
#[derive(Debug, Default)]
pub(crate) struct EventFields {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl EventFields {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name(), value));
        }
    }
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{:?}", value));
    }
}

/// `LEVEL target: message key=value ...`
pub(crate) fn format_line(level: &Level, target: &str, fields: &EventFields) -> String {
    let mut line = format!("{} {}:", level, target);
    if let Some(message) = &fields.message {
        line.push(' ');
        line.push_str(message);
    }
    for (name, value) in &fields.fields {
        line.push_str(&format!(" {}={}", name, value));
    }
    line
}

pub(crate) fn is_enabled(level: &Level) -> bool {
    rank(*level) <= MAX_LEVEL.load(Ordering::Relaxed)
}

/// Forwards events to `console.error` / `warn` / `info` / `log` / `debug`.
pub(crate) struct ConsoleLayer;

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = event.metadata().level();
        if !is_enabled(level) {
            return;
        }

        let mut fields = EventFields::default();
        event.record(&mut fields);
        let line = JsValue::from_str(&format_line(level, event.metadata().target(), &fields));
        match rank(*level) {
            1 => web_sys::console::error_1(&line),
            2 => web_sys::console::warn_1(&line),
            3 => web_sys::console::info_1(&line),
            4 => web_sys::console::log_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// Install the console layer as the global subscriber. A second call (or a
/// host that installed its own subscriber) leaves the existing one in place.
pub(crate) fn install() {
    let subscriber = tracing_subscriber::registry().with(ConsoleLayer);
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Set console verbosity: `"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let level = Level::from_str(level)
        .map_err(|_| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    MAX_LEVEL.store(rank(level), Ordering::Relaxed);
    Ok(())
}
