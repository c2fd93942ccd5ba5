//! Log statements as actions.
//!
//! [`ActionLayer`] plugs into a `tracing` subscriber and turns every event
//! into a [`LogAction`] on the dispatch channel:
//!
//! ```text
//! tracing::info!(manifest = "web", span_id = "build:web:1", "step 1/3");
//!   → LogAction { manifest: web, span_id: build:web:1, level: Info, msg: "step 1/3\n" }
//! ```
//!
//! `manifest` and `span_id` are attribution. Every other field except the
//! message lands in the structured fields.
//!
//! Attribution can also come from enclosing spans, so a whole build step can
//! be attributed once:
//!
//! ```text
//! let _step = tracing::info_span!("build", manifest = "web", span_id = "build:web:2").entered();
//! tracing::info!("compiling");
//!   → LogAction { manifest: web, span_id: build:web:2, level: Info, msg: "compiling\n" }
//! ```
//!
//! The innermost value wins: an event's own field beats its span's, which
//! beats the span's parents. Other span fields are not copied into the line.

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::action::LogAction;
use crate::clock::{Clock, SystemClock};
use crate::dispatch::Dispatcher;
use crate::model::{Fields, Level, ManifestName, SpanId};

/// A `tracing` layer that dispatches each event as a log action.
pub struct ActionLayer {
    dispatcher: Dispatcher,
    clock: Box<dyn Clock>,
}

impl ActionLayer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self::with_clock(dispatcher, SystemClock)
    }

    pub fn with_clock(dispatcher: Dispatcher, clock: impl Clock + 'static) -> Self {
        Self {
            dispatcher,
            clock: Box::new(clock),
        }
    }
}

impl<S> Layer<S> for ActionLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut found = Attribution::default();
        attrs.record(&mut found);
        if found.is_empty() {
            return;
        }
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(found);
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(found) = extensions.get_mut::<Attribution>() {
            values.record(found);
            return;
        }
        let mut found = Attribution::default();
        values.record(&mut found);
        if !found.is_empty() {
            extensions.insert(found);
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut line = LineVisitor::default();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                if let Some(found) = span.extensions().get::<Attribution>() {
                    line.attribution.inherit(found);
                }
            }
        }
        event.record(&mut line);
        let action = line.into_action(self.clock.as_ref(), level_of(*event.metadata().level()));

        // Nobody is left to reduce it, and logging the failure would recurse.
        let _ = self.dispatcher.dispatch(action);
    }
}

fn level_of(level: tracing::Level) -> Level {
    match level {
        tracing::Level::TRACE | tracing::Level::DEBUG => Level::Debug,
        tracing::Level::INFO => Level::Info,
        tracing::Level::WARN => Level::Warn,
        tracing::Level::ERROR => Level::Error,
    }
}

/// Manifest and span recorded on a `tracing` span, kept in its extensions.
#[derive(Debug, Default, Clone)]
struct Attribution {
    manifest: Option<ManifestName>,
    span_id: Option<SpanId>,
}

impl Attribution {
    fn is_empty(&self) -> bool {
        self.manifest.is_none() && self.span_id.is_none()
    }

    /// Takes whatever `outer` sets. Called root first, so inner spans win.
    fn inherit(&mut self, outer: &Attribution) {
        if let Some(manifest) = &outer.manifest {
            self.manifest = Some(manifest.clone());
        }
        if let Some(span_id) = &outer.span_id {
            self.span_id = Some(span_id.clone());
        }
    }

    fn put(&mut self, name: &str, value: String) {
        match name {
            "manifest" => self.manifest = Some(value.into()),
            "span_id" => self.span_id = Some(value.into()),
            _ => {}
        }
    }
}

impl Visit for Attribution {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field.name(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field.name(), format!("{value:?}"));
    }
}

#[derive(Default)]
struct LineVisitor {
    attribution: Attribution,
    message: String,
    fields: Fields,
}

impl LineVisitor {
    fn put(&mut self, name: &str, value: String) {
        match name {
            "message" => self.message = value,
            "manifest" | "span_id" => self.attribution.put(name, value),
            _ => {
                self.fields.insert(name.to_string(), value);
            }
        }
    }

    fn into_action(mut self, clock: &dyn Clock, level: Level) -> LogAction {
        if !self.message.ends_with('\n') {
            self.message.push('\n');
        }
        LogAction::new_with_clock(
            clock,
            self.attribution.manifest.unwrap_or_default(),
            self.attribution.span_id.unwrap_or_default(),
            level,
            self.fields,
            self.message.as_bytes(),
        )
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field.name(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field.name(), format!("{value:?}"));
    }
}
