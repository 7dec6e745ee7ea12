// Console log routing.
//
// A tracing layer that formats each event as one line and hands it to a sink
// together with its level. wasm.rs installs it with the browser console as the
// sink (warnings and errors to console.error, the rest to console.log); tests
// install it with a buffer.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

pub struct ConsoleLayer<F> {
    max_level: Level,
    sink: F,
}

impl<F> ConsoleLayer<F>
where
    F: Fn(Level, &str) + Send + Sync + 'static,
{
    /// Events more verbose than `max_level` are dropped.
    pub fn new(max_level: Level, sink: F) -> Self {
        Self { max_level, sink }
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// `LEVEL target: message key=value ...`
pub fn format_event(event: &Event<'_>) -> String {
    let mut visitor = LineVisitor::default();
    event.record(&mut visitor);
    let meta = event.metadata();
    format!("{} {}: {}{}", meta.level(), meta.target(), visitor.message, visitor.fields)
}

impl<S, F> Layer<S> for ConsoleLayer<F>
where
    S: Subscriber,
    F: Fn(Level, &str) + Send + Sync + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        // ERROR < WARN < ... < TRACE
        if level > self.max_level {
            return;
        }
        (self.sink)(level, &format_event(event));
    }
}
