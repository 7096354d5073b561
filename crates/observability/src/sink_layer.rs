//! Tracing layer that forwards formatted log lines to a sink.

use std::fmt::Write;

use tracing::field::Visit;
use tracing_subscriber::layer::{Context, Layer};

use crate::config::LogSink;

/// Longest line handed to the sink; longer lines are truncated.
const MAX_LINE_LEN: usize = 16_000;

/// Builds "message key=value ..." from an event's fields.
struct LineVisitor {
    buf: String,
}

impl LineVisitor {
    fn new() -> Self {
        Self {
            buf: String::with_capacity(128),
        }
    }

    fn separate(&mut self) {
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.separate();
        if field.name() == "message" {
            self.buf.push_str(value);
        } else {
            write!(self.buf, "{}={:?}", field.name(), value).ok();
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.separate();
        if field.name() == "message" {
            write!(self.buf, "{:?}", value).ok();
        } else {
            write!(self.buf, "{}={:?}", field.name(), value).ok();
        }
    }
}

/// Layer that sends "[LEVEL] target: message fields" to the sink when present.
pub fn sink_layer(sink: Option<LogSink>) -> SinkLayer {
    SinkLayer { sink }
}

#[derive(Clone)]
pub struct SinkLayer {
    sink: Option<LogSink>,
}

impl<S> Layer<S> for SinkLayer
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let Some(ref sink) = self.sink else {
            return;
        };

        let metadata = event.metadata();
        let mut visitor = LineVisitor::new();
        event.record(&mut visitor);

        let line = if visitor.buf.is_empty() {
            format!("[{}] {}", metadata.level(), metadata.target())
        } else {
            format!("[{}] {}: {}", metadata.level(), metadata.target(), visitor.buf)
        };

        let line = if line.len() > MAX_LINE_LEN {
            let truncated: String = line.chars().take(MAX_LINE_LEN).collect();
            format!("{}… ({} chars)", truncated, line.len())
        } else {
            line
        };

        sink(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_sink_receives_formatted_line() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let captured = lines.clone();
        let sink: LogSink = Arc::new(move |line| captured.lock().unwrap().push(line));

        let subscriber = tracing_subscriber::registry().with(sink_layer(Some(sink)));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(batches = 2, "Failed to decode model response");
        });

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[WARN] "));
        assert!(lines[0].contains("Failed to decode model response"));
        assert!(lines[0].contains("batches=2"));
    }

    #[test]
    fn test_no_sink_is_noop() {
        let subscriber = tracing_subscriber::registry().with(sink_layer(None));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("nothing to see");
        });
    }
}
