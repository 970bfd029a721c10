//! Tracing subscriber layer that captures log events into a [`LogBuffer`]
//! so a frontend can show recent activity next to the form.
//!
//! The buffer has its own mutex and is bounded; request handlers read a copy
//! of the most recent lines and never hold the lock while rendering.

use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::Subscriber;
use tracing_subscriber::layer::Layer;
use tracing_subscriber::registry::LookupSpan;

use super::{LOG_TRIM_TO, LogLevel, LogLine, MAX_LOG_LINES};

/// A shared, bounded buffer of captured log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<LogLine>>>);

impl LogBuffer {
    /// Append a line, trimming the oldest entries past [`MAX_LOG_LINES`].
    pub fn push(&self, line: LogLine) {
        let mut buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        buf.push(line);
        if buf.len() > MAX_LOG_LINES {
            let trim_to = buf.len() - LOG_TRIM_TO;
            buf.drain(..trim_to);
        }
    }

    /// Copy of the `n` most recent lines, oldest first.
    pub fn recent(&self, n: usize) -> Vec<LogLine> {
        let buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        let start = buf.len().saturating_sub(n);
        buf[start..].to_vec()
    }

    /// Number of buffered lines.
    pub fn len(&self) -> usize {
        self.0.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`tracing_subscriber::Layer`] that captures log events into
/// a [`LogBuffer`].
pub struct UiTracingLayer {
    buffer: LogBuffer,
}

impl UiTracingLayer {
    /// Create a new tracing layer and its associated [`LogBuffer`].
    pub fn new() -> (Self, LogBuffer) {
        let buffer = LogBuffer::default();
        (
            Self {
                buffer: buffer.clone(),
            },
            buffer,
        )
    }
}

impl<S: Subscriber + for<'a> LookupSpan<'a>> Layer<S> for UiTracingLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let level = match *event.metadata().level() {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        };

        let mut message = visitor.message;
        if !visitor.fields.is_empty() {
            let extras: Vec<String> = visitor
                .fields
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            if message.is_empty() {
                message = extras.join(" ");
            } else {
                message = format!("{message} {{{}}}", extras.join(", "));
            }
        }

        self.buffer.push(LogLine {
            time: Local::now().format("%H:%M:%S").to_string(),
            level,
            message,
        });
    }
}

/// Visitor that extracts the message and extra fields from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let raw = format!("{value:?}");
            // Strip surrounding quotes from debug-formatted strings.
            self.message = raw
                .strip_prefix('"')
                .and_then(|r| r.strip_suffix('"'))
                .map(str::to_string)
                .unwrap_or(raw);
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    fn line(i: usize) -> LogLine {
        LogLine {
            time: format!("{i:03}"),
            level: LogLevel::Info,
            message: format!("msg {i}"),
        }
    }

    #[test]
    fn recent_returns_tail_in_order() {
        let buffer = LogBuffer::default();
        for i in 0..10 {
            buffer.push(line(i));
        }
        let tail = buffer.recent(3);
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0].time, "007");
        assert_eq!(tail[2].time, "009");
        assert_eq!(buffer.recent(100).len(), 10);
    }

    #[test]
    fn buffer_is_bounded() {
        let buffer = LogBuffer::default();
        for i in 0..=MAX_LOG_LINES {
            buffer.push(line(i));
        }
        assert_eq!(buffer.len(), LOG_TRIM_TO);
        assert_eq!(
            buffer.recent(1)[0].time,
            format!("{MAX_LOG_LINES:03}")
        );
    }

    #[test]
    fn layer_captures_message_and_fields() {
        let (layer, buffer) = UiTracingLayer::new();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(records = 3, "History loaded");
            tracing::info!("plain");
        });

        let lines = buffer.recent(10);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].level, LogLevel::Warn);
        assert_eq!(lines[0].message, "History loaded {records=3}");
        assert_eq!(lines[1].message, "plain");
    }
}
