//! # Dispatch Events
//!
//! Every non-printable command the dispatcher handles is reported to an
//! [`EventSink`] as a [`DispatchEvent`]: the command, its name if it is
//! recognized, and what happened to it. Sinks observe; the conversion
//! behaves the same whichever sink is attached.
//!
//! ## Available Sinks
//!
//! | Sink | Destination |
//! |------|-------------|
//! | [`LogSink`] | `log` facade (`debug!`, `warn!` for rejected parameters) |
//! | [`NullSink`] | nowhere |
//! | [`RecordingSink`] | in-memory `Vec`, for tests and tools |
//! | [`JsonLinesSink`] | one JSON object per line on any `Write` |

use log::{debug, warn};
use serde::Serialize;
use std::io::Write;

use crate::error::Issue;
use crate::pcl::{Command, MalformedEscape};

/// What dispatching a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", content = "issue", rename_all = "snake_case")]
pub enum Effect {
    /// State or output changed
    Applied,
    /// Recognized, deliberately without effect
    Acknowledged,
    /// Dropped; state unchanged
    Ignored(Issue),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchEvent {
    pub command: Command,
    pub name: Option<&'static str>,
    pub effect: Effect,
}

/// Observer for dispatch events.
pub trait EventSink {
    fn record(&mut self, event: &DispatchEvent);

    /// A parameterized escape was abandoned by the decoder.
    fn malformed(&mut self, _escape: &MalformedEscape) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: &DispatchEvent) {
        (**self).record(event);
    }

    fn malformed(&mut self, escape: &MalformedEscape) {
        (**self).malformed(escape);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn record(&mut self, event: &DispatchEvent) {
        (**self).record(event);
    }

    fn malformed(&mut self, escape: &MalformedEscape) {
        (**self).malformed(escape);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: &DispatchEvent) {}
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&mut self, event: &DispatchEvent) {
        let name = event.name.unwrap_or("?");
        match event.effect {
            Effect::Applied | Effect::Acknowledged => debug!("{} ({})", event.command, name),
            Effect::Ignored(Issue::UnrecognizedCommand) => {
                debug!("{} (unrecognized, ignored)", event.command)
            }
            Effect::Ignored(issue) => warn!("{} ({}): {:?}, ignored", event.command, name, issue),
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub events: Vec<DispatchEvent>,
    pub malformed: Vec<MalformedEscape>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events with the given effect.
    pub fn with_effect(&self, effect: Effect) -> impl Iterator<Item = &DispatchEvent> {
        self.events.iter().filter(move |e| e.effect == effect)
    }
}

impl EventSink for RecordingSink {
    fn record(&mut self, event: &DispatchEvent) {
        self.events.push(event.clone());
    }

    fn malformed(&mut self, escape: &MalformedEscape) {
        self.malformed.push(*escape);
    }
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Record<'a> {
    Command(&'a DispatchEvent),
    Malformed(&'a MalformedEscape),
}

/// Writes one JSON object per event.
///
/// A failing writer is logged and otherwise ignored; tracing never aborts a
/// conversion.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, record: Record<'_>) {
        let result = serde_json::to_writer(&mut self.out, &record)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(e) = result {
            warn!("event trace write failed: {}", e);
        }
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn record(&mut self, event: &DispatchEvent) {
        self.write(Record::Command(event));
    }

    fn malformed(&mut self, escape: &MalformedEscape) {
        self.write(Record::Malformed(escape));
    }
}
