// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregating fan-out sink for per-build output.
//!
//! Every line a build emits is appended to a retained buffer and forwarded
//! to all live subscribers in publication order. `current()` and
//! `push_line()` take the same lock, so a read issued after a publication
//! always observes that line's contribution.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Multi-observer string publisher that retains the full concatenation.
///
/// Cheap to clone; all clones share the same buffer and subscriber set.
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    inner: Arc<Mutex<SinkInner>>,
}

#[derive(Debug, Default)]
struct SinkInner {
    buffer: String,
    taps: Vec<mpsc::UnboundedSender<String>>,
    closed: bool,
}

impl OutputSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish one line of output.
    ///
    /// Appends the line (plus a terminating newline) to the retained buffer
    /// and forwards it to every live subscriber. Ignored once the sink is
    /// closed: a completed build's output is frozen.
    pub fn push_line(&self, line: &str) {
        let mut inner = self.inner.lock();
        if inner.closed {
            return;
        }
        inner.buffer.push_str(line);
        inner.buffer.push('\n');
        // Drop taps whose receiver has gone away.
        inner.taps.retain(|tap| tap.send(line.to_string()).is_ok());
    }

    /// The concatenation of everything published so far.
    pub fn current(&self) -> String {
        self.inner.lock().buffer.clone()
    }

    /// Subscribe to lines published after this call.
    ///
    /// A subscriber attached to a closed sink gets an immediately-ended
    /// stream; `current()` still carries the full output.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock();
        if !inner.closed {
            inner.taps.push(tx);
        }
        rx
    }

    /// Freeze the sink: no further lines are accepted and all subscriber
    /// streams end. The retained buffer stays readable.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        inner.taps.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
