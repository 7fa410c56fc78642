//! # Notifiers
//!
//! Ways of getting a cart message in front of the shopper.

use std::sync::Mutex;

use tokio::sync::mpsc;

use super::Notifier;

/// Forwards messages to a receiver (a UI toast queue, the CLI's stderr).
///
/// Messages sent after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelNotifier { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn error(&self, message: &str) {
        let _ = self.tx.send(message.to_string());
    }
}

/// Keeps every message in memory, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
