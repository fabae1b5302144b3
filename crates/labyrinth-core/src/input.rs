//! Decoded keystrokes and the input queue contract.
//!
//! The terminal adapter decodes raw events into [`Key`] values and pushes
//! them onto a single-producer/single-consumer channel. The game thread
//! drains at most one key per tick through [`InputSource`].

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use tracing::warn;

/// A decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Tab,
    Escape,
    Backspace,
    Char(char),
}

impl Key {
    /// Returns the numeric value of a digit key.
    #[must_use]
    pub fn as_digit(self) -> Option<u32> {
        match self {
            Key::Char(c) => c.to_digit(10),
            _ => None,
        }
    }
}

/// Source of at most one keystroke per tick.
pub trait InputSource {
    /// Returns the next pending key, or `None` for an idle tick.
    fn poll_key(&mut self) -> Option<Key>;
}

/// Consumer end of the input queue.
///
/// Waits at most one tick interval for a key so idle ticks do not spin.
#[derive(Debug)]
pub struct ChannelInput {
    receiver: Receiver<Key>,
    tick: Duration,
    disconnected: bool,
}

impl ChannelInput {
    /// Wraps the receiving half of the input channel.
    #[must_use]
    pub fn new(receiver: Receiver<Key>, tick: Duration) -> Self {
        Self {
            receiver,
            tick,
            disconnected: false,
        }
    }
}

impl InputSource for ChannelInput {
    fn poll_key(&mut self) -> Option<Key> {
        if self.disconnected {
            std::thread::sleep(self.tick);
            return None;
        }
        match self.receiver.recv_timeout(self.tick) {
            Ok(key) => Some(key),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                warn!("input producer disconnected; ticks will stay idle");
                self.disconnected = true;
                None
            }
        }
    }
}
