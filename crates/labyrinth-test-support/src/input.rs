//! Scripted input — replays a fixed list of ticks.

use std::collections::VecDeque;

use labyrinth_core::input::{InputSource, Key};

/// Replays a script of ticks: `Some(key)` for a keystroke, `None` for an
/// idle tick. Panics once the script is exhausted so that a section that
/// never stops fails the test instead of hanging it.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    ticks: VecDeque<Option<Key>>,
}

impl ScriptedInput {
    /// Script made of the given ticks.
    #[must_use]
    pub fn new(ticks: Vec<Option<Key>>) -> Self {
        Self {
            ticks: ticks.into(),
        }
    }

    /// Script made only of keystrokes, no idle ticks.
    #[must_use]
    pub fn keys(keys: &[Key]) -> Self {
        Self::new(keys.iter().copied().map(Some).collect())
    }

    /// Ticks not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self) -> Option<Key> {
        self.ticks
            .pop_front()
            .unwrap_or_else(|| panic!("input script exhausted"))
    }
}
