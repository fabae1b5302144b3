//! Scripted randomness for maze, room and question tests.

use labyrinth_core::rng::DeterministicRng;

/// Always answers the lower bound, so every random choice takes the first
/// candidate: the first frontier cell, the first template variant, the
/// first opening for the NPC.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// Replays a fixed list of draws, clamped into the requested range.
///
/// Panics when the script runs out so a test that draws more than expected
/// fails loudly.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }

    /// Draws taken so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let Some(value) = self.values.get(self.index).copied() else {
            panic!(
                "SequenceRng exhausted after {} draws (asked for {min}..={max})",
                self.index
            );
        };
        self.index += 1;
        value.clamp(min, max.max(min))
    }
}
