//! The six game phases and the factory that registers them.

use std::sync::Arc;

use labyrinth_content::application::loader::ResourceTables;
use labyrinth_core::rng::{DeterministicRng, SeededRng};

use crate::config::GameConfig;
use crate::manager::SectionStateMachine;

pub mod bootstrap;
pub mod debug;
pub mod game_over;
pub mod menu;
pub mod over_world;
pub mod question;

/// Builds a state machine with every phase registered.
#[must_use]
pub fn standard_machine(config: &GameConfig, tables: &Arc<ResourceTables>) -> SectionStateMachine {
    SectionStateMachine::new()
        .with_section(Box::new(bootstrap::BootstrapSection))
        .with_section(Box::new(menu::MenuSection::new()))
        .with_section(Box::new(over_world::OverWorldSection::new(
            config.clone(),
            Arc::clone(tables),
            rng_for(config, 0),
        )))
        .with_section(Box::new(question::QuestionSection::new(
            config.clone(),
            tables.questions.clone(),
            rng_for(config, 1),
        )))
        .with_section(Box::new(game_over::GameOverSection))
        .with_section(Box::new(debug::DebugSection::default()))
}

/// A per-phase RNG; seeded phases get distinct but reproducible streams.
fn rng_for(config: &GameConfig, stream: u64) -> Box<dyn DeterministicRng> {
    match config.seed {
        Some(seed) => Box::new(SeededRng::from_seed(seed.wrapping_add(stream))),
        None => Box::new(SeededRng::from_entropy()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::SectionId;

    #[test]
    fn test_standard_machine_registers_every_section() {
        let tables = Arc::new(ResourceTables::embedded().unwrap());
        let machine = standard_machine(&GameConfig::default(), &tables);
        for id in SectionId::ALL {
            assert!(machine.is_registered(id), "{id} missing");
        }
    }
}
