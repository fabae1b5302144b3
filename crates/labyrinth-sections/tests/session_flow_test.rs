//! Full sessions driven through the standard state machine.

use std::sync::Arc;

use labyrinth_content::application::loader::ResourceTables;
use labyrinth_core::input::Key;
use labyrinth_sections::command::{Command, Payload, SectionId};
use labyrinth_sections::config::GameConfig;
use labyrinth_sections::sections::standard_machine;
use labyrinth_test_support::{RecordingScreen, ScriptedInput};

fn config() -> GameConfig {
    GameConfig {
        width: 6,
        height: 6,
        seed: Some(7),
        ..GameConfig::default()
    }
    .without_pauses()
}

fn tables() -> Arc<ResourceTables> {
    Arc::new(ResourceTables::embedded().unwrap())
}

#[test]
fn test_play_then_escape_ends_session() {
    let mut machine = standard_machine(&config(), &tables());
    let mut input = ScriptedInput::new(vec![None, Some(Key::Enter), Some(Key::Escape)]);
    let mut screen = RecordingScreen::default();

    machine.run(&mut input, &mut screen).unwrap();

    assert_eq!(input.remaining(), 0);
    assert!(screen.contains("Arrows: move"));
}

#[test]
fn test_chosen_character_walks_the_maze() {
    let mut machine = standard_machine(&config(), &tables());
    let mut input = ScriptedInput::new(vec![
        None,
        Some(Key::Down),
        Some(Key::Enter),
        Some(Key::Down),
        Some(Key::Enter),
        Some(Key::Enter),
        Some(Key::Escape),
    ]);
    let mut screen = RecordingScreen::default();

    machine.run(&mut input, &mut screen).unwrap();

    assert_eq!(input.remaining(), 0);
    assert!(screen.contains("😄"));
}

#[test]
fn test_quit_from_start_menu() {
    let mut machine = standard_machine(&config(), &tables());
    let mut input = ScriptedInput::new(vec![None, Some(Key::Char('3'))]);
    machine
        .run(&mut input, &mut RecordingScreen::default())
        .unwrap();
    assert_eq!(input.remaining(), 0);
}

#[test]
fn test_isolated_question_reports_back_to_over_world() {
    let mut machine = standard_machine(&config(), &tables());
    let mut input = ScriptedInput::new(vec![None, Some(Key::Enter), Some(Key::Char('x'))]);
    let mut screen = RecordingScreen::default();

    let produced = machine
        .run_isolated(
            SectionId::Question,
            SectionId::Question.default_payload(),
            &mut input,
            &mut screen,
        )
        .unwrap();

    match produced {
        Command::ChangeSection {
            target: SectionId::OverWorld,
            data: Payload::QuestionResult { .. },
        } => {}
        other => panic!("expected a question result, got {other:?}"),
    }
    assert!(screen.contains("ChangeSection -> over_world"));
    assert!(screen.contains("Press any key to end the game..."));
}

#[test]
fn test_isolated_game_over_ends_game() {
    let mut machine = standard_machine(&config(), &tables());
    let mut input = ScriptedInput::new(vec![None, Some(Key::Enter), Some(Key::Enter)]);

    let produced = machine
        .run_isolated(
            SectionId::GameOver,
            SectionId::GameOver.default_payload(),
            &mut input,
            &mut RecordingScreen::default(),
        )
        .unwrap();

    assert_eq!(produced, Command::EndGame);
    assert_eq!(input.remaining(), 0);
}
