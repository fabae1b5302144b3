//! Menus: the start menu and the character picker.

use labyrinth_core::error::GameError;
use labyrinth_core::input::Key;
use labyrinth_core::screen::{Color, Screen, Style};
use tracing::info;

use crate::command::{Command, DEFAULT_CHARACTER, MenuPayload, Payload, SectionId};
use crate::render::draw_centered;
use crate::section::{GameSection, Tick};

/// Faces offered on the character menu.
pub const CHARACTERS: [&str; 9] = ["🙂", "😄", "😐", "🤔", "🙁", "😎", "🙃", "😂", "😭"];

const START_ITEMS: [&str; 3] = ["Play", "Character Select", "Quit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuKind {
    Start,
    Character,
}

impl MenuKind {
    fn title(self) -> &'static str {
        match self {
            MenuKind::Start => "Start Menu",
            MenuKind::Character => "Character Select",
        }
    }

    fn items(self) -> &'static [&'static str] {
        match self {
            MenuKind::Start => &START_ITEMS,
            MenuKind::Character => &CHARACTERS,
        }
    }
}

/// Start menu and character menu, selected by the start payload.
///
/// The chosen character is kept across re-entries.
#[derive(Debug)]
pub struct MenuSection {
    kind: MenuKind,
    selected: usize,
    character: String,
}

impl Default for MenuSection {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuSection {
    #[must_use]
    pub fn new() -> Self {
        Self {
            kind: MenuKind::Start,
            selected: 0,
            character: DEFAULT_CHARACTER.to_owned(),
        }
    }

    /// The last chosen character glyph.
    #[must_use]
    pub fn character(&self) -> &str {
        &self.character
    }

    fn step(&mut self, forward: bool) {
        let len = self.kind.items().len();
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }
}

impl GameSection for MenuSection {
    fn id(&self) -> SectionId {
        SectionId::Menu
    }

    fn handle_start(&mut self, payload: Payload) -> Result<bool, GameError> {
        match payload {
            Payload::Menu(MenuPayload::StartMenu { character }) => {
                self.kind = MenuKind::Start;
                self.selected = 0;
                self.character = character;
            }
            Payload::Menu(MenuPayload::CharacterMenu { character }) => {
                self.kind = MenuKind::Character;
                self.selected = CHARACTERS
                    .iter()
                    .position(|face| *face == character)
                    .unwrap_or(0);
                self.character = character;
            }
            other => {
                return Err(GameError::Configuration(format!(
                    "menu cannot start with {other:?}"
                )));
            }
        }
        Ok(true)
    }

    fn run_processing(&mut self, input: Option<Key>) -> Result<Tick, GameError> {
        let Some(key) = input else {
            return Ok(Tick::Idle);
        };

        if let Some(digit) = key.as_digit() {
            let len = self.kind.items().len();
            let index = usize::try_from(digit).unwrap_or(usize::MAX);
            if (1..=len).contains(&index) {
                self.selected = index - 1;
                return Ok(Tick::Finish { render: false });
            }
        }

        Ok(match key {
            Key::Enter => Tick::Finish { render: false },
            Key::Up | Key::Char('w') => {
                self.step(false);
                Tick::Render
            }
            Key::Down | Key::Char('s') => {
                self.step(true);
                Tick::Render
            }
            _ => Tick::Idle,
        })
    }

    fn run_rendering(&mut self, screen: &mut dyn Screen) -> Result<(), GameError> {
        let (_, height) = screen.size();
        let base = Style::colored(Color::Black, Color::SkyBlue);
        screen.clear(Color::SkyBlue)?;
        draw_centered(screen, 0, self.kind.title(), base.bold().underline())?;

        let items = self.kind.items();
        let rows = u16::try_from(items.len()).unwrap_or(u16::MAX);
        let first = height.saturating_sub(rows) / 2 + 1;
        for (offset, (index, item)) in (0u16..).zip(items.iter().enumerate()) {
            let style = if index == self.selected {
                Style::colored(Color::DarkBlue, Color::SkyBlue).reverse()
            } else {
                base
            };
            draw_centered(screen, first + offset, &format!("{}. {item}", index + 1), style)?;
        }
        screen.flush()
    }

    fn handle_stop(&mut self) -> Result<Command, GameError> {
        let character = self.character.clone();
        let command = match (self.kind, self.selected) {
            (MenuKind::Start, 0) => {
                Command::change(SectionId::OverWorld, Payload::StartOverWorld { character })
            }
            (MenuKind::Start, 1) => Command::change(
                SectionId::Menu,
                Payload::Menu(MenuPayload::CharacterMenu { character }),
            ),
            (MenuKind::Start, _) => Command::EndGame,
            (MenuKind::Character, index) => {
                let face = CHARACTERS.get(index).copied().unwrap_or(DEFAULT_CHARACTER);
                info!(character = face, "character selected");
                face.clone_into(&mut self.character);
                Command::change(
                    SectionId::Menu,
                    Payload::Menu(MenuPayload::StartMenu {
                        character: face.to_owned(),
                    }),
                )
            }
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::run_section;
    use labyrinth_test_support::{RecordingScreen, ScriptedInput};

    fn start_menu(character: &str) -> Payload {
        Payload::Menu(MenuPayload::StartMenu {
            character: character.to_owned(),
        })
    }

    fn run(menu: &mut MenuSection, payload: Payload, keys: &[Key]) -> Command {
        run_section(
            menu,
            payload,
            &mut ScriptedInput::keys(keys),
            &mut RecordingScreen::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_enter_on_play_starts_over_world() {
        let mut menu = MenuSection::new();
        let command = run(&mut menu, start_menu("😎"), &[Key::Enter]);
        assert_eq!(
            command,
            Command::change(
                SectionId::OverWorld,
                Payload::StartOverWorld {
                    character: "😎".into()
                }
            )
        );
    }

    #[test]
    fn test_up_wraps_to_quit() {
        let mut menu = MenuSection::new();
        let command = run(&mut menu, start_menu("🙂"), &[Key::Up, Key::Enter]);
        assert_eq!(command, Command::EndGame);
    }

    #[test]
    fn test_down_and_s_move_selection() {
        let mut menu = MenuSection::new();
        let command = run(
            &mut menu,
            start_menu("🙂"),
            &[Key::Char('s'), Key::Down, Key::Down, Key::Down, Key::Enter],
        );
        // Four steps down from Play over three items lands on Character Select.
        assert_eq!(
            command,
            Command::change(
                SectionId::Menu,
                Payload::Menu(MenuPayload::CharacterMenu {
                    character: "🙂".into()
                })
            )
        );
    }

    #[test]
    fn test_digit_picks_directly_and_out_of_range_digit_is_ignored() {
        let mut menu = MenuSection::new();
        let command = run(&mut menu, start_menu("🙂"), &[Key::Char('9'), Key::Char('3')]);
        assert_eq!(command, Command::EndGame);
    }

    #[test]
    fn test_character_menu_starts_on_current_face_and_persists_choice() {
        let mut menu = MenuSection::new();
        let payload = Payload::Menu(MenuPayload::CharacterMenu {
            character: "🤔".into(),
        });
        // 🤔 is the fourth face; one down selects 🙁.
        let command = run(&mut menu, payload, &[Key::Down, Key::Enter]);
        assert_eq!(command, Command::change(SectionId::Menu, start_menu("🙁")));
        assert_eq!(menu.character(), "🙁");
    }

    #[test]
    fn test_render_highlights_selection() {
        let mut menu = MenuSection::new();
        menu.handle_start(start_menu("🙂")).unwrap();
        menu.run_processing(Some(Key::Down)).unwrap();
        let mut screen = RecordingScreen::new(60, 20);
        menu.run_rendering(&mut screen).unwrap();

        assert!(screen.contains("Start Menu"));
        let selected = screen
            .calls
            .iter()
            .find(|call| call.text == "2. Character Select")
            .unwrap();
        assert!(selected.style.reverse);
        let other = screen.calls.iter().find(|call| call.text == "1. Play").unwrap();
        assert!(!other.style.reverse);
    }

    #[test]
    fn test_rejects_foreign_payload() {
        let mut menu = MenuSection::new();
        assert!(matches!(
            menu.handle_start(Payload::Empty),
            Err(GameError::Configuration(_))
        ));
    }
}
