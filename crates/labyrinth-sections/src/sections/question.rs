//! Question: a quiz asked by an NPC.
//!
//! The prompt is typed out one character at a time, the choices appear one
//! by one, then the player picks with Up/Down and confirms with Enter. The
//! verdict stays on screen for a moment before control returns to the over
//! world.

use labyrinth_content::domain::questions::{QuestionBank, QuizRecord};
use labyrinth_core::error::GameError;
use labyrinth_core::input::Key;
use labyrinth_core::rng::DeterministicRng;
use labyrinth_core::screen::{Color, Screen, Style, display_width};
use tracing::info;

use crate::command::{Command, Payload, SectionId};
use crate::config::GameConfig;
use crate::section::{GameSection, Tick};

const QUESTION_MARK: [&str; 7] = [
    "  ?????  ",
    " ??   ?? ",
    "      ?? ",
    "    ???  ",
    "   ??    ",
    "         ",
    "   ??    ",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuestionState {
    Initial,
    WritingQuestion,
    UserSelection,
    RevealAnswer,
}

/// Asks one question per entry and reports whether it was answered right.
pub struct QuestionSection {
    config: GameConfig,
    bank: QuestionBank,
    rng: Box<dyn DeterministicRng>,
    state: QuestionState,
    question: Option<QuizRecord>,
    selected: usize,
    was_correct: bool,
}

impl QuestionSection {
    #[must_use]
    pub fn new(
        config: GameConfig,
        questions: Vec<QuizRecord>,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        Self {
            config,
            bank: QuestionBank::new(questions),
            rng,
            state: QuestionState::Initial,
            question: None,
            selected: 0,
            was_correct: false,
        }
    }

    fn current(&self) -> Result<&QuizRecord, GameError> {
        self.question
            .as_ref()
            .ok_or_else(|| GameError::InvariantViolation("no question picked".into()))
    }

    fn choice_count(&self) -> usize {
        self.question.as_ref().map_or(1, |q| q.choices.len().max(1))
    }

    fn write_question(&mut self, screen: &mut dyn Screen, layout: Layout) -> Result<(), GameError> {
        let question = self.current()?.clone();
        screen.clear(Color::Black)?;
        draw_question_mark(screen)?;

        let bullet = "●  ";
        screen.draw_text(layout.pad, layout.prompt_y, bullet, Style::default())?;
        let prompt_style = Style::colored(Color::Red, Color::Black).bold();
        let mut x = layout.pad + display_width(bullet);
        let mut buffer = [0u8; 4];
        for ch in question.prompt.chars() {
            let glyph = ch.encode_utf8(&mut buffer);
            screen.draw_text(x, layout.prompt_y, glyph, prompt_style)?;
            screen.flush()?;
            screen.pause(self.config.typing_delay);
            x += display_width(glyph);
        }
        screen.pause(self.config.prompt_pause);

        for (index, choice) in question.choices.iter().enumerate() {
            draw_choice(screen, layout, index, choice, None)?;
            screen.flush()?;
            screen.pause(self.config.choice_delay);
        }

        self.state = QuestionState::UserSelection;
        self.redraw(screen, layout)
    }

    fn redraw(&self, screen: &mut dyn Screen, layout: Layout) -> Result<(), GameError> {
        let question = self.current()?;
        screen.clear(Color::Black)?;
        draw_question_mark(screen)?;
        screen.draw_text(layout.pad, layout.prompt_y, "●  ", Style::default())?;
        screen.draw_text(
            layout.pad + 3,
            layout.prompt_y,
            &question.prompt,
            Style::colored(Color::Red, Color::Black).bold(),
        )?;
        for (index, choice) in question.choices.iter().enumerate() {
            let highlight = (index == self.selected).then_some(self.state);
            draw_choice(screen, layout, index, choice, highlight)?;
        }
        Ok(())
    }

    fn write_answer(&self, screen: &mut dyn Screen, layout: Layout) -> Result<(), GameError> {
        let count = u16::try_from(self.choice_count()).unwrap_or(u16::MAX);
        let y = layout.choices_y.saturating_add(count).saturating_add(2);
        screen.draw_text(layout.pad, y, "▶", Style::colored(Color::White, Color::Black))?;
        let (verdict, color) = if self.was_correct {
            ("  CORRECT!!", Color::Green)
        } else {
            ("  INCORRECT!!", Color::Red)
        };
        screen.draw_text(
            layout.pad + 1,
            y,
            verdict,
            Style::colored(color, Color::Black).bold(),
        )?;
        screen.flush()?;
        screen.pause(self.config.reveal_pause);
        Ok(())
    }
}

/// Screen positions derived from the terminal size.
#[derive(Debug, Clone, Copy)]
struct Layout {
    pad: u16,
    prompt_y: u16,
    choices_y: u16,
}

impl Layout {
    fn for_screen(screen: &dyn Screen) -> Self {
        let (width, height) = screen.size();
        let prompt_y = height / 4;
        Self {
            pad: width / 16,
            prompt_y,
            choices_y: prompt_y + 3,
        }
    }
}

fn draw_question_mark(screen: &mut dyn Screen) -> Result<(), GameError> {
    let (width, height) = screen.size();
    let art_width = display_width(QUESTION_MARK[0]);
    let rows = u16::try_from(QUESTION_MARK.len()).unwrap_or(u16::MAX);
    let x = width.saturating_sub(art_width + 2);
    let top = height.saturating_sub(rows) / 2;
    let style = Style::colored(Color::Grey, Color::Black);
    for (offset, line) in (0u16..).zip(QUESTION_MARK) {
        screen.draw_text(x, top + offset, line, style)?;
    }
    Ok(())
}

/// Draws choice `index` as `A. text`. `highlight` carries the state when
/// the choice is the selected one.
fn draw_choice(
    screen: &mut dyn Screen,
    layout: Layout,
    index: usize,
    choice: &str,
    highlight: Option<QuestionState>,
) -> Result<(), GameError> {
    let letter = char::from(b'A' + u8::try_from(index % 26).unwrap_or(0));
    let y = layout
        .choices_y
        .saturating_add(u16::try_from(index).unwrap_or(u16::MAX));
    let x = layout.pad * 2;

    let mut label = Style::colored(Color::Cyan, Color::Black).bold();
    let mut text = Style::colored(Color::Green, Color::Black);
    if let Some(state) = highlight {
        label = label.reverse();
        if state == QuestionState::RevealAnswer {
            text = label;
        } else {
            text = text.reverse();
        }
    }
    screen.draw_text(x, y, &format!("{letter}."), label)?;
    screen.draw_text(x + 2, y, &format!(" {choice}"), text)
}

impl GameSection for QuestionSection {
    fn id(&self) -> SectionId {
        SectionId::Question
    }

    fn handle_start(&mut self, payload: Payload) -> Result<bool, GameError> {
        let prefix = match payload {
            Payload::NewQuestion { prefix } => prefix,
            other => {
                return Err(GameError::Configuration(format!(
                    "question cannot start with {other:?}"
                )));
            }
        };
        let question = self.bank.pick(prefix.as_deref(), self.rng.as_mut())?;
        info!(question_id = %question.id, "question picked");
        self.question = Some(question);
        self.state = QuestionState::Initial;
        self.selected = 0;
        self.was_correct = false;
        Ok(false)
    }

    fn run_processing(&mut self, input: Option<Key>) -> Result<Tick, GameError> {
        if self.state == QuestionState::Initial {
            self.state = QuestionState::WritingQuestion;
            return Ok(Tick::Render);
        }

        let count = self.choice_count();
        Ok(match input {
            Some(Key::Up) => {
                self.selected = (self.selected + count - 1) % count;
                Tick::Render
            }
            Some(Key::Down) => {
                self.selected = (self.selected + 1) % count;
                Tick::Render
            }
            Some(Key::Enter) => {
                self.was_correct = self.current()?.is_index_correct(self.selected);
                self.state = QuestionState::RevealAnswer;
                info!(correct = self.was_correct, "question answered");
                Tick::Finish { render: true }
            }
            _ => Tick::Idle,
        })
    }

    fn run_rendering(&mut self, screen: &mut dyn Screen) -> Result<(), GameError> {
        let layout = Layout::for_screen(screen);
        match self.state {
            QuestionState::Initial => Ok(()),
            QuestionState::WritingQuestion => {
                self.write_question(screen, layout)?;
                screen.flush()
            }
            QuestionState::UserSelection => {
                self.redraw(screen, layout)?;
                screen.flush()
            }
            QuestionState::RevealAnswer => {
                self.redraw(screen, layout)?;
                self.write_answer(screen, layout)
            }
        }
    }

    fn handle_stop(&mut self) -> Result<Command, GameError> {
        Ok(Command::change(
            SectionId::OverWorld,
            Payload::QuestionResult {
                was_correct: self.was_correct,
            },
        ))
    }
}
