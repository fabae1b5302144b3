//! Wires the game thread to the terminal.

use std::io;
use std::sync::{Arc, mpsc};
use std::thread;

use labyrinth_content::application::loader::ResourceTables;
use labyrinth_core::input::ChannelInput;
use labyrinth_sections::sections::standard_machine;
use labyrinth_world::domain::topology::validate_catalog;
use tracing::{error, info, info_span};
use uuid::Uuid;

use crate::config::Settings;
use crate::error::AppError;
use crate::input::pump;
use crate::terminal::{CrosstermScreen, reset_terminal_state};

/// Plays one session to completion.
///
/// The state machine runs on a dedicated game thread that owns the screen;
/// this thread pumps keystrokes into it until it returns.
///
/// # Errors
///
/// Returns `AppError::Game` for resource or game failures,
/// `AppError::Terminal` for terminal failures, and
/// `AppError::GameThreadPanicked` if the game thread panics.
pub fn run_session(settings: &Settings) -> Result<(), AppError> {
    let tables = Arc::new(ResourceTables::load(settings.resources.as_deref())?);
    validate_catalog(&tables.templates)?;
    let config = settings.to_game_config();
    let mut machine = standard_machine(&config, &tables);
    let isolated = settings.section;
    let tick = settings.tick();

    let session_id = Uuid::new_v4();
    let span = info_span!("session", %session_id);
    span.in_scope(|| {
        info!(
            width = config.width,
            height = config.height,
            seed = ?config.seed,
            section = ?isolated,
            "session starting"
        );
    });

    let (sender, receiver) = mpsc::channel();
    let screen = CrosstermScreen::open()?;
    let game = thread::Builder::new()
        .name("game".into())
        .spawn(move || {
            span.in_scope(|| {
                let mut screen = screen;
                let mut input = ChannelInput::new(receiver, tick);
                match isolated {
                    Some(id) => machine
                        .run_isolated(id, id.default_payload(), &mut input, &mut screen)
                        .map(|produced| info!(?produced, "isolated section finished")),
                    None => machine.run(&mut input, &mut screen),
                }
            })
        })?;

    if let Err(e) = pump(&sender, tick, &game) {
        return Err(abandon_game(e, reset_terminal_state));
    }
    drop(sender);

    match game.join() {
        Ok(Ok(())) => {
            info!(%session_id, "session finished");
            Ok(())
        }
        Ok(Err(e)) => {
            error!(%session_id, error = %e, "session failed");
            Err(AppError::Game(e))
        }
        Err(_) => Err(AppError::GameThreadPanicked),
    }
}

/// Gives up on a game thread that can no longer be fed.
///
/// The game thread keeps the screen, so its drop never runs; `restore`
/// hands the terminal back instead. The input error is returned even if
/// restoring fails.
fn abandon_game<F>(err: AppError, restore: F) -> AppError
where
    F: FnOnce() -> io::Result<()>,
{
    error!(error = %err, "input pump failed");
    if let Err(e) = restore() {
        error!(error = %e, "failed to reset terminal");
    }
    err
}
