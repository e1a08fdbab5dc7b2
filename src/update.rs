//! Business logic for state transitions

use iced::Task;
use tracing::{debug, error, info};

use crate::model::{App, Feedback, Message, Screen};
use crate::quiz::RoundError;
use crate::strings;

pub fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::InputChanged(value) => {
            if app.accepts_answer() {
                app.input = value;
            }
            Task::none()
        }
        Message::Submit => match app.screen {
            Screen::Question { .. } => submit(app),
            // Enter on the feedback screen moves on, like the "next" button.
            Screen::Feedback(_) => next(app),
            _ => Task::none(),
        },
        Message::Skip => {
            if !app.accepts_answer() {
                return Task::none();
            }
            let canonical = match app.engine.current_question() {
                Ok(question) => question.display_name().to_string(),
                Err(e) => return contract_violation("skip", e),
            };
            if let Err(e) = app.engine.mark_unknown(strings::IDK) {
                return contract_violation("skip", e);
            }
            app.screen = Screen::Feedback(Feedback::Skipped { canonical });
            schedule_advance(app)
        }
        Message::Next => {
            if matches!(app.screen, Screen::Feedback(_)) {
                next(app)
            } else {
                Task::none()
            }
        }
        Message::AutoAdvance(generation) => {
            if generation != app.generation || !matches!(app.screen, Screen::Feedback(_)) {
                debug!(generation, current = app.generation, "Ignoring stale auto-advance");
                return Task::none();
            }
            next(app)
        }
        Message::Restart => start_round(app),
    }
}

/// Start (or restart) a round, cancelling any pending auto-advance.
pub fn start_round(app: &mut App) -> Task<Message> {
    cancel_pending(app);
    if app.engine.is_started() {
        debug!(generation = app.generation, "Replacing current round");
    }
    app.generation += 1;
    app.input.clear();

    let total = app.settings.questions_per_round;
    match app.engine.start_round(&app.catalog, total, &mut app.rng) {
        Ok(()) => {
            app.screen = Screen::Question { prompt: None };
        }
        Err(e) => {
            error!(error = %e, "Failed to start round");
            app.screen = Screen::Error(strings::round_error(&e.to_string()));
        }
    }
    Task::none()
}

fn submit(app: &mut App) -> Task<Message> {
    let raw = app.input.trim().to_string();
    if raw.is_empty() {
        app.screen = Screen::Question {
            prompt: Some(strings::EMPTY_PROMPT),
        };
        return Task::none();
    }

    let correct = match app.engine.submit_answer(&raw) {
        Ok(correct) => correct,
        Err(e) => return contract_violation("submit", e),
    };

    if correct {
        app.screen = Screen::Feedback(Feedback::Correct);
        schedule_advance(app)
    } else {
        let canonical = app
            .engine
            .current_question()
            .map(|q| q.display_name().to_string())
            .unwrap_or_default();
        app.screen = Screen::Feedback(Feedback::Incorrect { canonical });
        Task::none()
    }
}

fn next(app: &mut App) -> Task<Message> {
    cancel_pending(app);
    if let Err(e) = app.engine.advance() {
        return contract_violation("advance", e);
    }
    app.input.clear();
    if app.engine.is_finished() {
        let skipped = app
            .engine
            .results()
            .iter()
            .filter(|q| q.is_skipped())
            .count();
        info!(
            score = app.engine.score(),
            total = app.engine.total(),
            skipped,
            "Showing round summary"
        );
        app.screen = Screen::Summary;
    } else {
        app.screen = Screen::Question { prompt: None };
    }
    Task::none()
}

/// Arm the delayed move to the next question. The task is abortable so a
/// restart can cancel it before it fires.
fn schedule_advance(app: &mut App) -> Task<Message> {
    cancel_pending(app);
    let generation = app.generation;
    let delay = app.settings.auto_advance;
    let (task, handle) = Task::perform(
        async move {
            tokio::time::sleep(delay).await;
            generation
        },
        Message::AutoAdvance,
    )
    .abortable();
    app.pending_advance = Some(handle);
    task
}

fn cancel_pending(app: &mut App) {
    if let Some(handle) = app.pending_advance.take() {
        debug!("Cancelling pending auto-advance");
        handle.abort();
    }
}

/// The UI reached a state the engine refuses. This is a wiring bug.
fn contract_violation(action: &str, e: RoundError) -> Task<Message> {
    error!(action, error = %e, "Round engine rejected UI call");
    if cfg!(debug_assertions) {
        panic!("round engine rejected {action}: {e}");
    }
    Task::none()
}
