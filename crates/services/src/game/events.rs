use std::num::NonZeroU32;

use trivia_core::model::{GameSummary, QuestionFilter};

/// Lifecycle notifications emitted by `GameController`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    CategorySelected { category_id: Option<String> },
    QuestionCountSelected { count: NonZeroU32 },
    FetchRequested { ticket: u64, filter: QuestionFilter },
    FetchFailed { ticket: u64, message: String },
    StaleResponseDiscarded { ticket: u64 },
    GameStarted { total: usize },
    /// `index` is the position of the answered question in the list.
    CorrectAnswer { index: usize, answer: String },
    GameCompleted(GameSummary),
}

pub trait GameObserver: Send + Sync {
    fn notify(&self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: Fn(&GameEvent) + Send + Sync,
{
    fn notify(&self, event: &GameEvent) {
        self(event);
    }
}

/// Writes every event through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl GameObserver for LogObserver {
    fn notify(&self, event: &GameEvent) {
        match event {
            GameEvent::CategorySelected { category_id } => {
                log::debug!("selected category: {}", category_id.as_deref().unwrap_or("<default>"));
            }
            GameEvent::QuestionCountSelected { count } => {
                log::debug!("selected number of questions: {count}");
            }
            GameEvent::FetchRequested { ticket, filter } => {
                log::debug!("fetch #{ticket} requested ({filter})");
            }
            GameEvent::FetchFailed { ticket, message } => {
                log::warn!("fetch #{ticket} failed: {message}");
            }
            GameEvent::StaleResponseDiscarded { ticket } => {
                log::warn!("discarding stale response for fetch #{ticket}");
            }
            GameEvent::GameStarted { total } => {
                log::info!("game started with {total} questions");
            }
            GameEvent::CorrectAnswer { index, answer } => {
                log::info!("correct answer for question {}: {answer}", index + 1);
            }
            GameEvent::GameCompleted(summary) => {
                log::info!(
                    "game completed: {}/{} correct",
                    summary.correct(),
                    summary.total()
                );
            }
        }
    }
}
