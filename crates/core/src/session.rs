//! The game session state machine.
//!
//! `Configuring` → `Active` → back to `Configuring` once the last question is
//! answered. Every transition is a `&mut self` method on [`SessionState`]; a
//! rejected transition returns an error and leaves the state untouched.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::{GameSummary, Question, SummaryError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot start a game without questions")]
    EmptyQuestionList,

    #[error("no game is in progress")]
    Inactive,

    #[error("a game is already in progress")]
    GameInProgress,

    #[error(transparent)]
    Summary(#[from] SummaryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Configuring,
    Active,
}

/// One-based position of the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Question {} of {}", self.position, self.total)
    }
}

/// Observable counters of a session at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_question_index: usize,
    pub score: u32,
    pub is_active: bool,
}

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// Index of the question that was answered.
    pub index: usize,
    pub correct: bool,
    /// Set when this answer finished the game.
    pub completed: Option<GameSummary>,
}

/// Owned state of one quiz session.
///
/// While active, `current_question_index < questions.len()` always holds.
#[derive(Clone, Default)]
pub struct SessionState {
    questions: Vec<Question>,
    current_question_index: usize,
    score: u32,
    is_active: bool,
    started_at: Option<DateTime<Utc>>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.is_active {
            SessionPhase::Active
        } else {
            SessionPhase::Configuring
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The question list currently bound, possibly from a finished game.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_question_index: self.current_question_index,
            score: self.score,
            is_active: self.is_active,
        }
    }

    /// Bind a freshly fetched question list without starting play.
    ///
    /// Progress is reset so nothing from an earlier list carries over.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::GameInProgress` while a game is active.
    pub fn bind(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        if self.is_active {
            return Err(SessionError::GameInProgress);
        }
        self.questions = questions;
        self.reset_progress();
        Ok(())
    }

    /// Bind `questions` and enter active play at the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuestionList` if `questions` is empty; the
    /// session is left exactly as it was.
    pub fn start(
        &mut self,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionList);
        }
        self.questions = questions;
        self.reset_progress();
        self.is_active = true;
        self.started_at = Some(started_at);
        Ok(())
    }

    /// Score `selected` against the current question and advance.
    ///
    /// Answering the last question ends the game: index and score go back to
    /// zero and the final tally is only available through the returned
    /// `AnswerOutcome::completed`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Inactive` if no game is in progress.
    pub fn answer(
        &mut self,
        selected: &str,
        answered_at: DateTime<Utc>,
    ) -> Result<AnswerOutcome, SessionError> {
        if !self.is_active {
            return Err(SessionError::Inactive);
        }
        let index = self.current_question_index;
        let question = self.questions.get(index).ok_or(SessionError::Inactive)?;

        let correct = question.is_correct(selected);
        let score = if correct {
            self.score.saturating_add(1)
        } else {
            self.score
        };

        if index + 1 < self.questions.len() {
            self.score = score;
            self.current_question_index = index + 1;
            return Ok(AnswerOutcome {
                index,
                correct,
                completed: None,
            });
        }

        let started_at = self.started_at.unwrap_or(answered_at);
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        let summary = GameSummary::new(started_at, answered_at.max(started_at), score, total)?;

        self.reset_progress();
        Ok(AnswerOutcome {
            index,
            correct,
            completed: Some(summary),
        })
    }

    /// The question awaiting an answer, if a game is active.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if !self.is_active {
            return None;
        }
        self.questions.get(self.current_question_index)
    }

    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        self.current_question().map(|_| Progress {
            position: self.current_question_index + 1,
            total: self.questions.len(),
        })
    }

    #[must_use]
    pub fn is_final_question(&self) -> bool {
        self.is_active && self.current_question_index + 1 == self.questions.len()
    }

    fn reset_progress(&mut self) {
        self.current_question_index = 0;
        self.score = 0;
        self.is_active = false;
        self.started_at = None;
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("questions_len", &self.questions.len())
            .field("current_question_index", &self.current_question_index)
            .field("score", &self.score)
            .field("is_active", &self.is_active)
            .field("started_at", &self.started_at)
            .finish()
    }
}
