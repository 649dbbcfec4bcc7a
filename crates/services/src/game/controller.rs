use std::num::NonZeroU32;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use provider::{ProviderError, QuestionProvider};
use trivia_core::model::{Category, Question, SelectionState};
use trivia_core::{AnswerOutcome, Clock, SessionState};

use super::events::{GameEvent, GameObserver, LogObserver};
use super::view::{FetchStatus, GameView, QuestionView};
use crate::error::GameError;
use crate::selection::{FetchTicket, SelectionController};

const NO_QUESTIONS_MESSAGE: &str = "no questions available for this selection";

/// What happened to a resolved question fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchResolution {
    Started { total: usize },
    /// The provider answered with zero questions.
    Empty,
    Failed,
    /// The selection moved on, a game is running, or a newer fetch already won.
    Stale,
}

/// Drives one player's quiz: selection, fetch bookkeeping and the session.
///
/// Fetching is split into `request_start` and `resolve_fetch` so callers can
/// run the provider call wherever they like; `start_game` does both in one go.
pub struct GameController {
    provider: Arc<dyn QuestionProvider>,
    clock: Clock,
    selection: SelectionController,
    session: SessionState,
    categories: Vec<Category>,
    status: FetchStatus,
    category_status: FetchStatus,
    pending: Option<u64>,
    latest_issued: u64,
    /// Tickets at or below this id can no longer start a game.
    settled: u64,
    observer: Arc<dyn GameObserver>,
    rng: StdRng,
    choices: Vec<String>,
}

impl GameController {
    #[must_use]
    pub fn new(provider: Arc<dyn QuestionProvider>, clock: Clock) -> Self {
        Self {
            provider,
            clock,
            selection: SelectionController::new(),
            session: SessionState::new(),
            categories: Vec::new(),
            status: FetchStatus::Idle,
            category_status: FetchStatus::Idle,
            pending: None,
            latest_issued: 0,
            settled: 0,
            observer: Arc::new(LogObserver),
            rng: StdRng::from_os_rng(),
            choices: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn GameObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Seed the answer shuffling for reproducible choice order.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_selection(mut self, state: SelectionState) -> Self {
        self.selection = self.selection.with_state(state);
        self
    }

    #[must_use]
    pub fn provider(&self) -> Arc<dyn QuestionProvider> {
        Arc::clone(&self.provider)
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Status of the most recent question fetch.
    #[must_use]
    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    #[must_use]
    pub fn category_status(&self) -> &FetchStatus {
        &self.category_status
    }

    /// Answer choices for the current question, empty when no game is active.
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Fetch the category list from the provider.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Provider` if the fetch fails; the failure is also
    /// reflected in `category_status()`. The question fetch status is untouched.
    pub async fn load_categories(&mut self) -> Result<&[Category], GameError> {
        self.category_status = FetchStatus::Loading;
        match self.provider.fetch_categories().await {
            Ok(categories) => {
                log::debug!("loaded {} categories", categories.len());
                self.categories = categories;
                self.category_status = FetchStatus::Idle;
                Ok(&self.categories)
            }
            Err(err) => {
                log::warn!("failed to load categories: {err}");
                self.category_status = FetchStatus::Failed(err.to_string());
                Err(err.into())
            }
        }
    }

    pub fn select_category(&mut self, category_id: Option<String>) -> bool {
        let changed = self.selection.select_category(category_id.clone());
        if changed {
            self.emit(&GameEvent::CategorySelected { category_id });
        }
        changed
    }

    pub fn select_question_count(&mut self, count: NonZeroU32) -> bool {
        let changed = self.selection.select_question_count(count);
        if changed {
            self.emit(&GameEvent::QuestionCountSelected { count });
        }
        changed
    }

    /// Issue a question fetch for the current selection.
    ///
    /// # Errors
    ///
    /// Returns `GameError::GameInProgress` while a game is active.
    pub fn request_start(&mut self) -> Result<FetchTicket, GameError> {
        if self.session.is_active() {
            return Err(GameError::GameInProgress);
        }
        let ticket = self.selection.request_start();
        self.pending = Some(ticket.id());
        self.latest_issued = ticket.id();
        self.status = FetchStatus::Loading;
        self.emit(&GameEvent::FetchRequested {
            ticket: ticket.id(),
            filter: ticket.filter().clone(),
        });
        Ok(ticket)
    }

    /// Apply the provider's answer for `ticket`.
    ///
    /// Responses whose filter no longer matches the selection, that arrive
    /// while a game is running, or that were issued before the last game
    /// started are discarded. Once a game starts, every ticket issued up to
    /// that point is settled, whichever of them won the race.
    pub fn resolve_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Question>, ProviderError>,
    ) -> FetchResolution {
        let latest = self.pending == Some(ticket.id());

        if ticket.id() <= self.settled
            || self.session.is_active()
            || !self.selection.is_current(ticket)
        {
            if latest {
                self.pending = None;
                self.status = FetchStatus::Idle;
            }
            self.emit(&GameEvent::StaleResponseDiscarded { ticket: ticket.id() });
            return FetchResolution::Stale;
        }

        if latest {
            self.pending = None;
        }

        let questions = match result {
            Ok(questions) => questions,
            Err(err) => {
                self.fail(ticket, latest, err.to_string());
                return FetchResolution::Failed;
            }
        };

        if questions.is_empty() {
            if let Err(err) = self.session.bind(questions) {
                log::warn!("could not clear the question list: {err}");
            }
            self.choices.clear();
            self.fail(ticket, latest, NO_QUESTIONS_MESSAGE.to_owned());
            return FetchResolution::Empty;
        }

        let total = questions.len();
        if let Err(err) = self.session.start(questions, self.clock.now()) {
            self.fail(ticket, latest, err.to_string());
            return FetchResolution::Failed;
        }

        self.pending = None;
        self.settled = self.latest_issued.max(ticket.id());
        self.status = FetchStatus::Idle;
        self.shuffle_choices();
        self.emit(&GameEvent::GameStarted { total });
        FetchResolution::Started { total }
    }

    /// Request, fetch and resolve in one step.
    ///
    /// # Errors
    ///
    /// Returns `GameError::GameInProgress` while a game is active. Provider
    /// failures are reported as `FetchResolution::Failed`, not as errors.
    pub async fn start_game(&mut self) -> Result<FetchResolution, GameError> {
        let ticket = self.request_start()?;
        let provider = self.provider();
        let result = provider.fetch_questions(ticket.filter()).await;
        Ok(self.resolve_fetch(&ticket, result))
    }

    /// Answer the current question with `selected`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Session` if no game is active; nothing changes.
    pub fn answer(&mut self, selected: &str) -> Result<AnswerOutcome, GameError> {
        let correct_answer = self
            .session
            .current_question()
            .map(|question| question.correct_answer().to_owned());

        let outcome = self.session.answer(selected, self.clock.now())?;

        if outcome.correct {
            self.emit(&GameEvent::CorrectAnswer {
                index: outcome.index,
                answer: correct_answer.unwrap_or_default(),
            });
        }

        match &outcome.completed {
            Some(summary) => {
                self.choices.clear();
                self.emit(&GameEvent::GameCompleted(summary.clone()));
            }
            None => self.shuffle_choices(),
        }

        Ok(outcome)
    }

    /// Answer with the choice at `position` (zero-based) of `choices()`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::UnknownChoice` if `position` is out of range.
    pub fn answer_choice(&mut self, position: usize) -> Result<AnswerOutcome, GameError> {
        let selected = self
            .choices
            .get(position)
            .cloned()
            .ok_or(GameError::UnknownChoice { position })?;
        self.answer(&selected)
    }

    #[must_use]
    pub fn view(&self) -> GameView {
        let selection = self.selection.state();
        let current_question = self.session.current_question().map(|question| QuestionView {
            prompt: question.question().to_owned(),
            choices: self.choices.clone(),
        });

        GameView {
            categories: self.categories.clone(),
            questions: self.session.questions().to_vec(),
            selected_category_id: selection.selected_category_id().map(str::to_owned),
            selected_question_count: selection.selected_question_count().get(),
            current_question_index: self.session.current_question_index(),
            score: self.session.score(),
            is_active: self.session.is_active(),
            status: self.status.clone(),
            category_status: self.category_status.clone(),
            current_question,
            progress: self.session.progress(),
            is_final_question: self.session.is_final_question(),
        }
    }

    fn fail(&mut self, ticket: &FetchTicket, latest: bool, message: String) {
        if latest {
            self.status = FetchStatus::Failed(message.clone());
        }
        self.emit(&GameEvent::FetchFailed {
            ticket: ticket.id(),
            message,
        });
    }

    fn shuffle_choices(&mut self) {
        let mut choices: Vec<String> = self
            .session
            .current_question()
            .map(|question| question.choices().into_iter().map(str::to_owned).collect())
            .unwrap_or_default();
        choices.shuffle(&mut self.rng);
        self.choices = choices;
    }

    fn emit(&self, event: &GameEvent) {
        self.observer.notify(event);
    }
}
