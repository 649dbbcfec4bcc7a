use std::num::NonZeroU32;

use trivia_core::model::{QuestionFilter, SelectionState};

/// A question fetch tagged with the filter it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    id: u64,
    filter: QuestionFilter,
}

impl FetchTicket {
    /// Monotonic per controller; a larger id was issued later.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn filter(&self) -> &QuestionFilter {
        &self.filter
    }
}

/// Holds the user's category/count choices and issues fetch tickets.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
    issued: u64,
}

impl SelectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(mut self, state: SelectionState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Returns `true` if the selection changed.
    pub fn select_category(&mut self, category_id: Option<String>) -> bool {
        self.state.select_category(category_id)
    }

    /// Returns `true` if the selection changed.
    pub fn select_question_count(&mut self, count: NonZeroU32) -> bool {
        self.state.select_question_count(count)
    }

    /// Issue a ticket for fetching questions with the current selection.
    pub fn request_start(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            id: self.issued,
            filter: self.state.filter(),
        }
    }

    /// Whether a response for `ticket` still matches what the user has selected.
    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.filter == self.state.filter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_snapshot_selection() {
        let mut selection = SelectionController::new();
        selection.select_category(Some("9".into()));
        selection.select_question_count(NonZeroU32::new(10).unwrap());

        let ticket = selection.request_start();
        assert_eq!(ticket.filter().category_id(), "9");
        assert_eq!(ticket.filter().count_param(), "10");
    }

    #[test]
    fn ticket_ids_increase() {
        let mut selection = SelectionController::new();
        let first = selection.request_start();
        let second = selection.request_start();
        assert!(second.id() > first.id());
    }

    #[test]
    fn ticket_goes_stale_when_selection_changes() {
        let mut selection = SelectionController::new();
        let ticket = selection.request_start();
        assert!(selection.is_current(&ticket));

        selection.select_category(Some("23".into()));
        assert!(!selection.is_current(&ticket));

        selection.select_category(None);
        assert!(selection.is_current(&ticket));
    }
}
