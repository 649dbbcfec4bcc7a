use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Number of questions requested when the user has not picked one.
pub const DEFAULT_QUESTION_COUNT: NonZeroU32 = NonZeroU32::new(5).unwrap();

/// Category requested when the user has not picked one.
pub const DEFAULT_CATEGORY_ID: &str = "11";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Multiple,
    Boolean,
}

impl QuestionType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Multiple => "multiple",
            QuestionType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter parameters a question fetch was issued with.
///
/// Two fetches are interchangeable exactly when their filters compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestionFilter {
    amount: NonZeroU32,
    category_id: String,
    difficulty: Difficulty,
    question_type: QuestionType,
}

impl QuestionFilter {
    #[must_use]
    pub fn new(amount: NonZeroU32, category_id: impl Into<String>) -> Self {
        Self {
            amount,
            category_id: category_id.into(),
            difficulty: Difficulty::default(),
            question_type: QuestionType::default(),
        }
    }

    #[must_use]
    pub fn amount(&self) -> NonZeroU32 {
        self.amount
    }

    /// The question count as the provider expects it.
    #[must_use]
    pub fn count_param(&self) -> String {
        self.amount.to_string()
    }

    #[must_use]
    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }
}

impl fmt::Display for QuestionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "count={} category={} difficulty={} type={}",
            self.amount, self.category_id, self.difficulty, self.question_type
        )
    }
}

/// The user's current category and question-count choices.
///
/// Survives across games until the user changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    selected_category_id: Option<String>,
    selected_question_count: NonZeroU32,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected_category_id: None,
            selected_question_count: DEFAULT_QUESTION_COUNT,
        }
    }
}

impl SelectionState {
    #[must_use]
    pub fn selected_category_id(&self) -> Option<&str> {
        self.selected_category_id.as_deref()
    }

    #[must_use]
    pub fn selected_question_count(&self) -> NonZeroU32 {
        self.selected_question_count
    }

    /// Returns `true` if the stored category changed.
    pub fn select_category(&mut self, category_id: Option<String>) -> bool {
        if self.selected_category_id == category_id {
            return false;
        }
        self.selected_category_id = category_id;
        true
    }

    /// Returns `true` if the stored count changed.
    pub fn select_question_count(&mut self, count: NonZeroU32) -> bool {
        if self.selected_question_count == count {
            return false;
        }
        self.selected_question_count = count;
        true
    }

    /// Snapshot of the filter a fetch issued now would use.
    #[must_use]
    pub fn filter(&self) -> QuestionFilter {
        let category = self
            .selected_category_id
            .as_deref()
            .unwrap_or(DEFAULT_CATEGORY_ID);
        QuestionFilter::new(self.selected_question_count, category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn defaults_to_five_questions_without_category() {
        let state = SelectionState::default();
        assert_eq!(state.selected_category_id(), None);
        assert_eq!(state.selected_question_count().get(), 5);
    }

    #[test]
    fn absent_category_falls_back_to_default() {
        let filter = SelectionState::default().filter();
        assert_eq!(filter.category_id(), "11");
        assert_eq!(filter.count_param(), "5");
        assert_eq!(filter.difficulty().as_str(), "medium");
        assert_eq!(filter.question_type().as_str(), "multiple");
    }

    #[test]
    fn filter_reflects_selection() {
        let mut state = SelectionState::default();
        assert!(state.select_category(Some("9".into())));
        assert!(state.select_question_count(count(10)));

        let filter = state.filter();
        assert_eq!(filter.category_id(), "9");
        assert_eq!(filter.count_param(), "10");
    }

    #[test]
    fn any_positive_count_is_accepted() {
        let mut state = SelectionState::default();
        assert!(state.select_question_count(count(7)));
        assert_eq!(state.filter().amount().get(), 7);
    }

    #[test]
    fn reselecting_same_value_reports_no_change() {
        let mut state = SelectionState::default();
        assert!(!state.select_category(None));
        assert!(!state.select_question_count(DEFAULT_QUESTION_COUNT));
    }

    #[test]
    fn filters_differ_when_selection_changes() {
        let mut state = SelectionState::default();
        let before = state.filter();
        state.select_category(Some("9".into()));
        assert_ne!(before, state.filter());
    }
}
