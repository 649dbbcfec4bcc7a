use serde::Serialize;
use trivia_core::Progress;
use trivia_core::model::{Category, Question};

/// Loading/error flag for a provider fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

impl FetchStatus {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub prompt: String,
    /// Shuffled once per question; stable until the question is answered.
    pub choices: Vec<String>,
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub categories: Vec<Category>,
    pub questions: Vec<Question>,
    pub selected_category_id: Option<String>,
    pub selected_question_count: u32,
    pub current_question_index: usize,
    pub score: u32,
    pub is_active: bool,
    pub status: FetchStatus,
    pub category_status: FetchStatus,
    pub current_question: Option<QuestionView>,
    pub progress: Option<Progress>,
    pub is_final_question: bool,
}
