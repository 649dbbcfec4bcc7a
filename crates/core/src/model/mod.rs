mod category;
mod ids;
mod question;
mod selection;
mod summary;

pub use category::Category;
pub use ids::{CategoryId, ParseIdError};
pub use question::{Question, QuestionError};
pub use selection::{
    DEFAULT_CATEGORY_ID, DEFAULT_QUESTION_COUNT, Difficulty, QuestionFilter, QuestionType,
    SelectionState,
};
pub use summary::{GameSummary, SummaryError};
