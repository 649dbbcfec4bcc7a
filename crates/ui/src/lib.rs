pub mod views;
pub mod vm;

pub use views::{ViewError, render_help, render_summary, render_view};
pub use vm::{
    CATEGORY_MENU_SIZE, GameIntent, IntentError, QUESTION_COUNT_OPTIONS, SummaryVm, parse_intent,
};
