mod game_vm;
mod summary_vm;
mod time_fmt;

pub use game_vm::{CATEGORY_MENU_SIZE, GameIntent, IntentError, QUESTION_COUNT_OPTIONS, parse_intent};
pub use summary_vm::SummaryVm;
