use std::num::NonZeroU32;

use services::GameView;
use thiserror::Error;

/// Question counts offered on the configuration screen.
pub const QUESTION_COUNT_OPTIONS: [u32; 3] = [5, 10, 15];

/// How many provider categories the configuration screen lists.
pub const CATEGORY_MENU_SIZE: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameIntent {
    SelectCategory(Option<String>),
    SelectQuestionCount(NonZeroU32),
    Start,
    /// Zero-based position in the displayed choices.
    AnswerChoice(usize),
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntentError {
    #[error("type a command (h for help)")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("no category numbered {raw}")]
    InvalidCategory { raw: String },
    #[error("choose one of 5, 10 or 15 questions, not {raw}")]
    InvalidCount { raw: String },
    #[error("no answer numbered {raw}")]
    InvalidChoice { raw: String },
}

/// Interpret one line of input against what is currently on screen.
///
/// # Errors
///
/// Returns `IntentError` when the line does not name an available action.
pub fn parse_intent(line: &str, view: &GameView) -> Result<GameIntent, IntentError> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Err(IntentError::Empty);
    };
    let argument = parts.next();

    match command {
        "q" | "quit" => return Ok(GameIntent::Quit),
        "h" | "help" | "?" => return Ok(GameIntent::Help),
        _ => {}
    }

    if view.is_active {
        return parse_choice(command, view);
    }

    match command {
        "s" | "start" => Ok(GameIntent::Start),
        "c" | "category" => parse_category(argument, view),
        "n" | "count" => parse_count(argument),
        other => Err(IntentError::Unknown(other.to_owned())),
    }
}

fn parse_choice(raw: &str, view: &GameView) -> Result<GameIntent, IntentError> {
    let available = view
        .current_question
        .as_ref()
        .map_or(0, |question| question.choices.len());
    raw.parse::<usize>()
        .ok()
        .filter(|n| (1..=available).contains(n))
        .map(|n| GameIntent::AnswerChoice(n - 1))
        .ok_or_else(|| IntentError::InvalidChoice { raw: raw.to_owned() })
}

fn parse_category(argument: Option<&str>, view: &GameView) -> Result<GameIntent, IntentError> {
    let Some(raw) = argument else {
        return Ok(GameIntent::SelectCategory(None));
    };
    let listed = view.categories.len().min(CATEGORY_MENU_SIZE);
    raw.parse::<usize>()
        .ok()
        .filter(|n| (1..=listed).contains(n))
        .map(|n| GameIntent::SelectCategory(Some(view.categories[n - 1].key())))
        .ok_or_else(|| IntentError::InvalidCategory { raw: raw.to_owned() })
}

fn parse_count(argument: Option<&str>) -> Result<GameIntent, IntentError> {
    let raw = argument.unwrap_or_default();
    raw.parse::<u32>()
        .ok()
        .filter(|n| QUESTION_COUNT_OPTIONS.contains(n))
        .and_then(NonZeroU32::new)
        .map(GameIntent::SelectQuestionCount)
        .ok_or_else(|| IntentError::InvalidCount { raw: raw.to_owned() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::{FetchStatus, QuestionView};
    use trivia_core::model::{Category, CategoryId};

    fn configuring_view() -> GameView {
        GameView {
            categories: vec![
                Category::new(CategoryId::new(9), "General Knowledge"),
                Category::new(CategoryId::new(10), "Books"),
                Category::new(CategoryId::new(11), "Film"),
                Category::new(CategoryId::new(12), "Music"),
            ],
            questions: Vec::new(),
            selected_category_id: None,
            selected_question_count: 5,
            current_question_index: 0,
            score: 0,
            is_active: false,
            status: FetchStatus::Idle,
            category_status: FetchStatus::Idle,
            current_question: None,
            progress: None,
            is_final_question: false,
        }
    }

    fn active_view() -> GameView {
        GameView {
            is_active: true,
            current_question: Some(QuestionView {
                prompt: "2+2?".into(),
                choices: vec!["5".into(), "4".into(), "3".into()],
            }),
            ..configuring_view()
        }
    }

    #[test]
    fn category_by_menu_position() {
        let view = configuring_view();
        assert_eq!(
            parse_intent("c 3", &view),
            Ok(GameIntent::SelectCategory(Some("11".into())))
        );
        assert_eq!(parse_intent("c", &view), Ok(GameIntent::SelectCategory(None)));
    }

    #[test]
    fn categories_beyond_menu_are_rejected() {
        let view = configuring_view();
        assert_eq!(
            parse_intent("c 4", &view),
            Err(IntentError::InvalidCategory { raw: "4".into() })
        );
    }

    #[test]
    fn count_must_be_a_menu_option() {
        let view = configuring_view();
        assert_eq!(
            parse_intent("n 10", &view),
            Ok(GameIntent::SelectQuestionCount(NonZeroU32::new(10).unwrap()))
        );
        assert!(matches!(
            parse_intent("n 7", &view),
            Err(IntentError::InvalidCount { .. })
        ));
    }

    #[test]
    fn digits_answer_while_playing() {
        let view = active_view();
        assert_eq!(parse_intent("2", &view), Ok(GameIntent::AnswerChoice(1)));
        assert!(matches!(
            parse_intent("4", &view),
            Err(IntentError::InvalidChoice { .. })
        ));
        assert!(matches!(
            parse_intent("s", &view),
            Err(IntentError::InvalidChoice { .. })
        ));
    }

    #[test]
    fn quit_and_help_work_everywhere() {
        for view in [configuring_view(), active_view()] {
            assert_eq!(parse_intent("q", &view), Ok(GameIntent::Quit));
            assert_eq!(parse_intent(" help ", &view), Ok(GameIntent::Help));
        }
        assert_eq!(parse_intent("   ", &configuring_view()), Err(IntentError::Empty));
    }
}
