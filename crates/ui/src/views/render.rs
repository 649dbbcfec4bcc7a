use std::fmt::Write;

use services::{FetchStatus, GameView};

use crate::vm::{CATEGORY_MENU_SIZE, QUESTION_COUNT_OPTIONS, SummaryVm};

const MARK: &str = " *";

/// Plain-text frame for the current view.
#[must_use]
pub fn render_view(view: &GameView) -> String {
    let mut out = String::new();
    if view.is_active {
        render_question(&mut out, view);
    } else {
        render_configuration(&mut out, view);
    }
    render_status(&mut out, &view.status);
    out
}

fn render_configuration(out: &mut String, view: &GameView) {
    let _ = writeln!(out, "== Trivia Game ==");
    let _ = writeln!(
        out,
        "Welcome to the Trivia Game! Pick a category and a number of questions, then type s to start."
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Select a Category (c <n>):");
    if view.categories.is_empty() {
        let _ = writeln!(out, "  (default category)");
    }
    if let FetchStatus::Failed(message) = &view.category_status {
        let _ = writeln!(out, "  Could not load categories: {message}");
    }
    for (i, category) in view.categories.iter().take(CATEGORY_MENU_SIZE).enumerate() {
        let key = category.key();
        let marker = if view.selected_category_id.as_deref() == Some(key.as_str()) {
            MARK
        } else {
            ""
        };
        let _ = writeln!(out, "  {}) {}{marker}", i + 1, category.name());
    }

    let _ = writeln!(out, "Select Number of Questions (n <count>):");
    let counts: Vec<String> = QUESTION_COUNT_OPTIONS
        .iter()
        .map(|count| {
            let marker = if *count == view.selected_question_count {
                MARK
            } else {
                ""
            };
            format!("{count}{marker}")
        })
        .collect();
    let _ = writeln!(out, "  {}", counts.join("   "));
}

fn render_question(out: &mut String, view: &GameView) {
    let _ = writeln!(out, "== Trivia Game ==");
    if let Some(progress) = view.progress {
        let _ = writeln!(out, "{progress}    Score: {}", view.score);
    }
    let Some(question) = &view.current_question else {
        return;
    };
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", question.prompt);
    for (i, choice) in question.choices.iter().enumerate() {
        let _ = writeln!(out, "  {}) {choice}", i + 1);
    }
    if view.is_final_question {
        let _ = writeln!(out, "(last question)");
    }
}

fn render_status(out: &mut String, status: &FetchStatus) {
    match status {
        FetchStatus::Idle => {}
        FetchStatus::Loading => {
            let _ = writeln!(out, "Loading...");
        }
        FetchStatus::Failed(message) => {
            let _ = writeln!(out, "Could not load questions: {message}");
        }
    }
}

#[must_use]
pub fn render_summary(summary: &SummaryVm) -> String {
    format!(
        "Game over! You scored {}/{} ({}%) in {}.\nFinished at {}.\n",
        summary.correct,
        summary.total,
        summary.percent,
        summary.elapsed_str,
        summary.completed_at_str
    )
}

#[must_use]
pub fn render_help() -> &'static str {
    "Commands:\n  c <n>      select category n (c alone for the default)\n  n <count>  questions per game (5, 10 or 15)\n  s          start the game\n  <n>        answer with choice n while playing\n  h          this help\n  q          quit\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use provider::InMemoryProvider;
    use services::GameController;
    use trivia_core::model::{Category, CategoryId, GameSummary, Question};
    use trivia_core::time::{fixed_clock, fixed_now};

    fn provider() -> InMemoryProvider {
        let provider = InMemoryProvider::new();
        provider
            .add_category(Category::new(CategoryId::new(9), "General Knowledge"))
            .unwrap();
        provider
            .add_category(Category::new(CategoryId::new(11), "Film"))
            .unwrap();
        provider
            .add_questions(
                "11",
                vec![
                    Question::new("Who directed Jaws?", "Spielberg", vec!["Lucas".into()])
                        .unwrap(),
                    Question::new("Who directed Alien?", "Scott", vec!["Cameron".into()])
                        .unwrap(),
                ],
            )
            .unwrap();
        provider
    }

    #[tokio::test]
    async fn configuration_marks_selection() {
        let mut game = GameController::new(Arc::new(provider()), fixed_clock());
        game.load_categories().await.unwrap();
        game.select_category(Some("11".into()));

        let frame = render_view(&game.view());
        assert!(frame.contains("2) Film *"));
        assert!(frame.contains("1) General Knowledge\n"));
        assert!(frame.contains("5 *   10   15"));
    }

    #[tokio::test]
    async fn question_frame_shows_progress_and_choices() {
        let mut game = GameController::new(Arc::new(provider()), fixed_clock()).with_seed(1);
        game.start_game().await.unwrap();

        let frame = render_view(&game.view());
        assert!(frame.contains("Question 1 of 2    Score: 0"));
        assert!(frame.contains("Who directed Jaws?"));
        assert!(frame.contains("Spielberg"));
        assert!(!frame.contains("(last question)"));

        game.answer("Spielberg").unwrap();
        let frame = render_view(&game.view());
        assert!(frame.contains("Question 2 of 2    Score: 1"));
        assert!(frame.contains("(last question)"));
    }

    #[test]
    fn failed_status_is_shown() {
        let mut game = GameController::new(Arc::new(provider()), fixed_clock());
        let ticket = game.request_start().unwrap();
        game.resolve_fetch(&ticket, Ok(Vec::new()));

        let frame = render_view(&game.view());
        assert!(frame.contains("Could not load questions"));
    }

    #[tokio::test]
    async fn failed_category_load_is_shown() {
        let provider = provider();
        provider.fail_with(Some("offline")).unwrap();
        let mut game = GameController::new(Arc::new(provider), fixed_clock());
        assert!(game.load_categories().await.is_err());

        let frame = render_view(&game.view());
        assert!(frame.contains("Could not load categories: offline"));
        assert!(!frame.contains("Could not load questions"));
    }

    #[test]
    fn summary_line() {
        let summary = GameSummary::new(fixed_now(), fixed_now(), 4, 5).unwrap();
        let text = render_summary(&SummaryVm::from(&summary));
        assert!(text.starts_with("Game over! You scored 4/5 (80%) in 0m 00s."));
    }
}
