use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use provider::{OpenTdbConfig, OpenTdbProvider};
use services::{Clock, GameController};
use tokio::io::{AsyncBufReadExt, BufReader};
use trivia_core::model::SelectionState;
use ui::{
    GameIntent, SummaryVm, ViewError, parse_intent, render_help, render_summary, render_view,
};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTimeout { raw: String },
    InvalidCount { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTimeout { raw } => write!(f, "invalid --timeout value: {raw}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--timeout <secs>] [--category <id>] [--count <n>] [--seed <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url https://opentdb.com");
    eprintln!("  --timeout 10");
    eprintln!("  --count 5");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_API_URL, TRIVIA_TIMEOUT_SECS, TRIVIA_CATEGORY, TRIVIA_QUESTION_COUNT, RUST_LOG");
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Args {
    provider: OpenTdbConfig,
    category: Option<String>,
    count: Option<NonZeroU32>,
    seed: Option<u64>,
}

fn parse_count(raw: String) -> Result<NonZeroU32, ArgsError> {
    raw.trim()
        .parse::<NonZeroU32>()
        .map_err(|_| ArgsError::InvalidCount { raw })
}

impl Args {
    fn from_env() -> Self {
        Self {
            provider: OpenTdbConfig::from_env(),
            category: std::env::var("TRIVIA_CATEGORY")
                .ok()
                .filter(|value| !value.trim().is_empty()),
            count: std::env::var("TRIVIA_QUESTION_COUNT")
                .ok()
                .and_then(|value| value.trim().parse().ok()),
            seed: None,
        }
    }

    fn parse(mut self, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    self.provider = self.provider.with_base_url(value);
                }
                "--timeout" => {
                    let value = require_value(args, "--timeout")?;
                    let secs: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidTimeout { raw: value.clone() })?;
                    self.provider = self.provider.with_timeout(Duration::from_secs(secs));
                }
                "--category" => {
                    self.category = Some(require_value(args, "--category")?);
                }
                "--count" => {
                    self.count = Some(parse_count(require_value(args, "--count")?)?);
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let seed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    self.seed = Some(seed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(self)
    }

    fn selection(&self) -> SelectionState {
        let mut selection = SelectionState::default();
        selection.select_category(self.category.clone());
        if let Some(count) = self.count {
            selection.select_question_count(count);
        }
        selection
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_env()
        .parse(&mut std::env::args().skip(1))
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;

    let provider = OpenTdbProvider::new(args.provider.clone())?;
    let mut game = GameController::new(Arc::new(provider), Clock::System)
        .with_selection(args.selection());
    if let Some(seed) = args.seed {
        game = game.with_seed(seed);
    }

    if let Err(err) = game.load_categories().await {
        // The default category still works without the list.
        eprintln!("could not load categories: {err}");
    }

    print!("{}", render_view(&game.view()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let view = game.view();
        let intent = match parse_intent(&line, &view) {
            Ok(intent) => intent,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match intent {
            GameIntent::Quit => break,
            GameIntent::Help => {
                print!("{}", render_help());
                continue;
            }
            GameIntent::SelectCategory(category_id) => {
                game.select_category(category_id);
            }
            GameIntent::SelectQuestionCount(count) => {
                game.select_question_count(count);
            }
            GameIntent::Start => {
                println!("Loading...");
                if let Err(err) = game.start_game().await {
                    println!("{}", ViewError::from(&err).message());
                }
            }
            GameIntent::AnswerChoice(position) => {
                let expected = game
                    .session()
                    .current_question()
                    .map(|question| question.correct_answer().to_owned());
                match game.answer_choice(position) {
                    Ok(outcome) => {
                        if outcome.correct {
                            println!("Correct!");
                        } else if let Some(expected) = expected {
                            println!("Wrong. The answer was: {expected}");
                        }
                        if let Some(summary) = outcome.completed {
                            print!("{}", render_summary(&SummaryVm::from(&summary)));
                        }
                    }
                    Err(err) => println!("{}", ViewError::from(&err).message()),
                }
            }
        }

        print!("{}", render_view(&game.view()));
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_target(false)
        .init();

    if let Err(err) = run().await {
        log::error!("{err}");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
