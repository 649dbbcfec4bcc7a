#![forbid(unsafe_code)]

pub mod error;
pub mod game;
pub mod selection;

pub use trivia_core::Clock;

pub use error::GameError;
pub use game::{
    FetchResolution, FetchStatus, GameController, GameEvent, GameObserver, GameView, LogObserver,
    QuestionView,
};
pub use selection::{FetchTicket, SelectionController};
