mod controller;
mod events;
mod view;

pub use controller::{FetchResolution, GameController};
pub use events::{GameEvent, GameObserver, LogObserver};
pub use view::{FetchStatus, GameView, QuestionView};
