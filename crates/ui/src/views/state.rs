use services::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    GameInProgress,
    NoGame,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::GameInProgress => "Finish the current game first.",
            ViewError::NoGame => "No game is running. Type s to start one.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&GameError> for ViewError {
    fn from(err: &GameError) -> Self {
        match err {
            GameError::GameInProgress => ViewError::GameInProgress,
            GameError::Session(_) | GameError::UnknownChoice { .. } => ViewError::NoGame,
            _ => ViewError::Unknown,
        }
    }
}
