//! Shared error types for the services crate.

use thiserror::Error;

use provider::ProviderError;
use trivia_core::SessionError;

/// Errors emitted by `GameController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameError {
    #[error("a game is already in progress")]
    GameInProgress,
    #[error("no answer choice at position {position}")]
    UnknownChoice { position: usize },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
