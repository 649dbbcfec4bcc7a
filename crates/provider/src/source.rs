use async_trait::async_trait;
use thiserror::Error;
use trivia_core::model::{Category, Question, QuestionError, QuestionFilter};

/// Errors surfaced by content providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("provider request timed out")]
    Timeout,

    #[error("provider request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("provider returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("provider rejected the request parameters")]
    InvalidParameter,

    #[error("provider rate limit reached")]
    RateLimited,

    #[error("provider returned response code {code}")]
    Api { code: u8 },

    #[error("malformed provider payload: {0}")]
    Decode(String),

    #[error(transparent)]
    InvalidQuestion(#[from] QuestionError),

    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Http(err)
        }
    }
}

/// Contract for the external trivia content source.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// List every category the provider offers.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the provider cannot be reached or answers garbage.
    async fn fetch_categories(&self) -> Result<Vec<Category>, ProviderError>;

    /// Resolve a filter into a question list.
    ///
    /// An empty list is a valid answer; callers decide what to do with it.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on transport, status or payload failures.
    async fn fetch_questions(
        &self,
        filter: &QuestionFilter,
    ) -> Result<Vec<Question>, ProviderError>;
}
