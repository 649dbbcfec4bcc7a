use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use trivia_core::model::{Category, Question, QuestionFilter};
use url::Url;

use super::wire::{CategoriesResponse, QuestionsResponse};
use crate::source::{ProviderError, QuestionProvider};

const DEFAULT_BASE_URL: &str = "https://opentdb.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenTdbConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for OpenTdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OpenTdbConfig {
    /// Read `TRIVIA_API_URL` and `TRIVIA_TIMEOUT_SECS`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = env::var("TRIVIA_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.base_url);
        let timeout = env::var("TRIVIA_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map_or(defaults.timeout, Duration::from_secs);
        Self { base_url, timeout }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }
}

/// HTTP client for the Open Trivia DB API.
///
/// Questions are requested base64-encoded so answer text survives verbatim.
#[derive(Clone)]
pub struct OpenTdbProvider {
    client: Client,
    config: OpenTdbConfig,
}

impl OpenTdbProvider {
    /// # Errors
    ///
    /// Returns `ProviderError::Http` if the HTTP client cannot be built.
    pub fn new(config: OpenTdbConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &OpenTdbConfig {
        &self.config
    }

    fn questions_url(&self, filter: &QuestionFilter) -> Result<Url, ProviderError> {
        let amount = filter.count_param();
        let params = [
            ("amount", amount.as_str()),
            ("category", filter.category_id()),
            ("difficulty", filter.difficulty().as_str()),
            ("type", filter.question_type().as_str()),
            ("encode", "base64"),
        ];
        Ok(Url::parse_with_params(
            &self.config.endpoint("api.php"),
            &params,
        )?)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, ProviderError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            log::warn!("trivia provider answered {}", response.status());
            return Err(ProviderError::Status(response.status()));
        }
        Ok(response)
    }
}

#[async_trait]
impl QuestionProvider for OpenTdbProvider {
    async fn fetch_categories(&self) -> Result<Vec<Category>, ProviderError> {
        let url = Url::parse(&self.config.endpoint("api_category.php"))?;
        log::debug!("fetching categories from {url}");
        let body: CategoriesResponse = self.get(url).await?.json().await?;
        Ok(body.into_categories())
    }

    async fn fetch_questions(
        &self,
        filter: &QuestionFilter,
    ) -> Result<Vec<Question>, ProviderError> {
        let url = self.questions_url(filter)?;
        log::debug!("fetching questions ({filter})");
        let body: QuestionsResponse = self.get(url).await?.json().await?;
        let questions = body.into_questions()?;
        log::debug!("provider returned {} questions", questions.len());
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    #[test]
    fn builds_question_query_from_filter() {
        let provider = OpenTdbProvider::new(
            OpenTdbConfig::default().with_base_url("https://trivia.example/"),
        )
        .unwrap();
        let filter = QuestionFilter::new(NonZeroU32::new(10).unwrap(), "9");

        let url = provider.questions_url(&filter).unwrap();
        assert_eq!(
            url.as_str(),
            "https://trivia.example/api.php?amount=10&category=9&difficulty=medium&type=multiple&encode=base64"
        );
    }

    #[test]
    fn config_builders_override_defaults() {
        let config = OpenTdbConfig::default()
            .with_base_url("http://localhost:8080")
            .with_timeout(Duration::from_secs(2));
        assert_eq!(config.endpoint("api_category.php"), "http://localhost:8080/api_category.php");
        assert_eq!(config.timeout, Duration::from_secs(2));
    }
}
