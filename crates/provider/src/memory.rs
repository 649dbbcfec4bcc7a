use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;
use trivia_core::model::{Category, Question, QuestionFilter};

use crate::source::{ProviderError, QuestionProvider};

/// In-memory provider for tests and offline play.
///
/// Questions are banked per category id. Every question fetch is recorded so
/// callers can assert on the filters they sent. Fetches for a category can be
/// held back with [`InMemoryProvider::hold`] to simulate a slow network.
#[derive(Clone, Default)]
pub struct InMemoryProvider {
    categories: Arc<Mutex<Vec<Category>>>,
    questions: Arc<Mutex<HashMap<String, Vec<Question>>>>,
    requests: Arc<Mutex<Vec<QuestionFilter>>>,
    failure: Arc<Mutex<Option<String>>>,
    holds: Arc<Mutex<HashMap<String, oneshot::Receiver<()>>>>,
}

fn poisoned(err: impl std::fmt::Display) -> ProviderError {
    ProviderError::Unavailable(err.to_string())
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the internal lock is poisoned.
    pub fn add_category(&self, category: Category) -> Result<(), ProviderError> {
        self.categories.lock().map_err(poisoned)?.push(category);
        Ok(())
    }

    /// Append questions to the bank for `category_id`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the internal lock is poisoned.
    pub fn add_questions(
        &self,
        category_id: &str,
        questions: impl IntoIterator<Item = Question>,
    ) -> Result<(), ProviderError> {
        self.questions
            .lock()
            .map_err(poisoned)?
            .entry(category_id.to_owned())
            .or_default()
            .extend(questions);
        Ok(())
    }

    /// Make every subsequent call fail with `message`, or succeed again with `None`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the internal lock is poisoned.
    pub fn fail_with(&self, message: Option<&str>) -> Result<(), ProviderError> {
        *self.failure.lock().map_err(poisoned)? = message.map(str::to_owned);
        Ok(())
    }

    /// Delay the next question fetch for `category_id` until the returned
    /// sender fires or is dropped. A second hold on the same category
    /// replaces the first one.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the internal lock is poisoned.
    pub fn hold(&self, category_id: &str) -> Result<oneshot::Sender<()>, ProviderError> {
        let (release, held) = oneshot::channel();
        self.holds
            .lock()
            .map_err(poisoned)?
            .insert(category_id.to_owned(), held);
        Ok(release)
    }

    /// Filters received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the internal lock is poisoned.
    pub fn requests(&self) -> Result<Vec<QuestionFilter>, ProviderError> {
        Ok(self.requests.lock().map_err(poisoned)?.clone())
    }

    fn check_failure(&self) -> Result<(), ProviderError> {
        match self.failure.lock().map_err(poisoned)?.as_ref() {
            Some(message) => Err(ProviderError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl QuestionProvider for InMemoryProvider {
    async fn fetch_categories(&self) -> Result<Vec<Category>, ProviderError> {
        self.check_failure()?;
        Ok(self.categories.lock().map_err(poisoned)?.clone())
    }

    async fn fetch_questions(
        &self,
        filter: &QuestionFilter,
    ) -> Result<Vec<Question>, ProviderError> {
        self.requests.lock().map_err(poisoned)?.push(filter.clone());

        let held = self
            .holds
            .lock()
            .map_err(poisoned)?
            .remove(filter.category_id());
        if let Some(held) = held {
            let released = held.await;
            if released.is_err() {
                log::debug!("hold on category {} dropped", filter.category_id());
            }
        }
        self.check_failure()?;

        let limit = usize::try_from(filter.amount().get()).unwrap_or(usize::MAX);
        let guard = self.questions.lock().map_err(poisoned)?;
        Ok(guard
            .get(filter.category_id())
            .map(|bank| bank.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;
    use trivia_core::model::CategoryId;

    fn question(n: u32) -> Question {
        Question::new(format!("Q{n}"), format!("A{n}"), vec!["x".into()]).unwrap()
    }

    fn filter(amount: u32, category: &str) -> QuestionFilter {
        QuestionFilter::new(NonZeroU32::new(amount).unwrap(), category)
    }

    #[tokio::test]
    async fn returns_at_most_the_requested_amount() {
        let provider = InMemoryProvider::new();
        provider.add_questions("9", (1..=8).map(question)).unwrap();

        let questions = provider.fetch_questions(&filter(5, "9")).await.unwrap();
        assert_eq!(questions.len(), 5);
        assert_eq!(questions[0].question(), "Q1");
    }

    #[tokio::test]
    async fn unknown_category_yields_empty_list() {
        let provider = InMemoryProvider::new();
        let questions = provider.fetch_questions(&filter(5, "42")).await.unwrap();
        assert!(questions.is_empty());
    }

    #[tokio::test]
    async fn records_filters_even_when_failing() {
        let provider = InMemoryProvider::new();
        provider.fail_with(Some("offline")).unwrap();

        let err = provider.fetch_questions(&filter(10, "9")).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(ref m) if m == "offline"));
        assert_eq!(provider.requests().unwrap(), vec![filter(10, "9")]);
    }

    #[tokio::test]
    async fn held_fetch_waits_for_release() {
        let provider = InMemoryProvider::new();
        provider.add_questions("9", (1..=2).map(question)).unwrap();
        let release = provider.hold("9").unwrap();

        let slow = {
            let provider = provider.clone();
            tokio::spawn(async move { provider.fetch_questions(&filter(2, "9")).await })
        };
        let fast = provider.fetch_questions(&filter(1, "10")).await.unwrap();
        assert!(fast.is_empty());
        assert!(!slow.is_finished());

        release.send(()).unwrap();
        assert_eq!(slow.await.unwrap().unwrap().len(), 2);

        let again = provider.fetch_questions(&filter(2, "9")).await.unwrap();
        assert_eq!(again.len(), 2);
    }

    #[tokio::test]
    async fn lists_categories_in_insertion_order() {
        let provider = InMemoryProvider::new();
        provider
            .add_category(Category::new(CategoryId::new(9), "General Knowledge"))
            .unwrap();
        provider
            .add_category(Category::new(CategoryId::new(11), "Film"))
            .unwrap();

        let names: Vec<_> = provider
            .fetch_categories()
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_owned())
            .collect();
        assert_eq!(names, vec!["General Knowledge", "Film"]);
    }
}
