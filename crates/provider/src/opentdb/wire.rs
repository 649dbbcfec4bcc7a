use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use trivia_core::model::{Category, CategoryId, Question};

use crate::source::ProviderError;

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesResponse {
    trivia_categories: Vec<CategoryRecord>,
}

#[derive(Debug, Deserialize)]
struct CategoryRecord {
    id: u32,
    name: String,
}

impl CategoriesResponse {
    pub(crate) fn into_categories(self) -> Vec<Category> {
        self.trivia_categories
            .into_iter()
            .map(|record| Category::new(CategoryId::new(record.id), record.name))
            .collect()
    }
}

/// Body of `api.php` when requested with `encode=base64`.
#[derive(Debug, Deserialize)]
pub(crate) struct QuestionsResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct QuestionRecord {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl QuestionsResponse {
    /// Map the response code and decode every record.
    ///
    /// Code 1 (no results) is returned as an empty list.
    pub(crate) fn into_questions(self) -> Result<Vec<Question>, ProviderError> {
        match self.response_code {
            0 => {}
            1 => return Ok(Vec::new()),
            2 => return Err(ProviderError::InvalidParameter),
            5 => return Err(ProviderError::RateLimited),
            code => return Err(ProviderError::Api { code }),
        }

        self.results
            .into_iter()
            .map(QuestionRecord::decode)
            .collect()
    }
}

impl QuestionRecord {
    fn decode(self) -> Result<Question, ProviderError> {
        let incorrect = self
            .incorrect_answers
            .iter()
            .map(|answer| decode_field(answer))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Question::new(
            decode_field(&self.question)?,
            decode_field(&self.correct_answer)?,
            incorrect,
        )?)
    }
}

fn decode_field(raw: &str) -> Result<String, ProviderError> {
    let bytes = STANDARD
        .decode(raw)
        .map_err(|e| ProviderError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ProviderError::Decode(e.to_string()))
}
