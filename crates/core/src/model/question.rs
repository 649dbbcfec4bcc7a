use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyPrompt,

    #[error("correct answer cannot be empty")]
    EmptyCorrectAnswer,

    #[error("correct answer {answer:?} also appears among the incorrect answers")]
    CorrectAnswerListedAsIncorrect { answer: String },
}

/// A single multiple-choice question as supplied by the provider.
///
/// Immutable once built. The correct answer never appears in
/// `incorrect_answers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl Question {
    /// Build a question, checking the answer invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` or `QuestionError::EmptyCorrectAnswer` for blank text.
    /// Returns `QuestionError::CorrectAnswerListedAsIncorrect` if the correct answer is also
    /// listed as incorrect.
    pub fn new(
        question: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let question = question.into();
        let correct_answer = correct_answer.into();

        if question.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if correct_answer.trim().is_empty() {
            return Err(QuestionError::EmptyCorrectAnswer);
        }
        if incorrect_answers.contains(&correct_answer) {
            return Err(QuestionError::CorrectAnswerListedAsIncorrect {
                answer: correct_answer,
            });
        }

        Ok(Self {
            question,
            correct_answer,
            incorrect_answers,
        })
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn incorrect_answers(&self) -> &[String] {
        &self.incorrect_answers
    }

    /// Exact string comparison against the correct answer.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    /// Every selectable answer: the correct one first, then the incorrect ones in order.
    #[must_use]
    pub fn choices(&self) -> Vec<&str> {
        std::iter::once(self.correct_answer.as_str())
            .chain(self.incorrect_answers.iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new("2+2?", "4", vec!["3".into(), "5".into()]).unwrap()
    }

    #[test]
    fn correct_answer_uses_exact_match() {
        let q = sample();
        assert!(q.is_correct("4"));
        assert!(!q.is_correct(" 4"));
        assert!(!q.is_correct("3"));
    }

    #[test]
    fn choices_include_every_answer() {
        assert_eq!(sample().choices(), vec!["4", "3", "5"]);
    }

    #[test]
    fn rejects_correct_answer_among_incorrect() {
        let err = Question::new("2+2?", "4", vec!["4".into(), "5".into()]).unwrap_err();
        assert_eq!(
            err,
            QuestionError::CorrectAnswerListedAsIncorrect { answer: "4".into() }
        );
    }

    #[test]
    fn rejects_blank_text() {
        assert_eq!(
            Question::new("  ", "4", Vec::new()).unwrap_err(),
            QuestionError::EmptyPrompt
        );
        assert_eq!(
            Question::new("2+2?", "", Vec::new()).unwrap_err(),
            QuestionError::EmptyCorrectAnswer
        );
    }
}
