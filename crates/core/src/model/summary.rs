use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("score ({correct}) exceeds question count ({total})")]
    ScoreExceedsTotal { correct: u32, total: u32 },
}

/// Final tally of a finished game.
///
/// Built before the session resets, since the session itself forgets the score
/// once the last question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    correct: u32,
    total: u32,
}

impl GameSummary {
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `SummaryError::ScoreExceedsTotal` if `correct > total`.
    pub fn new(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        correct: u32,
        total: u32,
    ) -> Result<Self, SummaryError> {
        if completed_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        if correct > total {
            return Err(SummaryError::ScoreExceedsTotal { correct, total });
        }

        Ok(Self {
            started_at,
            completed_at,
            correct,
            total,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.total - self.correct
    }

    /// Share of correct answers in `0.0..=1.0`.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.correct) / f64::from(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn summary_reports_accuracy() {
        let now = fixed_now();
        let summary = GameSummary::new(now, now, 3, 4).unwrap();
        assert_eq!(summary.incorrect(), 1);
        assert!((summary.accuracy() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_inverted_time_range() {
        let now = fixed_now();
        let err = GameSummary::new(now, now - chrono::Duration::seconds(1), 0, 1).unwrap_err();
        assert_eq!(err, SummaryError::InvalidTimeRange);
    }

    #[test]
    fn rejects_score_above_total() {
        let now = fixed_now();
        let err = GameSummary::new(now, now, 6, 5).unwrap_err();
        assert_eq!(err, SummaryError::ScoreExceedsTotal { correct: 6, total: 5 });
    }
}
