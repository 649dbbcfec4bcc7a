use trivia_core::model::GameSummary;

use crate::vm::time_fmt::{format_datetime, format_elapsed};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub correct: u32,
    pub total: u32,
    pub percent: u32,
    pub completed_at_str: String,
    pub elapsed_str: String,
}

impl From<&GameSummary> for SummaryVm {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from(summary: &GameSummary) -> Self {
        Self {
            correct: summary.correct(),
            total: summary.total(),
            percent: (summary.accuracy() * 100.0).round() as u32,
            completed_at_str: format_datetime(summary.completed_at()),
            elapsed_str: format_elapsed(summary.started_at(), summary.completed_at()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::time::fixed_now;

    #[test]
    fn maps_summary_fields() {
        let start = fixed_now();
        let end = start + chrono::Duration::seconds(95);
        let summary = GameSummary::new(start, end, 2, 3).unwrap();

        let vm = SummaryVm::from(&summary);
        assert_eq!(vm.percent, 67);
        assert_eq!(vm.elapsed_str, "1m 35s");
        assert_eq!(vm.completed_at_str, "2024-01-01 00:01:35 UTC");
    }
}
