use chrono::{DateTime, Utc};

/// Where game start and completion timestamps come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    /// Every reading returns the same instant.
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// 2024-01-01T00:00:00Z, the instant behind [`fixed_clock`].
pub const FIXED_TEST_TIMESTAMP: i64 = 1_704_067_200;

#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(FIXED_TEST_TIMESTAMP, 0).unwrap_or_default()
}

/// A clock pinned to [`fixed_now`], so summaries report zero elapsed time.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::Fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_never_moves() {
        let clock = fixed_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().timestamp(), FIXED_TEST_TIMESTAMP);
    }

    #[test]
    fn system_clock_is_the_default() {
        assert_eq!(Clock::default(), Clock::System);
        assert!(Clock::System.now() > fixed_now());
    }
}
