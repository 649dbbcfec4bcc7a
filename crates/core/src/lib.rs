#![forbid(unsafe_code)]

pub mod model;
pub mod session;
pub mod time;

pub use session::{
    AnswerOutcome, Progress, SessionError, SessionPhase, SessionSnapshot, SessionState,
};
pub use time::Clock;
