#![forbid(unsafe_code)]

pub mod error;
pub mod ledger;
pub mod rounds;
pub mod sessions;
pub mod shuffle;
pub mod timer;

pub use quiz_core::Clock;

pub use error::{SamplingError, SessionError};
pub use ledger::LedgerService;
pub use timer::{Countdown, CountdownTick, FEEDBACK_TICKS, QUESTION_TICKS, TimerToken};

pub use sessions::{
    AdvanceResult, AnswerResult, DashboardRow, GameLoopService, ItemResult, SessionProgress,
    SessionService, TimerEvent, dashboard_rows,
};
