mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use service::{ItemResult, SessionService, TimerEvent};
pub use view::{DashboardRow, dashboard_rows};
pub use workflow::{AdvanceResult, AnswerResult, GameLoopService};
