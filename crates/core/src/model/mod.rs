mod catalog;
mod progress;
mod session;

pub use catalog::{
    CHOICE_COUNT, Catalog, CatalogError, CatalogItem, ChoiceQuestion, CodingTopic, DefinitionItem,
    TopicId,
};
pub use progress::{ModeTally, ProgressLedger};
pub use session::{
    ChoiceRound, GameMode, Outcome, Response, SessionItem, SessionStatus, SessionSummary,
    SummaryError, Verdict,
};
