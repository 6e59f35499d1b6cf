//! Shared domain library for the SkillTree progression backend:
//! the XP/level progression engine, the SQLite award ledger, and the
//! types exchanged with the HTTP layer.

pub mod error;
pub mod progression;
pub mod store;
pub mod types;

pub use error::{LedgerError, Result};
pub use progression::{progress, progress_signed, rank_for_level, Progress, Rank};
pub use store::{LedgerStore, CHALLENGE_XP, QUIZ_XP};
pub use types::{
    Account, AccountProgress, ActivityEntry, AwardOutcome, CompletionResponse, CourseStatus,
    CourseSummary, Subject, SubjectKind,
};
