//! # Expense Split Backend
//!
//! Non-UI logic behind the group-expense split screens.
//!
//! ```text
//! UI layer (split form)
//!     ↓ shared DTOs
//! IO layer (mappers)
//!     ↓
//! Domain layer (calculator, sessions, services)
//!     ↓ storage traits
//! Persistence (roster and split records, supplied by the app)
//! ```
//!
//! The crate logs through the `log` facade; the embedding app installs the logger.

pub mod domain;
pub mod io;
pub mod storage;

pub use domain::models::{
    CommittedSplit, ContributionMap, SplitError, SplitResult, SplitSessionError,
};
pub use domain::{
    BalanceFormatter, CommitSplitCommand, CommitSplitResult, ContributionInputError,
    ContributionInputParser, ExpenseSplitService, SessionState, SplitCalculator, SplitSession,
    SplitSessionService, PERCENTAGE_TOLERANCE,
};
