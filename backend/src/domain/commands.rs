//! Domain-level command and result types.
//! The `shared` request/response DTOs are mapped to and from these by the
//! expense split service.

use shared::SplitRecord;

use crate::domain::models::{CommittedSplit, SplitResult};

/// Input for confirming a split session against an expense.
#[derive(Debug, Clone)]
pub struct CommitSplitCommand {
    pub expense_id: String,
    pub total_amount: f64,
}

/// Result of a confirmed and stored split.
#[derive(Debug, Clone)]
pub struct CommitSplitResult {
    pub committed: CommittedSplit,
    pub result: SplitResult,
    pub records: Vec<SplitRecord>,
    pub unallocated: f64,
}
