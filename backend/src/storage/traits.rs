//! # Storage Traits
//!
//! Storage abstractions the split domain depends on. Implementations can be
//! backed by any database without changing the domain layer.

use anyhow::Result;
use shared::{Participant, SplitRecord};

/// Read access to the members of a group
pub trait ParticipantRoster: Send + Sync {
    /// List the participants of a group in display order
    fn list_participants(&self, group_id: &str) -> Result<Vec<Participant>>;
}

/// Persistence for confirmed splits
pub trait SplitRecordStore: Send + Sync {
    /// Store all records of one expense, replacing any records already stored
    /// for it. Either the whole set is replaced or nothing changes.
    fn store_split_records(&self, records: &[SplitRecord]) -> Result<()>;

    /// List the records stored for an expense
    fn list_split_records(&self, expense_id: &str) -> Result<Vec<SplitRecord>>;
}
