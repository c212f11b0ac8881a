//! In-memory storage implementations.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{anyhow, bail, Result};
use log::debug;
use shared::{Participant, SplitRecord};

use super::traits::{ParticipantRoster, SplitRecordStore};

/// Group rosters held in memory
#[derive(Debug, Default)]
pub struct InMemoryRoster {
    groups: RwLock<HashMap<String, Vec<Participant>>>,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the members of a group
    pub fn set_group(&self, group_id: &str, participants: Vec<Participant>) -> Result<()> {
        let mut groups = self
            .groups
            .write()
            .map_err(|_| anyhow!("Roster lock poisoned"))?;
        groups.insert(group_id.to_string(), participants);
        Ok(())
    }
}

impl ParticipantRoster for InMemoryRoster {
    fn list_participants(&self, group_id: &str) -> Result<Vec<Participant>> {
        let groups = self
            .groups
            .read()
            .map_err(|_| anyhow!("Roster lock poisoned"))?;
        groups
            .get(group_id)
            .cloned()
            .ok_or_else(|| anyhow!("Group {} not found", group_id))
    }
}

/// Split records held in memory, keyed by expense
#[derive(Debug, Default)]
pub struct InMemorySplitRecordStore {
    records: RwLock<HashMap<String, Vec<SplitRecord>>>,
}

impl InMemorySplitRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SplitRecordStore for InMemorySplitRecordStore {
    fn store_split_records(&self, records: &[SplitRecord]) -> Result<()> {
        let Some(first) = records.first() else {
            return Ok(());
        };
        if records.iter().any(|r| r.expense_id != first.expense_id) {
            bail!("All split records of one call must belong to the same expense");
        }

        let mut stored = self
            .records
            .write()
            .map_err(|_| anyhow!("Split record lock poisoned"))?;
        let replaced = stored.insert(first.expense_id.clone(), records.to_vec());
        match replaced {
            Some(previous) => debug!(
                "Replaced {} split records of expense {} with {}",
                previous.len(),
                first.expense_id,
                records.len()
            ),
            None => debug!(
                "Stored {} split records for expense {}",
                records.len(),
                first.expense_id
            ),
        }
        Ok(())
    }

    fn list_split_records(&self, expense_id: &str) -> Result<Vec<SplitRecord>> {
        let stored = self
            .records
            .read()
            .map_err(|_| anyhow!("Split record lock poisoned"))?;
        Ok(stored.get(expense_id).cloned().unwrap_or_default())
    }
}
