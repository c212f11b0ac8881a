use std::collections::{BTreeMap, BTreeSet};

use shared::SplitMode;

use super::contribution_map::ContributionMap;

/// Outcome of dividing an expense among the selected participants
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    pub mode: SplitMode,
    pub is_valid: bool,
    /// Share per selected participant, in currency
    pub shares: BTreeMap<String, f64>,
}

impl SplitResult {
    pub fn share_for(&self, participant_id: &str) -> Option<f64> {
        self.shares.get(participant_id).copied()
    }

    pub fn total_allocated(&self) -> f64 {
        self.shares.values().sum()
    }
}

/// Split configuration handed over when the user confirms
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedSplit {
    pub selected: BTreeSet<String>,
    pub mode: SplitMode,
    pub contributions: ContributionMap,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitError {
    #[error("Cannot compute shares without any selected participant")]
    EmptySelection,
    #[error("Total amount must be a finite number")]
    NonFiniteTotal,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitSessionError {
    #[error("Participant {0} is not part of this group")]
    UnknownParticipant(String),
    #[error("Select at least one participant")]
    EmptySelection,
    #[error("The {0} split is not valid yet")]
    InvalidSplit(SplitMode),
    #[error("This split has already been {0}")]
    SessionClosed(&'static str),
    #[error(transparent)]
    Input(#[from] crate::domain::contribution_input::ContributionInputError),
}
