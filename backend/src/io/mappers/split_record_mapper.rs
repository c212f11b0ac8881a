use std::collections::BTreeSet;

use shared::{SplitMode, SplitRecord};

use crate::domain::models::{CommittedSplit, ContributionMap, SplitResult};

pub struct SplitRecordMapper;

impl SplitRecordMapper {
    /// One record per selected participant, in participant id order
    pub fn to_dto(
        expense_id: &str,
        committed: &CommittedSplit,
        result: &SplitResult,
        created_at: &str,
    ) -> Vec<SplitRecord> {
        committed
            .selected
            .iter()
            .map(|participant_id| SplitRecord {
                id: SplitRecord::generate_id(expense_id, participant_id),
                expense_id: expense_id.to_string(),
                participant_id: participant_id.clone(),
                mode: committed.mode,
                contribution: Self::stored_contribution(committed, participant_id),
                share: result.share_for(participant_id).unwrap_or(0.0),
                created_at: created_at.to_string(),
            })
            .collect()
    }

    /// Rebuild the committed split from stored records so it can be edited again
    ///
    /// Returns `None` for an empty slice, for records that disagree on the
    /// expense or the split mode, and for records whose id does not name their
    /// own expense and participant.
    pub fn to_domain(records: &[SplitRecord]) -> Option<CommittedSplit> {
        let first = records.first()?;
        let consistent = records.iter().all(|r| {
            r.expense_id == first.expense_id && r.mode == first.mode && Self::id_matches(r)
        });
        if !consistent {
            return None;
        }

        let selected: BTreeSet<String> = records.iter().map(|r| r.participant_id.clone()).collect();
        let contributions: ContributionMap = match first.mode {
            SplitMode::Equal => ContributionMap::new(),
            SplitMode::Percentage | SplitMode::FixedAmount => records
                .iter()
                .map(|r| (r.participant_id.clone(), r.contribution))
                .collect(),
        };

        Some(CommittedSplit {
            selected,
            mode: first.mode,
            contributions,
        })
    }

    fn stored_contribution(committed: &CommittedSplit, participant_id: &str) -> f64 {
        match committed.mode {
            SplitMode::Equal => 0.0,
            SplitMode::Percentage | SplitMode::FixedAmount => {
                committed.contributions.value_or_zero(participant_id)
            }
        }
    }

    fn id_matches(record: &SplitRecord) -> bool {
        match SplitRecord::parse_id(&record.id) {
            Ok((expense_id, participant_id)) => {
                expense_id == record.expense_id && participant_id == record.participant_id
            }
            Err(_) => false,
        }
    }
}
