use shared::{Participant, ParticipantShare, SplitMode};

use crate::domain::balance_formatter::BalanceFormatter;

pub struct PreviewMapper;

impl PreviewMapper {
    /// Formatted row for one participant in the split preview
    ///
    /// The balance shown is the participant's running balance after taking on
    /// `share` of an expense.
    pub fn to_participant_share(
        participant: &Participant,
        mode: SplitMode,
        contribution: Option<f64>,
        share: f64,
        formatter: &BalanceFormatter,
    ) -> ParticipantShare {
        let balance_after = participant.balance - share;
        ParticipantShare {
            participant_id: participant.id.clone(),
            name: participant.name.clone(),
            raw_share: share,
            formatted_contribution: Self::format_contribution(mode, contribution, formatter),
            formatted_share: formatter.format_amount(share),
            formatted_balance: formatter.format_balance(balance_after),
            balance_type: formatter.classify(balance_after),
            balance_status: formatter.balance_status(balance_after).to_string(),
        }
    }

    fn format_contribution(
        mode: SplitMode,
        contribution: Option<f64>,
        formatter: &BalanceFormatter,
    ) -> Option<String> {
        let value = contribution?;
        match mode {
            SplitMode::Equal => None,
            SplitMode::Percentage => Some(formatter.format_percentage(value)),
            SplitMode::FixedAmount => Some(formatter.format_amount(value)),
        }
    }
}
