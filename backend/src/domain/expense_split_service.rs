//! Expense split service.
//!
//! Ties the split session to its collaborators: the group roster it starts
//! from and the record store that receives the confirmed split. The service
//! owns no state between calls; the session value carries everything.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{info, warn};
use shared::{
    CommitSplitRequest, CommitSplitResponse, SplitConfig, SplitMode, SplitPreview,
};
use uuid::Uuid;

use crate::domain::balance_formatter::BalanceFormatter;
use crate::domain::commands::{CommitSplitCommand, CommitSplitResult};
use crate::domain::split_session::{SplitSession, SplitSessionService};
use crate::io::mappers::{PreviewMapper, SplitRecordMapper};
use crate::storage::{ParticipantRoster, SplitRecordStore};

/// Service that runs split sessions against a roster and a record store
pub struct ExpenseSplitService<R: ParticipantRoster, S: SplitRecordStore> {
    roster: R,
    store: S,
    sessions: SplitSessionService,
    formatter: BalanceFormatter,
}

impl<R: ParticipantRoster, S: SplitRecordStore> ExpenseSplitService<R, S> {
    pub fn new(roster: R, store: S, config: &SplitConfig) -> Self {
        if config.enable_debug_logging {
            info!("Expense split service configured with {:?}", config);
        }
        Self {
            roster,
            store,
            sessions: SplitSessionService::with_config(config),
            formatter: BalanceFormatter::with_config(config),
        }
    }

    pub fn sessions(&self) -> &SplitSessionService {
        &self.sessions
    }

    pub fn formatter(&self) -> &BalanceFormatter {
        &self.formatter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a split session over the members of a group
    pub fn start_session(&self, group_id: &str, mode: SplitMode) -> Result<SplitSession> {
        let participants = self
            .roster
            .list_participants(group_id)
            .with_context(|| format!("Failed to load participants of group {}", group_id))?;
        info!(
            "Loaded {} participants for group {}",
            participants.len(),
            group_id
        );
        Ok(self.sessions.start(participants, mode))
    }

    /// Live preview of the split for an expense total
    ///
    /// A total that is not a finite number produces no shares and cannot be
    /// confirmed.
    pub fn preview(&self, session: &SplitSession, total_amount: f64) -> SplitPreview {
        if !total_amount.is_finite() {
            return SplitPreview {
                mode: session.mode(),
                is_valid: self.sessions.is_valid(session),
                can_confirm: false,
                shares: Vec::new(),
                formatted_total: String::new(),
                formatted_unallocated: String::new(),
                hint: Some("Enter a valid expense total".to_string()),
            };
        }

        let calculator = self.sessions.calculator();
        let result = calculator
            .compute_shares(
                session.mode(),
                session.contributions(),
                session.selected(),
                total_amount,
            )
            .ok();

        let shares = match &result {
            Some(result) => session
                .selected_participants()
                .map(|p| {
                    let share = result.share_for(&p.id).unwrap_or(0.0);
                    PreviewMapper::to_participant_share(
                        p,
                        session.mode(),
                        session.contributions().get(&p.id),
                        share,
                        &self.formatter,
                    )
                })
                .collect(),
            None => Vec::new(),
        };
        let unallocated = match &result {
            Some(result) => calculator.unallocated(result, total_amount),
            None => total_amount,
        };

        SplitPreview {
            mode: session.mode(),
            is_valid: self.sessions.is_valid(session),
            can_confirm: self.sessions.can_confirm(session),
            shares,
            formatted_total: self.formatter.format_amount(total_amount),
            formatted_unallocated: self.formatter.format_balance(unallocated),
            hint: self.sessions.hint(session),
        }
    }

    /// Confirm the session and store one record per selected participant
    ///
    /// Returns the closed session together with the stored result. On error
    /// nothing is stored and `session` is still open for editing. Committing
    /// an expense that already has stored records replaces them.
    pub fn commit(
        &self,
        session: &SplitSession,
        command: CommitSplitCommand,
    ) -> Result<(SplitSession, CommitSplitResult)> {
        if !command.total_amount.is_finite() {
            bail!(
                "Expense total for {} is not a finite amount",
                command.expense_id
            );
        }

        let (committed_session, committed) = self
            .sessions
            .confirm(session)
            .context("Split cannot be confirmed")?;

        let result = self
            .sessions
            .calculator()
            .compute_shares(
                committed.mode,
                &committed.contributions,
                &committed.selected,
                command.total_amount,
            )
            .context("Failed to compute split shares")?;
        let unallocated = self
            .sessions
            .calculator()
            .unallocated(&result, command.total_amount);
        if committed.mode == SplitMode::FixedAmount && self.formatter.round(unallocated) != 0.0 {
            warn!(
                "Fixed amounts for expense {} leave {} unallocated",
                command.expense_id,
                self.formatter.format_balance(unallocated)
            );
        }

        let created_at = Utc::now().to_rfc3339();
        let records =
            SplitRecordMapper::to_dto(&command.expense_id, &committed, &result, &created_at);
        self.store
            .store_split_records(&records)
            .with_context(|| format!("Failed to store split for expense {}", command.expense_id))?;

        info!(
            "Stored {} split records for expense {} ({})",
            records.len(),
            command.expense_id,
            committed.mode
        );
        Ok((
            committed_session,
            CommitSplitResult {
                committed,
                result,
                records,
                unallocated,
            },
        ))
    }

    /// Handle a commit request from the UI
    pub fn commit_request(
        &self,
        session: &SplitSession,
        request: CommitSplitRequest,
    ) -> Result<(SplitSession, CommitSplitResponse)> {
        let expense_id = request
            .expense_id
            .unwrap_or_else(|| format!("expense::{}", Uuid::new_v4()));
        let command = CommitSplitCommand {
            expense_id: expense_id.clone(),
            total_amount: request.total_amount,
        };

        let (committed_session, result) = self.commit(session, command)?;
        let success_message = format!(
            "Split {} between {} people",
            self.formatter.format_amount(request.total_amount),
            result.records.len()
        );
        Ok((
            committed_session,
            CommitSplitResponse {
                expense_id,
                records: result.records,
                unallocated: result.unallocated,
                success_message,
            },
        ))
    }

    /// Reopen a stored split as a new editing session
    ///
    /// The session starts from the current group roster; stored participants
    /// who have since left the group are dropped from the selection.
    pub fn edit_existing(&self, group_id: &str, expense_id: &str) -> Result<SplitSession> {
        let records = self
            .store
            .list_split_records(expense_id)
            .with_context(|| format!("Failed to load split for expense {}", expense_id))?;
        let committed = SplitRecordMapper::to_domain(&records)
            .with_context(|| format!("No consistent split stored for expense {}", expense_id))?;

        let mut session = self.start_session(group_id, committed.mode)?;
        for (participant_id, value) in committed.contributions.iter() {
            if session.roster().iter().any(|p| &p.id == participant_id) {
                session = self
                    .sessions
                    .set_contribution(&session, participant_id, *value)?;
            }
        }
        for participant_id in &committed.selected {
            match self.sessions.select_participant(&session, participant_id) {
                Ok(next) => session = next,
                Err(e) => warn!("Dropping participant from reopened split: {}", e),
            }
        }
        Ok(session)
    }
}
