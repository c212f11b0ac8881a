//! Split editing sessions for group expenses.
//!
//! A session starts in `Editing` with the group roster, an empty selection and
//! a split mode. Every user edit (toggle a participant, switch mode, type a
//! value) goes through [`SplitSessionService`], which borrows the current
//! session and returns the next one. A rejected edit leaves the caller's
//! session as it was, and earlier sessions can be kept around for undo.
//!
//! ```text
//! Editing ──confirm (valid, non-empty)──▶ Committed
//!    │
//!    └──────────cancel──────────────────▶ Discarded
//! ```
//!
//! Switching mode keeps every contribution already entered, so going from
//! `Percentage` to `FixedAmount` and back restores the earlier percentages.

use std::collections::BTreeSet;

use log::{debug, info, warn};
use shared::{Participant, SplitConfig, SplitMode};

use crate::domain::contribution_input::ContributionInputParser;
use crate::domain::models::{CommittedSplit, ContributionMap, SplitSessionError};
use crate::domain::split_calculator::SplitCalculator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Editing,
    Committed,
    Discarded,
}

impl SessionState {
    fn closed_label(&self) -> &'static str {
        match self {
            SessionState::Editing => "opened",
            SessionState::Committed => "confirmed",
            SessionState::Discarded => "discarded",
        }
    }
}

/// State of one split-editing session
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSession {
    roster: Vec<Participant>,
    selected: BTreeSet<String>,
    mode: SplitMode,
    contributions: ContributionMap,
    state: SessionState,
}

impl SplitSession {
    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, participant_id: &str) -> bool {
        self.selected.contains(participant_id)
    }

    pub fn mode(&self) -> SplitMode {
        self.mode
    }

    pub fn contributions(&self) -> &ContributionMap {
        &self.contributions
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Selected participants in roster order
    pub fn selected_participants(&self) -> impl Iterator<Item = &Participant> {
        self.roster.iter().filter(move |p| self.selected.contains(&p.id))
    }

    fn in_roster(&self, participant_id: &str) -> bool {
        self.roster.iter().any(|p| p.id == participant_id)
    }
}

/// Service that drives split sessions through their lifecycle
#[derive(Debug, Clone)]
pub struct SplitSessionService {
    calculator: SplitCalculator,
    parser: ContributionInputParser,
}

impl SplitSessionService {
    pub fn new() -> Self {
        Self::with_config(&SplitConfig::default())
    }

    pub fn with_config(config: &SplitConfig) -> Self {
        Self {
            calculator: SplitCalculator::with_config(config),
            parser: ContributionInputParser::with_config(config),
        }
    }

    pub fn calculator(&self) -> &SplitCalculator {
        &self.calculator
    }

    /// Start editing a split over the given roster
    ///
    /// Duplicate ids in the roster keep their first occurrence.
    pub fn start(&self, roster: Vec<Participant>, mode: SplitMode) -> SplitSession {
        let mut seen = BTreeSet::new();
        let roster: Vec<Participant> = roster
            .into_iter()
            .filter(|p| {
                let first = seen.insert(p.id.clone());
                if !first {
                    warn!("Ignoring duplicate participant {} in roster", p.id);
                }
                first
            })
            .collect();

        info!(
            "Starting {} split session with {} participants",
            mode,
            roster.len()
        );
        SplitSession {
            roster,
            selected: BTreeSet::new(),
            mode,
            contributions: ContributionMap::new(),
            state: SessionState::Editing,
        }
    }

    /// Flip the selection of one participant
    pub fn toggle_participant(
        &self,
        session: &SplitSession,
        participant_id: &str,
    ) -> Result<SplitSession, SplitSessionError> {
        if session.is_selected(participant_id) {
            self.deselect_participant(session, participant_id)
        } else {
            self.select_participant(session, participant_id)
        }
    }

    pub fn select_participant(
        &self,
        session: &SplitSession,
        participant_id: &str,
    ) -> Result<SplitSession, SplitSessionError> {
        Self::ensure_editing(session)?;
        Self::ensure_in_roster(session, participant_id)?;
        let mut next = session.clone();
        next.selected.insert(participant_id.to_string());
        debug!("Selected participant {}", participant_id);
        Ok(next)
    }

    pub fn deselect_participant(
        &self,
        session: &SplitSession,
        participant_id: &str,
    ) -> Result<SplitSession, SplitSessionError> {
        Self::ensure_editing(session)?;
        Self::ensure_in_roster(session, participant_id)?;
        let mut next = session.clone();
        next.selected.remove(participant_id);
        debug!("Deselected participant {}", participant_id);
        Ok(next)
    }

    /// Select every participant in the roster
    pub fn select_all(&self, session: &SplitSession) -> Result<SplitSession, SplitSessionError> {
        Self::ensure_editing(session)?;
        let mut next = session.clone();
        next.selected = session.roster.iter().map(|p| p.id.clone()).collect();
        Ok(next)
    }

    /// Switch split mode; contributions already entered are kept
    pub fn set_mode(
        &self,
        session: &SplitSession,
        mode: SplitMode,
    ) -> Result<SplitSession, SplitSessionError> {
        Self::ensure_editing(session)?;
        debug!("Switching split mode from {} to {}", session.mode, mode);
        let mut next = session.clone();
        next.mode = mode;
        Ok(next)
    }

    pub fn set_contribution(
        &self,
        session: &SplitSession,
        participant_id: &str,
        value: f64,
    ) -> Result<SplitSession, SplitSessionError> {
        Self::ensure_editing(session)?;
        Self::ensure_in_roster(session, participant_id)?;
        let mut next = session.clone();
        next.contributions = session.contributions.with_contribution(participant_id, value);
        Ok(next)
    }

    pub fn clear_contribution(
        &self,
        session: &SplitSession,
        participant_id: &str,
    ) -> Result<SplitSession, SplitSessionError> {
        Self::ensure_editing(session)?;
        Self::ensure_in_roster(session, participant_id)?;
        let mut next = session.clone();
        next.contributions = session.contributions.without(participant_id);
        Ok(next)
    }

    /// Apply the raw text of a contribution field; an empty field clears the entry
    pub fn set_contribution_input(
        &self,
        session: &SplitSession,
        participant_id: &str,
        input: &str,
    ) -> Result<SplitSession, SplitSessionError> {
        Self::ensure_editing(session)?;
        match self.parser.parse(input)? {
            Some(value) => self.set_contribution(session, participant_id, value),
            None => self.clear_contribution(session, participant_id),
        }
    }

    /// Whether the current configuration passes split validation
    pub fn is_valid(&self, session: &SplitSession) -> bool {
        self.calculator.validate(session.mode, &session.contributions, &session.selected)
    }

    /// Whether the confirm action should be enabled
    pub fn can_confirm(&self, session: &SplitSession) -> bool {
        session.state == SessionState::Editing
            && !session.selected.is_empty()
            && self.is_valid(session)
    }

    /// Hint shown next to a disabled confirm action
    pub fn hint(&self, session: &SplitSession) -> Option<String> {
        if session.state != SessionState::Editing || self.can_confirm(session) {
            return None;
        }
        if session.selected.is_empty() {
            return Some("Select at least one participant".to_string());
        }
        if !session.mode.requires_contributions() {
            return None;
        }
        let hint = match session.mode {
            SplitMode::Percentage => {
                let sum = session.contributions.sum_over(&session.selected);
                format!("Percentages add up to {:.2}%, they must add up to 100%", sum)
            }
            _ => "Enter an amount greater than 0 for every participant".to_string(),
        };
        Some(hint)
    }

    /// Confirm the split
    ///
    /// Returns the committed session and the split it carries; the session
    /// passed in stays in `Editing`.
    pub fn confirm(
        &self,
        session: &SplitSession,
    ) -> Result<(SplitSession, CommittedSplit), SplitSessionError> {
        Self::ensure_editing(session)?;
        if session.selected.is_empty() {
            return Err(SplitSessionError::EmptySelection);
        }
        if !self.is_valid(session) {
            return Err(SplitSessionError::InvalidSplit(session.mode));
        }

        info!(
            "Confirmed {} split across {} participants",
            session.mode,
            session.selected.len()
        );
        let mut committed_session = session.clone();
        committed_session.state = SessionState::Committed;
        let committed = CommittedSplit {
            selected: session.selected.clone(),
            mode: session.mode,
            contributions: session.contributions.clone(),
        };
        Ok((committed_session, committed))
    }

    /// Discard the session without producing a split
    pub fn cancel(&self, session: &SplitSession) -> Result<SplitSession, SplitSessionError> {
        Self::ensure_editing(session)?;
        info!("Discarded split session");
        let mut next = session.clone();
        next.state = SessionState::Discarded;
        Ok(next)
    }

    fn ensure_editing(session: &SplitSession) -> Result<(), SplitSessionError> {
        match session.state {
            SessionState::Editing => Ok(()),
            closed => Err(SplitSessionError::SessionClosed(closed.closed_label())),
        }
    }

    fn ensure_in_roster(
        session: &SplitSession,
        participant_id: &str,
    ) -> Result<(), SplitSessionError> {
        if session.in_roster(participant_id) {
            Ok(())
        } else {
            Err(SplitSessionError::UnknownParticipant(
                participant_id.to_string(),
            ))
        }
    }
}

impl Default for SplitSessionService {
    fn default() -> Self {
        Self::new()
    }
}
