use serde::{Deserialize, Serialize};
use std::fmt;

/// A person eligible to be allocated a share of a group expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier within the group roster
    pub id: String,
    /// Display name shown in the split form
    pub name: String,
    /// Running balance (positive = owed money, negative = owes money)
    pub balance: f64,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, balance: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
        }
    }
}

/// Rule used to divide an expense among the selected participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Everyone pays the same share
    Equal,
    /// Each contribution is a percentage of the total (must add up to 100)
    Percentage,
    /// Each contribution is an absolute currency amount
    FixedAmount,
}

impl SplitMode {
    pub fn label(&self) -> &'static str {
        match self {
            SplitMode::Equal => "Equal",
            SplitMode::Percentage => "Percentage",
            SplitMode::FixedAmount => "Fixed amount",
        }
    }

    /// Whether the mode needs a per-participant value entered by the user
    pub fn requires_contributions(&self) -> bool {
        !matches!(self, SplitMode::Equal)
    }
}

impl Default for SplitMode {
    fn default() -> Self {
        SplitMode::Equal
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Type of amount for styling and display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AmountType {
    Positive,
    Negative,
    Zero,
}

/// Currency and formatting configuration injected by the enclosing screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SplitConfig {
    pub currency_symbol: String,
    pub decimal_places: u8,
    /// Absolute tolerance for the percentage-sum check
    pub percentage_tolerance: f64,
    pub max_contribution: f64,
    pub enable_debug_logging: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            decimal_places: 2,
            percentage_tolerance: 0.01,
            max_contribution: 1_000_000.0,
            enable_debug_logging: false,
        }
    }
}

/// One persisted share of an expense, handed to the persistence layer
///
/// Record ID in format: "split::<expense_id>::<participant_id>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRecord {
    pub id: String,
    pub expense_id: String,
    pub participant_id: String,
    pub mode: SplitMode,
    /// Raw value the user entered (percentage points or amount); 0 for equal splits
    pub contribution: f64,
    /// Currency amount this participant owes for the expense
    pub share: f64,
    /// RFC 3339 timestamp
    pub created_at: String,
}

impl SplitRecord {
    /// Generate a split record ID from the expense and participant
    pub fn generate_id(expense_id: &str, participant_id: &str) -> String {
        format!("split::{}::{}", expense_id, participant_id)
    }

    /// Parse a split record ID into (expense_id, participant_id)
    pub fn parse_id(id: &str) -> Result<(String, String), SplitRecordIdError> {
        let parts: Vec<&str> = id.splitn(3, "::").collect();
        if parts.len() != 3 || parts[0] != "split" {
            return Err(SplitRecordIdError::InvalidFormat);
        }
        if parts[1].is_empty() || parts[2].is_empty() {
            return Err(SplitRecordIdError::MissingComponent);
        }
        Ok((parts[1].to_string(), parts[2].to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SplitRecordIdError {
    InvalidFormat,
    MissingComponent,
}

impl fmt::Display for SplitRecordIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitRecordIdError::InvalidFormat => write!(f, "Invalid split record ID format"),
            SplitRecordIdError::MissingComponent => {
                write!(f, "Split record ID is missing a component")
            }
        }
    }
}

impl std::error::Error for SplitRecordIdError {}

/// Request to confirm a split for an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitSplitRequest {
    /// Expense being split; a new ID is generated when not provided
    pub expense_id: Option<String>,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitSplitResponse {
    pub expense_id: String,
    pub records: Vec<SplitRecord>,
    /// Total minus the sum of shares (non-zero only for unreconciled fixed amounts)
    pub unallocated: f64,
    pub success_message: String,
}

/// A formatted share for one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantShare {
    pub participant_id: String,
    pub name: String,
    pub raw_share: f64,
    /// Entered value formatted for its mode ("60.00%", "$12.40"); `None` for equal splits
    pub formatted_contribution: Option<String>,
    pub formatted_share: String,
    pub formatted_balance: String,
    pub balance_type: AmountType,
    /// "gets back", "owes" or "settled up" after the share is applied
    pub balance_status: String,
}

/// Live view of the split form shown while editing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitPreview {
    pub mode: SplitMode,
    pub is_valid: bool,
    pub can_confirm: bool,
    pub shares: Vec<ParticipantShare>,
    pub formatted_total: String,
    pub formatted_unallocated: String,
    /// Hint explaining why the split cannot be confirmed yet
    pub hint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_split_record_id() {
        let id = SplitRecord::generate_id("expense::42", "alice");
        assert_eq!(id, "split::expense::42::alice");
    }

    #[test]
    fn test_parse_split_record_id() {
        let (expense_id, participant_id) =
            SplitRecord::parse_id("split::dinner::bob").unwrap();
        assert_eq!(expense_id, "dinner");
        assert_eq!(participant_id, "bob");

        assert_eq!(
            SplitRecord::parse_id("record::dinner::bob"),
            Err(SplitRecordIdError::InvalidFormat)
        );
        assert_eq!(
            SplitRecord::parse_id("split::dinner"),
            Err(SplitRecordIdError::InvalidFormat)
        );
        assert_eq!(
            SplitRecord::parse_id("split::::bob"),
            Err(SplitRecordIdError::MissingComponent)
        );
    }

    #[test]
    fn test_split_mode_serialization() {
        let json = serde_json::to_string(&SplitMode::FixedAmount).unwrap();
        assert_eq!(json, "\"fixed_amount\"");

        let mode: SplitMode = serde_json::from_str("\"percentage\"").unwrap();
        assert_eq!(mode, SplitMode::Percentage);
    }

    #[test]
    fn test_split_mode_requires_contributions() {
        assert!(!SplitMode::Equal.requires_contributions());
        assert!(SplitMode::Percentage.requires_contributions());
        assert!(SplitMode::FixedAmount.requires_contributions());
        assert_eq!(SplitMode::default(), SplitMode::Equal);
    }

    #[test]
    fn test_split_config_defaults_fill_missing_fields() {
        let config: SplitConfig = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.decimal_places, 2);
        assert_eq!(config.percentage_tolerance, 0.01);
    }
}
