//! Parsing of the per-participant text fields in the split form.
//!
//! The form hands over whatever the user typed ("$12.50", "33.3%", "1,200").
//! This module turns it into a contribution value. Whether the value makes the
//! split valid is left to the split calculator.

use shared::SplitConfig;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContributionInputError {
    #[error("Invalid number format: {0}")]
    InvalidFormat(String),
    #[error("Value must be a finite number")]
    NotFinite,
    #[error("Value is too large. Maximum is {0}")]
    TooLarge(f64),
}

/// Parser for contribution fields
#[derive(Debug, Clone)]
pub struct ContributionInputParser {
    currency_symbol: String,
    max_contribution: f64,
}

impl ContributionInputParser {
    pub fn new() -> Self {
        Self::with_config(&SplitConfig::default())
    }

    pub fn with_config(config: &SplitConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            max_contribution: config.max_contribution,
        }
    }

    /// Parse a field value
    ///
    /// Returns `Ok(None)` for an empty field, which clears the entry.
    pub fn parse(&self, input: &str) -> Result<Option<f64>, ContributionInputError> {
        let mut cleaned = input.trim().to_string();
        if !self.currency_symbol.is_empty() {
            cleaned = cleaned.replace(&self.currency_symbol, "");
        }
        let cleaned = cleaned.replace(['%', ',', ' '], "");

        if cleaned.is_empty() {
            return Ok(None);
        }

        let value = cleaned
            .parse::<f64>()
            .map_err(|e| ContributionInputError::InvalidFormat(e.to_string()))?;

        if !value.is_finite() {
            return Err(ContributionInputError::NotFinite);
        }
        if value.abs() > self.max_contribution {
            return Err(ContributionInputError::TooLarge(self.max_contribution));
        }

        Ok(Some(value))
    }
}

impl Default for ContributionInputParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_decorated_values() {
        let parser = ContributionInputParser::new();

        assert_eq!(parser.parse("10.50").unwrap(), Some(10.50));
        assert_eq!(parser.parse("$10.50").unwrap(), Some(10.50));
        assert_eq!(parser.parse(" $1,234.56 ").unwrap(), Some(1234.56));
        assert_eq!(parser.parse("33.5%").unwrap(), Some(33.5));
        assert_eq!(parser.parse("5").unwrap(), Some(5.0));
    }

    #[test]
    fn test_parse_empty_clears_entry() {
        let parser = ContributionInputParser::new();

        assert_eq!(parser.parse("").unwrap(), None);
        assert_eq!(parser.parse("   ").unwrap(), None);
        assert_eq!(parser.parse("$").unwrap(), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let parser = ContributionInputParser::new();

        assert!(matches!(parser.parse("abc"), Err(ContributionInputError::InvalidFormat(_))));
        assert_eq!(parser.parse("inf"), Err(ContributionInputError::NotFinite));
        assert_eq!(parser.parse("NaN"), Err(ContributionInputError::NotFinite));
        assert_eq!(parser.parse("2000000"), Err(ContributionInputError::TooLarge(1_000_000.0)));
    }

    #[test]
    fn test_negative_values_are_left_to_validation() {
        let parser = ContributionInputParser::new();
        assert_eq!(parser.parse("-5").unwrap(), Some(-5.0));
    }

    #[test]
    fn test_custom_currency_symbol() {
        let config = SplitConfig {
            currency_symbol: "€".to_string(),
            ..SplitConfig::default()
        };
        let parser = ContributionInputParser::with_config(&config);

        assert_eq!(parser.parse("€7.25").unwrap(), Some(7.25));
        assert!(parser.parse("$7.25").is_err());
    }
}
