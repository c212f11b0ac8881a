//! Balance and share formatting for the split screens.
//!
//! Currency symbol and precision come from the [`SplitConfig`] handed in by
//! the enclosing screen instead of a process-wide settings store.
//!
//! - Positive balances (the group owes the participant) render as `+$12.50`
//! - Negative balances (the participant owes the group) render as `-$3.00`
//! - Anything that rounds to zero renders as `$0.00` and classifies as `Zero`

use shared::{AmountType, SplitConfig};

#[derive(Debug, Clone)]
pub struct BalanceFormatter {
    currency_symbol: String,
    decimal_places: usize,
}

impl BalanceFormatter {
    pub fn new() -> Self {
        Self::with_config(&SplitConfig::default())
    }

    pub fn with_config(config: &SplitConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            decimal_places: config.decimal_places as usize,
        }
    }

    /// Round to the configured number of decimal places
    pub fn round(&self, amount: f64) -> f64 {
        let factor = 10f64.powi(self.decimal_places as i32);
        (amount * factor).round() / factor
    }

    /// Classify amount type for styling purposes
    pub fn classify(&self, amount: f64) -> AmountType {
        let rounded = self.round(amount);
        if rounded > 0.0 {
            AmountType::Positive
        } else if rounded < 0.0 {
            AmountType::Negative
        } else {
            AmountType::Zero
        }
    }

    /// Format an unsigned amount, e.g. `$12.50`
    pub fn format_amount(&self, amount: f64) -> String {
        format!(
            "{}{:.*}",
            self.currency_symbol,
            self.decimal_places,
            self.round(amount).abs()
        )
    }

    /// Format a balance with an explicit sign
    pub fn format_balance(&self, balance: f64) -> String {
        let formatted = self.format_amount(balance);
        match self.classify(balance) {
            AmountType::Positive => format!("+{}", formatted),
            AmountType::Negative => format!("-{}", formatted),
            AmountType::Zero => formatted,
        }
    }

    /// Format a percentage contribution, e.g. `33.33%`
    pub fn format_percentage(&self, value: f64) -> String {
        format!("{:.*}%", self.decimal_places, value)
    }

    /// Short status text for a participant's balance
    pub fn balance_status(&self, balance: f64) -> &'static str {
        match self.classify(balance) {
            AmountType::Positive => "gets back",
            AmountType::Negative => "owes",
            AmountType::Zero => "settled up",
        }
    }
}

impl Default for BalanceFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_balance_signs() {
        let formatter = BalanceFormatter::new();

        assert_eq!(formatter.format_balance(12.5), "+$12.50");
        assert_eq!(formatter.format_balance(-3.0), "-$3.00");
        assert_eq!(formatter.format_balance(0.0), "$0.00");
    }

    #[test]
    fn test_near_zero_is_not_signed() {
        let formatter = BalanceFormatter::new();

        assert_eq!(formatter.classify(-0.001), AmountType::Zero);
        assert_eq!(formatter.format_balance(-0.001), "$0.00");
        assert_eq!(formatter.classify(0.006), AmountType::Positive);
    }

    #[test]
    fn test_format_amount_and_percentage() {
        let formatter = BalanceFormatter::new();

        assert_eq!(formatter.format_amount(33.333333), "$33.33");
        assert_eq!(formatter.format_amount(-7.5), "$7.50");
        assert_eq!(formatter.format_percentage(60.0), "60.00%");
    }

    #[test]
    fn test_injected_currency_configuration() {
        let config = SplitConfig {
            currency_symbol: "¥".to_string(),
            decimal_places: 0,
            ..SplitConfig::default()
        };
        let formatter = BalanceFormatter::with_config(&config);

        assert_eq!(formatter.format_balance(1500.4), "+¥1500");
        assert_eq!(formatter.format_balance(-250.0), "-¥250");
    }

    #[test]
    fn test_balance_status() {
        let formatter = BalanceFormatter::new();

        assert_eq!(formatter.balance_status(4.0), "gets back");
        assert_eq!(formatter.balance_status(-4.0), "owes");
        assert_eq!(formatter.balance_status(0.0), "settled up");
    }
}
